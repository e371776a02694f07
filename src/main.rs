use anyhow::Context;
use clap::Parser;
use hass_launcher::launcher::{self, Launched};
use hass_launcher::logging;
use hass_launcher::plugins::home_assistant::HomeAssistantPlugin;
use hass_launcher::settings::Settings;
use std::path::PathBuf;

/// Query Home Assistant entities and toggle them from the command line
#[derive(Parser, Debug)]
#[command(name = "hass_launcher")]
struct Cli {
    /// Settings file (defaults to the platform config dir)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Launch the N-th listed result (1-based)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    run: Option<u64>,

    /// Query text, e.g. `on kitchen`
    query: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let path = cli.config.unwrap_or_else(Settings::default_path);
    let mut settings = Settings::load(&path.to_string_lossy())
        .with_context(|| format!("failed to load settings from {}", path.display()))?;
    settings.apply_env_overrides();
    logging::init(settings.debug_logging, settings.log_file.clone().map(PathBuf::from));

    let plugin = HomeAssistantPlugin::from_settings(&settings)?;
    // The command line stands in for the launcher, so no keyword is expected.
    let items = plugin.query(&cli.query.join(" "));
    for (i, item) in items.iter().enumerate() {
        match &item.description {
            Some(desc) => println!("{:>2}. [{}] {} - {}", i + 1, item.icon.path(), item.name, desc),
            None => println!("{:>2}. [{}] {}", i + 1, item.icon.path(), item.name),
        }
    }

    if let Some(n) = cli.run {
        let item = usize::try_from(n - 1)
            .ok()
            .and_then(|i| items.get(i))
            .with_context(|| format!("no result at index {n}"))?;
        let launched = launcher::launch_action(item, &plugin)?;
        if matches!(launched, Launched::Copied) {
            println!("copied to clipboard");
        }
        launched.wait();
    }

    Ok(())
}
