use std::thread::JoinHandle;

use crate::actions::{clipboard, OnSelect, ResultItem};
use crate::plugins::home_assistant::HomeAssistantPlugin;

/// Result of launching an item.
#[derive(Debug)]
pub enum Launched {
    /// Nothing left to do; the host hides its window.
    Hidden,
    /// Text was placed on the clipboard.
    Copied,
    /// A service call is running in the background.
    Dispatched(JoinHandle<()>),
}

impl Launched {
    /// Whether the host should keep its window open. Never for this plugin.
    pub fn keep_open(&self) -> bool {
        false
    }

    /// Block until a background service call has finished.
    ///
    /// A panicked dispatch thread is logged rather than propagated.
    pub fn wait(self) {
        if let Launched::Dispatched(handle) = self {
            if handle.join().is_err() {
                tracing::warn!("dispatch thread panicked");
            }
        }
    }
}

/// Launch a [`ResultItem`] by interpreting its [`OnSelect`].
///
/// Returns an error only if the clipboard could not be written. Service
/// calls are fire and forget and report failures through the log.
pub fn launch_action(item: &ResultItem, plugin: &HomeAssistantPlugin) -> anyhow::Result<Launched> {
    match &item.on_select {
        OnSelect::HideWindow => Ok(Launched::Hidden),
        OnSelect::CopyToClipboard { text } => {
            clipboard::set_text(text)?;
            Ok(Launched::Copied)
        }
        OnSelect::Invoke { descriptor } => {
            Ok(Launched::Dispatched(plugin.on_select(descriptor.clone())))
        }
    }
}
