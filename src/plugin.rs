use crate::actions::ResultItem;

pub trait Plugin: Send + Sync {
    /// Return result items based on the query string
    fn search(&self, query: &str) -> Vec<ResultItem>;
    /// Name of the plugin
    fn name(&self) -> &str;
    /// Short human readable description
    fn description(&self) -> &str;
}

/// A manager that holds plugins
#[derive(Default)]
pub struct PluginManager {
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginManager {
    pub fn new() -> Self {
        Self { plugins: Vec::new() }
    }

    pub fn register(&mut self, plugin: Box<dyn Plugin>) {
        tracing::debug!(plugin = plugin.name(), "registered plugin");
        self.plugins.push(plugin);
    }

    pub fn plugins(&self) -> impl Iterator<Item = &dyn Plugin> {
        self.plugins.iter().map(|p| p.as_ref())
    }

    pub fn search(&self, query: &str) -> Vec<ResultItem> {
        let mut items = Vec::new();
        for p in &self.plugins {
            items.extend(p.search(query));
        }
        items
    }
}
