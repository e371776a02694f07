use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::actions::ResultItem;
use crate::common::strip_keyword;
use crate::hass::{ActionDescriptor, Dispatcher, HassApi, HttpApi, Preferences};
use crate::plugin::Plugin;
use crate::resolver::{self, DEFAULT_MAX_RESULTS};
use crate::settings::Settings;

pub const DEFAULT_KEYWORD: &str = "ha";

/// Lists Home Assistant entities and toggles them (prefix: `ha`).
pub struct HomeAssistantPlugin {
    api: Arc<dyn HassApi>,
    dispatcher: Dispatcher,
    prefs: Preferences,
    keyword: String,
    max_results: usize,
}

impl HomeAssistantPlugin {
    pub fn new(api: Arc<dyn HassApi>, prefs: Preferences) -> Self {
        Self {
            dispatcher: Dispatcher::new(Arc::clone(&api)),
            api,
            prefs,
            keyword: DEFAULT_KEYWORD.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Build the plugin with an HTTP client configured from `settings`.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let api = HttpApi::new(Duration::from_secs(settings.request_timeout_secs))?;
        Ok(Self::new(Arc::new(api), settings.preferences())
            .with_keyword(&settings.keyword)
            .with_max_results(settings.max_results))
    }

    pub fn with_keyword(mut self, keyword: &str) -> Self {
        self.keyword = keyword.trim().to_string();
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Fetch and resolve the text typed after the keyword.
    pub fn query(&self, argument: &str) -> Vec<ResultItem> {
        let prepared = match resolver::prepare(argument, &self.prefs) {
            Ok(p) => p,
            Err(item) => return vec![item],
        };
        match self.api.fetch_states(&self.prefs) {
            Ok(snapshot) => {
                tracing::debug!(entities = snapshot.len(), "fetched snapshot");
                prepared.resolve(&snapshot, self.max_results)
            }
            Err(e) => {
                tracing::warn!("failed to fetch Home Assistant states: {e:#}");
                vec![resolver::failure_item(&e)]
            }
        }
    }

    /// Dispatch a selected action without blocking the caller.
    pub fn on_select(&self, descriptor: ActionDescriptor) -> JoinHandle<()> {
        self.dispatcher.spawn(descriptor)
    }
}

impl Plugin for HomeAssistantPlugin {
    fn search(&self, query: &str) -> Vec<ResultItem> {
        if self.keyword.is_empty() {
            return self.query(query);
        }
        match strip_keyword(query, &self.keyword) {
            Some(argument) => self.query(argument),
            None => Vec::new(),
        }
    }

    fn name(&self) -> &str {
        "home_assistant"
    }

    fn description(&self) -> &str {
        "Show and toggle Home Assistant entities (prefix: `ha`)"
    }
}
