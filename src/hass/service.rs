use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use super::client::{HassApi, Preferences};
use super::entity::ActionWord;

/// Body of a service call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceData {
    pub entity_id: String,
}

/// Everything needed to replay a state change after the query has finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    pub endpoint: String,
    pub service_data: ServiceData,
    /// Value of the `Authorization` header.
    pub authorization: String,
}

impl ActionDescriptor {
    pub fn new(prefs: &Preferences, word: ActionWord, entity_id: &str) -> Self {
        let (domain, service) = word.service();
        Self {
            endpoint: format!("{}/api/services/{domain}/{service}", prefs.base_url()),
            service_data: ServiceData {
                entity_id: entity_id.to_string(),
            },
            authorization: prefs.authorization(),
        }
    }

    pub fn body(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.service_data)?)
    }
}

/// Perform the service call described by `descriptor`.
pub fn dispatch(api: &dyn HassApi, descriptor: &ActionDescriptor) -> Result<()> {
    tracing::info!(
        endpoint = %descriptor.endpoint,
        entity_id = %descriptor.service_data.entity_id,
        "calling Home Assistant service"
    );
    api.call_service(descriptor)
}

/// Runs dispatches off the caller's thread.
#[derive(Clone)]
pub struct Dispatcher {
    api: Arc<dyn HassApi>,
}

impl Dispatcher {
    pub fn new(api: Arc<dyn HassApi>) -> Self {
        Self { api }
    }

    /// Fire and forget. Failures are logged and otherwise dropped.
    pub fn spawn(&self, descriptor: ActionDescriptor) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        thread::spawn(move || {
            if let Err(e) = dispatch(api.as_ref(), &descriptor) {
                tracing::warn!(
                    endpoint = %descriptor.endpoint,
                    "service call failed: {e:#}"
                );
            }
        })
    }
}
