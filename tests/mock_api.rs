#![allow(dead_code)]

use hass_launcher::hass::{ActionDescriptor, Entity, HassApi, Preferences};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

/// In-memory [`HassApi`] that records every call.
#[derive(Default)]
pub struct MockApi {
    pub entities: Vec<Entity>,
    pub fail_fetch: Option<String>,
    pub fail_calls: bool,
    pub fetches: AtomicUsize,
    pub calls: Mutex<Vec<ActionDescriptor>>,
}

impl MockApi {
    pub fn with_entities(entities: Vec<Entity>) -> Self {
        Self {
            entities,
            ..Default::default()
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_fetch: Some(msg.to_string()),
            ..Default::default()
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn recorded_calls(&self) -> Vec<ActionDescriptor> {
        self.calls.lock().unwrap().clone()
    }
}

impl HassApi for MockApi {
    fn fetch_states(&self, _prefs: &Preferences) -> anyhow::Result<Vec<Entity>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match &self.fail_fetch {
            Some(msg) => Err(anyhow::anyhow!(msg.clone())),
            None => Ok(self.entities.clone()),
        }
    }

    fn call_service(&self, descriptor: &ActionDescriptor) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push(descriptor.clone());
        if self.fail_calls {
            anyhow::bail!("service unavailable");
        }
        Ok(())
    }
}

pub fn prefs() -> Preferences {
    Preferences::new("http://hass.local:8123/", "secret")
}
