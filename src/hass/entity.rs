use anyhow::{bail, Context, Result};
use serde_json::Value;

/// Entity classes affected by `on` / `off`.
pub const ON_OFF_CLASSES: &[&str] = &[
    "light",
    "switch",
    "automation",
    "scene",
    "group",
    "input_boolean",
    "media_player",
    "climate",
    "camera",
];

/// Entity classes affected by `open` / `close`.
pub const OPEN_CLOSE_CLASSES: &[&str] = &["cover"];

pub const STATE_UNAVAILABLE: &str = "unavailable";
const STATE_UNKNOWN: &str = "unknown";

/// One entity from a state snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: String,
    pub state: String,
    pub friendly_name: String,
    pub attributes: serde_json::Map<String, Value>,
}

impl Entity {
    pub fn new(id: impl Into<String>, state: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            friendly_name: id.clone(),
            id,
            state: state.into(),
            attributes: serde_json::Map::new(),
        }
    }

    pub fn with_friendly_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.attributes
            .insert("friendly_name".into(), Value::String(name.clone()));
        self.friendly_name = name;
        self
    }

    /// Prefix of the id before the first `.`.
    pub fn class(&self) -> &str {
        self.id.split('.').next().unwrap_or_default()
    }

    /// Build an entity from one element of the `/api/states` array.
    ///
    /// Returns `None` when `entity_id` or `attributes` is missing.
    pub fn from_json(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let id = obj.get("entity_id")?.as_str()?.to_string();
        let attributes = obj.get("attributes")?.as_object()?.clone();
        let state = obj
            .get("state")
            .and_then(Value::as_str)
            .unwrap_or(STATE_UNKNOWN)
            .to_string();
        let friendly_name = attributes
            .get("friendly_name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| id.clone());
        Some(Self {
            id,
            state,
            friendly_name,
            attributes,
        })
    }
}

/// Parse the body of `GET /api/states` into a snapshot.
///
/// Malformed entries are skipped; a body that is not a JSON array is an error.
pub fn parse_snapshot(body: &str) -> Result<Vec<Entity>> {
    let value: Value = serde_json::from_str(body).context("states response is not valid JSON")?;
    let Value::Array(items) = value else {
        bail!("states response is not a JSON array");
    };
    let total = items.len();
    let entities: Vec<Entity> = items.iter().filter_map(Entity::from_json).collect();
    if entities.len() != total {
        tracing::debug!(
            skipped = total - entities.len(),
            "skipped malformed entities in snapshot"
        );
    }
    Ok(entities)
}

/// Verb that turns a query into a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionWord {
    On,
    Off,
    Open,
    Close,
}

impl ActionWord {
    pub const ALL: [ActionWord; 4] = [
        ActionWord::On,
        ActionWord::Off,
        ActionWord::Open,
        ActionWord::Close,
    ];

    pub fn parse(word: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|w| w.as_str().eq_ignore_ascii_case(word))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionWord::On => "on",
            ActionWord::Off => "off",
            ActionWord::Open => "open",
            ActionWord::Close => "close",
        }
    }

    pub fn applicable_classes(self) -> &'static [&'static str] {
        match self {
            ActionWord::On | ActionWord::Off => ON_OFF_CLASSES,
            ActionWord::Open | ActionWord::Close => OPEN_CLOSE_CLASSES,
        }
    }

    pub fn applies_to(self, class: &str) -> bool {
        self.applicable_classes().contains(&class)
    }

    /// Service `(domain, service)` pair called for this word.
    pub fn service(self) -> (&'static str, &'static str) {
        match self {
            ActionWord::On => ("homeassistant", "turn_on"),
            ActionWord::Off => ("homeassistant", "turn_off"),
            ActionWord::Open => ("cover", "open_cover"),
            ActionWord::Close => ("cover", "close_cover"),
        }
    }

    /// Display name of the action item for `entity_id`.
    pub fn label(self, entity_id: &str) -> String {
        match self {
            ActionWord::On | ActionWord::Off => format!("Turn {} {entity_id}", self.as_str()),
            ActionWord::Open | ActionWord::Close => format!("{} {entity_id}", self.as_str()),
        }
    }
}

impl std::fmt::Display for ActionWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
