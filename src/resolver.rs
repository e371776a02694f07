//! Turns a free-text query plus an entity snapshot into the result list.
//!
//! Resolution happens in two steps so the caller can skip the network
//! round-trip when the query is answered without a snapshot:
//! [`prepare`] validates preferences and parses the query, and
//! [`PreparedQuery::resolve`] filters the snapshot.

use crate::actions::{Icon, OnSelect, ResultItem};
use crate::common::query::tokenize_query;
use crate::hass::entity::{ActionWord, Entity, STATE_UNAVAILABLE};
use crate::hass::{ActionDescriptor, Preferences};

pub const DEFAULT_MAX_RESULTS: usize = 7;

pub const MSG_INVALID_URL: &str = "Invalid Home Assistant URL";
pub const MSG_EMPTY_KEY: &str = "Empty Home Assistant API Key";
pub const MSG_NO_INPUT: &str = "No input";
pub const MSG_NO_ENTITIES: &str = "No entities found";
pub const MSG_FETCH_FAILED: &str = "Could not load Home Assistant entities";

const SCENE_CLASS: &str = "scene";

/// A validated query waiting for a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedQuery {
    prefs: Preferences,
    action: Option<ActionWord>,
    tokens: Vec<String>,
}

/// Validate preferences and parse `query`.
///
/// Returns the single informational item to show instead when the query can
/// be answered without fetching states.
pub fn prepare(query: &str, prefs: &Preferences) -> Result<PreparedQuery, ResultItem> {
    if !prefs.has_valid_url() {
        return Err(ResultItem::info(MSG_INVALID_URL));
    }
    if !prefs.has_key() {
        return Err(ResultItem::info(MSG_EMPTY_KEY));
    }

    let mut tokens = tokenize_query(query);
    if tokens.is_empty() {
        return Err(ResultItem::info(MSG_NO_INPUT));
    }

    let action = ActionWord::parse(&tokens[0]);
    if let Some(word) = action {
        tokens.remove(0);
        if tokens.is_empty() {
            return Err(ResultItem::info(format!("Send \"{word}\" to an entity")));
        }
    }

    Ok(PreparedQuery {
        prefs: prefs.clone(),
        action,
        tokens,
    })
}

/// Prepare and resolve in one go against an already fetched snapshot.
pub fn resolve(
    query: &str,
    prefs: &Preferences,
    snapshot: &[Entity],
    max_results: usize,
) -> Vec<ResultItem> {
    match prepare(query, prefs) {
        Ok(prepared) => prepared.resolve(snapshot, max_results),
        Err(item) => vec![item],
    }
}

/// Item shown when the snapshot could not be fetched.
pub fn failure_item(err: &anyhow::Error) -> ResultItem {
    ResultItem::info(MSG_FETCH_FAILED).with_description(format!("{err:#}"))
}

impl PreparedQuery {
    pub fn action(&self) -> Option<ActionWord> {
        self.action
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Filter `snapshot` in order, keeping at most `max_results` items.
    ///
    /// A `max_results` of zero falls back to [`DEFAULT_MAX_RESULTS`].
    pub fn resolve(&self, snapshot: &[Entity], max_results: usize) -> Vec<ResultItem> {
        let limit = if max_results == 0 {
            DEFAULT_MAX_RESULTS
        } else {
            max_results
        };
        let items: Vec<ResultItem> = snapshot
            .iter()
            .filter_map(|entity| self.candidate(entity))
            .take(limit)
            .collect();
        if items.is_empty() {
            return vec![ResultItem::info(MSG_NO_ENTITIES)];
        }
        items
    }

    fn candidate(&self, entity: &Entity) -> Option<ResultItem> {
        let class = entity.class();
        if let Some(word) = self.action {
            if !word.applies_to(class) {
                return None;
            }
            // already in the target state, or cannot be changed
            if entity.state == word.as_str() || entity.state == STATE_UNAVAILABLE {
                return None;
            }
        }

        if !self.matches(entity) {
            return None;
        }

        match self.action {
            Some(word) => Some(self.action_item(word, entity)),
            None if class == SCENE_CLASS => None,
            None => Some(state_item(entity)),
        }
    }

    fn matches(&self, entity: &Entity) -> bool {
        let name = entity.friendly_name.to_lowercase();
        self.tokens
            .iter()
            .all(|t| name.contains(t.as_str()) || entity.id.contains(t.as_str()))
    }

    fn action_item(&self, word: ActionWord, entity: &Entity) -> ResultItem {
        let class = entity.class();
        let description = if class == SCENE_CLASS {
            None
        } else {
            Some(format!("{} is currently {}", entity.id, entity.state))
        };
        ResultItem {
            icon: Icon::for_class(class),
            name: word.label(&entity.id),
            description,
            on_select: OnSelect::Invoke {
                descriptor: ActionDescriptor::new(&self.prefs, word, &entity.id),
            },
        }
    }
}

fn state_item(entity: &Entity) -> ResultItem {
    let on_select = match entity.state.as_str() {
        "on" | "off" => OnSelect::HideWindow,
        other => OnSelect::CopyToClipboard {
            text: other.to_string(),
        },
    };
    ResultItem {
        icon: Icon::for_class(entity.class()),
        name: entity.id.clone(),
        description: Some(entity.state.clone()),
        on_select,
    }
}
