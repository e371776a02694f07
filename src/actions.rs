use crate::hass::service::ActionDescriptor;
use serde::{Deserialize, Serialize};

pub mod clipboard;

/// Icon shown next to a result, keyed by entity class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Logo,
    Automation,
    Cover,
    Group,
    Light,
    Scene,
    Switch,
}

impl Icon {
    /// Pick the icon for an entity class, falling back to the logo.
    pub fn for_class(class: &str) -> Self {
        match class {
            "automation" => Icon::Automation,
            "cover" => Icon::Cover,
            "group" => Icon::Group,
            "light" => Icon::Light,
            "scene" => Icon::Scene,
            "switch" => Icon::Switch,
            _ => Icon::Logo,
        }
    }

    /// Relative path of the image file the host renders.
    pub fn path(self) -> &'static str {
        match self {
            Icon::Logo => "images/icon.png",
            Icon::Automation => "images/automation.png",
            Icon::Cover => "images/cover.png",
            Icon::Group => "images/group.png",
            Icon::Light => "images/light.png",
            Icon::Scene => "images/scene.png",
            Icon::Switch => "images/switch.png",
        }
    }
}

/// What happens when the user picks a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OnSelect {
    HideWindow,
    CopyToClipboard { text: String },
    Invoke { descriptor: ActionDescriptor },
}

/// A single line in the rendered result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    pub icon: Icon,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub on_select: OnSelect,
}

impl ResultItem {
    /// Informational line with the logo icon that only hides the window.
    pub fn info(name: impl Into<String>) -> Self {
        Self {
            icon: Icon::Logo,
            name: name.into(),
            description: None,
            on_select: OnSelect::HideWindow,
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Descriptor carried by an action item, if any.
    pub fn descriptor(&self) -> Option<&ActionDescriptor> {
        match &self.on_select {
            OnSelect::Invoke { descriptor } => Some(descriptor),
            _ => None,
        }
    }
}
