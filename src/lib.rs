pub mod actions;
pub mod common;
pub mod hass;
pub mod launcher;
pub mod logging;
pub mod plugin;
pub mod plugins;
pub mod resolver;
pub mod settings;
