//! Home Assistant REST integration: entity model, state fetcher and
//! service dispatcher.

pub mod client;
pub mod entity;
pub mod service;

pub use client::{HassApi, HttpApi, Preferences};
pub use entity::{ActionWord, Entity};
pub use service::{dispatch, ActionDescriptor, Dispatcher, ServiceData};
