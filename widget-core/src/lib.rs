//! Core library for the excuse and weather widgets.
//!
//! This crate defines:
//! - Configuration handling
//! - Data sources for weather and excuses, behind injectable traits
//! - The per-widget state machine, view renderer and transient status line
//! - The widget controllers tying input, fetch and render together
//!
//! It is used by `widget-cli`, but can also be driven by any other front end.

pub mod config;
pub mod error;
pub mod excuse;
pub mod geo;
pub mod input;
pub mod model;
pub mod provider;
pub mod render;
pub mod state;
pub mod status;
pub mod widget;

#[cfg(test)]
mod test_support;

pub use config::{Config, ExcuseConfig, ProviderConfig, WeatherConfig};
pub use error::{FetchError, GeoError, ValidationError, WidgetError};
pub use excuse::{ExcuseSource, excuse_source_from_config};
pub use geo::{Geolocator, geolocator_for};
pub use model::{AddExcuseReply, Coordinates, ExcuseRecord, NewExcuse, WeatherRecord, WeatherRequest};
pub use provider::{ProviderId, WeatherSource};
pub use render::View;
pub use state::UiState;
pub use status::{Severity, StatusMessage, StatusReporter};
pub use widget::{ExcuseWidget, WeatherWidget};
