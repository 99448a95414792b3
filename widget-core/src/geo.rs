//! Device location capability.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::{error::GeoError, model::Coordinates};

#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    /// Whether a position can be requested at all. Checked before the widget
    /// enters `Loading`.
    fn is_supported(&self) -> bool {
        true
    }

    async fn current_position(&self) -> Result<Coordinates, GeoError>;
}

/// No location capability on this device.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsupported;

#[async_trait]
impl Geolocator for Unsupported {
    fn is_supported(&self) -> bool {
        false
    }

    async fn current_position(&self) -> Result<Coordinates, GeoError> {
        Err(GeoError::NotSupported)
    }
}

/// A position known up front, e.g. from the user's configuration.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinates);

#[async_trait]
impl Geolocator for FixedPosition {
    async fn current_position(&self) -> Result<Coordinates, GeoError> {
        Ok(self.0)
    }
}

/// Build the geolocator for an optional configured position.
pub fn geolocator_for(position: Option<Coordinates>) -> Box<dyn Geolocator> {
    match position {
        Some(at) => Box::new(FixedPosition(at)),
        None => Box::new(Unsupported),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unsupported_reports_not_supported() {
        let geo = geolocator_for(None);
        assert!(!geo.is_supported());
        assert_eq!(geo.current_position().await, Err(GeoError::NotSupported));
    }

    #[tokio::test]
    async fn fixed_position_resolves() {
        let at = Coordinates { lat: 35.68, lon: 139.69 };
        let geo = geolocator_for(Some(at));
        assert!(geo.is_supported());
        assert_eq!(geo.current_position().await, Ok(at));
    }
}
