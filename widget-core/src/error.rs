//! Error kinds surfaced by the widgets.
//!
//! Every variant's `Display` is the exact string a user sees in the error
//! view or status line. Raw transport errors never reach it; they are logged
//! where they are mapped.

use thiserror::Error;

/// Bad or empty user input, detected before any fetch is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a city name")]
    EmptyCity,

    #[error("Please enter a category")]
    EmptyCategory,

    #[error("Please enter an excuse")]
    EmptyExcuse,
}

/// What a failed fetch was trying to get, used to pick the fallback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Weather,
    Excuse,
    Categories,
    NewExcuse,
}

impl Subject {
    pub fn unavailable_message(&self) -> &'static str {
        match self {
            Subject::Weather => "Weather data unavailable",
            Subject::Excuse => "Error loading excuse. Please try again.",
            Subject::Categories => "Error loading categories",
            Subject::NewExcuse => "Error adding excuse. Please try again.",
        }
    }
}

/// Failures of the device location capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeoError {
    #[error("Geolocation is not supported on this device")]
    NotSupported,

    #[error("Location access denied by user")]
    PermissionDenied,

    #[error("Location information is unavailable")]
    PositionUnavailable,

    #[error("Location request timed out")]
    Timeout,

    /// The platform reported a failure without a recognized reason.
    #[error("An unknown error occurred while getting location")]
    Unknown,
}

/// Network or lookup failure, detected after a call was made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("City not found")]
    CityNotFound,

    #[error("Category not found")]
    CategoryNotFound,

    #[error("Invalid API key")]
    Unauthorized,

    /// The server understood the request and refused it with a message.
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Geolocation(#[from] GeoError),

    #[error("{}", .0.unavailable_message())]
    Unavailable(Subject),
}

/// Anything a widget trigger can end in other than a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl From<GeoError> for WidgetError {
    fn from(err: GeoError) -> Self {
        WidgetError::Fetch(FetchError::Geolocation(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_messages_are_distinct_per_subject() {
        let subjects = [
            Subject::Weather,
            Subject::Excuse,
            Subject::Categories,
            Subject::NewExcuse,
        ];

        let mut messages: Vec<String> = subjects
            .iter()
            .map(|s| FetchError::Unavailable(*s).to_string())
            .collect();
        messages.sort();
        messages.dedup();

        assert_eq!(messages.len(), subjects.len());
    }

    #[test]
    fn weather_failures_map_to_distinct_strings() {
        let not_found = FetchError::CityNotFound.to_string();
        let unauthorized = FetchError::Unauthorized.to_string();
        let unavailable = FetchError::Unavailable(Subject::Weather).to_string();

        assert_eq!(not_found, "City not found");
        assert_eq!(unauthorized, "Invalid API key");
        assert_eq!(unavailable, "Weather data unavailable");
    }

    #[test]
    fn widget_error_displays_inner_message() {
        let err: WidgetError = GeoError::Timeout.into();
        assert_eq!(err.to_string(), "Location request timed out");

        let err: WidgetError = GeoError::Unknown.into();
        assert_eq!(
            err.to_string(),
            "An unknown error occurred while getting location"
        );

        let err: WidgetError = ValidationError::EmptyCity.into();
        assert_eq!(err.to_string(), "Please enter a city name");
    }
}
