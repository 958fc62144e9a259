use thiserror::Error;

/// Everything that can go wrong between a query and a rendered forecast.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    #[error("search query is empty")]
    EmptyQuery,

    #[error("no geocoding match for '{0}'")]
    NotFound(String),

    #[error("weather response did not contain current conditions")]
    NoCurrentData,

    #[error("network request failed: {0}")]
    NetworkFailure(String),

    #[error("network request timed out")]
    NetworkTimeout,

    #[error("device location unavailable: {0}")]
    GeolocationUnavailable(String),

    #[error("unexpected response from provider: {0}")]
    InvalidResponse(String),

    #[error("coordinate out of range: {latitude}, {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
}

impl LookupError {
    /// Text shown in place of the weather summary.
    pub fn user_message(&self) -> &'static str {
        match self {
            LookupError::EmptyQuery => "Please enter a city name.",
            LookupError::NotFound(_) => "City not found. Please try another search.",
            LookupError::GeolocationUnavailable(_) => {
                "Unable to retrieve your location. Please search for a city instead."
            }
            LookupError::InvalidCoordinate { .. } => "Coordinates are out of range.",
            _ => "Error fetching weather data. Please try again.",
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LookupError::NetworkTimeout
        } else if err.is_decode() {
            LookupError::InvalidResponse(err.to_string())
        } else {
            LookupError::NetworkFailure(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        LookupError::InvalidResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_side_errors_share_generic_message() {
        let generic = "Error fetching weather data. Please try again.";
        assert_eq!(LookupError::NoCurrentData.user_message(), generic);
        assert_eq!(LookupError::NetworkTimeout.user_message(), generic);
        assert_eq!(LookupError::NetworkFailure("boom".into()).user_message(), generic);
        assert_eq!(LookupError::InvalidResponse("bad".into()).user_message(), generic);
    }

    #[test]
    fn lookup_errors_have_specific_messages() {
        assert!(LookupError::EmptyQuery.user_message().contains("enter a city"));
        assert!(LookupError::NotFound("x".into()).user_message().contains("not found"));
        assert!(
            LookupError::GeolocationUnavailable("denied".into())
                .user_message()
                .contains("location")
        );
    }

    #[test]
    fn json_errors_become_invalid_response() {
        let err: LookupError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, LookupError::InvalidResponse(_)));
    }
}
