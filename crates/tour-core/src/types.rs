//! ============================================================================
//! Core Types for the Luistertocht kiosk
//! ============================================================================
//! Errors and the visitor-facing status of a code submission.
//! ============================================================================

use serde::{Deserialize, Serialize};

/// Outcome of submitting a code, as shown to the visitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeStatus {
    Accepted,
    InvalidOrExpired,
}

impl CodeStatus {
    pub fn is_accepted(&self) -> bool {
        matches!(self, CodeStatus::Accepted)
    }

    /// Status line for the kiosk screen
    pub fn message(&self) -> &'static str {
        match self {
            CodeStatus::Accepted => "✅ Code geaccepteerd. Je hebt toegang tot de tour!",
            CodeStatus::InvalidOrExpired => "❌ Ongeldige of verlopen code.",
        }
    }
}

/// Error types for the kiosk
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TourError {
    #[error("No pricing option for {0} visitor(s)")]
    UnknownPricingOption(u32),

    #[error("Invalid value '{value}' for {key}")]
    InvalidConfig { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages() {
        assert!(CodeStatus::Accepted.is_accepted());
        assert!(!CodeStatus::InvalidOrExpired.is_accepted());
        assert!(CodeStatus::Accepted.message().contains("geaccepteerd"));
        assert!(CodeStatus::InvalidOrExpired.message().contains("verlopen"));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            TourError::UnknownPricingOption(9).to_string(),
            "No pricing option for 9 visitor(s)"
        );
        let err = TourError::InvalidConfig {
            key: "TOUR_RNG_SEED".into(),
            value: "abc".into(),
        };
        assert_eq!(err.to_string(), "Invalid value 'abc' for TOUR_RNG_SEED");
    }
}
