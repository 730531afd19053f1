//! ============================================================================
//! TOUR-CORE: Luistertocht kiosk logic
//! ============================================================================
//! This crate handles everything behind the kiosk screen:
//! - Access code generation, validation and cooldown-based reuse
//! - The illustrative group price list
//! - The ten narrated tour stops and their audio assets
//! - Visitor session state (purchase, code submission, unlocked tour)
//! ============================================================================

pub mod access;
pub mod config;
pub mod pricing;
pub mod session;
pub mod tour;
pub mod types;

// Re-export main types for convenience
pub use access::{AccessCode, CodeRegistry, CodeState};
pub use config::TourConfig;
pub use pricing::{PricingOption, PRICING_OPTIONS};
pub use session::{Purchase, TourApp, VisitorSession};
pub use tour::{TourStop, TOUR_STOPS};
pub use types::*;
