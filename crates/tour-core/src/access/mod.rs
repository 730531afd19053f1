//! ============================================================================
//! Access Module - Code-gated access to the audio tour
//! ============================================================================
//! Generates `Tx<letter><number>` access codes and decides whether a code
//! currently unlocks the tour.
//!
//! ## Lifecycle
//! - **Unknown**: never generated here, never usable
//! - **Fresh**: generated, not yet used
//! - **Active**: used, inside the 3 day cooldown
//! - **Expired**: cooldown elapsed, usable again
//!
//! ## Usage
//! ```rust
//! use tour_core::access::CodeRegistry;
//!
//! let mut registry = CodeRegistry::seeded(7);
//! let codes = registry.generate(2);
//! assert!(registry.is_usable(codes[0].as_str()));
//! registry.activate(codes[0].as_str());
//! assert!(!registry.is_usable(codes[0].as_str()));
//! ```
//! ============================================================================

mod clock;
mod generator;
mod registry;
mod types;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use generator::{CodeSource, RandomCodeSource, ScriptedCodeSource};
pub use registry::{CodeRegistry, CodeSnapshot};
pub use types::{
    cooldown, normalize, AccessCode, CodeRecord, CodeState, CODE_ALPHABET, CODE_NUMBER_MAX,
    CODE_NUMBER_MIN, CODE_PREFIX, COOLDOWN_MS,
};
