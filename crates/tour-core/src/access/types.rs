//! ============================================================================
//! Access Types - Codes, per-code records and lifecycle states
//! ============================================================================
//! Defines the `Tx<letter><number>` access code, the usage record kept for
//! every generated code, and the lazily computed lifecycle state.
//! ============================================================================

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed prefix of every access code (display form)
pub const CODE_PREFIX: &str = "Tx";

/// Letters a code may contain. `i`, `l` and `o` are left out because they
/// are easily mistaken for digits on a printed ticket.
pub const CODE_ALPHABET: &str = "abcdefghjkmnpqrstuvwxyz";

/// Smallest number part of a code
pub const CODE_NUMBER_MIN: u16 = 100;

/// Largest number part of a code
pub const CODE_NUMBER_MAX: u16 = 999;

/// Cooldown after activation before a code is usable again (3 days)
pub const COOLDOWN_MS: i64 = 3 * 24 * 60 * 60 * 1000;

/// Cooldown window as a chrono duration
pub fn cooldown() -> Duration {
    Duration::milliseconds(COOLDOWN_MS)
}

/// Case-fold a code for insert, lookup and activation
pub fn normalize(code: &str) -> String {
    code.to_lowercase()
}

/// An access code in its display form, e.g. `Txk382`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessCode(String);

impl AccessCode {
    /// Build a code from its letter and number parts
    pub fn from_parts(letter: char, number: u16) -> Self {
        Self(format!("{}{}{}", CODE_PREFIX, letter, number))
    }

    /// Display form as generated
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Registry key for this code
    pub fn normalized(&self) -> String {
        normalize(&self.0)
    }

    /// Parse typed input into a code, keeping the letter's case.
    ///
    /// Only checks the format. A parsed code is not necessarily known to
    /// any registry.
    pub fn parse(input: &str) -> Option<Self> {
        if !input.is_ascii() || input.len() != 6 {
            return None;
        }
        if !input[..2].eq_ignore_ascii_case(CODE_PREFIX) {
            return None;
        }

        let letter = input[2..3].chars().next()?;
        if !CODE_ALPHABET.contains(letter.to_ascii_lowercase()) {
            return None;
        }

        let digits = &input[3..];
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let number = digits.parse::<u16>().ok()?;

        (CODE_NUMBER_MIN..=CODE_NUMBER_MAX)
            .contains(&number)
            .then(|| Self::from_parts(letter, number))
    }

    /// Whether `input` has the shape of a code, in any case
    pub fn is_well_formed(input: &str) -> bool {
        Self::parse(input).is_some()
    }
}

impl fmt::Display for AccessCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AccessCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Usage record stored for every generated code.
///
/// `activated_at` is set if and only if `used` is true; both only change
/// through [`CodeRecord::activate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CodeRecord {
    used: bool,
    activated_at: Option<DateTime<Utc>>,
}

impl CodeRecord {
    /// A record for a freshly generated code
    pub fn fresh() -> Self {
        Self::default()
    }

    pub fn used(&self) -> bool {
        self.used
    }

    pub fn activated_at(&self) -> Option<DateTime<Utc>> {
        self.activated_at
    }

    /// Mark used and (re)start the cooldown at `now`
    pub fn activate(&mut self, now: DateTime<Utc>) {
        self.used = true;
        self.activated_at = Some(now);
    }

    /// Lifecycle state at `now`
    pub fn state_at(&self, now: DateTime<Utc>, cooldown: Duration) -> CodeState {
        match self.activated_at {
            None => CodeState::Fresh,
            Some(at) if now - at > cooldown => CodeState::Expired,
            Some(_) => CodeState::Active,
        }
    }

    /// Whether this record grants access at `now`
    pub fn is_usable_at(&self, now: DateTime<Utc>, cooldown: Duration) -> bool {
        self.state_at(now, cooldown).is_usable()
    }
}

/// Lifecycle state of a code, computed on read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeState {
    /// Never generated by this registry
    Unknown,
    /// Generated, never activated
    Fresh,
    /// Activated, still inside the cooldown window
    Active,
    /// Activated, cooldown elapsed - usable again
    Expired,
}

impl CodeState {
    pub fn is_usable(&self) -> bool {
        matches!(self, CodeState::Fresh | CodeState::Expired)
    }

    /// Get human-readable state name
    pub fn display_name(&self) -> &'static str {
        match self {
            CodeState::Unknown => "Unknown",
            CodeState::Fresh => "Fresh",
            CodeState::Active => "Active",
            CodeState::Expired => "Expired",
        }
    }
}
