//! ============================================================================
//! Code Registry - Generation, validation and activation of access codes
//! ============================================================================
//! In-memory map from normalized code to its usage record. Records are only
//! created by `generate` and only changed by `activate`; expiry is computed
//! at read time, there is no background job.
//! ============================================================================

use chrono::Duration;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::clock::{Clock, SystemClock};
use super::generator::{CodeSource, RandomCodeSource};
use super::types::{cooldown, normalize, AccessCode, CodeRecord, CodeState};

/// Registry of every code generated by this instance
pub struct CodeRegistry<C = SystemClock, S = RandomCodeSource> {
    records: BTreeMap<String, CodeRecord>,
    clock: C,
    source: S,
    cooldown: Duration,
}

impl CodeRegistry {
    /// Registry on the wall clock with OS-seeded codes
    pub fn new() -> Self {
        Self::with_parts(SystemClock, RandomCodeSource::from_entropy())
    }

    /// Registry on the wall clock with reproducible codes
    pub fn seeded(seed: u64) -> Self {
        Self::with_parts(SystemClock, RandomCodeSource::seeded(seed))
    }
}

impl Default for CodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock, S: CodeSource> CodeRegistry<C, S> {
    /// Registry with an explicit clock and code source
    pub fn with_parts(clock: C, source: S) -> Self {
        Self {
            records: BTreeMap::new(),
            clock,
            source,
            cooldown: cooldown(),
        }
    }

    /// Generate `count` codes and register each as fresh.
    ///
    /// A code that is already registered (from an earlier call or earlier in
    /// the same batch) gets its record replaced, which resets its usage.
    pub fn generate(&mut self, count: usize) -> Vec<AccessCode> {
        let codes: Vec<_> = (0..count).map(|_| self.generate_one()).collect();
        if count > 0 {
            info!("Generated {} access code(s)", count);
        }
        codes
    }

    /// Generate and register a single code
    pub fn generate_one(&mut self) -> AccessCode {
        let code = self.source.next_code();
        if self
            .records
            .insert(code.normalized(), CodeRecord::fresh())
            .is_some()
        {
            debug!("Code {} generated again, usage state reset", code);
        }
        code
    }

    /// Whether `code` currently grants access.
    ///
    /// Unknown codes are never usable. A code is usable until first
    /// activated, then again once the cooldown has fully elapsed.
    pub fn is_usable(&self, code: &str) -> bool {
        let usable = self.state(code).is_usable();
        debug!("Usability check for {}: {}", code, usable);
        usable
    }

    /// Mark `code` as used now. Unknown codes are ignored.
    pub fn activate(&mut self, code: &str) {
        let now = self.clock.now();
        match self.records.get_mut(&normalize(code)) {
            Some(record) => {
                record.activate(now);
                info!("Activated code {} at {}", code, now);
            }
            None => debug!("Ignoring activation of unknown code {}", code),
        }
    }

    /// Lifecycle state of `code` right now
    pub fn state(&self, code: &str) -> CodeState {
        match self.records.get(&normalize(code)) {
            Some(record) => record.state_at(self.clock.now(), self.cooldown),
            None => CodeState::Unknown,
        }
    }

    /// Stored record for `code`, if it was generated here
    pub fn record(&self, code: &str) -> Option<&CodeRecord> {
        self.records.get(&normalize(code))
    }

    /// Number of distinct registered codes
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Registered codes in normalized form, sorted
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CodeRecord)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Point-in-time view of every record with its current state
    pub fn snapshot(&self) -> Vec<CodeSnapshot> {
        let now = self.clock.now();
        self.records
            .iter()
            .map(|(code, record)| CodeSnapshot {
                code: code.clone(),
                record: *record,
                state: record.state_at(now, self.cooldown),
            })
            .collect()
    }

    /// Window after activation during which a code is refused
    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }
}

/// One registry entry as exported to JSON
#[derive(Debug, Clone, Serialize)]
pub struct CodeSnapshot {
    pub code: String,
    #[serde(flatten)]
    pub record: CodeRecord,
    pub state: CodeState,
}
