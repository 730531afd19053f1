//! ============================================================================
//! Visitor Session - What the kiosk screen tracks for one visitor
//! ============================================================================
//! Code submission, the purchase flow and the unlocked state. `TourApp` is
//! the top-level context: it owns the registry and hands it to the session
//! by reference, so nothing here is global.
//! ============================================================================

use serde::Serialize;
use tracing::{info, warn};

use crate::access::{AccessCode, Clock, CodeRegistry, CodeSource, RandomCodeSource, SystemClock};
use crate::config::TourConfig;
use crate::pricing::{self, PricingOption};
use crate::tour::{TourStop, TOUR_STOPS};
use crate::types::{CodeStatus, TourError};

/// Result of buying access for a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Purchase {
    pub option: PricingOption,
    /// Code for the buyer, submitted right away
    pub primary: AccessCode,
    /// Codes to share with the rest of the group
    pub extras: Vec<AccessCode>,
    /// Outcome of submitting the primary code
    pub status: CodeStatus,
}

/// Screen state for one visitor
#[derive(Debug, Clone, Default, Serialize)]
pub struct VisitorSession {
    status: Option<CodeStatus>,
    unlocked: bool,
    selected_quantity: Option<u32>,
    primary_code: Option<AccessCode>,
    extra_codes: Vec<AccessCode>,
}

impl VisitorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit a typed or purchased code.
    ///
    /// Surrounding whitespace is ignored. A usable code is activated and
    /// unlocks the tour; the session stays unlocked after later rejections.
    pub fn submit_code<C: Clock, S: CodeSource>(
        &mut self,
        registry: &mut CodeRegistry<C, S>,
        input: &str,
    ) -> CodeStatus {
        let code = input.trim();

        let status = if registry.is_usable(code) {
            registry.activate(code);
            self.unlocked = true;
            info!("Code {} accepted, tour unlocked", code);
            CodeStatus::Accepted
        } else {
            warn!("Code {:?} rejected", code);
            CodeStatus::InvalidOrExpired
        };

        self.status = Some(status);
        status
    }

    /// Buy access for `quantity` visitors.
    ///
    /// Hands out one code per visitor. The first becomes the visitor's own
    /// code and is submitted immediately; the rest are for sharing.
    pub fn purchase<C: Clock, S: CodeSource>(
        &mut self,
        registry: &mut CodeRegistry<C, S>,
        quantity: u32,
    ) -> Result<Purchase, TourError> {
        let option =
            pricing::option_for(quantity).ok_or(TourError::UnknownPricingOption(quantity))?;

        // Every pricing option covers at least one visitor
        let primary = registry.generate_one();
        let extras = registry.generate((option.quantity as usize).saturating_sub(1));

        self.selected_quantity = Some(option.quantity);
        self.primary_code = Some(primary.clone());
        self.extra_codes = extras.clone();
        info!(
            "Purchased access for {} ({} shareable code(s))",
            option.label(),
            extras.len()
        );

        let status = self.submit_code(registry, primary.as_str());

        Ok(Purchase {
            option,
            primary,
            extras,
            status,
        })
    }

    /// Tour stops, only once a code was accepted
    pub fn tour_stops(&self) -> Option<&'static [TourStop]> {
        self.unlocked.then_some(&TOUR_STOPS[..])
    }

    pub fn status(&self) -> Option<CodeStatus> {
        self.status
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn selected_quantity(&self) -> Option<u32> {
        self.selected_quantity
    }

    pub fn primary_code(&self) -> Option<&AccessCode> {
        self.primary_code.as_ref()
    }

    pub fn extra_codes(&self) -> &[AccessCode] {
        &self.extra_codes
    }
}

/// Top-level kiosk context: configuration, registry and visitor session
pub struct TourApp<C = SystemClock, S = RandomCodeSource> {
    config: TourConfig,
    registry: CodeRegistry<C, S>,
    session: VisitorSession,
}

impl TourApp {
    /// Kiosk on the wall clock, seeded from config when a seed is set
    pub fn from_config(config: TourConfig) -> Self {
        let registry = match config.rng_seed {
            Some(seed) => {
                info!("Using fixed code seed {}", seed);
                CodeRegistry::seeded(seed)
            }
            None => CodeRegistry::new(),
        };
        Self::with_registry(config, registry)
    }
}

impl<C: Clock, S: CodeSource> TourApp<C, S> {
    pub fn with_registry(config: TourConfig, registry: CodeRegistry<C, S>) -> Self {
        Self {
            config,
            registry,
            session: VisitorSession::new(),
        }
    }

    pub fn submit_code(&mut self, input: &str) -> CodeStatus {
        self.session.submit_code(&mut self.registry, input)
    }

    pub fn purchase(&mut self, quantity: u32) -> Result<Purchase, TourError> {
        self.session.purchase(&mut self.registry, quantity)
    }

    pub fn tour_stops(&self) -> Option<&'static [TourStop]> {
        self.session.tour_stops()
    }

    pub fn config(&self) -> &TourConfig {
        &self.config
    }

    pub fn registry(&self) -> &CodeRegistry<C, S> {
        &self.registry
    }

    pub fn session(&self) -> &VisitorSession {
        &self.session
    }

    /// Start over with a new visitor, keeping every issued code
    pub fn reset_session(&mut self) {
        self.session = VisitorSession::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{CodeState, ManualClock, ScriptedCodeSource, COOLDOWN_MS};
    use chrono::Duration;

    fn kiosk(codes: &[&str]) -> (TourApp<ManualClock, ScriptedCodeSource>, ManualClock) {
        let clock = ManualClock::default();
        let registry =
            CodeRegistry::with_parts(clock.clone(), ScriptedCodeSource::from_strs(codes));
        (TourApp::with_registry(TourConfig::default(), registry), clock)
    }

    #[test]
    fn test_new_session_is_locked() {
        let (app, _clock) = kiosk(&["Txa123"]);
        assert!(!app.session().is_unlocked());
        assert!(app.tour_stops().is_none());
        assert_eq!(app.session().status(), None);
    }

    #[test]
    fn test_purchase_splits_primary_and_extras() {
        let (mut app, _clock) = kiosk(&["Txa123", "Txb456", "Txc789"]);

        let purchase = app.purchase(3).unwrap();
        assert_eq!(purchase.option.price_cents, 1000);
        assert_eq!(purchase.primary.as_str(), "Txa123");
        let extras: Vec<_> = purchase.extras.iter().map(|c| c.as_str()).collect();
        assert_eq!(extras, vec!["Txb456", "Txc789"]);
        assert_eq!(purchase.status, CodeStatus::Accepted);

        let session = app.session();
        assert_eq!(session.selected_quantity(), Some(3));
        assert_eq!(session.primary_code().map(|c| c.as_str()), Some("Txa123"));
        assert_eq!(session.extra_codes().len(), 2);
        assert!(session.is_unlocked());
        assert_eq!(app.tour_stops().map(|s| s.len()), Some(10));
    }

    #[test]
    fn test_purchase_activates_primary_only() {
        let (mut app, _clock) = kiosk(&["Txa123", "Txb456"]);
        app.purchase(2).unwrap();

        assert_eq!(app.registry().state("Txa123"), CodeState::Active);
        assert_eq!(app.registry().state("Txb456"), CodeState::Fresh);
    }

    #[test]
    fn test_single_purchase_has_no_extras() {
        let (mut app, _clock) = kiosk(&["Txk382"]);
        let purchase = app.purchase(1).unwrap();
        assert!(purchase.extras.is_empty());
    }

    #[test]
    fn test_every_option_yields_one_code_per_visitor() {
        for option in crate::pricing::PRICING_OPTIONS.iter() {
            let (mut app, _clock) = kiosk(&["Txa123", "Txb456", "Txc789"]);
            let purchase = app.purchase(option.quantity).unwrap();
            assert_eq!(purchase.extras.len() as u32, option.quantity - 1);
            assert_eq!(purchase.primary.as_str(), "Txa123");
            assert_eq!(app.session().selected_quantity(), Some(option.quantity));
        }
    }

    #[test]
    fn test_failed_purchase_keeps_previous_selection() {
        let (mut app, _clock) = kiosk(&["Txa123", "Txb456"]);
        app.purchase(2).unwrap();
        assert!(app.purchase(9).is_err());

        let session = app.session();
        assert_eq!(session.selected_quantity(), Some(2));
        assert_eq!(session.primary_code().map(|c| c.as_str()), Some("Txa123"));
        assert_eq!(session.extra_codes().len(), 1);
        assert_eq!(app.registry().len(), 2);
    }

    #[test]
    fn test_purchase_unknown_quantity() {
        let (mut app, _clock) = kiosk(&["Txa123"]);
        assert_eq!(app.purchase(0), Err(TourError::UnknownPricingOption(0)));
        assert_eq!(app.purchase(9), Err(TourError::UnknownPricingOption(9)));
        assert!(app.registry().is_empty());
        assert_eq!(app.session().selected_quantity(), None);
    }

    #[test]
    fn test_shared_code_works_on_second_kiosk_session() {
        let (mut app, _clock) = kiosk(&["Txa123", "Txb456"]);
        app.purchase(2).unwrap();

        app.reset_session();
        assert!(!app.session().is_unlocked());
        assert_eq!(app.submit_code("  TXB456 \n"), CodeStatus::Accepted);
        assert!(app.session().is_unlocked());
    }

    #[test]
    fn test_used_code_rejected_until_cooldown() {
        let (mut app, clock) = kiosk(&["Txa123"]);
        app.purchase(1).unwrap();
        app.reset_session();

        assert_eq!(app.submit_code("txa123"), CodeStatus::InvalidOrExpired);
        assert!(app.tour_stops().is_none());

        clock.advance(Duration::milliseconds(COOLDOWN_MS + 1));
        assert_eq!(app.submit_code("txa123"), CodeStatus::Accepted);
        assert_eq!(app.registry().state("Txa123"), CodeState::Active);
    }

    #[test]
    fn test_unknown_code_rejected() {
        let (mut app, _clock) = kiosk(&["Txa123"]);
        assert_eq!(app.submit_code("TxZZZ999"), CodeStatus::InvalidOrExpired);
        assert_eq!(app.session().status(), Some(CodeStatus::InvalidOrExpired));
        assert!(!app.session().is_unlocked());
        assert!(app.registry().record("TxZZZ999").is_none());
    }

    #[test]
    fn test_stays_unlocked_after_rejection() {
        let (mut app, _clock) = kiosk(&["Txa123"]);
        app.purchase(1).unwrap();
        assert_eq!(app.submit_code("nonsense"), CodeStatus::InvalidOrExpired);
        assert!(app.session().is_unlocked());
        assert_eq!(app.session().status(), Some(CodeStatus::InvalidOrExpired));
    }

    #[test]
    fn test_from_config_with_seed_is_reproducible() {
        let config = TourConfig {
            rng_seed: Some(99),
            ..TourConfig::default()
        };
        let mut a = TourApp::from_config(config.clone());
        let mut b = TourApp::from_config(config);
        assert_eq!(a.purchase(4).unwrap().primary, b.purchase(4).unwrap().primary);
    }
}
