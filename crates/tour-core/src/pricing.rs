//! ============================================================================
//! Pricing - Group ticket price list
//! ============================================================================
//! Illustrative prices only. Nothing here charges the visitor; choosing an
//! option just decides how many codes are handed out.
//! ============================================================================

use serde::{Deserialize, Serialize};

/// One entry of the price list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingOption {
    /// Number of visitors (and codes)
    pub quantity: u32,
    /// Price in euro cents
    pub price_cents: u32,
}

/// The price list, ordered by quantity
pub const PRICING_OPTIONS: [PricingOption; 8] = [
    PricingOption { quantity: 1, price_cents: 500 },
    PricingOption { quantity: 2, price_cents: 800 },
    PricingOption { quantity: 3, price_cents: 1000 },
    PricingOption { quantity: 4, price_cents: 1100 },
    PricingOption { quantity: 5, price_cents: 1375 },
    PricingOption { quantity: 6, price_cents: 1650 },
    PricingOption { quantity: 7, price_cents: 1925 },
    PricingOption { quantity: 8, price_cents: 2200 },
];

/// Look up the option for a group size
pub fn option_for(quantity: u32) -> Option<PricingOption> {
    PRICING_OPTIONS.iter().copied().find(|o| o.quantity == quantity)
}

impl PricingOption {
    /// Button label, e.g. `2 persoons – €8`
    pub fn label(&self) -> String {
        let noun = if self.quantity > 1 { "persoons" } else { "persoon" };
        format!("{} {} – {}", self.quantity, noun, format_euro(self.price_cents))
    }
}

/// Whole euros without decimals, otherwise two decimals
fn format_euro(cents: u32) -> String {
    if cents % 100 == 0 {
        format!("€{}", cents / 100)
    } else {
        format!("€{}.{:02}", cents / 100, cents % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_euro() {
        assert_eq!(format_euro(500), "€5");
        assert_eq!(format_euro(1375), "€13.75");
        assert_eq!(format_euro(1650), "€16.50");
    }

    #[test]
    fn test_labels() {
        assert_eq!(PRICING_OPTIONS[0].label(), "1 persoon – €5");
        assert_eq!(PRICING_OPTIONS[1].label(), "2 persoons – €8");
        assert_eq!(PRICING_OPTIONS[6].label(), "7 persoons – €19.25");
    }

    #[test]
    fn test_option_lookup() {
        assert_eq!(option_for(4).map(|o| o.price_cents), Some(1100));
        assert_eq!(option_for(0), None);
        assert_eq!(option_for(9), None);
    }

    #[test]
    fn test_options_cover_one_to_eight() {
        let quantities: Vec<_> = PRICING_OPTIONS.iter().map(|o| o.quantity).collect();
        assert_eq!(quantities, (1..=8).collect::<Vec<_>>());
    }
}
