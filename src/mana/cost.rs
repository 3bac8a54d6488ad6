//! Mana costs and the payment policy.
//!
//! Paying a cost never branches: colored pips are paid first, then each
//! generic point comes out of colorless mana if any floats, otherwise out of
//! the color with the most mana left (ties broken in WUBRG order). Draining
//! the largest pile first keeps the leftover pool as diverse as possible.

use serde::{Deserialize, Serialize};

use super::pool::{Color, ManaPool};
use crate::core::EngineError;

/// A mana cost: specific pips plus a generic amount.
///
/// ```
/// use goldfish::mana::{ManaCost, ManaPool};
///
/// let cost: ManaCost = "1G".parse().unwrap();
/// assert_eq!(cost.mana_value(), 2);
///
/// // G pays the pip; the generic point ties B against G and takes B.
/// let mut pool: ManaPool = "GGB".parse().unwrap();
/// assert!(pool.pay(&cost));
/// assert_eq!(pool.to_string(), "G");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManaCost {
    pips: ManaPool,
    generic: u32,
}

impl ManaCost {
    /// A free cost ("0").
    #[must_use]
    pub const fn free() -> Self {
        Self {
            pips: ManaPool::new(),
            generic: 0,
        }
    }

    /// Build from specific pips and a generic amount.
    #[must_use]
    pub const fn new(pips: ManaPool, generic: u32) -> Self {
        Self { pips, generic }
    }

    /// Specific (colored or colorless) pips.
    #[must_use]
    pub fn pips(&self) -> &ManaPool {
        &self.pips
    }

    /// Generic amount.
    #[must_use]
    pub fn generic(&self) -> u32 {
        self.generic
    }

    /// Converted mana value.
    #[must_use]
    pub fn mana_value(&self) -> u32 {
        self.pips.total() + self.generic
    }

    /// Check if paying this costs nothing.
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.mana_value() == 0
    }
}

impl std::str::FromStr for ManaCost {
    type Err = EngineError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut pips = ManaPool::new();
        let mut generic = 0u32;
        let mut digits = String::new();

        let invalid = |reason: String| EngineError::InvalidManaCost {
            text: text.to_string(),
            reason,
        };

        let flush = |digits: &mut String, generic: &mut u32| -> Result<(), EngineError> {
            if !digits.is_empty() {
                let n: u32 = digits
                    .parse()
                    .map_err(|_| invalid(format!("generic amount {digits:?} overflows")))?;
                *generic = generic
                    .checked_add(n)
                    .ok_or_else(|| invalid(format!("generic amount {digits:?} overflows")))?;
                digits.clear();
            }
            Ok(())
        };

        for symbol in text.chars().filter(|c| !c.is_whitespace()) {
            if symbol.is_ascii_digit() {
                digits.push(symbol);
                continue;
            }
            flush(&mut digits, &mut generic)?;
            let color = Color::from_symbol(symbol)
                .ok_or_else(|| invalid(format!("{symbol:?} is not a mana symbol")))?;
            pips.add_color(color, 1);
        }
        flush(&mut digits, &mut generic)?;

        Ok(Self { pips, generic })
    }
}

impl std::fmt::Display for ManaCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.generic > 0 || self.pips.is_empty() {
            write!(f, "{}", self.generic)?;
        }
        write!(f, "{}", self.pips)
    }
}

impl ManaPool {
    /// Check if the pool can pay `cost`.
    #[must_use]
    pub fn can_pay(&self, cost: &ManaCost) -> bool {
        let pips_ok = Color::ALL
            .iter()
            .all(|&c| self.get(c) >= cost.pips().get(c));
        pips_ok && self.total() >= cost.mana_value()
    }

    /// Pay `cost` out of the pool.
    ///
    /// Returns false, leaving the pool untouched, if the pool cannot pay.
    pub fn pay(&mut self, cost: &ManaCost) -> bool {
        if !self.can_pay(cost) {
            return false;
        }

        for color in Color::ALL {
            let paid = self.remove_color(color, cost.pips().get(color));
            debug_assert!(paid, "can_pay guaranteed colored pips");
        }

        for _ in 0..cost.generic() {
            let source = if self.get(Color::C) > 0 {
                Color::C
            } else {
                // max_by_key keeps the last maximum; iterate in reverse so ties go to W first
                Color::COLORS
                    .iter()
                    .rev()
                    .copied()
                    .max_by_key(|&c| self.get(c))
                    .unwrap_or(Color::W)
            };
            let paid = self.remove_color(source, 1);
            debug_assert!(paid, "can_pay guaranteed enough total mana");
        }

        true
    }
}
