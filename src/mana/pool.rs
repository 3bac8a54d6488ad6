//! Colors and floating mana.

use serde::{Deserialize, Serialize};

use crate::core::EngineError;

/// One mana type. `C` is colorless mana (not generic cost).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    W,
    U,
    B,
    R,
    G,
    C,
}

impl Color {
    /// All mana types in canonical order.
    pub const ALL: [Color; 6] = [Color::W, Color::U, Color::B, Color::R, Color::G, Color::C];

    /// The five colors, without colorless.
    pub const COLORS: [Color; 5] = [Color::W, Color::U, Color::B, Color::R, Color::G];

    /// Slot of this color in pool arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Single-letter symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Color::W => 'W',
            Color::U => 'U',
            Color::B => 'B',
            Color::R => 'R',
            Color::G => 'G',
            Color::C => 'C',
        }
    }

    /// Parse a single-letter symbol.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            'W' => Some(Color::W),
            'U' => Some(Color::U),
            'B' => Some(Color::B),
            'R' => Some(Color::R),
            'G' => Some(Color::G),
            'C' => Some(Color::C),
            _ => None,
        }
    }
}

/// Mana floating in a player's pool.
///
/// ```
/// use goldfish::mana::{Color, ManaPool};
///
/// let mut pool: ManaPool = "GG".parse().unwrap();
/// pool.add(&ManaPool::of(Color::B, 1));
///
/// assert_eq!(pool.total(), 3);
/// assert_eq!(pool.to_string(), "BGG");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManaPool {
    amounts: [u32; 6],
}

impl ManaPool {
    /// An empty pool.
    #[must_use]
    pub const fn new() -> Self {
        Self { amounts: [0; 6] }
    }

    /// A pool holding `amount` mana of one color.
    #[must_use]
    pub fn of(color: Color, amount: u32) -> Self {
        let mut pool = Self::new();
        pool.amounts[color.index()] = amount;
        pool
    }

    /// Mana of one color.
    #[must_use]
    pub fn get(&self, color: Color) -> u32 {
        self.amounts[color.index()]
    }

    /// Total mana of all colors.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.amounts.iter().sum()
    }

    /// Check if the pool is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Add the contents of another pool.
    pub fn add(&mut self, other: &ManaPool) {
        for color in Color::ALL {
            self.amounts[color.index()] += other.get(color);
        }
    }

    /// Add `amount` mana of one color.
    pub fn add_color(&mut self, color: Color, amount: u32) {
        self.amounts[color.index()] += amount;
    }

    /// Remove `amount` mana of one color. Returns false (and leaves the pool
    /// unchanged) if there is not enough.
    pub fn remove_color(&mut self, color: Color, amount: u32) -> bool {
        let slot = &mut self.amounts[color.index()];
        if *slot < amount {
            return false;
        }
        *slot -= amount;
        true
    }

    /// Empty the pool.
    pub fn clear(&mut self) {
        self.amounts = [0; 6];
    }

    /// Number of distinct mana types present.
    #[must_use]
    pub fn diversity(&self) -> usize {
        self.amounts.iter().filter(|&&n| n > 0).count()
    }
}

impl std::str::FromStr for ManaPool {
    type Err = EngineError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut pool = ManaPool::new();
        for symbol in text.chars().filter(|c| !c.is_whitespace()) {
            let color = Color::from_symbol(symbol).ok_or_else(|| EngineError::InvalidManaCost {
                text: text.to_string(),
                reason: format!("{symbol:?} is not a mana symbol"),
            })?;
            pool.add_color(color, 1);
        }
        Ok(pool)
    }
}

impl std::fmt::Display for ManaPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for color in Color::ALL {
            for _ in 0..self.get(color) {
                write!(f, "{}", color.symbol())?;
            }
        }
        Ok(())
    }
}
