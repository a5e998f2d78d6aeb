//! Money type for representing monetary values.
//!
//! Amounts are integers in the currency's minor unit (paisa for NPR) so cart
//! subtotals never accumulate floating-point error.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies the storefront prices in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    NPR,
    INR,
    USD,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::NPR => "NPR",
            Currency::INR => "INR",
            Currency::USD => "USD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::NPR => "Rs. ",
            Currency::INR => "\u{20b9}",
            Currency::USD => "$",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency, stored in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    pub amount_minor: i64,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Checked addition; `None` on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_minor
            .checked_add(other.amount_minor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Checked multiplication by a quantity.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_minor
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Format with symbol and two decimals (e.g., "Rs. 1250.00").
    pub fn display(&self) -> String {
        let sign = if self.amount_minor < 0 { "-" } else { "" };
        let abs = self.amount_minor.unsigned_abs();
        format!("{}{}{}.{:02}", sign, self.currency.symbol(), abs / 100, abs % 100)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
