//! Ordinal deal-quality buckets derived from discount percentage.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Desirability bucket for a deal.
///
/// Variants are declared best-first; [`Ord`] follows desirability, so
/// `Exceptional > Excellent > … > Minimal > Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DealQuality {
    Exceptional,
    Excellent,
    Good,
    Moderate,
    Minimal,
    Unknown,
}

impl DealQuality {
    /// All buckets, most desirable first.
    pub const ALL: [DealQuality; 6] = [
        DealQuality::Exceptional,
        DealQuality::Excellent,
        DealQuality::Good,
        DealQuality::Moderate,
        DealQuality::Minimal,
        DealQuality::Unknown,
    ];

    /// Buckets a discount percentage. `None` maps to [`DealQuality::Unknown`].
    ///
    /// Thresholds are inclusive lower bounds checked from the top: exactly
    /// 75 is `Exceptional`, 74.99 is `Excellent`.
    #[must_use]
    pub fn classify(discount_pct: Option<Decimal>) -> Self {
        let Some(pct) = discount_pct else {
            return DealQuality::Unknown;
        };
        if pct >= Decimal::from(75) {
            DealQuality::Exceptional
        } else if pct >= Decimal::from(50) {
            DealQuality::Excellent
        } else if pct >= Decimal::from(25) {
            DealQuality::Good
        } else if pct >= Decimal::from(10) {
            DealQuality::Moderate
        } else {
            DealQuality::Minimal
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DealQuality::Exceptional => "Exceptional",
            DealQuality::Excellent => "Excellent",
            DealQuality::Good => "Good",
            DealQuality::Moderate => "Moderate",
            DealQuality::Minimal => "Minimal",
            DealQuality::Unknown => "Unknown",
        }
    }

    /// Display glyph for dashboards. `Unknown` has none.
    #[must_use]
    pub fn badge(self) -> Option<&'static str> {
        match self {
            DealQuality::Exceptional => Some("🔴"),
            DealQuality::Excellent => Some("🟡"),
            DealQuality::Good => Some("🟢"),
            DealQuality::Moderate => Some("🔵"),
            DealQuality::Minimal => Some("⚪"),
            DealQuality::Unknown => None,
        }
    }

    /// Glyph and name, e.g. `"🔴 Exceptional"`; bare name when there is no glyph.
    #[must_use]
    pub fn badge_label(self) -> String {
        match self.badge() {
            Some(glyph) => format!("{glyph} {}", self.as_str()),
            None => self.as_str().to_string(),
        }
    }

    fn rank(self) -> u8 {
        match self {
            DealQuality::Exceptional => 5,
            DealQuality::Excellent => 4,
            DealQuality::Good => 3,
            DealQuality::Moderate => 2,
            DealQuality::Minimal => 1,
            DealQuality::Unknown => 0,
        }
    }
}

impl Ord for DealQuality {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for DealQuality {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for DealQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DealQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DealQuality::ALL
            .into_iter()
            .find(|q| q.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown deal quality: {s}"))
    }
}
