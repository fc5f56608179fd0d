//! # Rating Module
//!
//! Provides the `Rating` aggregate: the average score of a pokemon's reviews.
//!
//! ## Why Keep Total and Count?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Averaging as floats then rounding:                                     │
//! │    (1 + 2 + 2 + 3 + 3 + 3 + 3 + 3) / 8 = 2.5  → rounding mode matters  │
//! │    and 0.125 is not always 0.125 once it went through f64              │
//! │                                                                         │
//! │  OUR SOLUTION: exact integer sum + count                                │
//! │    The mean is a fraction total/count. Rounding to hundredths is done  │
//! │    with integer arithmetic, so the tie cases are decided exactly.      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use catalog_core::rating::Rating;
//!
//! let rating = Rating::from_ratings([5, 4, 4]);
//! assert_eq!(rating.hundredths(), 433);
//! assert_eq!(rating.to_string(), "4.33");
//!
//! // No reviews is a defined value, not an error
//! assert_eq!(Rating::empty().mean(), 0.0);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

// =============================================================================
// Rating Type
// =============================================================================

/// Sum and count of review ratings for one pokemon.
///
/// ## Where Rating is Used
/// ```text
/// reviews.rating ──► SUM / COUNT (one SQL query) ──► Rating::from_totals
///                                                        │
///                            PokemonService::rating ◄────┘
///                                     │
///                                     ▼
///                      caller presents rating.hundredths() → "4.33"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rating {
    total: i64,
    count: i64,
}

impl Rating {
    /// Rating of a pokemon without reviews.
    #[inline]
    pub const fn empty() -> Self {
        Rating { total: 0, count: 0 }
    }

    /// Builds a rating from a precomputed sum and count.
    ///
    /// A non-positive `count` yields the empty rating.
    pub const fn from_totals(total: i64, count: i64) -> Self {
        if count <= 0 {
            Rating::empty()
        } else {
            Rating { total, count }
        }
    }

    /// Builds a rating from individual review scores.
    pub fn from_ratings<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        let mut rating = Rating::empty();
        for score in ratings {
            rating.record(score);
        }
        rating
    }

    /// Adds one review score.
    #[inline]
    pub fn record(&mut self, score: i32) {
        self.total += score as i64;
        self.count += 1;
    }

    /// Sum of all scores.
    #[inline]
    pub const fn total(&self) -> i64 {
        self.total
    }

    /// Number of reviews.
    #[inline]
    pub const fn count(&self) -> i64 {
        self.count
    }

    /// Returns true when no review was recorded.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Unrounded arithmetic mean. Exactly `0.0` without reviews.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.total as f64 / self.count as f64
    }

    /// Mean in hundredths, rounded with Bankers Rounding (round half to even).
    ///
    /// ## Bankers Rounding Explained
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  Half-way values go to the nearest EVEN hundredth:                  │
    /// │    0.125 → 0.12     0.375 → 0.38     2.5 stays 2.50                │
    /// │                                                                     │
    /// │  Same behaviour as rounding a decimal to 2 places by default        │
    /// │  in most business runtimes, so presented ratings match.            │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Implementation
    /// `total * 100 / count` split into quotient and remainder with
    /// Euclidean division, then the remainder decides the direction.
    pub fn hundredths(&self) -> i64 {
        if self.count == 0 {
            return 0;
        }

        // i128 so large totals cannot overflow after scaling
        let numerator = self.total as i128 * 100;
        let denominator = self.count as i128;
        let quotient = numerator.div_euclid(denominator);
        let remainder = numerator.rem_euclid(denominator);

        let rounded = match (remainder * 2).cmp(&denominator) {
            Ordering::Less => quotient,
            Ordering::Greater => quotient + 1,
            Ordering::Equal if quotient % 2 == 0 => quotient,
            Ordering::Equal => quotient + 1,
        };

        rounded as i64
    }

    /// Mean rounded to 2 decimal places, as a float for presentation.
    pub fn rounded(&self) -> f64 {
        self.hundredths() as f64 / 100.0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the rounded mean with exactly two decimals.
impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hundredths = self.hundredths();
        let sign = if hundredths < 0 { "-" } else { "" };
        let abs = hundredths.abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl FromIterator<i32> for Rating {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        Rating::from_ratings(iter)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rating_is_zero() {
        let rating = Rating::empty();
        assert!(rating.is_empty());
        assert_eq!(rating.mean(), 0.0);
        assert_eq!(rating.hundredths(), 0);
        assert_eq!(rating.to_string(), "0.00");
    }

    #[test]
    fn test_from_totals_ignores_non_positive_count() {
        assert_eq!(Rating::from_totals(12, 0), Rating::empty());
        assert_eq!(Rating::from_totals(12, -1), Rating::empty());
    }

    #[test]
    fn test_mean_is_unrounded() {
        let rating = Rating::from_ratings([5, 4, 4]);
        assert_eq!(rating.total(), 13);
        assert_eq!(rating.count(), 3);
        assert!((rating.mean() - 13.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hundredths_rounds_to_nearest() {
        assert_eq!(Rating::from_ratings([5, 4, 4]).hundredths(), 433);
        assert_eq!(Rating::from_ratings([5, 5, 4]).hundredths(), 467);
        assert_eq!(Rating::from_ratings([1, 2]).hundredths(), 150);
    }

    #[test]
    fn test_hundredths_bankers_rounding_on_ties() {
        // 1/8 = 0.125 → 0.12 (2 is even)
        assert_eq!(Rating::from_totals(1, 8).hundredths(), 12);
        // 3/8 = 0.375 → 0.38 (8 is even)
        assert_eq!(Rating::from_totals(3, 8).hundredths(), 38);
        // -1/8 = -0.125 → -0.12
        assert_eq!(Rating::from_totals(-1, 8).hundredths(), -12);
    }

    #[test]
    fn test_display() {
        assert_eq!(Rating::from_ratings([5, 4, 4]).to_string(), "4.33");
        assert_eq!(Rating::from_ratings([3]).to_string(), "3.00");
        assert_eq!(Rating::from_totals(-1, 8).to_string(), "-0.12");
    }

    #[test]
    fn test_collect_from_iterator() {
        let rating: Rating = vec![2, 3, 4].into_iter().collect();
        assert_eq!(rating.count(), 3);
        assert_eq!(rating.rounded(), 3.0);
    }
}
