//! Year-selection rules shared by the dashboard and the CLI.
//!
//! These are the only pieces of client-side logic: ordering a user-entered
//! range, bounding selections by what the backend actually has, and the
//! fallback list offered when the backend has nothing to say.

use std::ops::RangeInclusive;

/// First year of U.S. federal income tax data offered in the fallback list.
pub const EARLIEST_YEAR: i32 = 1862;

/// Default start of the trend range.
pub const DEFAULT_START_YEAR: i32 = 1924;

/// Orders a possibly reversed range.
///
/// # Examples
///
/// ```
/// use rates_core::years::normalize_range;
///
/// assert_eq!(normalize_range(1990, 1950), 1950..=1990);
/// assert_eq!(normalize_range(1950, 1990), 1950..=1990);
/// ```
pub fn normalize_range(
    start: i32,
    end: i32,
) -> RangeInclusive<i32> {
    start.min(end)..=start.max(end)
}

/// Descending year list used when the backend reports no available years:
/// `current_year - 1` down to [`EARLIEST_YEAR`], inclusive.
///
/// # Examples
///
/// ```
/// use rates_core::years::{fallback_years, EARLIEST_YEAR};
///
/// let years = fallback_years(2026);
/// assert_eq!(years.first(), Some(&2025));
/// assert_eq!(years.last(), Some(&EARLIEST_YEAR));
/// ```
pub fn fallback_years(current_year: i32) -> Vec<i32> {
    (EARLIEST_YEAR..current_year).rev().collect()
}

/// Inclusive bounds derived from the backend's year list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
}

impl YearBounds {
    /// Bounds of `years`, or `None` when the list is empty.
    pub fn from_years(years: &[i32]) -> Option<Self> {
        let min = years.iter().copied().min()?;
        let max = years.iter().copied().max()?;
        Some(Self { min, max })
    }

    /// # Examples
    ///
    /// ```
    /// use rates_core::years::YearBounds;
    ///
    /// let bounds = YearBounds { min: 1913, max: 2023 };
    /// assert_eq!(bounds.clamp(1800), 1913);
    /// assert_eq!(bounds.clamp(2030), 2023);
    /// assert_eq!(bounds.clamp(1980), 1980);
    /// ```
    pub fn clamp(
        &self,
        year: i32,
    ) -> i32 {
        year.clamp(self.min, self.max)
    }
}

/// Sorts newest first and drops duplicates.
pub fn sort_descending(mut years: Vec<i32>) -> Vec<i32> {
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}
