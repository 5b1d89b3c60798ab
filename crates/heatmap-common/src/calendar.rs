//! Month helpers for axis labels and tooltips.

use chrono::Month;

/// Months of the year, 1-based, in calendar order.
pub const MONTHS: [u32; 12] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];

/// Full English month name for a 1-based month number.
///
/// Returns `None` outside `1..=12`.
pub fn month_name(month: u32) -> Option<&'static str> {
    let month = u8::try_from(month).ok()?;
    Month::try_from(month).ok().map(|m| m.name())
}
