//! Integer-first rounding helpers (half-up). No floats, no I/O.
//!
//! Vote counts are `round(pct / 100 * electors)` with ties rounded up.

use alloc::format;
use alloc::string::String;

/// Absolute votes for `pct` percent of `electors`, rounded half-up.
#[inline]
pub fn votes_from_pct(pct: u8, electors: u64) -> u64 {
    let num = (pct as u128) * (electors as u128);
    ((num + 50) / 100) as u64
}

/// `num / den` as a percentage in tenths, rounded half-up.
/// `den == 0` yields 0 (no electorate → no share).
#[inline]
pub fn share_tenths(num: u64, den: u64) -> u64 {
    if den == 0 {
        return 0;
    }
    let n = (num as u128) * 1000;
    let d = den as u128;
    ((2 * n + d) / (2 * d)) as u64
}

/// Render tenths as `"12.3"`.
pub fn fmt_tenths(tenths: u64) -> String {
    format!("{}.{}", tenths / 10, tenths % 10)
}

/// One-decimal percentage string for `num / den`, e.g. `"60.0"`.
pub fn percent_one_decimal(num: u64, den: u64) -> String {
    fmt_tenths(share_tenths(num, den))
}
