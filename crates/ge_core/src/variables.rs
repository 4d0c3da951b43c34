//! variables.rs
//! Simulation domains (`Pct`) and `Params` with safe defaults.

use alloc::string::{String, ToString};
use core::fmt;

use crate::errors::CoreError;
use crate::ids::PartyCode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};

/// Seats in the 2025 Parliament.
pub const DEFAULT_PARLIAMENT_SEATS: u32 = 97;
/// Largest Parliament a session accepts; bounds the per-seat report grid.
pub const MAX_PARLIAMENT_SEATS: u32 = 10_000;
/// Party awarded every walkover district.
pub const DEFAULT_WALKOVER_PARTY: &str = "PAP";
/// Note fragment marking an uncontested district.
pub const DEFAULT_WALKOVER_MARKER: &str = "walkover";

/// ------------ Newtypes with invariants (validated on de/ser) ------------

/// Integer percentage, 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Pct(u8);

impl Pct {
    pub const ZERO: Pct = Pct(0);
    pub const FULL: Pct = Pct(100);

    pub fn new(v: u32) -> Result<Self, CoreError> {
        if v <= 100 { Ok(Self(v as u8)) } else { Err(CoreError::PctOutOfRange(v)) }
    }
    #[inline]
    pub fn get(self) -> u8 { self.0 }
}

impl fmt::Display for Pct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u32> for Pct {
    type Error = CoreError;
    fn try_from(v: u32) -> Result<Self, Self::Error> { Pct::new(v) }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Pct {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        use serde::de::{Error as DeError, Unexpected};
        let v = u32::deserialize(d)?;
        Pct::new(v).map_err(|_| D::Error::invalid_value(Unexpected::Unsigned(v as u64), &"0..=100"))
    }
}

/// ------------ Params ------------

/// Simulation parameters. Every field defaults, so `{}` is a valid params file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct Params {
    /// Fixed size of Parliament; remaining seats are counted against it.
    pub total_parliament_seats: u32,
    /// Party credited with 100% in every walkover district.
    pub walkover_party: PartyCode,
    /// Case-insensitive note fragment that marks a walkover.
    pub walkover_marker: String,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            total_parliament_seats: DEFAULT_PARLIAMENT_SEATS,
            walkover_party: PartyCode::from_static(DEFAULT_WALKOVER_PARTY),
            walkover_marker: DEFAULT_WALKOVER_MARKER.to_string(),
        }
    }
}

impl Params {
    /// Domain checks that serde cannot express.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.total_parliament_seats == 0 || self.total_parliament_seats > MAX_PARLIAMENT_SEATS {
            return Err(CoreError::DomainOutOfRange("total_parliament_seats"));
        }
        if self.walkover_marker.trim().is_empty() {
            return Err(CoreError::DomainOutOfRange("walkover_marker"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pct_bounds() {
        assert_eq!(Pct::new(0).unwrap().get(), 0);
        assert_eq!(Pct::new(100).unwrap(), Pct::FULL);
        assert_eq!(Pct::new(101), Err(CoreError::PctOutOfRange(101)));
    }

    #[test]
    fn defaults_are_valid() {
        let p = Params::default();
        assert_eq!(p.total_parliament_seats, 97);
        assert_eq!(p.walkover_party.as_str(), "PAP");
        assert!(p.validate().is_ok());
        let zero = Params { total_parliament_seats: 0, ..Params::default() };
        assert!(zero.validate().is_err());
        let max = Params { total_parliament_seats: MAX_PARLIAMENT_SEATS, ..Params::default() };
        assert!(max.validate().is_ok());
        let huge = Params { total_parliament_seats: u32::MAX, ..Params::default() };
        assert_eq!(huge.validate(), Err(CoreError::DomainOutOfRange("total_parliament_seats")));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn params_partial_json_uses_defaults() {
        let p: Params = serde_json::from_str(r#"{"total_parliament_seats": 93}"#).unwrap();
        assert_eq!(p.total_parliament_seats, 93);
        assert_eq!(p.walkover_marker, "walkover");
        assert!(serde_json::from_str::<Params>(r#"{"seats": 1}"#).is_err());
        assert!(serde_json::from_str::<Pct>("101").is_err());
    }
}
