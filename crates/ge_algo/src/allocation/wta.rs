//! Winner-take-all seat allocation (integers only; no RNG).
//!
//! Every seat of a district goes to its plurality winner: an SMC credits one
//! seat, a GRC credits its whole team. There is no proportional split.

use ge_core::{District, DistrictKey, PartyCode};

/// Seats credited to one party for one district.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SeatAward {
    pub district: DistrictKey,
    pub party: PartyCode,
    pub seats: u32,
}

/// Credit all of `district`'s seats to `winner`.
pub fn allocate_wta(district: &District, winner: &PartyCode) -> SeatAward {
    SeatAward {
        district: district.key.clone(),
        party: winner.clone(),
        seats: district.seats,
    }
}
