// crates/ge_algo/src/lib.rs
#![forbid(unsafe_code)]

//! Pure engine math over an in-memory `Catalog` and `VoteLedger`.
//!
//! - `ledger`    : percentage assignments per district; the 100% budget is
//!                  enforced on every mutation
//! - `tabulation`: plurality winner per district (first-inserted wins ties)
//! - `allocation`: winner-take-all seat crediting
//! - `aggregate` : votes, seats, wins, remaining seats
//! - `walkover`  : one-time seeding of uncontested districts
//!
//! No I/O, no RNG; every function is deterministic given the same inputs.

// Core IDs re-exported for callers that only depend on this crate.
pub use ge_core::{Catalog, District, DistrictKey, Params, PartyCode, Pct};

pub mod ledger;
pub mod walkover;
pub mod aggregate;

pub mod tabulation {
    pub mod plurality;

    pub use plurality::winner_of;
}

pub mod allocation {
    pub mod wta;

    pub use wta::{allocate_wta, SeatAward};
}

// Tight, explicit re-exports (avoid wildcard export drift).
pub use aggregate::{aggregate, AggregateError, AggregateResult, DistrictWin};
pub use ledger::{assign, AssignError, DistrictShares, VoteLedger};
pub use tabulation::winner_of;
pub use walkover::seed_walkovers;

#[cfg(test)]
pub(crate) mod fixtures {
    //! Small catalogs shared by the unit tests.

    use ge_core::entities::PartySlate;
    use ge_core::{Catalog, District, DistrictKind};

    pub fn slate(p: &str) -> PartySlate {
        PartySlate { party: p.parse().unwrap(), candidates: vec![format!("{p} candidate")] }
    }

    /// Three districts: a contested GRC, a contested SMC, and a walkover GRC.
    pub fn catalog() -> Catalog {
        Catalog::new(vec![
            District::new(
                "Bishan-Toa Payoh GRC",
                DistrictKind::GroupRepresentation,
                140_000,
                5,
                None,
                vec![slate("PAP"), slate("WP")],
            )
            .unwrap(),
            District::new(
                "Potong Pasir SMC",
                DistrictKind::SingleMember,
                30_000,
                1,
                None,
                vec![slate("PAP"), slate("SPP"), slate("IND")],
            )
            .unwrap(),
            District::new(
                "Marine Parade GRC",
                DistrictKind::GroupRepresentation,
                150_000,
                5,
                Some("Walkover".into()),
                vec![slate("PAP")],
            )
            .unwrap(),
        ])
        .unwrap()
    }

    pub fn key(name: &str) -> ge_core::DistrictKey {
        ge_core::DistrictKey::normalize(name).unwrap()
    }

    pub fn party(p: &str) -> ge_core::PartyCode {
        p.parse().unwrap()
    }

    pub fn pct(v: u32) -> ge_core::Pct {
        ge_core::Pct::new(v).unwrap()
    }
}
