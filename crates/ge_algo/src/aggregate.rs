//! Aggregation: roll per-district winners and percentages up into seats,
//! votes and wins per party.
//!
//! Districts are visited in ledger order, so `winners` and each party's
//! `wins_by_party` list follow the order in which districts were first
//! touched. Walkover districts missing from the ledger are visited after,
//! in catalog order. Integer math only.

use std::collections::BTreeMap;
use std::fmt;

use ge_core::rounding::votes_from_pct;
use ge_core::{Catalog, DistrictKey, Params, PartyCode, Pct};

use crate::allocation::wta::allocate_wta;
use crate::ledger::VoteLedger;
use crate::tabulation::plurality::top_share;

#[cfg(feature = "serde")]
use serde::Serialize;

/// One district credited to a party.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DistrictWin {
    pub district: DistrictKey,
    pub seats: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AggregateResult {
    pub seats_by_party: BTreeMap<PartyCode, u32>,
    pub votes_by_party: BTreeMap<PartyCode, u64>,
    pub total_votes_cast: u64,
    /// Σ electors over the whole catalog, voted or not.
    pub total_electors: u64,
    pub wins_by_party: BTreeMap<PartyCode, Vec<DistrictWin>>,
    /// `(district, winner)` in evaluation order.
    pub winners: Vec<(DistrictKey, PartyCode)>,
    pub remaining_seats: u32,
    pub total_parliament_seats: u32,
}

impl AggregateResult {
    /// Σ seats credited to any party.
    pub fn seats_won(&self) -> u32 {
        self.seats_by_party.values().fold(0u32, |acc, s| acc.saturating_add(*s))
    }

    pub fn seats_of(&self, party: &PartyCode) -> u32 {
        self.seats_by_party.get(party).copied().unwrap_or(0)
    }

    pub fn votes_of(&self, party: &PartyCode) -> u64 {
        self.votes_by_party.get(party).copied().unwrap_or(0)
    }

    pub fn winner(&self, district: &DistrictKey) -> Option<&PartyCode> {
        self.winners.iter().find(|(d, _)| d == district).map(|(_, p)| p)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    /// Credited seats exceed the fixed size of Parliament.
    DataIntegrity { won: u64, total: u32 },
    /// The ledger names a district the catalog does not have.
    LedgerMismatch(DistrictKey),
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateError::DataIntegrity { won, total } => write!(
                f,
                "{won} seats credited but parliament has {total}"
            ),
            AggregateError::LedgerMismatch(d) => write!(f, "ledger district not in catalog: {d}"),
        }
    }
}

impl std::error::Error for AggregateError {}

/// Compute seats, votes and wins for the current ledger.
pub fn aggregate(
    catalog: &Catalog,
    ledger: &VoteLedger,
    params: &Params,
) -> Result<AggregateResult, AggregateError> {
    let mut out = AggregateResult {
        total_electors: catalog.total_electors(),
        total_parliament_seats: params.total_parliament_seats,
        ..AggregateResult::default()
    };
    let total = params.total_parliament_seats;
    let mut won: u64 = 0;

    for entry in ledger.entries() {
        let d = catalog
            .get(entry.key())
            .ok_or_else(|| AggregateError::LedgerMismatch(entry.key().clone()))?;

        let winner = if d.is_walkover(&params.walkover_marker) {
            Some(params.walkover_party.clone())
        } else {
            top_share(entry).map(|(p, _)| p.clone())
        };
        let Some(winner) = winner else { continue };

        for (p, v) in entry.shares() {
            add_votes(&mut out, p, votes_from_pct(v.get(), d.electors));
        }
        credit(&mut out, allocate_wta(d, &winner), &mut won, total)?;
    }

    // Walkovers the caller never seeded still count, as 100% to the walkover party.
    for d in catalog.walkovers(&params.walkover_marker) {
        if ledger.get(&d.key).is_some() {
            continue;
        }
        add_votes(&mut out, &params.walkover_party, votes_from_pct(Pct::FULL.get(), d.electors));
        credit(&mut out, allocate_wta(d, &params.walkover_party), &mut won, total)?;
    }

    // `won <= total` holds here, so the narrowing is exact.
    out.remaining_seats = total - won as u32;
    Ok(out)
}

fn add_votes(out: &mut AggregateResult, party: &PartyCode, votes: u64) {
    let v = out.votes_by_party.entry(party.clone()).or_insert(0);
    *v = v.saturating_add(votes);
    out.total_votes_cast = out.total_votes_cast.saturating_add(votes);
}

/// Credit `award`, refusing as soon as the running total would pass Parliament.
/// Every per-party count stays below `total`, so it fits in `u32`.
fn credit(
    out: &mut AggregateResult,
    award: crate::allocation::SeatAward,
    won: &mut u64,
    total: u32,
) -> Result<(), AggregateError> {
    let next = *won + u64::from(award.seats);
    if next > u64::from(total) {
        return Err(AggregateError::DataIntegrity { won: next, total });
    }
    *won = next;

    let seats = out.seats_by_party.entry(award.party.clone()).or_insert(0);
    *seats = seats
        .checked_add(award.seats)
        .ok_or(AggregateError::DataIntegrity { won: next, total })?;
    out.wins_by_party
        .entry(award.party.clone())
        .or_default()
        .push(DistrictWin { district: award.district.clone(), seats: award.seats });
    out.winners.push((award.district, award.party));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{catalog, key, party, pct, slate};
    use crate::ledger::assign;
    use crate::tabulation::winner_of;
    use crate::walkover::seed_walkovers;
    use ge_core::{District, DistrictKind};
    use proptest::prelude::*;

    #[test]
    fn votes_seats_and_wins() {
        let cat = catalog();
        let params = Params::default();
        let mut l = seed_walkovers(&cat, &params);
        let bt = key("Bishan-Toa Payoh GRC");
        let pp = key("Potong Pasir SMC");
        assign(&mut l, &cat, &params, &bt, &party("PAP"), pct(60)).unwrap();
        assign(&mut l, &cat, &params, &bt, &party("WP"), pct(40)).unwrap();
        assign(&mut l, &cat, &params, &pp, &party("SPP"), pct(51)).unwrap();

        let r = aggregate(&cat, &l, &params).unwrap();
        assert_eq!(r.votes_of(&party("PAP")), 84_000 + 150_000);
        assert_eq!(r.votes_of(&party("WP")), 56_000);
        assert_eq!(r.votes_of(&party("SPP")), 15_300);
        assert_eq!(r.total_votes_cast, 84_000 + 150_000 + 56_000 + 15_300);
        assert_eq!(r.total_electors, 320_000);
        assert_eq!(r.seats_of(&party("PAP")), 10);
        assert_eq!(r.seats_of(&party("SPP")), 1);
        assert_eq!(r.remaining_seats, 97 - 11);

        // walkover was seeded first, so it leads PAP's list
        let pap: Vec<&str> = r.wins_by_party[&party("PAP")].iter().map(|w| w.district.as_str()).collect();
        assert_eq!(pap, ["marine parade grc", "bishan toa payoh grc"]);
        assert_eq!(r.winner(&pp), Some(&party("SPP")));
    }

    #[test]
    fn untouched_districts_contribute_nothing() {
        let cat = catalog();
        let params = Params { walkover_marker: "no such marker".into(), ..Params::default() };
        let r = aggregate(&cat, &VoteLedger::new(), &params).unwrap();
        assert!(r.seats_by_party.is_empty());
        assert!(r.wins_by_party.is_empty());
        assert_eq!(r.total_votes_cast, 0);
        assert_eq!(r.total_electors, 320_000);
        assert_eq!(r.remaining_seats, 97);
    }

    #[test]
    fn unseeded_walkover_is_still_credited() {
        let cat = catalog();
        let params = Params::default();
        let r = aggregate(&cat, &VoteLedger::new(), &params).unwrap();
        assert_eq!(r.seats_of(&party("PAP")), 5);
        assert_eq!(r.votes_of(&party("PAP")), 150_000);
    }

    #[test]
    fn too_many_seats_is_a_data_integrity_error() {
        let big = District::new("Big GRC", DistrictKind::GroupRepresentation, 10, 98, Some("walkover".into()), vec![slate("PAP")]).unwrap();
        let cat = Catalog::new(vec![big]).unwrap();
        let params = Params::default();
        let l = seed_walkovers(&cat, &params);
        assert_eq!(
            aggregate(&cat, &l, &params),
            Err(AggregateError::DataIntegrity { won: 98, total: 97 })
        );
    }

    #[test]
    fn seat_counts_past_u32_are_a_data_integrity_error() {
        let huge = |name: &str| {
            District::new(name, DistrictKind::GroupRepresentation, 10, 3_000_000_000, Some("Walkover".into()), vec![slate("PAP")])
                .unwrap()
        };
        let cat = Catalog::new(vec![huge("North GRC"), huge("South GRC")]).unwrap();
        let params = Params { total_parliament_seats: u32::MAX, ..Params::default() };
        let l = seed_walkovers(&cat, &params);

        let r = std::panic::catch_unwind(|| aggregate(&cat, &l, &params));
        assert_eq!(
            r.expect("aggregate must not panic"),
            Err(AggregateError::DataIntegrity { won: 6_000_000_000, total: u32::MAX })
        );
    }

    proptest! {
        /// Seats conserve against the parliament total and the winner is stable
        /// for any reachable ledger.
        #[test]
        fn seats_conserved_and_winner_stable(
            ops in prop::collection::vec((0usize..2, 0usize..3, 0u32..=100), 0..48)
        ) {
            let cat = catalog();
            let params = Params::default();
            let districts = [key("Bishan-Toa Payoh GRC"), key("Potong Pasir SMC")];
            let parties = [party("PAP"), party("WP"), party("SPP"), party("IND")];
            let mut l = seed_walkovers(&cat, &params);
            for (di, pi, v) in ops {
                let _ = assign(&mut l, &cat, &params, &districts[di], &parties[pi + di], pct(v));
            }

            let r = aggregate(&cat, &l, &params).unwrap();
            prop_assert_eq!(r.seats_won() + r.remaining_seats, params.total_parliament_seats);
            for k in &districts {
                let a = winner_of(&l, &cat, &params, k);
                let b = winner_of(&l, &cat, &params, k);
                prop_assert_eq!(&a, &b);
                prop_assert_eq!(a.as_ref(), r.winner(k));
            }
        }
    }
}
