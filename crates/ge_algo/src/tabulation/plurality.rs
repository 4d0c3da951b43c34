// crates/ge_algo/src/tabulation/plurality.rs
//
// Plurality winner per district.
//
// Contract:
// - Walkover districts always resolve to `Params::walkover_party`, whatever
//   the ledger holds.
// - Otherwise the party with the highest percentage wins. Ties go to the
//   party assigned first (ledger order); a later party needs a strictly
//   greater share to take the lead.
// - A district with no ledger entry, or an empty one, has no winner.
// - No RNG, no I/O.

use ge_core::{Catalog, DistrictKey, Params, PartyCode, Pct};

use crate::ledger::{DistrictShares, VoteLedger};

/// Winner of `district`, or `None` when nothing has been assigned there yet
/// (or the district is not in the catalog).
pub fn winner_of(
    ledger: &VoteLedger,
    catalog: &Catalog,
    params: &Params,
    district: &DistrictKey,
) -> Option<PartyCode> {
    let d = catalog.get(district)?;
    if d.is_walkover(&params.walkover_marker) {
        return Some(params.walkover_party.clone());
    }
    ledger.get(district).and_then(top_share).map(|(p, _)| p.clone())
}

/// First `(party, pct)` holding the maximum, scanning in ledger order.
pub fn top_share(entry: &DistrictShares) -> Option<(&PartyCode, Pct)> {
    let mut best: Option<(&PartyCode, Pct)> = None;
    for (p, v) in entry.shares() {
        match best {
            Some((_, b)) if *v <= b => {}
            _ => best = Some((p, *v)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{catalog, key, party, pct};
    use crate::ledger::assign;

    #[test]
    fn highest_share_wins() {
        let cat = catalog();
        let params = Params::default();
        let mut l = VoteLedger::new();
        let k = key("Potong Pasir SMC");
        assert_eq!(winner_of(&l, &cat, &params, &k), None);

        assign(&mut l, &cat, &params, &k, &party("PAP"), pct(30)).unwrap();
        assign(&mut l, &cat, &params, &k, &party("SPP"), pct(45)).unwrap();
        assign(&mut l, &cat, &params, &k, &party("IND"), pct(25)).unwrap();
        assert_eq!(winner_of(&l, &cat, &params, &k), Some(party("SPP")));
    }

    #[test]
    fn tie_goes_to_first_assigned() {
        let cat = catalog();
        let params = Params::default();
        let mut l = VoteLedger::new();
        let k = key("Bishan-Toa Payoh GRC");
        assign(&mut l, &cat, &params, &k, &party("WP"), pct(50)).unwrap();
        assign(&mut l, &cat, &params, &k, &party("PAP"), pct(50)).unwrap();
        assert_eq!(winner_of(&l, &cat, &params, &k), Some(party("WP")));

        // overwriting keeps WP's slot, so it still leads the tie
        assign(&mut l, &cat, &params, &k, &party("WP"), pct(40)).unwrap();
        assign(&mut l, &cat, &params, &k, &party("PAP"), pct(40)).unwrap();
        assert_eq!(winner_of(&l, &cat, &params, &k), Some(party("WP")));
    }

    #[test]
    fn a_lone_zero_share_still_wins() {
        let cat = catalog();
        let params = Params::default();
        let mut l = VoteLedger::new();
        let k = key("Potong Pasir SMC");
        assign(&mut l, &cat, &params, &k, &party("IND"), pct(0)).unwrap();
        assert_eq!(winner_of(&l, &cat, &params, &k), Some(party("IND")));
    }

    #[test]
    fn walkover_resolves_without_ledger() {
        let cat = catalog();
        let params = Params::default();
        let l = VoteLedger::new();
        assert_eq!(winner_of(&l, &cat, &params, &key("marine parade grc")), Some(party("PAP")));
        assert_eq!(winner_of(&l, &cat, &params, &key("Nowhere SMC")), None);
    }
}
