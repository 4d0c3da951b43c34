//! Walkover seeding: every district whose note carries the walkover marker is
//! fixed at 100% for the designated party and locked against later edits.

use ge_core::{Catalog, Params};

use crate::ledger::VoteLedger;

/// Fresh ledger holding only the walkover entries, in catalog order.
pub fn seed_walkovers(catalog: &Catalog, params: &Params) -> VoteLedger {
    let mut ledger = VoteLedger::new();
    for d in catalog.walkovers(&params.walkover_marker) {
        ledger.lock_full(&d.key, params.walkover_party.clone());
        tracing::debug!(district = %d.key, party = %params.walkover_party, "walkover seeded");
    }
    ledger
}
