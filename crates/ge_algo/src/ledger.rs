//! crates/ge_algo/src/ledger.rs
//! Vote ledger: district → (party → percentage), in insertion order.
//!
//! Insertion order is part of the contract: the plurality winner resolves ties
//! to the party assigned first, so both the district list and the party list
//! inside each district keep the order in which entries were first written.
//! Overwriting an existing party keeps its original position.

use std::collections::BTreeMap;
use std::fmt;

use ge_core::{Catalog, DistrictKey, Params, PartyCode, Pct};

#[cfg(feature = "serde")]
use serde::ser::{SerializeMap, Serializer};
#[cfg(feature = "serde")]
use serde::Serialize;

/// Reasons an `assign` is refused. A refused assignment leaves the ledger untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignError {
    /// `requested + others` would exceed 100.
    BudgetExceeded { district: DistrictKey, party: PartyCode, requested: Pct, others: u32 },
    UnknownDistrict(DistrictKey),
    /// The party does not contest this district.
    UnknownParty { district: DistrictKey, party: PartyCode },
    /// Walkover districts are fixed at 100% for the designated party.
    WalkoverLocked(DistrictKey),
}

impl fmt::Display for AssignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignError::BudgetExceeded { district, party, requested, others } => write!(
                f,
                "budget exceeded in {district}: {party} {requested} + others {others}% > 100%"
            ),
            AssignError::UnknownDistrict(d) => write!(f, "unknown district: {d}"),
            AssignError::UnknownParty { district, party } => {
                write!(f, "party {party} does not contest {district}")
            }
            AssignError::WalkoverLocked(d) => write!(f, "walkover district is locked: {d}"),
        }
    }
}

impl std::error::Error for AssignError {}

/// Percentages for one district, in first-assignment order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistrictShares {
    key: DistrictKey,
    shares: Vec<(PartyCode, Pct)>,
    locked: bool,
}

impl DistrictShares {
    fn new(key: DistrictKey) -> Self {
        Self { key, shares: Vec::new(), locked: false }
    }

    #[inline]
    pub fn key(&self) -> &DistrictKey {
        &self.key
    }

    /// `(party, pct)` pairs in first-assignment order.
    #[inline]
    pub fn shares(&self) -> &[(PartyCode, Pct)] {
        &self.shares
    }

    pub fn get(&self, party: &PartyCode) -> Option<Pct> {
        self.shares.iter().find(|(p, _)| p == party).map(|(_, v)| *v)
    }

    /// Σ percentages; never above 100 for a ledger built through `assign`.
    pub fn total(&self) -> u32 {
        self.shares.iter().map(|(_, v)| v.get() as u32).sum()
    }

    /// Σ percentages of every party except `party`.
    pub fn others(&self, party: &PartyCode) -> u32 {
        self.shares
            .iter()
            .filter(|(p, _)| p != party)
            .map(|(_, v)| v.get() as u32)
            .sum()
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    fn put(&mut self, party: PartyCode, pct: Pct) {
        match self.shares.iter_mut().find(|(p, _)| *p == party) {
            Some(slot) => slot.1 = pct,
            None => self.shares.push((party, pct)),
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for DistrictShares {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut m = s.serialize_map(Some(self.shares.len()))?;
        for (p, v) in &self.shares {
            m.serialize_entry(p, v)?;
        }
        m.end()
    }
}

/// Mutable vote state. Starts empty; districts appear on first assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteLedger {
    entries: Vec<DistrictShares>,
    index: BTreeMap<DistrictKey, usize>,
}

impl VoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in first-assignment order.
    #[inline]
    pub fn entries(&self) -> &[DistrictShares] {
        &self.entries
    }

    pub fn get(&self, key: &DistrictKey) -> Option<&DistrictShares> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    /// Current share for `(district, party)`; 0 when never assigned.
    pub fn share(&self, key: &DistrictKey, party: &PartyCode) -> Pct {
        self.get(key).and_then(|d| d.get(party)).unwrap_or(Pct::ZERO)
    }

    /// Σ percentages in a district (0 for an untouched district).
    pub fn district_total(&self, key: &DistrictKey) -> u32 {
        self.get(key).map(DistrictShares::total).unwrap_or(0)
    }

    /// Headroom left under the 100% budget.
    pub fn remaining_budget(&self, key: &DistrictKey) -> u32 {
        100u32.saturating_sub(self.district_total(key))
    }

    /// Largest value `party` could be assigned in `key` right now.
    pub fn max_for(&self, key: &DistrictKey, party: &PartyCode) -> u32 {
        let others = self.get(key).map(|d| d.others(party)).unwrap_or(0);
        100u32.saturating_sub(others)
    }

    pub fn is_locked(&self, key: &DistrictKey) -> bool {
        self.get(key).map(DistrictShares::is_locked).unwrap_or(false)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn slot_mut(&mut self, key: &DistrictKey) -> &mut DistrictShares {
        let i = match self.index.get(key) {
            Some(&i) => i,
            None => {
                self.entries.push(DistrictShares::new(key.clone()));
                let i = self.entries.len() - 1;
                self.index.insert(key.clone(), i);
                i
            }
        };
        &mut self.entries[i]
    }

    /// Unchecked write; callers validate first.
    pub(crate) fn put(&mut self, key: &DistrictKey, party: PartyCode, pct: Pct) {
        self.slot_mut(key).put(party, pct);
    }

    /// Replace a district's contents with a single locked 100% share.
    pub(crate) fn lock_full(&mut self, key: &DistrictKey, party: PartyCode) {
        let slot = self.slot_mut(key);
        slot.shares.clear();
        slot.shares.push((party, Pct::FULL));
        slot.locked = true;
    }
}

#[cfg(feature = "serde")]
impl Serialize for VoteLedger {
    /// `{ district: { party: pct } }` in insertion order.
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut m = s.serialize_map(Some(self.entries.len()))?;
        for e in &self.entries {
            m.serialize_entry(&e.key, e)?;
        }
        m.end()
    }
}

/// Set `party`'s share in `district` to `pct`, keeping the district within 100%.
///
/// Checks run in this order: unknown district, walkover lock, party not on
/// the ballot, budget. On `Err` the ledger is unchanged.
pub fn assign(
    ledger: &mut VoteLedger,
    catalog: &Catalog,
    params: &Params,
    district: &DistrictKey,
    party: &PartyCode,
    pct: Pct,
) -> Result<(), AssignError> {
    let d = catalog
        .get(district)
        .ok_or_else(|| AssignError::UnknownDistrict(district.clone()))?;

    if ledger.is_locked(district) || d.is_walkover(&params.walkover_marker) {
        return Err(AssignError::WalkoverLocked(district.clone()));
    }
    if !d.has_party(party) {
        return Err(AssignError::UnknownParty { district: district.clone(), party: party.clone() });
    }

    let others = ledger.get(district).map(|e| e.others(party)).unwrap_or(0);
    if pct.get() as u32 + others > 100 {
        return Err(AssignError::BudgetExceeded {
            district: district.clone(),
            party: party.clone(),
            requested: pct,
            others,
        });
    }

    ledger.put(district, party.clone(), pct);
    tracing::debug!(district = %district, party = %party, pct = pct.get(), "assigned");
    Ok(())
}
