//! crates/ge_core/src/entities.rs
//! Domain entities shared across the engine (districts, parties, catalog).
//! Pure types + invariants + deterministic ordering. No I/O.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::errors::CoreError;
use crate::ids::{DistrictKey, PartyCode};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Constituency type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DistrictKind {
    #[cfg_attr(feature = "serde", serde(rename = "SMC"))]
    SingleMember,
    #[cfg_attr(feature = "serde", serde(rename = "GRC"))]
    GroupRepresentation,
}

impl DistrictKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DistrictKind::SingleMember => "SMC",
            DistrictKind::GroupRepresentation => "GRC",
        }
    }
}

impl fmt::Display for DistrictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistrictKind {
    type Err = CoreError;
    /// Accepts the short codes and the long forms used in published datasets.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().to_ascii_lowercase();
        match t.as_str() {
            "smc" | "single member constituency" | "single-member" | "single member" => {
                Ok(DistrictKind::SingleMember)
            }
            "grc" | "group representation constituency" | "group-representation"
            | "group representation" => Ok(DistrictKind::GroupRepresentation),
            _ => Err(CoreError::UnknownDistrictKind(s.to_string())),
        }
    }
}

/// One contesting party and its slate, in dataset order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PartySlate {
    pub party: PartyCode,
    pub candidates: Vec<String>,
}

/// An electoral district. Immutable once the catalog is built.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct District {
    pub key: DistrictKey,
    /// Name as spelled in the dataset.
    pub name: String,
    pub kind: DistrictKind,
    pub electors: u64,
    pub seats: u32,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub note: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub parties: Vec<PartySlate>,
}

impl District {
    /// Build a district; the key is derived from `name`.
    pub fn new(
        name: &str,
        kind: DistrictKind,
        electors: u64,
        seats: u32,
        note: Option<String>,
        parties: Vec<PartySlate>,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            key: DistrictKey::normalize(name)?,
            name: name.trim().to_string(),
            kind,
            electors,
            seats,
            note,
            parties,
        })
    }

    /// Case-insensitive substring match of `marker` against the note.
    pub fn is_walkover(&self, marker: &str) -> bool {
        let marker = marker.to_lowercase();
        self.note
            .as_deref()
            .map(|n| n.to_lowercase().contains(marker.as_str()))
            .unwrap_or(false)
    }

    pub fn has_party(&self, party: &PartyCode) -> bool {
        self.parties.iter().any(|p| &p.party == party)
    }

    pub fn candidates(&self, party: &PartyCode) -> Option<&[String]> {
        self.parties
            .iter()
            .find(|p| &p.party == party)
            .map(|p| p.candidates.as_slice())
    }

    pub fn party_codes(&self) -> impl Iterator<Item = &PartyCode> {
        self.parties.iter().map(|p| &p.party)
    }
}

/// Read-only district catalog: dataset order plus a key index.
/// Invariant: keys are unique after normalization.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Catalog {
    districts: Vec<District>,
    #[cfg_attr(feature = "serde", serde(skip))]
    index: BTreeMap<DistrictKey, usize>,
}

impl Catalog {
    pub fn new(districts: Vec<District>) -> Result<Self, CoreError> {
        let mut index = BTreeMap::new();
        for (i, d) in districts.iter().enumerate() {
            if index.insert(d.key.clone(), i).is_some() {
                return Err(CoreError::DuplicateDistrict(d.key.to_string()));
            }
        }
        Ok(Self { districts, index })
    }

    #[inline]
    pub fn districts(&self) -> &[District] {
        &self.districts
    }

    #[inline]
    pub fn get(&self, key: &DistrictKey) -> Option<&District> {
        self.index.get(key).map(|&i| &self.districts[i])
    }

    /// Lookup by any spelling of the district name.
    pub fn lookup(&self, name: &str) -> Option<&District> {
        DistrictKey::normalize(name).ok().and_then(|k| self.get(&k))
    }

    pub fn contains(&self, key: &DistrictKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.districts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.districts.is_empty()
    }

    pub fn total_seats(&self) -> u64 {
        self.districts.iter().map(|d| d.seats as u64).sum()
    }

    /// Σ electors over every district, voted or not.
    pub fn total_electors(&self) -> u64 {
        self.districts.iter().fold(0u64, |acc, d| acc.saturating_add(d.electors))
    }

    pub fn walkovers<'a>(&'a self, marker: &'a str) -> impl Iterator<Item = &'a District> + 'a {
        self.districts.iter().filter(move |d| d.is_walkover(marker))
    }
}
