//! build_result.rs
//! Assemble the serializable result of a session and derive its ID from the
//! canonical bytes of the ID-less payload (`RES:<sha256>`).

use serde::Serialize;

use ge_algo::AggregateResult;
use ge_core::{DistrictKey, Params, PartyCode, Pct};
use ge_io::hasher;

use crate::simulation::Simulation;
use crate::EngineError;

/// A scripted assignment the engine refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    /// Position in the script.
    pub index: usize,
    pub district: String,
    pub party: String,
    pub pct: u32,
    pub reason: String,
}

/// One ledger cell. Rows keep ledger insertion order, which decides ties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerRow {
    pub district: DistrictKey,
    pub party: PartyCode,
    pub pct: Pct,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WinnerRow {
    pub district: DistrictKey,
    pub party: PartyCode,
    pub seats: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultDoc {
    pub id: String,
    pub catalog_sha256: String,
    pub params: Params,
    pub ledger: Vec<LedgerRow>,
    pub winners: Vec<WinnerRow>,
    pub aggregate: AggregateResult,
    pub rejections: Vec<Rejection>,
}

#[derive(Serialize)]
struct ResultNoId<'a> {
    catalog_sha256: &'a str,
    params: &'a Params,
    ledger: &'a [LedgerRow],
    winners: &'a [WinnerRow],
    aggregate: &'a AggregateResult,
    rejections: &'a [Rejection],
}

/// Snapshot `sim` into a `ResultDoc`. Same session state → same ID.
pub fn build_result(sim: &Simulation, rejections: Vec<Rejection>) -> Result<ResultDoc, EngineError> {
    let catalog_sha256 = hasher::sha256_canonical(sim.catalog())?;

    let ledger: Vec<LedgerRow> = sim
        .ledger()
        .entries()
        .iter()
        .flat_map(|e| {
            e.shares().iter().map(move |(p, v)| LedgerRow {
                district: e.key().clone(),
                party: p.clone(),
                pct: *v,
            })
        })
        .collect();

    let agg = sim.aggregate();
    let winners: Vec<WinnerRow> = agg
        .winners
        .iter()
        .map(|(d, p)| WinnerRow {
            district: d.clone(),
            party: p.clone(),
            seats: sim.catalog().get(d).map(|x| x.seats).unwrap_or(0),
        })
        .collect();

    let no_id = ResultNoId {
        catalog_sha256: &catalog_sha256,
        params: sim.params(),
        ledger: &ledger,
        winners: &winners,
        aggregate: agg,
        rejections: &rejections,
    };
    let id = format!("RES:{}", hasher::sha256_canonical(&no_id)?);

    Ok(ResultDoc {
        id,
        catalog_sha256,
        params: sim.params().clone(),
        ledger,
        winners,
        aggregate: agg.clone(),
        rejections,
    })
}
