//! Session object: owns the catalog, params and ledger; applies mutations and
//! notifies observers after each recompute.

use ge_algo::{aggregate, assign, seed_walkovers, winner_of, AggregateResult, VoteLedger};
use ge_core::{Catalog, District, DistrictKey, Params, PartyCode, Pct};
use ge_io::AssignmentStep;

use crate::build_result::Rejection;
use crate::validate::{validate_catalog, ValidationReport};
use crate::EngineError;

/// What triggered a recompute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cause {
    /// Walkovers seeded at session start.
    Init,
    Assign { district: DistrictKey, party: PartyCode, pct: Pct },
}

/// Snapshot handed to observers after every recompute.
#[derive(Debug)]
pub struct Recomputed<'a> {
    /// 0 after init, +1 per accepted mutation.
    pub revision: u64,
    pub cause: &'a Cause,
    pub ledger: &'a VoteLedger,
    pub aggregate: &'a AggregateResult,
}

pub trait SimulationObserver {
    fn on_recompute(&mut self, ev: &Recomputed<'_>);
}

/// Catalog row plus live ledger state, for an info panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistrictView<'a> {
    pub district: &'a District,
    /// Every party on the ballot, in catalog order; unassigned parties show 0.
    pub shares: Vec<(PartyCode, Pct)>,
    pub total: u32,
    pub remaining: u32,
    pub winner: Option<PartyCode>,
    pub locked: bool,
}

pub struct Simulation {
    catalog: Catalog,
    params: Params,
    report: ValidationReport,
    ledger: VoteLedger,
    result: AggregateResult,
    cause: Cause,
    revision: u64,
    observers: Vec<Box<dyn SimulationObserver>>,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("districts", &self.catalog.len())
            .field("revision", &self.revision)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Simulation {
    /// Validate the catalog, seed walkovers and compute the first aggregate.
    pub fn new(catalog: Catalog, params: Params) -> Result<Self, EngineError> {
        let report = validate_catalog(&catalog, &params);
        for w in report.warnings() {
            tracing::warn!(code = w.code, "{}", w.message);
        }
        if let Some(e) = report.errors().next() {
            let msg = format!("{}: {}", e.code, e.message);
            return Err(match e.code {
                "Catalog.SeatsExceedParliament" => EngineError::DataIntegrity(msg),
                _ => EngineError::Validation(msg),
            });
        }

        let ledger = seed_walkovers(&catalog, &params);
        let result = aggregate(&catalog, &ledger, &params)?;
        tracing::info!(
            districts = catalog.len(),
            walkovers = ledger.len(),
            seats_won = result.seats_won(),
            remaining = result.remaining_seats,
            "simulation initialised"
        );

        Ok(Self {
            catalog,
            params,
            report,
            ledger,
            result,
            cause: Cause::Init,
            revision: 0,
            observers: Vec::new(),
        })
    }

    /// Register an observer. It immediately receives the current snapshot,
    /// so late subscribers still see the initial state.
    pub fn subscribe<O: SimulationObserver + 'static>(&mut self, mut observer: O) {
        observer.on_recompute(&self.snapshot());
        self.observers.push(Box::new(observer));
    }

    /// Set `party`'s share in the district named `district` (any spelling).
    pub fn assign(&mut self, district: &str, party: &str, pct: u32) -> Result<(), EngineError> {
        let key = DistrictKey::normalize(district)?;
        let party: PartyCode = party
            .parse()
            .map_err(|_| EngineError::Input(format!("invalid party code: {party:?}")))?;
        let pct = Pct::new(pct)?;
        self.assign_key(&key, &party, pct)
    }

    /// Typed variant of [`Simulation::assign`].
    pub fn assign_key(&mut self, key: &DistrictKey, party: &PartyCode, pct: Pct) -> Result<(), EngineError> {
        // Work on a copy so a failed recompute cannot leave a half-applied state.
        let mut next = self.ledger.clone();
        if let Err(e) = assign(&mut next, &self.catalog, &self.params, key, party, pct) {
            tracing::warn!(district = %key, party = %party, pct = pct.get(), "{e}");
            return Err(e.into());
        }
        let result = aggregate(&self.catalog, &next, &self.params)?;

        self.ledger = next;
        self.result = result;
        self.revision += 1;
        self.cause = Cause::Assign { district: key.clone(), party: party.clone(), pct };
        self.notify();
        Ok(())
    }

    /// Apply a scripted list in order; every refused step is reported, none aborts the run.
    /// Data-integrity failures do abort.
    pub fn apply_script(&mut self, steps: &[AssignmentStep]) -> Result<Vec<Rejection>, EngineError> {
        let mut rejected = Vec::new();
        for (i, s) in steps.iter().enumerate() {
            match self.assign(&s.district, &s.party, s.pct) {
                Ok(()) => {}
                Err(e) if e.is_recoverable() => {
                    // ledger refusals are already logged by `assign_key`
                    if !matches!(e, EngineError::Rejected(_)) {
                        tracing::warn!(index = i, district = %s.district, party = %s.party, "{e}");
                    }
                    rejected.push(Rejection {
                        index: i,
                        district: s.district.clone(),
                        party: s.party.clone(),
                        pct: s.pct,
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }
        Ok(rejected)
    }

    /// Winner of the district named `district`, if it has one yet.
    pub fn winner_of(&self, district: &str) -> Option<PartyCode> {
        let key = DistrictKey::normalize(district).ok()?;
        winner_of(&self.ledger, &self.catalog, &self.params, &key)
    }

    pub fn district_view(&self, district: &str) -> Option<DistrictView<'_>> {
        let d = self.catalog.lookup(district)?;
        let entry = self.ledger.get(&d.key);
        let shares = d
            .party_codes()
            .map(|p| (p.clone(), self.ledger.share(&d.key, p)))
            .collect();
        Some(DistrictView {
            district: d,
            shares,
            total: self.ledger.district_total(&d.key),
            remaining: self.ledger.remaining_budget(&d.key),
            winner: winner_of(&self.ledger, &self.catalog, &self.params, &d.key),
            locked: entry.map(|e| e.is_locked()).unwrap_or(false)
                || d.is_walkover(&self.params.walkover_marker),
        })
    }

    #[inline]
    pub fn aggregate(&self) -> &AggregateResult {
        &self.result
    }

    #[inline]
    pub fn ledger(&self) -> &VoteLedger {
        &self.ledger
    }

    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[inline]
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Findings from the catalog check run by `new` (warnings only; errors abort).
    #[inline]
    pub fn validation(&self) -> &ValidationReport {
        &self.report
    }

    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn snapshot(&self) -> Recomputed<'_> {
        Recomputed {
            revision: self.revision,
            cause: &self.cause,
            ledger: &self.ledger,
            aggregate: &self.result,
        }
    }

    fn notify(&mut self) {
        let mut observers = std::mem::take(&mut self.observers);
        {
            let ev = self.snapshot();
            for o in observers.iter_mut() {
                o.on_recompute(&ev);
            }
        }
        self.observers = observers;
    }
}
