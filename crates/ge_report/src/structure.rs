//! Report model: everything a renderer needs, already ordered and formatted.
//!
//! Party order in every block is seats (or votes) descending, then party code,
//! so two runs over the same state render identically.

use std::iter;

use ge_algo::AggregateResult;
use ge_core::names::display_name;
use ge_core::rounding::percent_one_decimal;
use ge_core::variables::MAX_PARLIAMENT_SEATS;
use ge_core::{Catalog, District, DistrictKey, Params, PartyCode, Pct};

use crate::colors::{party_color, EMPTY_SEAT_COLOR, FALLBACK_COLOR};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportModel {
    pub title: String,
    pub parliament: ParliamentBlock,
    pub summary: SummaryTable,
    pub votes: VoteBlock,
    /// One cell per parliament seat: party seats first, then empty seats.
    /// Never longer than `MAX_PARLIAMENT_SEATS`.
    pub seat_grid: Vec<SeatCell>,
    /// Map fill per district, in catalog order.
    pub districts: Vec<DistrictRow>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartySeats {
    pub party: PartyCode,
    pub seats: u32,
    pub color: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParliamentBlock {
    pub total_seats: u32,
    pub seats_won: u32,
    pub remaining_seats: u32,
    pub parties: Vec<PartySeats>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryRow {
    pub party: PartyCode,
    pub color: &'static str,
    /// `"Name (seats)"` per district won, in the order they were won.
    pub districts: Vec<String>,
    pub seats: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryTable {
    pub rows: Vec<SummaryRow>,
    pub total_won: u32,
    pub remaining: u32,
    pub total_parliament: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteShare {
    pub party: PartyCode,
    pub color: &'static str,
    pub votes: u64,
    /// votes / total electors, e.g. `"42.7%"`.
    pub share_1dp: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteBlock {
    pub total_votes_cast: u64,
    pub total_electors: u64,
    pub shares: Vec<VoteShare>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeatCell {
    pub party: Option<PartyCode>,
    pub color: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistrictRow {
    pub key: DistrictKey,
    pub name: String,
    pub kind: &'static str,
    pub seats: u32,
    pub winner: Option<PartyCode>,
    pub fill: &'static str,
}

/// Info panel for one district (hover/click).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistrictPanel {
    pub title: String,
    pub kind: &'static str,
    pub electors: u64,
    pub seats: u32,
    pub note: Option<String>,
    pub walkover: bool,
    pub parties: Vec<PanelParty>,
    pub total_pct: u32,
    pub winner: Option<PartyCode>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelParty {
    pub party: PartyCode,
    pub color: &'static str,
    pub candidates: Vec<String>,
    pub pct: u8,
}

pub fn build_model(catalog: &Catalog, agg: &AggregateResult, params: &Params) -> ReportModel {
    let total = params.total_parliament_seats;

    let mut by_seats: Vec<(&PartyCode, u32)> = agg.seats_by_party.iter().map(|(p, s)| (p, *s)).collect();
    by_seats.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let parties: Vec<PartySeats> = by_seats
        .iter()
        .map(|(p, s)| PartySeats { party: (*p).clone(), seats: *s, color: party_color(p) })
        .collect();

    let seats_won = agg.seats_won();
    let parliament = ParliamentBlock {
        total_seats: total,
        seats_won,
        remaining_seats: agg.remaining_seats,
        parties: parties.clone(),
    };

    let rows = by_seats
        .iter()
        .map(|(p, s)| SummaryRow {
            party: (*p).clone(),
            color: party_color(p),
            districts: agg
                .wins_by_party
                .get(*p)
                .map(|ws| {
                    ws.iter()
                        .map(|w| {
                            let name = catalog
                                .get(&w.district)
                                .map(|d| display_name(&d.name))
                                .unwrap_or_else(|| w.district.to_string());
                            format!("{name} ({})", w.seats)
                        })
                        .collect()
                })
                .unwrap_or_default(),
            seats: *s,
        })
        .collect();
    let summary = SummaryTable { rows, total_won: seats_won, remaining: agg.remaining_seats, total_parliament: total };

    let mut by_votes: Vec<(&PartyCode, u64)> = agg.votes_by_party.iter().map(|(p, v)| (p, *v)).collect();
    by_votes.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let votes = VoteBlock {
        total_votes_cast: agg.total_votes_cast,
        total_electors: agg.total_electors,
        shares: by_votes
            .into_iter()
            .map(|(p, v)| VoteShare {
                party: p.clone(),
                color: party_color(p),
                votes: v,
                share_1dp: format!("{}%", percent_one_decimal(v, agg.total_electors)),
            })
            .collect(),
    };

    let seat_grid: Vec<SeatCell> = parties
        .iter()
        .flat_map(|ps| {
            iter::repeat_with(move || SeatCell { party: Some(ps.party.clone()), color: ps.color }).take(ps.seats as usize)
        })
        .chain(
            iter::repeat_with(|| SeatCell { party: None, color: EMPTY_SEAT_COLOR })
                .take(agg.remaining_seats as usize),
        )
        .take(MAX_PARLIAMENT_SEATS as usize)
        .collect();

    let districts = catalog
        .districts()
        .iter()
        .map(|d| {
            let winner = agg.winner(&d.key).cloned();
            DistrictRow {
                key: d.key.clone(),
                name: display_name(&d.name),
                kind: d.kind.as_str(),
                seats: d.seats,
                fill: winner.as_ref().map(party_color).unwrap_or(FALLBACK_COLOR),
                winner,
            }
        })
        .collect();

    ReportModel {
        title: format!("Parliament Seats ({total} Total)"),
        parliament,
        summary,
        votes,
        seat_grid,
        districts,
    }
}

/// Panel for `district` given its current ledger shares.
/// A walkover shows only the walkover party, fixed at 100%.
pub fn district_panel(
    district: &District,
    shares: &[(PartyCode, Pct)],
    winner: Option<&PartyCode>,
    params: &Params,
) -> DistrictPanel {
    let walkover = district.is_walkover(&params.walkover_marker);
    let parties: Vec<PanelParty> = if walkover {
        let p = &params.walkover_party;
        vec![PanelParty {
            party: p.clone(),
            color: party_color(p),
            candidates: district.candidates(p).map(<[String]>::to_vec).unwrap_or_default(),
            pct: Pct::FULL.get(),
        }]
    } else {
        district
            .parties
            .iter()
            .map(|s| PanelParty {
                party: s.party.clone(),
                color: party_color(&s.party),
                candidates: s.candidates.clone(),
                pct: shares
                    .iter()
                    .find(|(p, _)| *p == s.party)
                    .map(|(_, v)| v.get())
                    .unwrap_or(0),
            })
            .collect()
    };

    DistrictPanel {
        title: display_name(&district.name),
        kind: district.kind.as_str(),
        electors: district.electors,
        seats: district.seats,
        note: district.note.clone(),
        walkover,
        total_pct: parties.iter().map(|p| p.pct as u32).sum(),
        parties,
        winner: winner.cloned(),
    }
}
