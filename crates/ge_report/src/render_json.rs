//! render_json.rs
//! Report JSON renderer: title → parliament → summary → votes → seat_grid → districts.
//!
//! Key order is insertion order (`serde_json` built with `preserve_order`).

use serde_json::{Map as JsonMap, Value};

use crate::structure::{
    DistrictPanel, DistrictRow, ParliamentBlock, ReportModel, SeatCell, SummaryTable, VoteBlock,
};

pub fn render_json(m: &ReportModel) -> Value {
    let mut root = obj();
    root.insert("title".into(), Value::from(m.title.clone()));
    root.insert("parliament".into(), parliament_json(&m.parliament));
    root.insert("summary".into(), summary_json(&m.summary));
    root.insert("votes".into(), votes_json(&m.votes));
    root.insert("seat_grid".into(), Value::Array(m.seat_grid.iter().map(seat_json).collect()));
    root.insert("districts".into(), Value::Array(m.districts.iter().map(district_json).collect()));
    Value::Object(root)
}

pub fn render_panel_json(p: &DistrictPanel) -> Value {
    let mut o = obj();
    o.insert("title".into(), Value::from(p.title.clone()));
    o.insert("type".into(), Value::from(p.kind));
    o.insert("electors".into(), Value::from(p.electors));
    o.insert("seats".into(), Value::from(p.seats));
    if let Some(n) = p.note.as_ref().filter(|s| !s.is_empty()) {
        o.insert("note".into(), Value::from(n.clone()));
    }
    o.insert("walkover".into(), Value::Bool(p.walkover));
    let parties = p
        .parties
        .iter()
        .map(|pp| {
            let mut r = obj();
            r.insert("party".into(), Value::from(pp.party.as_str()));
            r.insert("color".into(), Value::from(pp.color));
            r.insert("candidates".into(), Value::from(pp.candidates.clone()));
            r.insert("pct".into(), Value::from(pp.pct));
            Value::Object(r)
        })
        .collect();
    o.insert("parties".into(), Value::Array(parties));
    o.insert("total_pct".into(), Value::from(p.total_pct));
    o.insert("winner".into(), opt_party(p.winner.as_ref()));
    Value::Object(o)
}

/* ----------------------------- sections ----------------------------- */

fn parliament_json(b: &ParliamentBlock) -> Value {
    let mut o = obj();
    o.insert("total_seats".into(), Value::from(b.total_seats));
    o.insert("seats_won".into(), Value::from(b.seats_won));
    o.insert("remaining_seats".into(), Value::from(b.remaining_seats));
    let parties = b
        .parties
        .iter()
        .map(|p| {
            let mut r = obj();
            r.insert("party".into(), Value::from(p.party.as_str()));
            r.insert("seats".into(), Value::from(p.seats));
            r.insert("color".into(), Value::from(p.color));
            Value::Object(r)
        })
        .collect();
    o.insert("parties".into(), Value::Array(parties));
    Value::Object(o)
}

fn summary_json(t: &SummaryTable) -> Value {
    let rows = t
        .rows
        .iter()
        .map(|r| {
            let mut o = obj();
            o.insert("party".into(), Value::from(r.party.as_str()));
            o.insert("color".into(), Value::from(r.color));
            o.insert("districts_won".into(), Value::from(r.districts.clone()));
            o.insert("seats".into(), Value::from(r.seats));
            Value::Object(o)
        })
        .collect();
    let mut o = obj();
    o.insert("rows".into(), Value::Array(rows));
    o.insert("total_won".into(), Value::from(t.total_won));
    o.insert("remaining".into(), Value::from(t.remaining));
    o.insert("total_parliament".into(), Value::from(t.total_parliament));
    Value::Object(o)
}

fn votes_json(v: &VoteBlock) -> Value {
    let mut o = obj();
    o.insert("total_votes_cast".into(), Value::from(v.total_votes_cast));
    o.insert("total_electors".into(), Value::from(v.total_electors));
    let shares = v
        .shares
        .iter()
        .map(|s| {
            let mut r = obj();
            r.insert("party".into(), Value::from(s.party.as_str()));
            r.insert("votes".into(), Value::from(s.votes));
            r.insert("share".into(), Value::from(s.share_1dp.clone()));
            r.insert("color".into(), Value::from(s.color));
            Value::Object(r)
        })
        .collect();
    o.insert("shares".into(), Value::Array(shares));
    Value::Object(o)
}

fn seat_json(c: &SeatCell) -> Value {
    let mut o = obj();
    o.insert("party".into(), opt_party(c.party.as_ref()));
    o.insert("color".into(), Value::from(c.color));
    Value::Object(o)
}

fn district_json(d: &DistrictRow) -> Value {
    let mut o = obj();
    o.insert("key".into(), Value::from(d.key.as_str()));
    o.insert("name".into(), Value::from(d.name.clone()));
    o.insert("type".into(), Value::from(d.kind));
    o.insert("seats".into(), Value::from(d.seats));
    o.insert("winner".into(), opt_party(d.winner.as_ref()));
    o.insert("fill".into(), Value::from(d.fill));
    Value::Object(o)
}

/* ----------------------------- helpers ----------------------------- */

#[inline]
fn obj() -> JsonMap<String, Value> {
    JsonMap::new()
}

fn opt_party(p: Option<&ge_core::PartyCode>) -> Value {
    p.map(|p| Value::from(p.as_str())).unwrap_or(Value::Null)
}
