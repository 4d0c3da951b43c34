//! ge_report: pure offline report model + renderers (JSON/HTML).
//!
//! Determinism rules:
//! - No network, no I/O here. Callers supply the catalog and aggregate in memory.
//! - Percent strings use one-decimal formatting without float arithmetic.
//! - Stable section order and field names.

#![deny(unsafe_code)]

pub mod colors;
pub mod structure;

#[cfg(feature = "render_json")]
pub mod render_json;
#[cfg(feature = "render_html")]
pub mod render_html;

pub use colors::{party_color, EMPTY_SEAT_COLOR, FALLBACK_COLOR};
pub use structure::{
    build_model, district_panel, DistrictPanel, DistrictRow, PanelParty, ParliamentBlock,
    PartySeats, ReportModel, SeatCell, SummaryRow, SummaryTable, VoteBlock, VoteShare,
};

#[cfg(feature = "render_html")]
pub use render_html::{render_html, render_panel_html};
#[cfg(feature = "render_json")]
pub use render_json::{render_json, render_panel_json};
