// crates/ge_report/src/render_html.rs
//
// Deterministic, offline HTML renderer.
// - No external assets; styles are inline.
// - Integers use `,` thousands separators.
// - Every dataset-derived string is HTML-escaped.
// Section order: Parliament seats → Composition → Summary → Votes → Districts.

use std::fmt;

use crate::structure::{DistrictPanel, ReportModel};

/// Escape text for HTML (minimal, deterministic).
fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// `1234567` → `"1,234,567"`.
fn fmt_int(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Append formatted text. Formatting into a `String` cannot fail.
fn push_fmt(h: &mut String, args: fmt::Arguments<'_>) {
    h.push_str(&fmt::format(args));
}

fn chip(color: &str) -> String {
    format!(r#"<span class="chip" style="background:{}"></span>"#, esc(color))
}

pub fn render_html(m: &ReportModel) -> String {
    let mut h = String::with_capacity(8 * 1024);
    h.push_str("<!doctype html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">\n");
    push_fmt(&mut h, format_args!("<title>{}</title>\n", esc(&m.title)));
    h.push_str(
        "<style>.chip{display:inline-block;width:12px;height:12px;margin-right:4px}\
         .seats{display:flex;flex-wrap:wrap;width:400px}\
         .seat{width:14px;height:14px;margin:2px;border-radius:50%}\
         td,th{padding:2px 8px;text-align:left}</style>\n</head><body>\n",
    );

    // Parliament seats
    push_fmt(&mut h, format_args!("<section id=\"parliament-seats\"><h3>{}</h3><div class=\"seats\">\n", esc(&m.title)));
    for cell in &m.seat_grid {
        let label = cell.party.as_ref().map(|p| p.as_str()).unwrap_or("empty");
        push_fmt(
            &mut h,
            format_args!(r#"<div class="seat" title="{}" style="background:{}"></div>"#, esc(label), esc(cell.color)),
        );
    }
    h.push_str("</div></section>\n");

    // Composition
    h.push_str("<section id=\"party-seats\"><h3>Parliament Composition</h3>\n");
    for p in &m.parliament.parties {
        push_fmt(&mut h, format_args!("<div>{}{}: {} seats</div>\n", chip(p.color), esc(p.party.as_str()), p.seats));
    }
    h.push_str("</section>\n");

    // Summary
    h.push_str(
        "<section id=\"summary-table\"><h3>Election Summary</h3>\n<table>\
         <thead><tr><th>Party</th><th>Constituencies Won</th><th>Seats</th></tr></thead><tbody>\n",
    );
    for r in &m.summary.rows {
        let won: Vec<String> = r.districts.iter().map(|d| esc(d)).collect();
        push_fmt(
            &mut h,
            format_args!(
                "<tr><td>{}{}</td><td>{}</td><td>{}</td></tr>\n",
                chip(r.color),
                esc(r.party.as_str()),
                won.join(", "),
                r.seats
            ),
        );
    }
    push_fmt(&mut h, format_args!("<tr><td colspan=\"2\">Total Seats Won</td><td>{}</td></tr>\n", m.summary.total_won));
    push_fmt(&mut h, format_args!("<tr><td colspan=\"2\">Remaining Seats</td><td>{}</td></tr>\n", m.summary.remaining));
    push_fmt(
        &mut h,
        format_args!("<tr><td colspan=\"2\">Total Parliament Seats</td><td>{}</td></tr>\n", m.summary.total_parliament),
    );
    h.push_str("</tbody></table></section>\n");

    // Votes
    h.push_str("<section id=\"total-votes\"><h3>Votes</h3>\n");
    push_fmt(&mut h, format_args!("<p>Total Votes Cast: {}</p>\n", fmt_int(m.votes.total_votes_cast)));
    push_fmt(&mut h, format_args!("<p>Total Electors: {}</p>\n", fmt_int(m.votes.total_electors)));
    for s in &m.votes.shares {
        push_fmt(
            &mut h,
            format_args!(
                "<div>{}{}: {} ({} votes)</div>\n",
                chip(s.color),
                esc(s.party.as_str()),
                esc(&s.share_1dp),
                fmt_int(s.votes)
            ),
        );
    }
    h.push_str("</section>\n");

    // Districts
    h.push_str(
        "<section id=\"districts\"><h3>Constituencies</h3>\n<table>\
         <thead><tr><th>Constituency</th><th>Type</th><th>Seats</th><th>Winner</th></tr></thead><tbody>\n",
    );
    for d in &m.districts {
        let winner = d.winner.as_ref().map(|p| p.as_str()).unwrap_or("-");
        push_fmt(
            &mut h,
            format_args!(
                "<tr><td>{}{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                chip(d.fill),
                esc(&d.name),
                d.kind,
                d.seats,
                esc(winner)
            ),
        );
    }
    h.push_str("</tbody></table></section>\n</body></html>\n");
    h
}

/// Fragment for a single district's info panel.
pub fn render_panel_html(p: &DistrictPanel) -> String {
    let mut h = String::with_capacity(1024);
    push_fmt(&mut h, format_args!("<div class=\"constituency-details\"><h3>{}</h3>\n", esc(&p.title)));
    push_fmt(&mut h, format_args!("<p><strong>Type:</strong> {}</p>\n", p.kind));
    push_fmt(&mut h, format_args!("<p><strong>Number of Electors:</strong> {}</p>\n", fmt_int(p.electors)));
    push_fmt(&mut h, format_args!("<p><strong>Seats Contested:</strong> {}</p>\n", p.seats));
    if let Some(n) = p.note.as_ref().filter(|s| !s.is_empty()) {
        push_fmt(&mut h, format_args!("<p><strong>Notes:</strong> {}</p>\n", esc(n)));
    }
    if p.walkover {
        h.push_str("<p>This is a walkover constituency. No voting is required.</p>\n");
    }
    for pp in &p.parties {
        let cands: Vec<String> = pp.candidates.iter().map(|c| esc(c)).collect();
        push_fmt(
            &mut h,
            format_args!(
                "<div class=\"party-control\">{}{} ({}): {}%</div>\n",
                chip(pp.color),
                esc(pp.party.as_str()),
                cands.join(", "),
                pp.pct
            ),
        );
    }
    push_fmt(&mut h, format_args!("<div class=\"total-votes\">Total Votes: {}%</div>\n", p.total_pct));
    h.push_str("</div>\n");
    h
}
