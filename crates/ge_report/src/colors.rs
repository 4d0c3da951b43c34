//! Party palette for map fills, legend chips and seat cells.

use ge_core::PartyCode;

/// Parties outside the palette, and districts with no winner yet.
pub const FALLBACK_COLOR: &str = "#808080";
/// Unfilled parliament seats.
pub const EMPTY_SEAT_COLOR: &str = "#e0e0e0";

const PALETTE: &[(&str, &str)] = &[
    ("PAP", "#d7445b"),
    ("WP", "#489ed5"),
    ("PSP", "#953932"),
    ("SDP", "#c768a6"),
    ("SPP", "#97c083"),
    ("NSP", "#f58340"),
    ("IND", "#5d6364"),
    ("RDU", "#cc5d3a"),
    ("PAR", "#664c9b"),
    ("PPP", "#74c1c8"),
    ("SDA", "#a5aab3"),
    ("SUP", "#000080"),
];

pub fn party_color(party: &PartyCode) -> &'static str {
    PALETTE
        .iter()
        .find(|(p, _)| *p == party.as_str())
        .map(|(_, c)| *c)
        .unwrap_or(FALLBACK_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_and_unknown() {
        assert_eq!(party_color(&"WP".parse().unwrap()), "#489ed5");
        assert_eq!(party_color(&"XYZ".parse().unwrap()), FALLBACK_COLOR);
    }
}
