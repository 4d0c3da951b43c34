//! Name normalization (catalog keys) and display formatting.

use alloc::string::String;
use alloc::vec::Vec;

/// Suffixes that keep their uppercase form when a name is formatted for display.
const KEEP_UPPER: &[&str] = &["GRC", "SMC"];

/// Lowercase, turn every `-` into a space, trim the ends.
///
/// Inner whitespace is left alone; the boundary dataset and the candidate
/// dataset only ever disagree on case and hyphenation.
pub fn normalize_key(name: &str) -> String {
    name.to_lowercase().replace('-', " ").trim().into()
}

/// Title-case each word (except `GRC`/`SMC`) and collapse runs of whitespace.
///
/// `"BISHAN-TOA PAYOH  GRC"` → `"Bishan-toa Payoh GRC"`
pub fn display_name(name: &str) -> String {
    let words: Vec<String> = name
        .split_whitespace()
        .map(|w| {
            if KEEP_UPPER.contains(&w) {
                return w.into();
            }
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    let mut out: String = first.to_uppercase().collect();
                    out.push_str(&chars.as_str().to_lowercase());
                    out
                }
                None => String::new(),
            }
        })
        .collect();
    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_hyphens() {
        assert_eq!(normalize_key(" Ang Mo Kio-GRC "), "ang mo kio grc");
        assert_eq!(normalize_key("HOLLAND-BUKIT TIMAH GRC"), "holland bukit timah grc");
    }

    #[test]
    fn display_keeps_constituency_suffix() {
        assert_eq!(display_name("MARINE PARADE-BRADDELL HEIGHTS  GRC"), "Marine Parade-braddell Heights GRC");
        assert_eq!(display_name("potong pasir SMC"), "Potong Pasir SMC");
        // suffix match is case-sensitive, like the dataset spelling
        assert_eq!(display_name("potong pasir smc"), "Potong Pasir Smc");
    }
}
