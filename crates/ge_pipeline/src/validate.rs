//! crates/ge_pipeline/src/validate.rs
//! Catalog checks before a session starts. Deterministic; integer reasoning only.

use ge_core::{Catalog, DistrictKey, Params};

/// Issue severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Severity {
    Error,
    Warning,
}

/// Where the issue occurred.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
pub enum EntityRef {
    Root,
    Param(&'static str),
    District(DistrictKey),
}

/// One validation finding.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
    #[serde(rename = "where")]
    pub where_: EntityRef,
}

/// pass = no Error; issue order is stable.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ValidationReport {
    pub pass: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.issues.iter().any(|i| i.code == code)
    }
}

pub fn validate_catalog(catalog: &Catalog, params: &Params) -> ValidationReport {
    let mut issues = Vec::new();

    issues.extend(check_params(params));
    issues.extend(check_seat_total(catalog, params));
    issues.extend(check_districts(catalog, params));

    sort_issues_stably(&mut issues);

    ValidationReport {
        pass: !issues.iter().any(|i| i.severity == Severity::Error),
        issues,
    }
}

fn check_params(params: &Params) -> Vec<ValidationIssue> {
    match params.validate() {
        Ok(()) => Vec::new(),
        Err(e) => vec![ValidationIssue {
            severity: Severity::Error,
            code: "Params.OutOfRange",
            message: e.to_string(),
            where_: EntityRef::Root,
        }],
    }
}

/// Errors:
/// - "Catalog.Empty"
/// - "Catalog.SeatsExceedParliament" when Σ seats > total_parliament_seats
/// Warnings:
/// - "Catalog.SeatsShortOfParliament" when Σ seats < total_parliament_seats
fn check_seat_total(catalog: &Catalog, params: &Params) -> Vec<ValidationIssue> {
    if catalog.is_empty() {
        return vec![ValidationIssue {
            severity: Severity::Error,
            code: "Catalog.Empty",
            message: "catalog has no districts".to_string(),
            where_: EntityRef::Root,
        }];
    }

    let seats = catalog.total_seats();
    let total = params.total_parliament_seats as u64;
    let mut out = Vec::new();
    if seats > total {
        out.push(ValidationIssue {
            severity: Severity::Error,
            code: "Catalog.SeatsExceedParliament",
            message: format!("districts contest {seats} seats but parliament has {total}"),
            where_: EntityRef::Param("total_parliament_seats"),
        });
    } else if seats < total {
        out.push(ValidationIssue {
            severity: Severity::Warning,
            code: "Catalog.SeatsShortOfParliament",
            message: format!("districts contest {seats} of {total} seats; {} can never be filled", total - seats),
            where_: EntityRef::Param("total_parliament_seats"),
        });
    }
    out
}

/// Warnings:
/// - "District.NoParties" (contested district with an empty ballot)
/// - "District.ZeroSeats"
/// - "District.WalkoverPartyAbsent" (walkover credited to a party not on its slate)
fn check_districts(catalog: &Catalog, params: &Params) -> Vec<ValidationIssue> {
    let mut out = Vec::new();
    for d in catalog.districts() {
        let walkover = d.is_walkover(&params.walkover_marker);
        if d.parties.is_empty() && !walkover {
            out.push(ValidationIssue {
                severity: Severity::Warning,
                code: "District.NoParties",
                message: format!("{} lists no contesting parties", d.name),
                where_: EntityRef::District(d.key.clone()),
            });
        }
        if d.seats == 0 {
            out.push(ValidationIssue {
                severity: Severity::Warning,
                code: "District.ZeroSeats",
                message: format!("{} contests no seats", d.name),
                where_: EntityRef::District(d.key.clone()),
            });
        }
        if walkover && !d.parties.is_empty() && !d.has_party(&params.walkover_party) {
            out.push(ValidationIssue {
                severity: Severity::Warning,
                code: "District.WalkoverPartyAbsent",
                message: format!("{} is a walkover but {} is not on its slate", d.name, params.walkover_party),
                where_: EntityRef::District(d.key.clone()),
            });
        }
    }
    out
}

/// By code, then location, then message.
fn sort_issues_stably(issues: &mut [ValidationIssue]) {
    issues.sort_by(|a, b| {
        a.code
            .cmp(b.code)
            .then_with(|| a.where_.cmp(&b.where_))
            .then_with(|| a.message.cmp(&b.message))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use ge_core::entities::PartySlate;
    use ge_core::{District, DistrictKind};

    fn d(name: &str, seats: u32, note: Option<&str>, parties: &[&str]) -> District {
        let parties = parties
            .iter()
            .map(|p| PartySlate { party: p.parse().unwrap(), candidates: vec![] })
            .collect();
        District::new(name, DistrictKind::SingleMember, 100, seats, note.map(Into::into), parties).unwrap()
    }

    #[test]
    fn seats_over_parliament_is_an_error() {
        let cat = Catalog::new(vec![d("A SMC", 60, None, &["PAP"]), d("B SMC", 40, None, &["WP"])]).unwrap();
        let r = validate_catalog(&cat, &Params::default());
        assert!(!r.pass);
        assert!(r.has_code("Catalog.SeatsExceedParliament"));
    }

    #[test]
    fn short_catalog_only_warns() {
        let cat = Catalog::new(vec![d("A SMC", 1, None, &["PAP"])]).unwrap();
        let r = validate_catalog(&cat, &Params::default());
        assert!(r.pass);
        assert_eq!(r.warnings().count(), 1);
        assert!(r.has_code("Catalog.SeatsShortOfParliament"));
    }

    #[test]
    fn district_warnings_are_sorted() {
        let cat = Catalog::new(vec![
            d("Zeta SMC", 0, None, &[]),
            d("Alpha SMC", 1, None, &[]),
            d("Walk SMC", 1, Some("walkover"), &[]),
            d("Odd SMC", 1, Some("WALKOVER"), &["WP"]),
        ])
        .unwrap();
        let r = validate_catalog(&cat, &Params::default());
        assert!(r.pass);
        let codes: Vec<(&str, String)> = r
            .issues
            .iter()
            .map(|i| match &i.where_ {
                EntityRef::District(k) => (i.code, k.to_string()),
                _ => (i.code, String::new()),
            })
            .collect();
        assert_eq!(
            codes,
            [
                ("Catalog.SeatsShortOfParliament", String::new()),
                ("District.NoParties", "alpha smc".to_string()),
                ("District.NoParties", "zeta smc".to_string()),
                ("District.WalkoverPartyAbsent", "odd smc".to_string()),
                ("District.ZeroSeats", "zeta smc".to_string()),
            ]
        );
    }

    #[test]
    fn empty_catalog_fails() {
        let r = validate_catalog(&Catalog::default(), &Params::default());
        assert!(!r.pass);
        assert!(r.has_code("Catalog.Empty"));
    }
}
