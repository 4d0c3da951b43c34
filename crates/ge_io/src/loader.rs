//! Loader: read the local candidate dataset, params and assignment scripts,
//! and turn them into core types. No network I/O.
//!
//! Dataset shape (object order is dataset order):
//! ```json
//! { "Bishan-Toa Payoh GRC": {
//!     "type": "GRC", "number_of_electors": 140000, "seats_contested": 5,
//!     "notes": "optional", "parties": { "PAP": ["…"], "WP": ["…"] } } }
//! ```

#![forbid(unsafe_code)]

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use ge_core::entities::PartySlate;
use ge_core::{Catalog, District, DistrictKind, Params, PartyCode};

use crate::{looks_like_url, IoError, IoResult};

/// Inputs above this size are refused before parsing.
pub const MAX_INPUT_BYTES: u64 = 16 * 1024 * 1024;

/// One scripted assignment. Kept raw so the engine can report bad rows
/// as rejections instead of failing the load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssignmentStep {
    pub district: String,
    pub party: String,
    pub pct: u32,
}

/// Read and parse a local JSON file (size-capped).
pub fn read_json_value(path: &Path) -> IoResult<Value> {
    let s = path.to_string_lossy();
    if looks_like_url(&s) {
        return Err(IoError::NonLocalPath(s.into_owned()));
    }
    let f = File::open(path).map_err(|e| IoError::Path(format!("{}: {e}", path.display())))?;
    let size = f.metadata()?.len();
    if size > MAX_INPUT_BYTES {
        return Err(IoError::TooLarge { path: s.into_owned(), size, limit: MAX_INPUT_BYTES });
    }
    let mut buf = String::with_capacity(size as usize);
    f.take(MAX_INPUT_BYTES).read_to_string(&mut buf)?;
    Ok(serde_json::from_str(&buf)?)
}

// ----------------------------- Targeted loaders -----------------------------

pub fn load_catalog(path: &Path) -> IoResult<Catalog> {
    let v = read_json_value(path)?;
    let catalog = catalog_from_value(&v)?;
    tracing::info!(
        path = %path.display(),
        districts = catalog.len(),
        seats = catalog.total_seats(),
        electors = catalog.total_electors(),
        "catalog loaded"
    );
    Ok(catalog)
}

pub fn load_params(path: &Path) -> IoResult<Params> {
    let v = read_json_value(path)?;
    let ps: Params = serde_json::from_value(v)?;
    ps.validate()?;
    Ok(ps)
}

pub fn load_assignments(path: &Path) -> IoResult<Vec<AssignmentStep>> {
    let v = read_json_value(path)?;
    let steps: Vec<AssignmentStep> = serde_json::from_value(v)?;
    tracing::debug!(path = %path.display(), steps = steps.len(), "assignments loaded");
    Ok(steps)
}

// ----------------------------- Dataset decoding -----------------------------

/// Build a `Catalog` from an already-parsed dataset value.
pub fn catalog_from_value(v: &Value) -> IoResult<Catalog> {
    let root = v.as_object().ok_or_else(|| json_err("", "dataset must be an object"))?;

    let mut districts = Vec::with_capacity(root.len());
    for (name, raw) in root {
        districts.push(district_from_value(name, raw)?);
    }
    Ok(Catalog::new(districts)?)
}

fn district_from_value(name: &str, raw: &Value) -> IoResult<District> {
    let at = format!("/{}", escape_pointer(name));
    let obj = raw.as_object().ok_or_else(|| json_err(&at, "district must be an object"))?;

    let kind: DistrictKind = str_field(obj, &at, "type")?
        .parse()
        .map_err(|e: ge_core::CoreError| json_err(&format!("{at}/type"), &e.to_string()))?;
    let electors = u64_field(obj, &at, "number_of_electors")?;
    let seats = u32::try_from(u64_field(obj, &at, "seats_contested")?)
        .map_err(|_| json_err(&format!("{at}/seats_contested"), "out of range"))?;
    let note = match obj.get("notes") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(json_err(&format!("{at}/notes"), "expected string")),
    };

    let mut parties = Vec::new();
    match obj.get("parties") {
        None | Some(Value::Null) => {}
        Some(Value::Object(m)) => {
            for (code, cands) in m {
                let p_at = format!("{at}/parties/{}", escape_pointer(code));
                let party: PartyCode = code
                    .parse()
                    .map_err(|_| json_err(&p_at, "invalid party code"))?;
                let candidates = match cands {
                    Value::Array(xs) => xs
                        .iter()
                        .map(|c| c.as_str().map(str::to_string))
                        .collect::<Option<Vec<_>>>()
                        .ok_or_else(|| json_err(&p_at, "candidates must be strings"))?,
                    Value::Null => Vec::new(),
                    _ => return Err(json_err(&p_at, "expected candidate list")),
                };
                parties.push(PartySlate { party, candidates });
            }
        }
        Some(_) => return Err(json_err(&format!("{at}/parties"), "expected object")),
    }

    Ok(District::new(name, kind, electors, seats, note, parties)?)
}

fn str_field<'a>(obj: &'a Map<String, Value>, at: &str, k: &str) -> IoResult<&'a str> {
    obj.get(k)
        .and_then(Value::as_str)
        .ok_or_else(|| json_err(&format!("{at}/{k}"), "expected string"))
}

fn u64_field(obj: &Map<String, Value>, at: &str, k: &str) -> IoResult<u64> {
    obj.get(k)
        .and_then(Value::as_u64)
        .ok_or_else(|| json_err(&format!("{at}/{k}"), "expected non-negative integer"))
}

fn json_err(pointer: &str, msg: &str) -> IoError {
    let pointer = if pointer.is_empty() { "/".to_string() } else { pointer.to_string() };
    IoError::Json { pointer, msg: msg.to_string() }
}

/// RFC 6901 escaping for a single reference token.
fn escape_pointer(tok: &str) -> String {
    tok.replace('~', "~0").replace('/', "~1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DATASET: &str = r#"{
      "Potong Pasir SMC": {
        "type": "SMC", "number_of_electors": 30000, "seats_contested": 1,
        "parties": { "SPP": ["Jose Raymond"], "PAP": ["Alex Yeo"] }
      },
      "Marine Parade-Braddell Heights GRC": {
        "type": "Group Representation Constituency", "number_of_electors": 150000,
        "seats_contested": 5, "notes": "Walkover",
        "parties": { "PAP": ["A", "B", "C", "D", "E"] }
      }
    }"#;

    fn write_tmp(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let p = dir.path().join(name);
        let mut f = File::create(&p).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        p
    }

    #[test]
    fn catalog_keeps_dataset_and_party_order() {
        let dir = tempfile::tempdir().unwrap();
        let cat = load_catalog(&write_tmp(&dir, "cands.json", DATASET)).unwrap();
        assert_eq!(cat.len(), 2);
        assert_eq!(cat.districts()[0].name, "Potong Pasir SMC");
        let pp = &cat.districts()[0];
        let codes: Vec<&str> = pp.party_codes().map(|p| p.as_str()).collect();
        assert_eq!(codes, ["SPP", "PAP"]);

        let mp = cat.lookup("marine parade braddell heights grc").unwrap();
        assert_eq!(mp.kind, DistrictKind::GroupRepresentation);
        assert!(mp.is_walkover("walkover"));
        assert_eq!(mp.candidates(&"PAP".parse().unwrap()).unwrap().len(), 5);
        assert_eq!(cat.total_seats(), 6);
    }

    #[test]
    fn shape_errors_carry_a_pointer() {
        let v: Value = serde_json::from_str(
            r#"{"X SMC": {"type": "SMC", "number_of_electors": -1, "seats_contested": 1}}"#,
        )
        .unwrap();
        match catalog_from_value(&v) {
            Err(IoError::Json { pointer, .. }) => assert_eq!(pointer, "/X SMC/number_of_electors"),
            other => panic!("unexpected: {other:?}"),
        }

        let v: Value = serde_json::from_str(
            r#"{"X": {"type": "ward", "number_of_electors": 1, "seats_contested": 1}}"#,
        )
        .unwrap();
        assert!(matches!(catalog_from_value(&v), Err(IoError::Json { .. })));
    }

    #[test]
    fn duplicate_normalized_names_are_invalid() {
        let v: Value = serde_json::from_str(
            r#"{"A-B SMC": {"type": "SMC", "number_of_electors": 1, "seats_contested": 1},
                "a b smc": {"type": "SMC", "number_of_electors": 1, "seats_contested": 1}}"#,
        )
        .unwrap();
        assert!(matches!(catalog_from_value(&v), Err(IoError::Invalid(_))));
    }

    #[test]
    fn params_and_assignments() {
        let dir = tempfile::tempdir().unwrap();
        let p = load_params(&write_tmp(&dir, "p.json", r#"{"walkover_party": "WP"}"#)).unwrap();
        assert_eq!(p.walkover_party.as_str(), "WP");
        assert_eq!(p.total_parliament_seats, 97);
        assert!(load_params(&write_tmp(&dir, "bad.json", r#"{"total_parliament_seats": 0}"#)).is_err());

        let steps = load_assignments(&write_tmp(
            &dir,
            "a.json",
            r#"[{"district": "Potong Pasir SMC", "party": "SPP", "pct": 55}]"#,
        ))
        .unwrap();
        assert_eq!(steps[0].pct, 55);
    }

    #[test]
    fn urls_are_refused() {
        assert!(matches!(
            read_json_value(Path::new("https://example.org/cands.json")),
            Err(IoError::NonLocalPath(_))
        ));
    }
}
