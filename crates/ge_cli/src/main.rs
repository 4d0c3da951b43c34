// crates/ge_cli/src/main.rs
//
// Exit codes, typed error mapping, logging setup, and the run path:
// load → validate → seed walkovers → replay assignments → result.json → reports.

mod args;

mod exitcodes {
    pub const OK: u8 = 0;
    pub const VALIDATION: u8 = 2;
    pub const IO: u8 = 4;
    pub const DATA_INTEGRITY: u8 = 5;
}

use std::path::Path;
use std::process::ExitCode;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use args::{parse_and_validate as parse_cli, Args};
use ge_core::{Catalog, Params, PartyCode};
use ge_io::{canonical_json, hasher, loader, IoError};
use ge_pipeline::{build_result, validate_catalog, EngineError, Simulation};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug, Error)]
enum MainError {
    /// Malformed input JSON, bad params or overrides, unknown district names.
    #[error("{0}")]
    Validation(String),
    /// Read/write/path/limit failures.
    #[error("{0}")]
    Io(String),
    /// District seats do not reconcile with the size of Parliament.
    #[error("{0}")]
    DataIntegrity(String),
}

impl MainError {
    fn exit_code(&self) -> u8 {
        match self {
            MainError::Validation(_) => exitcodes::VALIDATION,
            MainError::Io(_) => exitcodes::IO,
            MainError::DataIntegrity(_) => exitcodes::DATA_INTEGRITY,
        }
    }
}

impl From<IoError> for MainError {
    fn from(e: IoError) -> Self {
        match e {
            IoError::Json { .. } | IoError::Invalid(_) => MainError::Validation(e.to_string()),
            IoError::Path(_) | IoError::TooLarge { .. } | IoError::NonLocalPath(_) => MainError::Io(e.to_string()),
        }
    }
}

impl From<EngineError> for MainError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::DataIntegrity(_) => MainError::DataIntegrity(e.to_string()),
            EngineError::Io(io) => io.into(),
            EngineError::Rejected(_) | EngineError::Input(_) | EngineError::Validation(_) => {
                MainError::Validation(e.to_string())
            }
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("ge: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION);
        }
    };
    init_tracing(&args);

    let res = if args.validate_only { validate_only(&args) } else { run_once(&args) };
    match res {
        Ok(()) => ExitCode::from(exitcodes::OK),
        Err(e) => {
            eprintln!("ge: error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

/// Logs go to stderr; stdout carries only requested panels.
fn init_tracing(args: &Args) {
    let level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Params file (or defaults) with CLI overrides applied.
fn load_config(args: &Args) -> Result<(Catalog, Params), MainError> {
    let catalog = loader::load_catalog(&args.catalog)?;
    let digest = hasher::sha256_file(&args.catalog)?;
    tracing::debug!(sha256 = %digest, "catalog file");
    let mut params = match &args.params {
        Some(p) => loader::load_params(p)?,
        None => Params::default(),
    };
    if let Some(n) = args.total_seats {
        params.total_parliament_seats = n;
    }
    if let Some(p) = &args.walkover_party {
        params.walkover_party = p
            .parse::<PartyCode>()
            .map_err(|e| MainError::Validation(format!("--walkover-party {p:?}: {e}")))?;
    }
    params.validate().map_err(|e| MainError::Validation(format!("params: {e}")))?;
    Ok((catalog, params))
}

fn validate_only(args: &Args) -> Result<(), MainError> {
    let (catalog, params) = load_config(args)?;
    if let Some(a) = &args.assignments {
        loader::load_assignments(a)?;
    }

    let report = validate_catalog(&catalog, &params);
    for w in report.warnings() {
        tracing::warn!(code = w.code, "{}", w.message);
    }
    if let Some(e) = report.errors().next() {
        let msg = format!("{}: {}", e.code, e.message);
        return Err(match e.code {
            "Catalog.SeatsExceedParliament" => MainError::DataIntegrity(msg),
            _ => MainError::Validation(msg),
        });
    }
    if !args.quiet {
        eprintln!(
            "validate-only: inputs OK ({} districts, {} seats)",
            catalog.len(),
            catalog.total_seats()
        );
    }
    Ok(())
}

fn run_once(args: &Args) -> Result<(), MainError> {
    let (catalog, params) = load_config(args)?;
    let steps = match &args.assignments {
        Some(p) => loader::load_assignments(p)?,
        None => Vec::new(),
    };

    let mut sim = Simulation::new(catalog, params)?;
    let rejections = sim.apply_script(&steps)?;
    tracing::info!(
        applied = steps.len() - rejections.len(),
        rejected = rejections.len(),
        seats_won = sim.aggregate().seats_won(),
        remaining = sim.aggregate().remaining_seats,
        "assignments replayed"
    );

    let doc = build_result(&sim, rejections)?;
    let value = serde_json::to_value(&doc).map_err(|e| MainError::Io(format!("result to JSON: {e}")))?;
    canonical_json::write_canonical_file(&args.out.join("result.json"), &value)?;

    maybe_render_reports(args, &sim, &args.out)?;
    print_panels(args, &sim)?;

    if !args.quiet {
        eprintln!("run: {} written to {}", doc.id, args.out.display());
    }
    Ok(())
}

fn maybe_render_reports(args: &Args, sim: &Simulation, out_dir: &Path) -> Result<(), MainError> {
    if args.render.is_empty() {
        return Ok(());
    }
    let model = ge_report::build_model(sim.catalog(), sim.aggregate(), sim.params());
    for fmt in &args.render {
        match fmt.as_str() {
            "json" => render_json_report(&model, out_dir)?,
            "html" => render_html_report(&model, out_dir)?,
            other => return Err(MainError::Validation(format!("unknown renderer: {other}"))),
        }
    }
    Ok(())
}

// Report JSON keeps section order, so it is pretty-printed rather than canonicalised.
fn render_json_report(model: &ge_report::ReportModel, out_dir: &Path) -> Result<(), MainError> {
    #[cfg(feature = "report-json")]
    {
        let mut bytes = serde_json::to_vec_pretty(&ge_report::render_json(model))
            .map_err(|e| MainError::Io(format!("report to JSON: {e}")))?;
        bytes.push(b'\n');
        canonical_json::write_bytes_atomic(&out_dir.join("report.json"), &bytes)?;
        Ok(())
    }
    #[cfg(not(feature = "report-json"))]
    {
        let _ = (model, out_dir);
        Err(MainError::Validation("json renderer not enabled (build with feature `report-json`)".into()))
    }
}

fn render_html_report(model: &ge_report::ReportModel, out_dir: &Path) -> Result<(), MainError> {
    #[cfg(feature = "report-html")]
    {
        let html = ge_report::render_html(model);
        canonical_json::write_bytes_atomic(&out_dir.join("report.html"), html.as_bytes())?;
        Ok(())
    }
    #[cfg(not(feature = "report-html"))]
    {
        let _ = (model, out_dir);
        Err(MainError::Validation("html renderer not enabled (build with feature `report-html`)".into()))
    }
}

/// One line per `--district`, in flag order: panel JSON, or panel HTML when only html is built.
fn print_panels(args: &Args, sim: &Simulation) -> Result<(), MainError> {
    for name in &args.districts {
        let view = sim
            .district_view(name)
            .ok_or_else(|| MainError::Validation(format!("--district {name:?}: not in catalog")))?;
        let panel = ge_report::district_panel(view.district, &view.shares, view.winner.as_ref(), sim.params());
        #[cfg(feature = "report-json")]
        println!("{}", ge_report::render_panel_json(&panel));
        #[cfg(all(not(feature = "report-json"), feature = "report-html"))]
        print!("{}", ge_report::render_panel_html(&panel));
        #[cfg(not(any(feature = "report-json", feature = "report-html")))]
        let _ = panel;
    }
    Ok(())
}
