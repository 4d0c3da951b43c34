// crates/ge_cli/src/args.rs
//
// Offline CLI argument surface.
// - Local paths only (reject any scheme:// like http/https/file)
// - Required: --catalog; optional --params and --assignments
// - Overrides: --total-seats, --walkover-party (applied on top of --params)
// - Output: --out dir, --render [json|html]*, --district NAME* (info panels on stdout)
// - --validate-only loads and checks inputs without running a session

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use clap::{ArgAction, Parser};
use thiserror::Error;

/// Parsed CLI arguments.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "ge",
    version,
    disable_help_subcommand = true,
    about = "Offline general-election what-if simulator"
)]
pub struct Args {
    // --- Inputs ---
    /// Candidate dataset JSON (district name → type, electors, seats, notes, parties).
    #[arg(long)]
    pub catalog: PathBuf,
    /// Params JSON (total_parliament_seats, walkover_party, walkover_marker). Defaults apply when omitted.
    #[arg(long)]
    pub params: Option<PathBuf>,
    /// Assignment script JSON: `[{"district": …, "party": …, "pct": …}]`, applied in order.
    #[arg(long)]
    pub assignments: Option<PathBuf>,

    // --- Overrides ---
    /// Size of Parliament, at most 10000 (overrides the params file).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub total_seats: Option<u32>,
    /// Party credited with walkover districts (overrides the params file).
    #[arg(long)]
    pub walkover_party: Option<String>,

    // --- Output & rendering ---
    /// Output directory (default: current directory).
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
    /// Report(s) to emit. Choose up to 2 (json, html). Omit to skip rendering.
    #[arg(long, value_parser = ["json", "html"], num_args = 1..=2)]
    pub render: Vec<String>,
    /// Print the info panel of this district (JSON, stdout). Repeatable.
    #[arg(long = "district")]
    pub districts: Vec<String>,

    // --- Control ---
    /// Load and check inputs only; write nothing.
    #[arg(long)]
    pub validate_only: bool,
    /// Only log errors.
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,
    /// More logging (-v info, -vv debug, -vvv trace). RUST_LOG wins when set.
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Argument problems clap cannot see. Messages are short and stable for scripts.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("path must be local file (no scheme): {0}")]
    NonLocalPath(String),
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("output path is not a directory: {0}")]
    OutNotDir(String),
}

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Args, CliError> {
    check(Args::parse())
}

fn check(mut args: Args) -> Result<Args, CliError> {
    for p in iter_all_paths(&args) {
        ensure_local_path(p)?;
    }

    ensure_local_exists(&args.catalog, "--catalog")?;
    if let Some(p) = &args.params {
        ensure_local_exists(p, "--params")?;
    }
    if let Some(a) = &args.assignments {
        ensure_local_exists(a, "--assignments")?;
    }
    if args.out.exists() && !args.out.is_dir() {
        return Err(CliError::OutNotDir(args.out.display().to_string()));
    }

    args.catalog = normalize_path(&args.catalog);
    args.params = args.params.take().map(|p| normalize_path(&p));
    args.assignments = args.assignments.take().map(|p| normalize_path(&p));
    args.out = normalize_path(&args.out);
    Ok(args)
}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    ge_io::looks_like_url(&lower) || lower.starts_with("http:") || lower.starts_with("https:") || lower.starts_with("file:")
}

#[inline]
fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    if let Some(s) = p.to_str() {
        if has_scheme(s) {
            return Err(CliError::NonLocalPath(s.to_string()));
        }
    }
    Ok(())
}

fn iter_all_paths(args: &Args) -> impl Iterator<Item = &Path> {
    [
        Some(args.catalog.as_path()),
        args.params.as_deref(),
        args.assignments.as_deref(),
        Some(args.out.as_path()),
    ]
    .into_iter()
    .flatten()
}

/// Ensure a path is local and exists as a regular file.
fn ensure_local_exists(p: &Path, label: &'static str) -> Result<(), CliError> {
    ensure_local_path(p)?;
    let meta = fs::metadata(p).map_err(|_| CliError::NotFound(format!("{label} {}", p.display())))?;
    if !meta.is_file() {
        return Err(CliError::NotFound(format!("{label} {}", p.display())));
    }
    Ok(())
}

/// Absolute path; falls back to CWD-relative when the path does not exist yet.
fn normalize_path(p: &Path) -> PathBuf {
    fs::canonicalize(p).unwrap_or_else(|_| {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join(p)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn clap_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_repeated_flags() {
        let a = Args::try_parse_from([
            "ge", "--catalog", "c.json", "--render", "json", "--render", "html", "--district", "Hougang SMC",
            "--district", "Aljunied GRC", "-vv",
        ])
        .unwrap();
        assert_eq!(a.render, ["json", "html"]);
        assert_eq!(a.districts.len(), 2);
        assert_eq!(a.verbose, 2);
        assert_eq!(a.out, PathBuf::from("."));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Args::try_parse_from(["ge"]).is_err());
        assert!(Args::try_parse_from(["ge", "--catalog", "c.json", "--render", "pdf"]).is_err());
        assert!(Args::try_parse_from(["ge", "--catalog", "c.json", "--total-seats", "0"]).is_err());
        assert!(Args::try_parse_from(["ge", "--catalog", "c.json", "-q", "-v"]).is_err());
    }

    #[test]
    fn ensure_local_path_rejects_schemes() {
        assert!(ensure_local_path(Path::new("http://x")).is_err());
        assert!(ensure_local_path(Path::new("file://C:/x.json")).is_err());
        assert!(ensure_local_path(Path::new("HTTPS://x/y.json")).is_err());
        assert!(ensure_local_path(Path::new("/tmp/file.json")).is_ok());
    }

    #[test]
    fn missing_catalog_is_reported() {
        let a = Args::try_parse_from(["ge", "--catalog", "definitely/not/here.json"]).unwrap();
        assert!(matches!(check(a), Err(CliError::NotFound(_))));
    }

    #[test]
    fn normalize_path_returns_absolute() {
        let abs = normalize_path(&PathBuf::from("does/not/exist.txt"));
        assert!(abs.is_absolute());
    }
}
