//! Custom cargo commands for pagesift.
//!
//! Usage:
//!   cargo xtask verify              - Run full verification suite
//!   cargo xtask test                - Run all tests
//!   cargo xtask check               - Quick check
//!   cargo xtask bench               - Run benchmarks
//!   cargo xtask build-wasm          - Build the browser package
//!   cargo xtask test-wasm           - Browser smoke tests (headless Firefox)
//!   cargo xtask fuzz [TARGET] [SECS]- Run a fuzz target

use anyhow::{bail, Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

const FUZZ_TARGETS: &[&str] = &["search_queries", "event_sequences"];
const DEFAULT_FUZZ_SECONDS: u32 = 60;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("check") => check()?,
        Some("bench") => bench()?,
        Some("build-wasm") => build_wasm()?,
        Some("test-wasm") => test_wasm()?,
        Some("fuzz") => fuzz(args.get(1).map(String::as_str), args.get(2).map(String::as_str))?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify              Full suite (tests, clippy, wasm build check, fuzz smoke run)
  test                Run all Rust tests
  check               Quick check (cargo check + test + clippy)
  bench               Run benchmarks
  build-wasm          Build the browser package into pkg/ with wasm-pack
  test-wasm           Run tests/wasm.rs in headless Firefox with wasm-pack
  fuzz [TARGET] [S]   Fuzz TARGET (default: all) for S seconds (default: {})
"#,
        DEFAULT_FUZZ_SECONDS
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("pagesift Verification Suite");
    println!("==========================================\n");

    println!("[1/4] Running Rust tests...");
    run_cargo(&["test", "--quiet"])?;
    println!("✓ All Rust tests passed\n");

    println!("[2/4] Running clippy...");
    run_cargo(&["clippy", "--quiet", "--all-targets", "--", "-D", "warnings"])?;
    println!("✓ Clippy passed\n");

    println!("[3/4] Checking wasm build...");
    run_cargo(&[
        "check",
        "--quiet",
        "--lib",
        "--target",
        "wasm32-unknown-unknown",
        "--features",
        "console-panic",
    ])?;
    println!("✓ wasm build checks\n");

    println!("[4/4] Fuzz smoke run...");
    fuzz(None, Some("10"))?;
    println!("✓ Fuzz targets survived\n");

    println!("==========================================");
    println!("✓ ALL VERIFICATION CHECKS PASSED");
    println!("==========================================");

    Ok(())
}

/// Run all tests
fn test() -> Result<()> {
    run_cargo(&["test"])
}

/// Quick check
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check", "--all-targets"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// Run benchmarks
fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

/// Build `pkg/` for `<script type="module">` use
fn build_wasm() -> Result<()> {
    let root = project_root()?;
    run(
        Command::new("wasm-pack")
            .args([
                "build",
                "--target",
                "web",
                "--release",
                "--out-dir",
                "pkg",
                "--",
                "--features",
                "console-panic",
            ])
            .current_dir(&root),
        "wasm-pack build",
    )?;
    println!("✓ Browser package written to {}", root.join("pkg").display());
    Ok(())
}

/// Browser smoke tests against a real DOM
fn test_wasm() -> Result<()> {
    let root = project_root()?;
    run(
        Command::new("wasm-pack")
            .args([
                "test",
                "--headless",
                "--firefox",
                "--",
                "--features",
                "wasm",
                "--test",
                "wasm",
            ])
            .current_dir(&root),
        "wasm-pack test",
    )
}

/// Run one fuzz target, or all of them, for a fixed time
fn fuzz(target: Option<&str>, seconds: Option<&str>) -> Result<()> {
    let seconds: u32 = match seconds {
        Some(s) => s
            .parse()
            .with_context(|| format!("Invalid fuzz duration {:?}", s))?,
        None => DEFAULT_FUZZ_SECONDS,
    };

    let targets: Vec<&str> = match target {
        Some(t) if FUZZ_TARGETS.contains(&t) => vec![t],
        Some(t) => bail!("Unknown fuzz target {:?} (have: {})", t, FUZZ_TARGETS.join(", ")),
        None => FUZZ_TARGETS.to_vec(),
    };

    let root = project_root()?;
    for target in targets {
        println!("  fuzzing {} for {}s", target, seconds);
        run(
            Command::new("cargo")
                .args(["+nightly", "fuzz", "run", target, "--"])
                .arg(format!("-max_total_time={}", seconds))
                .current_dir(&root),
            &format!("cargo fuzz run {}", target),
        )?;
    }
    Ok(())
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run(command: &mut Command, what: &str) -> Result<()> {
    let status = command
        .status()
        .with_context(|| format!("Failed to run {}", what))?;

    if !status.success() {
        bail!("{} failed", what);
    }

    Ok(())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root: &Path = &project_root()?;
    run(
        Command::new("cargo").args(args).current_dir(root),
        &format!("cargo {:?}", args),
    )
}
