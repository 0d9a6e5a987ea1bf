//! Workspace-wide quality checks.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use xshell::{Shell, cmd};

/// Directories holding library crates.
const LIBRARY_ROOTS: &[&str] = &["mesh", "print"];

type Check = fn(&Shell) -> Result<()>;

const CHECKS: &[(&str, Check)] = &[
    ("Formatting", run_fmt_check),
    ("Clippy", run_clippy),
    ("Tests", run_tests),
    ("Documentation", run_doc_check),
    ("Safety", run_safety_scan),
];

/// Run every check, then report.
pub fn run(ci_mode: bool) -> Result<()> {
    let sh = Shell::new()?;

    println!();
    println!("{}", "Mosaic Workspace Check".bold());
    println!("{}", "======================".bold());
    println!();

    let mut failures = Vec::new();
    for (step, &(name, check)) in CHECKS.iter().enumerate() {
        println!(
            "{}",
            format!("Step {}/{}: {name}...", step + 1, CHECKS.len()).cyan()
        );
        match check(&sh) {
            Ok(()) => println!("  {} {name}", "✓".green()),
            Err(e) => {
                println!("  {} {name} - {e}", "✗".red());
                failures.push(format!("{name}: {e}"));
            }
        }
    }

    println!();
    if failures.is_empty() {
        println!("{}", "✓ All checks passed".green().bold());
        return Ok(());
    }

    for f in &failures {
        println!("  - {}", f.red());
    }
    if ci_mode {
        anyhow::bail!("{} check(s) failed", failures.len());
    }
    println!("{}", "⚠ Some checks failed. Fix before committing.".yellow());
    Ok(())
}

/// Run the proptest suites with `cases` cases each.
pub fn run_props(cases: u32) -> Result<()> {
    let sh = Shell::new()?;
    let cases = cases.to_string();

    for package in ["mesh-validate", "mesh-raster", "print-mosaic"] {
        println!("{}", format!("Property tests: {package}").cyan());
        cmd!(sh, "cargo test --release -p {package} --test '*'")
            .env("PROPTEST_CASES", &cases)
            .run()
            .with_context(|| format!("property tests failed in {package}"))?;
    }
    Ok(())
}

fn run_fmt_check(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo fmt --all -- --check")
        .run()
        .context("formatting check failed")?;
    Ok(())
}

fn run_clippy(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo clippy --all-targets --all-features -- -D warnings")
        .run()
        .context("clippy check failed")?;
    Ok(())
}

fn run_tests(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo test --all-features")
        .run()
        .context("tests failed")?;
    Ok(())
}

fn run_doc_check(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo doc --no-deps --all-features")
        .env("RUSTDOCFLAGS", "-D warnings")
        .run()
        .context("documentation build failed")?;
    Ok(())
}

/// Flag `.unwrap()` and `.expect(` in library sources, ignoring doc
/// comments, line comments and everything after a file's `#[cfg(test)]`.
fn run_safety_scan(sh: &Shell) -> Result<()> {
    let mut violations = Vec::new();

    for root in LIBRARY_ROOTS {
        for file in rust_sources(sh, Path::new(root))? {
            let text = sh.read_file(&file)?;
            for (line_no, line) in text.lines().enumerate() {
                let trimmed = line.trim_start();
                if trimmed.starts_with("#[cfg(test)]") {
                    break;
                }
                if trimmed.starts_with("//") {
                    continue;
                }
                if line.contains(".unwrap()") || line.contains(".expect(") {
                    violations.push(format!("{}:{}", file.display(), line_no + 1));
                }
            }
        }
    }

    if !violations.is_empty() {
        for v in &violations {
            println!("    {}", v.dimmed());
        }
        anyhow::bail!("{} unwrap/expect calls in library code", violations.len());
    }
    Ok(())
}

/// All `.rs` files under `<crate>/src` for every crate directory in `root`.
fn rust_sources(sh: &Shell, root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if !sh.path_exists(root) {
        return Ok(files);
    }

    let mut pending: Vec<PathBuf> = sh
        .read_dir(root)?
        .into_iter()
        .map(|krate| krate.join("src"))
        .filter(|src| sh.path_exists(src))
        .collect();

    while let Some(dir) = pending.pop() {
        for entry in sh.read_dir(&dir)? {
            if entry.is_dir() {
                pending.push(entry);
            } else if entry.extension().is_some_and(|ext| ext == "rs") {
                files.push(entry);
            }
        }
    }
    files.sort();
    Ok(files)
}
