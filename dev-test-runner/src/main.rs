//! Snapshot runner: generates the endpoint model for every client under
//! `fixtures/` and compares it with the fixture's `expected.json`.
//!
//! `cargo run -p dev-test-runner` checks; `-- --bless` rewrites the snapshots.
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use colored::Colorize;
use serde_json::{Value, json};

fn main() -> anyhow::Result<()> {
    let bless = std::env::args().any(|a| a == "--bless");
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../fixtures");
    let mut failures = 0;
    for fixture in fixture_dirs(&root)? {
        let name = fixture.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        let actual = snapshot(&fixture).with_context(|| format!("fixture {name}"))?;
        let expected_path = fixture.join("expected.json");
        if bless {
            std::fs::write(&expected_path, serde_json::to_string_pretty(&actual)? + "\n")?;
            eprintln!("{} {name}", "blessed".cyan().bold());
            continue;
        }
        let expected: Value = serde_json::from_str(
            &std::fs::read_to_string(&expected_path).with_context(|| format!("reading {}", expected_path.display()))?,
        )?;
        if actual == expected {
            eprintln!("{} {name}", "ok".green().bold());
        } else {
            failures += 1;
            eprintln!("{} {name}", "FAILED".red().bold());
            eprintln!("--- expected ---\n{}", serde_json::to_string_pretty(&expected)?);
            eprintln!("--- actual ---\n{}", serde_json::to_string_pretty(&actual)?);
        }
    }
    if failures > 0 {
        bail!("{failures} fixture(s) differ from their snapshots");
    }
    Ok(())
}

/// Each fixture holds exactly one client folder next to its snapshot.
fn snapshot(fixture: &Path) -> anyhow::Result<Value> {
    let client = fixture_dirs(fixture)?
        .into_iter()
        .next()
        .context("fixture has no client folder")?;
    let generation = bifrost_sampler::generate_from_dir(&client, Path::new("Services"), "BifrostPath")?;
    Ok(json!({
        "groups": generation.groups,
        "skipped": generation.diagnostics.len(),
    }))
}

fn fixture_dirs(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut dirs = std::fs::read_dir(dir)
        .with_context(|| format!("reading {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .collect::<Vec<_>>();
    dirs.sort();
    Ok(dirs)
}
