use crate::output::{colorize_path, print_json};
use anyhow::Context;
use console::style;
use gcp_core::path_audit::{audit, PathReport};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct PathArgs {
    pub dupes: bool,
    pub shadows: bool,
    pub json: bool,
}

pub fn run(path_var: &str, home: Option<&Path>, args: PathArgs) -> anyhow::Result<()> {
    let report = audit(path_var).context("failed to audit PATH")?;

    if args.json {
        return print_json(&report);
    }

    for line in render_entries(&report, home, args.dupes) {
        println!("{line}");
    }
    if args.shadows {
        for line in render_shadows(&report, home) {
            println!("{line}");
        }
    }
    Ok(())
}

fn render_entries(report: &PathReport, home: Option<&Path>, dupes: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for entry in &report.entries {
        if entry.duplicate && !dupes {
            continue;
        }
        let mut line = if entry.exists {
            colorize_path(&entry.dir, home)
        } else {
            format!("{} ❌", style(&entry.dir).strikethrough())
        };
        line.push_str(&format!(" ({})", entry.executables));
        if entry.duplicate {
            line.push_str(" 🔄");
        }
        lines.push(line);
    }
    lines
}

fn render_shadows(report: &PathReport, home: Option<&Path>) -> Vec<String> {
    let width = report
        .shadows
        .iter()
        .map(|s| s.name.len())
        .max()
        .unwrap_or(0);
    report
        .shadows
        .iter()
        .map(|s| {
            let dirs: Vec<String> = s.dirs.iter().map(|d| colorize_path(d, home)).collect();
            format!(
                "{} {}",
                style(format!("{:>width$}", s.name)).red(),
                dirs.join(", ")
            )
        })
        .collect()
}
