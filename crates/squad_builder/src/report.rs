//! Roster output: terminal table and JSON file

use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::path::Path;
use xi_core::Roster;

const RULE_WIDTH: usize = 70;

/// Plain-text table, one row per pick in captaincy order.
pub struct RosterTable<'a>(pub &'a Roster);

impl fmt::Display for RosterTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let roster = self.0;
        writeln!(
            f,
            "{:>2}  {:<24} {:<6} {:<4} {:>7} {:>8} {:>3} {:>8}",
            "#", "Player", "Team", "Role", "Credits", "Form", "", "Points"
        )?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        for (i, pick) in roster.picks().iter().enumerate() {
            let p = &pick.player;
            writeln!(
                f,
                "{:>2}  {:<24} {:<6} {:<4} {:>7.1} {:>8.2} {:>3} {:>8.2}",
                i + 1,
                p.name(),
                p.team(),
                p.role().code(),
                p.credits(),
                p.form(),
                pick.designation.label(),
                pick.weighted_points()
            )?;
        }
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        writeln!(
            f,
            "Total credits: {:.1}   Expected points: {:.2}",
            roster.total_credits(),
            roster.expected_points()
        )
    }
}

pub fn render_table(roster: &Roster) -> String {
    RosterTable(roster).to_string()
}

pub fn roster_json(roster: &Roster) -> Result<String> {
    serde_json::to_string_pretty(roster).context("Failed to serialize roster")
}

pub fn write_json(roster: &Roster, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(path, roster_json(roster)?)
        .with_context(|| format!("Failed to write roster: {}", path.display()))
}
