//! Army files: one army per file, one unit group per line
//!
//! ```text
//! # comment
//! Human army
//! InfantryUnit,Footman,100,20
//! RangedUnit,Archer,100,10
//! CommanderUnit,Mountain King,180
//! ```
//!
//! The first non-comment line is the army name. Each following line is
//! `unitType,unitName,health[,count]` with `count` defaulting to 1.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::battle::army::Army;
use crate::battle::unit_type::UnitType;
use crate::battle::units::Unit;
use crate::core::error::{Result, WargamesError};

fn line_error(line: usize, reason: impl Into<String>) -> WargamesError {
    WargamesError::ArmyFile {
        line,
        reason: reason.into(),
    }
}

/// Parse an army from file contents
pub fn parse_army(content: &str) -> Result<Army> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

    let (name_line, name) = lines.next().ok_or_else(|| line_error(1, "missing army name"))?;
    let mut army = Army::new(name).map_err(|e| line_error(name_line, e.to_string()))?;

    for (number, line) in lines {
        let (unit, count) = parse_unit_line(number, line)?;
        army.add_many(&unit, count);
    }

    Ok(army)
}

fn parse_unit_line(number: usize, line: &str) -> Result<(Unit, usize)> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if !(3..=4).contains(&fields.len()) {
        return Err(line_error(
            number,
            format!("expected 3 or 4 fields, found {}", fields.len()),
        ));
    }

    let unit_type: UnitType = fields[0]
        .parse()
        .map_err(|e: WargamesError| line_error(number, e.to_string()))?;
    let health: i32 = fields[2]
        .parse()
        .map_err(|_| line_error(number, format!("invalid health '{}'", fields[2])))?;
    let count: usize = match fields.get(3) {
        Some(raw) => raw
            .parse()
            .map_err(|_| line_error(number, format!("invalid count '{}'", raw)))?,
        None => 1,
    };

    let unit = Unit::new(unit_type, fields[1], health)
        .map_err(|e| line_error(number, e.to_string()))?;
    Ok((unit, count))
}

/// Render an army in the file format, one line per condensed unit group
pub fn render_army(army: &Army) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", army.name());
    for (unit, count) in army.to_map() {
        let _ = writeln!(
            out,
            "{},{},{},{}",
            unit.unit_type(),
            unit.name(),
            unit.health(),
            count
        );
    }
    out
}

/// Read an army file from disk
pub fn read_army(path: &Path) -> Result<Army> {
    let content = fs::read_to_string(path)?;
    parse_army(&content)
}

/// Write an army file to disk
pub fn write_army(path: &Path, army: &Army) -> Result<()> {
    fs::write(path, render_army(army))?;
    Ok(())
}
