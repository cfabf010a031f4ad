use std::fmt::Write;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::DeriveReport;

/// Numbered list of results, with each step indented under its result when
/// the report carries steps.
pub fn render_report(report: &DeriveReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} + {} ({})",
        report.dhatu,
        report.suffix,
        report.lakshana.join(", ")
    );
    if report.results.is_empty() {
        out.push_str("no derivations\n");
    }
    for (index, result) in report.results.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} ({})",
            index + 1,
            result.surface,
            result.terms.join(" + ")
        );
        for step in &result.steps {
            let _ = writeln!(out, "     {:<12} {}", step.stage, step.state);
        }
    }
    if report.truncated {
        let _ = writeln!(
            out,
            "truncated after {} expansions; raise the limits to see every result",
            report.expansions
        );
    }
    out
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell(value: &str) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
