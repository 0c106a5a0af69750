use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use cardio_transform::GroupStatsTable;

use crate::types::{CleanResult, StatsResult};

pub fn print_clean_summary(result: &CleanResult) {
    println!("Reference: {} ({} records)", result.reference.display(), result.reference_records);
    println!("Input: {}", result.input.display());
    println!("Output: {}", result.output.display());
    println!("{}", clean_table(result));
}

/// One row per corrector with its correction counts.
pub fn clean_table(result: &CleanResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Corrector"),
        header_cell("Records"),
        header_cell("Adjusted"),
        header_cell("Rescaled"),
        header_cell("Swapped"),
        header_cell("Invalidated"),
        header_cell("Non-convergent"),
        header_cell("Imputed"),
        header_cell("Unresolved"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..9 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for report in &result.reports {
        table.add_row(vec![
            Cell::new(report.corrector).add_attribute(Attribute::Bold),
            Cell::new(report.records),
            count_cell(report.adjusted, Color::Yellow),
            count_cell(report.rescaled, Color::Yellow),
            count_cell(report.swapped, Color::Yellow),
            count_cell(report.invalidated, Color::Yellow),
            count_cell(report.non_convergent, Color::Red),
            count_cell(report.imputed, Color::Green),
            count_cell(report.unresolved, Color::Red),
        ]);
    }
    table
}

pub fn print_stats(result: &StatsResult) {
    println!("Reference: {} ({} records)", result.reference.display(), result.records);
    println!();
    println!("Weight means");
    println!("{}", stats_table(&result.weight));
    println!();
    println!("Blood pressure means");
    println!("{}", stats_table(&result.pressure));
}

/// Key columns, group size, then one mean per value column.
pub fn stats_table(stats: &GroupStatsTable) -> Table {
    let mut table = Table::new();
    let mut header: Vec<Cell> = stats
        .key_columns()
        .iter()
        .map(|name| header_cell(name))
        .collect();
    header.push(header_cell("records"));
    header.extend(stats.value_columns().iter().map(|name| header_cell(name)));
    let width = header.len();
    table.set_header(header);
    apply_table_style(&mut table);
    for index in 0..width {
        align_column(&mut table, index, CellAlignment::Right);
    }

    for (key, group) in stats.iter() {
        let mut row: Vec<Cell> = key.iter().map(Cell::new).collect();
        row.push(Cell::new(group.records));
        row.extend(group.means.iter().map(|mean| match mean {
            Some(value) => Cell::new(format!("{value:.1}")),
            None => dim_cell("-"),
        }));
        table.add_row(row);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
