use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use surv_core::GroupAnalysis;
use surv_ingest::format_numeric;
use surv_cli::RunResult;

pub fn print_summary(result: &RunResult) {
    let analysis = &result.analysis;
    println!("Profile: {}", analysis.profile);
    if analysis.profile.uses_event_mode() {
        println!("Mode: {}", analysis.mode);
    }
    println!("Output: {}", result.output_dir.display());
    println!("{}", build_group_table(&analysis.groups));
    if let Some(logrank) = &analysis.logrank {
        println!(
            "Log-rank test: chi2 = {}, p = {} (df = {})",
            format_numeric(logrank.chi2),
            format_numeric(logrank.p),
            logrank.df
        );
    }
    println!("Files written: {}", result.written.len());
}

fn build_group_table(groups: &[GroupAnalysis]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Group"),
        header_cell("Subjects"),
        header_cell("Events"),
        header_cell("Censored"),
        header_cell("No time"),
        header_cell("Median"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut total_subjects = 0usize;
    let mut total_events = 0usize;
    let mut total_censored = 0usize;
    let mut total_missing = 0usize;
    for group in groups {
        total_subjects += group.subject_count();
        total_events += group.event_count();
        total_censored += group.censored_count();
        total_missing += group.missing_time_count();
        table.add_row(vec![
            group_cell(group.key.as_str()),
            Cell::new(group.subject_count()),
            Cell::new(group.event_count()),
            Cell::new(group.censored_count()),
            count_cell(group.missing_time_count(), Color::Yellow),
            median_cell(group.median_survival()),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_subjects).add_attribute(Attribute::Bold),
        Cell::new(total_events).add_attribute(Attribute::Bold),
        Cell::new(total_censored).add_attribute(Attribute::Bold),
        count_cell(total_missing, Color::Yellow),
        dim_cell("-"),
    ]);
    table
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn group_cell(key: &str) -> Cell {
    // empty keys come from missing grouping cells
    if key.is_empty() {
        dim_cell("(missing)")
    } else {
        Cell::new(key).fg(Color::Blue).add_attribute(Attribute::Bold)
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        dim_cell(0)
    } else {
        Cell::new(count).fg(color)
    }
}

fn median_cell(median: Option<f64>) -> Cell {
    match median {
        Some(days) => Cell::new(format_numeric(days)),
        None => dim_cell("not reached"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
