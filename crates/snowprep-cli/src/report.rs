//! Console verification report printed after a translation run.

use anyhow::{Result, bail};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::DataFrame;

use snowprep_model::{CODE_CATEGORY, CODES, COMPLAINT_NUMBER, SUBCATEGORY};
use snowprep_transform::{TranslationStats, column_values, first_example_value};

use crate::types::TranslateResult;

const SAMPLE_COLUMNS: [&str; 3] = [COMPLAINT_NUMBER, CODES, SUBCATEGORY];

/// A column's first non-`"[]"` cell, shown as proof of the output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkedExample {
    pub column: &'static str,
    /// `None` for a null cell.
    pub value: Option<String>,
}

impl WorkedExample {
    pub fn display_value(&self) -> &str {
        self.value.as_deref().unwrap_or("null")
    }

    pub fn type_name(&self) -> &'static str {
        if self.value.is_some() { "str" } else { "null" }
    }
}

/// Prints the run header, the row sample, statistics, and worked examples.
///
/// Fails when every `Codes` cell (or `Code Category` cell, if present) is `"[]"`.
/// The output file has already been written at that point.
pub fn print_report(result: &TranslateResult, sample_rows: usize) -> Result<()> {
    println!("Mapping: {} ({} entries)", result.mapping_path.display(), result.mapping_entries);
    println!("Export: {}", result.export.path.display());
    println!("Output: {}", result.output_path.display());

    println!();
    println!("Sample of translations (first {sample_rows} rows):");
    println!("{}", sample_table(&result.table, sample_rows)?);

    println!();
    println!("{}", stats_table(&result.stats));

    for example in worked_examples(&result.table)? {
        println!();
        println!("{} example: {}", example.column, example.display_value());
        println!("Type: {}", example.type_name());
    }
    Ok(())
}

/// Table of the first `rows` rows of the sample columns. Nulls render empty.
pub fn sample_table(df: &DataFrame, rows: usize) -> Result<Table> {
    let mut table = Table::new();
    table.set_header(SAMPLE_COLUMNS.map(header_cell));
    apply_table_style(&mut table);

    let columns = SAMPLE_COLUMNS
        .iter()
        .map(|name| column_values(df, name))
        .collect::<snowprep_transform::Result<Vec<_>>>()?;
    for row in 0..rows.min(df.height()) {
        table.add_row(
            columns
                .iter()
                .map(|values| match values.get(row).cloned().flatten() {
                    Some(value) => Cell::new(value),
                    None => dim_cell(""),
                })
                .collect::<Vec<_>>(),
        );
    }
    Ok(table)
}

pub fn stats_table(stats: &TranslationStats) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Outcome"), header_cell("Count")]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(2) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    let mut rows = vec![
        ("Rows", "total", stats.rows),
        (CODES, "translated", stats.codes_translated),
        (CODES, "codes mapped", stats.codes_mapped),
        (CODES, "codes passed through", stats.codes_unmapped),
        (CODES, "empty", stats.codes_empty),
        (CODES, "null", stats.codes_missing),
        (SUBCATEGORY, "joined", stats.subcategories_joined),
        (SUBCATEGORY, "empty", stats.subcategories_empty),
        (SUBCATEGORY, "null", stats.subcategories_missing),
    ];
    if stats.has_code_category {
        rows.push((CODE_CATEGORY, "null filled", stats.code_categories_filled));
    }
    for (field, outcome, count) in rows {
        table.add_row(vec![Cell::new(field), Cell::new(outcome), Cell::new(count)]);
    }
    table.add_row(vec![
        Cell::new("Malformed").fg(Color::Yellow),
        Cell::new("normalized"),
        count_cell(stats.malformed_fields(), Color::Yellow),
    ]);
    table
}

/// Worked examples for `Codes` and, when the column exists, `Code Category`.
pub fn worked_examples(df: &DataFrame) -> Result<Vec<WorkedExample>> {
    let mut examples = Vec::new();
    for column in [CODES, CODE_CATEGORY] {
        if column == CODE_CATEGORY && df.column(CODE_CATEGORY).is_err() {
            continue;
        }
        match first_example_value(df, column)? {
            Some(value) => examples.push(WorkedExample { column, value }),
            None => bail!("every `{column}` value is \"[]\"; nothing to show as an example"),
        }
    }
    Ok(examples)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell(value: &str) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        dim_cell("0")
    } else {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    }
}
