//! CSV row parsing for bulk imports.

use csv::{ReaderBuilder, StringRecord};
use serde_json::Value;

use crate::error::CoreError;
use crate::types::Record;

/// Columns a product import file must carry.
pub const PRODUCT_COLUMNS: &[&str] = &[
    "name",
    "cost_values",
    "unit_box",
    "weight_unit",
    "validity",
    "sku",
    "description",
    "category_line_id",
    "supplier_id",
];

/// How one column's cell becomes a record value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    /// Trimmed and lower-cased text.
    Key,
    Text,
    Float,
    Integer,
}

fn product_cell(column: &str) -> Cell {
    match column {
        "name" | "category_line_id" => Cell::Key,
        "cost_values" | "weight_unit" => Cell::Float,
        "unit_box" => Cell::Integer,
        _ => Cell::Text,
    }
}

/// Parse a file whose rows contribute one normalized column each.
pub fn parse_single_column(data: &[u8], column: &str) -> Result<Vec<Record>, CoreError> {
    parse(data, &[column], |_| Cell::Key)
}

/// Parse a product file; numeric columns are converted to numbers.
pub fn parse_products(data: &[u8]) -> Result<Vec<Record>, CoreError> {
    parse(data, PRODUCT_COLUMNS, product_cell)
}

fn parse(
    data: &[u8],
    columns: &[&str],
    cell_of: impl Fn(&str) -> Cell,
) -> Result<Vec<Record>, CoreError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .flexible(false)
        .from_reader(data);

    let headers = reader
        .headers()
        .map_err(|_| CoreError::ColumnsMismatch)?
        .clone();
    let positions = columns
        .iter()
        .map(|column| {
            headers
                .iter()
                .position(|header| header == *column)
                .ok_or(CoreError::ColumnsMismatch)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|_| CoreError::ColumnsMismatch)?;
        rows.push(to_record(&row, columns, &positions, &cell_of)?);
    }
    if rows.is_empty() {
        return Err(CoreError::DataAlreadyExists);
    }
    Ok(rows)
}

fn to_record(
    row: &StringRecord,
    columns: &[&str],
    positions: &[usize],
    cell_of: &impl Fn(&str) -> Cell,
) -> Result<Record, CoreError> {
    let mut record = Record::new();
    for (column, &position) in columns.iter().zip(positions) {
        let raw = row.get(position).ok_or(CoreError::ColumnsMismatch)?;
        record.insert(column.to_string(), convert(raw, cell_of(column))?);
    }
    Ok(record)
}

fn convert(raw: &str, cell: Cell) -> Result<Value, CoreError> {
    Ok(match cell {
        Cell::Key => Value::from(raw.trim().to_lowercase()),
        Cell::Text => Value::from(raw),
        Cell::Float => {
            let number: f64 = raw
                .trim()
                .parse()
                .map_err(|_| CoreError::ConversionFailure)?;
            serde_json::Number::from_f64(number)
                .map(Value::Number)
                .ok_or(CoreError::ConversionFailure)?
        }
        Cell::Integer => Value::from(
            raw.trim()
                .parse::<i64>()
                .map_err(|_| CoreError::ConversionFailure)?,
        ),
    })
}
