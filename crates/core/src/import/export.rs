//! CSV export of persisted entities.

use csv::Writer;
use serde::Serialize;

use crate::error::CoreError;
use crate::validation::render;

/// Render `entities` as CSV with one column per entry of `columns`.
///
/// An empty slice is refused with [`CoreError::NothingToExport`].
pub fn export_csv<E: Serialize>(entities: &[E], columns: &[&str]) -> Result<String, CoreError> {
    if entities.is_empty() {
        return Err(CoreError::NothingToExport);
    }

    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(columns).map_err(csv_error)?;
    for entity in entities {
        let value = serde_json::to_value(entity)
            .map_err(|e| CoreError::Internal(format!("export serialization failed: {e}")))?;
        let row: Vec<String> = columns
            .iter()
            .map(|column| value.get(*column).map(render).unwrap_or_default())
            .collect();
        writer.write_record(&row).map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Internal(format!("export flush failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| CoreError::Internal(format!("export encoding failed: {e}")))
}

fn csv_error(e: csv::Error) -> CoreError {
    CoreError::Internal(format!("export write failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[derive(Serialize)]
    struct Row {
        id: &'static str,
        name: &'static str,
        profit_percentage: f64,
        description: Option<&'static str>,
    }

    #[test]
    fn writes_header_then_one_line_per_entity() {
        let rows = [
            Row {
                id: "1",
                name: "dairy",
                profit_percentage: 2.5,
                description: None,
            },
            Row {
                id: "2",
                name: "bakery, fresh",
                profit_percentage: 1.0,
                description: Some("daily"),
            },
        ];
        let csv = export_csv(&rows, &["id", "name", "profit_percentage", "description"]).unwrap();
        assert_eq!(
            csv,
            "id,name,profit_percentage,description\n1,dairy,2.5,\n2,\"bakery, fresh\",1.0,daily\n"
        );
    }

    #[test]
    fn empty_table_has_nothing_to_export() {
        let rows: [Row; 0] = [];
        assert_matches!(export_csv(&rows, &["id"]), Err(CoreError::NothingToExport));
    }
}
