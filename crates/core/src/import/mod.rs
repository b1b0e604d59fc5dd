//! CSV reconciliation: parsing uploaded files, planning imports against
//! persisted records, and exporting tables.

pub mod export;
pub mod parse;
pub mod plan;

pub use export::export_csv;
pub use parse::{parse_products, parse_single_column, PRODUCT_COLUMNS};
pub use plan::{
    normalize_key, plan_import, CsvIndex, ImportAction, ImportPlan, ImportStrategy, PlannedWrite,
};
