//! Row models.
//!
//! Each submodule holds a `FromRow` struct matching one table and the
//! conversion into its catalog entity.

pub mod address;
pub mod category;
pub mod category_line;
pub mod product;
pub mod supplier;
