//! Repository layer.
//!
//! Each repository is a zero-sized struct whose async methods accept any
//! Postgres executor, so they run equally against the pool or inside a
//! transaction.

pub mod address_repo;
pub mod category_line_repo;
pub mod category_repo;
pub mod product_repo;
pub mod supplier_repo;

pub use address_repo::AddressRepo;
pub use category_line_repo::CategoryLineRepo;
pub use category_repo::CategoryRepo;
pub use product_repo::ProductRepo;
pub use supplier_repo::SupplierRepo;
