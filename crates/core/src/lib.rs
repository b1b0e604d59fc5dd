//! Catalog domain: validation engine, entities, CSV reconciliation and the
//! operations the HTTP layer exposes.
//!
//! Nothing here touches the network or a database directly; persistence is
//! reached through the [`store`] traits.

pub mod entities;
pub mod error;
pub mod import;
pub mod memory_store;
pub mod service;
pub mod store;
pub mod types;
pub mod validation;
