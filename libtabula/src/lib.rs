#![deny(unused_crate_dependencies)]
//! Table controller for egui list views.
//!
//! A [`table::TableController`] owns the view state of one list (search text,
//! filters, sort, page, page size) unless the caller takes ownership of a field
//! through [`table::TableProps`]. In client mode it derives the visible slice
//! from the full record collection itself; in server mode it renders whatever
//! the caller supplies and only reports intents.

pub mod config;
pub mod logs;
pub mod table;
