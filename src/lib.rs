//! Client-side catalog layer for a property listing site: property-type
//! taxonomy, classification, search query building and tolerant decoding of
//! listing payloads.

pub mod api;
pub mod catalog;
pub mod config;
pub mod models;
pub mod payload;
pub mod search;
