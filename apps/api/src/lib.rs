//! Report page grid layout: sizes the image-slot grid of a construction-report page
//! and serves it over HTTP to the editor and the export pipeline.
//!
//! The `layout` module is usable in-process on its own; `routes` wraps it in an Axum
//! router.

pub mod config;
pub mod errors;
pub mod layout;
pub mod routes;
pub mod state;
