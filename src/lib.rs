//! Year-in-review awards computed from an exported chat history.
//!
//! [`workflows::export`] loads and normalizes the export,
//! [`workflows::awards`] ranks members and assembles the report, and
//! [`render`] turns the report into a document.

pub mod config;
pub mod error;
pub mod render;
pub mod telemetry;
pub mod workflows;
