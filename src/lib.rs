//! Record Intake Library
//!
//! Extracts project and resource records from uploaded spreadsheets and
//! PDFs. The server binary is in `src/main.rs`.

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod schema;
pub mod services;
