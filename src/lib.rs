//! xlsxcsv - Pure-Rust Excel to delimited text converter for Odoo imports
//!
//! This crate converts one worksheet of an Excel workbook (XLSX) into delimited text (CSV).
//! Images anchored to cells of a column named `IMAGE` are inlined as base64 strings,
//! so product catalogs with pictures can be imported into Odoo in a single file.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use xlsxcsv::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a converter with default settings (`;`, every field quoted, headers kept)
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     let input = File::open("produtos.xlsx")?;
//!     let output = File::create("produtos.csv")?;
//!     converter.convert(input, output)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Odoo Profile
//!
//! The Odoo profile repairs rows that were split by line breaks inside cells and removes
//! `#VALUE!` error markers after serialization:
//!
//! ```rust,no_run
//! use xlsxcsv::{ConverterBuilder, ExportProfile};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new()
//!         .with_profile(ExportProfile::Odoo)
//!         .build()?;
//!
//!     let upload = std::fs::read("produtos.xlsx")?;
//!     let csv = converter.convert_bytes(&upload)?;
//!     std::fs::write("produtos_odoo.csv", csv)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Custom Workbook Sources
//!
//! Any type implementing [`WorkbookReader`] can be converted with
//! [`Converter::convert_reader`]; [`XlsxWorkbook`] is the built-in XLSX implementation.

mod api;
mod builder;
mod cleanup;
mod error;
mod formatter;
mod output;
mod parser;
mod security;
mod table;
mod types;
pub mod web;

// 公開API
pub use api::{ExportProfile, QuotePolicy, SheetSelector};
pub use builder::{Converter, ConverterBuilder};
pub use cleanup::{Cleanup, LineKind, DEFAULT_HEADER_SENTINEL};
pub use error::{XlsxToCsvError, EMPTY_SHEET_MESSAGE};
pub use parser::{WorkbookReader, XlsxWorkbook};
pub use table::IMAGE_COLUMN;
pub use types::{CellCoord, CellValue, ImageAnchor};
pub use web::{ConvertForm, ConvertResponse, ServerConfig, Upload};
