//! Client for the Google Sheets v4 REST API.
//!
//! Spreadsheets are fetched into an in-memory model through a [`Service`],
//! edited locally, and written back with batched requests:
//!
//! ```no_run
//! # async fn run() -> sheets_service::Result<()> {
//! use sheets_service::config::Config;
//! use sheets_service::Service;
//!
//! let config = Config::load()?;
//! let service = Service::new(&config.google).await?;
//!
//! let mut spreadsheet = service.fetch_spreadsheet("1AbC").await?;
//! if let Some(sheet) = spreadsheet.sheet_by_title_mut("Sheet1") {
//!     sheet.update(0, 0, "hello");
//! }
//! spreadsheet.synchronize().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod sheets;

pub use error::{AppError, Result};
pub use models::{Cell, Sheet, SheetProperties, Spreadsheet};
pub use sheets::{Dimension, Request, Service, Transport, UpdateRequest};
