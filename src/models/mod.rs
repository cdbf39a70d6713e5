pub mod cell;
pub mod properties;
pub mod sheet;
pub mod spreadsheet;

pub use cell::{Cell, column_letters, parse_position};
pub use properties::{Color, GridProperties, SheetProperties, SpreadsheetProperties};
pub use sheet::Sheet;
pub use spreadsheet::Spreadsheet;
