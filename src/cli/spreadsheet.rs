use anyhow::anyhow;
use clap::{Args, Subcommand};
use sheets_service::config::Config;
use sheets_service::models::{SpreadsheetProperties, parse_position};
use sheets_service::{AppError, Result, Service, Sheet, Spreadsheet};
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum SpreadsheetCommand {
    /// Create a spreadsheet
    Create { title: String },

    /// Show a spreadsheet and its sheets
    Fetch { id: String },

    /// Set a cell value, e.g. `set <ID> --sheet Sheet1 B3 42`
    Set {
        #[command(flatten)]
        target: SheetTarget,
        cell: String,
        value: String,
    },

    /// Resize a sheet's grid
    Expand {
        #[command(flatten)]
        target: SheetTarget,
        #[arg(long)]
        rows: u32,
        #[arg(long)]
        columns: u32,
    },

    /// Delete rows [start, end), zero-based
    DeleteRows {
        #[command(flatten)]
        target: SheetTarget,
        #[arg(long)]
        start: u32,
        #[arg(long)]
        end: u32,
    },

    /// Delete columns [start, end), zero-based
    DeleteColumns {
        #[command(flatten)]
        target: SheetTarget,
        #[arg(long)]
        start: u32,
        #[arg(long)]
        end: u32,
    },

    /// Add a sheet to a spreadsheet
    AddSheet { id: String, title: String },

    /// Delete a sheet
    DeleteSheet {
        #[command(flatten)]
        target: SheetTarget,
    },

    /// Clear all cells of a sheet
    Clear {
        #[command(flatten)]
        target: SheetTarget,
    },
}

#[derive(Args, Debug)]
pub struct SheetTarget {
    /// Spreadsheet ID
    id: String,
    /// Sheet title
    #[arg(long)]
    sheet: String,
}

impl SpreadsheetCommand {
    pub async fn execute(&self) -> Result<()> {
        let config = Config::load()?;
        let service = Service::new(&config.google).await?;

        match self {
            SpreadsheetCommand::Create { title } => {
                let properties = SpreadsheetProperties {
                    title: title.clone(),
                };
                let spreadsheet = service.create_spreadsheet(&properties).await?;
                info!(id = %spreadsheet.id, title = %spreadsheet.title(), "Created spreadsheet");
            }
            SpreadsheetCommand::Fetch { id } => {
                let spreadsheet = service.fetch_spreadsheet(id).await?;
                show_spreadsheet(&spreadsheet);
            }
            SpreadsheetCommand::Set {
                target,
                cell,
                value,
            } => {
                let (row, column) = parse_position(cell)?;
                let mut spreadsheet = service.fetch_spreadsheet(&target.id).await?;
                let sheet = target.sheet_mut(&mut spreadsheet)?;
                sheet.update(row, column, value.as_str());
                service.sync_sheet(sheet).await?;
                info!(cell = %cell, "Cell updated");
            }
            SpreadsheetCommand::Expand {
                target,
                rows,
                columns,
            } => {
                let mut spreadsheet = service.fetch_spreadsheet(&target.id).await?;
                let sheet = target.sheet_mut(&mut spreadsheet)?;
                service.expand_sheet(sheet, *rows, *columns).await?;
                info!(rows, columns, "Sheet resized");
            }
            SpreadsheetCommand::DeleteRows { target, start, end } => {
                let mut spreadsheet = service.fetch_spreadsheet(&target.id).await?;
                let sheet = target.sheet_mut(&mut spreadsheet)?;
                service.delete_rows(sheet, *start, *end).await?;
                info!(rows = sheet.properties.grid_properties.row_count, "Rows deleted");
            }
            SpreadsheetCommand::DeleteColumns { target, start, end } => {
                let mut spreadsheet = service.fetch_spreadsheet(&target.id).await?;
                let sheet = target.sheet_mut(&mut spreadsheet)?;
                service.delete_columns(sheet, *start, *end).await?;
                info!(
                    columns = sheet.properties.grid_properties.column_count,
                    "Columns deleted"
                );
            }
            SpreadsheetCommand::AddSheet { id, title } => {
                let mut spreadsheet = service.fetch_spreadsheet(id).await?;
                let sheet = service.add_sheet(&mut spreadsheet, title).await?;
                info!(sheet_id = sheet.id(), "Sheet added");
            }
            SpreadsheetCommand::DeleteSheet { target } => {
                let mut spreadsheet = service.fetch_spreadsheet(&target.id).await?;
                let sheet_id = target.sheet_mut(&mut spreadsheet)?.id();
                service.delete_sheet(&mut spreadsheet, sheet_id).await?;
                info!(sheet_id, "Sheet deleted");
            }
            SpreadsheetCommand::Clear { target } => {
                let mut spreadsheet = service.fetch_spreadsheet(&target.id).await?;
                let sheet = target.sheet_mut(&mut spreadsheet)?;
                service.clear_sheet(sheet).await?;
                info!("Sheet cleared");
            }
        }

        Ok(())
    }
}

impl SheetTarget {
    fn sheet_mut<'a>(&self, spreadsheet: &'a mut Spreadsheet) -> Result<&'a mut Sheet> {
        spreadsheet
            .sheet_by_title_mut(&self.sheet)
            .ok_or_else(|| AppError::from(anyhow!("No sheet titled {:?} in {}", self.sheet, self.id)))
    }
}

fn show_spreadsheet(spreadsheet: &Spreadsheet) {
    info!(id = %spreadsheet.id, title = %spreadsheet.title(), "Spreadsheet");
    for sheet in &spreadsheet.sheets {
        let grid = sheet.properties.grid_properties;
        info!(
            sheet_id = sheet.id(),
            title = %sheet.title(),
            index = sheet.properties.index,
            rows = grid.row_count,
            columns = grid.column_count,
            "Sheet"
        );
    }
}
