mod show;
mod spreadsheet;

use clap::{Parser, Subcommand};
use sheets_service::Result;

pub use show::ShowResource;
pub use spreadsheet::SpreadsheetCommand;

#[derive(Parser, Debug)]
#[command(name = "sheets-service")]
#[command(about = "Read and edit Google Sheets spreadsheets with a service account", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Show { resource } => resource.execute().await,
            Commands::Spreadsheet(command) => command.execute().await,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Show {
        #[command(subcommand)]
        resource: ShowResource,
    },
    #[command(flatten)]
    Spreadsheet(SpreadsheetCommand),
}
