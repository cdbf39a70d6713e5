use clap::Subcommand;
use sheets_service::Result;
use sheets_service::config::Config;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum ShowResource {
    /// Show configuration and credential paths
    Paths,
}

impl ShowResource {
    pub async fn execute(&self) -> Result<()> {
        match self {
            ShowResource::Paths => show_paths(),
        }
    }
}

fn show_paths() -> Result<()> {
    let config_path = Config::config_file()?;
    let config_dir = Config::config_dir()?;

    info!(path = ?config_path, "Config path");
    info!(path = ?config_dir, "Config directory");

    // The secret file location comes from the config when there is one
    if let Ok(config) = Config::load() {
        info!(path = ?config.google.secret_file()?, "Service account key path");
    }

    Ok(())
}
