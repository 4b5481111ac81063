use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gempalog_core::{AidSubmission, AidType, Config, Dashboard, Page, view::formulir};
use std::{
    num::NonZeroU32,
    path::{Path, PathBuf},
};

use crate::prompt;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "gempalog", version, about = "GempaLog.ID earthquake and aid dashboard")]
pub struct Cli {
    /// Read configuration from this file instead of the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse the dashboard interactively (the default).
    Dashboard,

    /// Render a single page and exit.
    Show {
        /// info-gempa, formulir-bantuan or data-bantuan.
        page: String,
    },

    /// Record an aid submission without prompting.
    Submit {
        /// Sender name.
        #[arg(long)]
        name: String,

        /// Makanan, Obat-obatan, Pakaian, Tenda or Lainnya.
        #[arg(long)]
        aid_type: String,

        /// Number of units, at least 1.
        #[arg(long)]
        quantity: NonZeroU32,

        /// Where the aid is going.
        #[arg(long)]
        destination: String,
    },

    /// Interactively write the configuration file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let path = self.config.as_deref();

        match self.command.unwrap_or(Command::Dashboard) {
            Command::Configure => prompt::configure(config_for_configure(path), path),
            Command::Dashboard => {
                let dashboard = Dashboard::from_config(&load_config(path)?)?;
                run_dashboard(&dashboard).await
            }
            Command::Show { page } => {
                let page = Page::try_from(page.as_str())?;
                let dashboard = Dashboard::from_config(&load_config(path)?)?;
                show_page(&dashboard, page).await
            }
            Command::Submit { name, aid_type, quantity, destination } => {
                let submission = AidSubmission {
                    sender_name: name,
                    aid_type: AidType::try_from(aid_type.as_str())?,
                    quantity,
                    destination,
                };
                let dashboard = Dashboard::from_config(&load_config(path)?)?;
                let record = dashboard.submit(submission).context("Failed to store aid record")?;
                print!("{}", formulir::acknowledge(&record));
                Ok(())
            }
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Starting point for `configure`: defaults when the file fails to load or validate.
fn config_for_configure(path: Option<&Path>) -> Config {
    load_config(path).unwrap_or_else(|err| {
        eprintln!("Konfigurasi tidak dapat dibaca, memakai nilai bawaan: {err:#}");
        Config::default()
    })
}

/// Navigation loop: one full page render per selection until the user exits.
async fn run_dashboard(dashboard: &Dashboard) -> Result<()> {
    while let Some(page) = prompt::navigate()? {
        if let Err(err) = show_page(dashboard, page).await {
            eprintln!("Error: {err:#}");
        }
    }

    Ok(())
}

async fn show_page(dashboard: &Dashboard, page: Page) -> Result<()> {
    print!("{}", dashboard.render(page).await);

    match page {
        Page::FormulirBantuan => {
            let Some(submission) = prompt::aid_form()? else {
                println!("Formulir dibatalkan.");
                return Ok(());
            };
            let record = dashboard.submit(submission).context("Failed to store aid record")?;
            print!("{}", formulir::acknowledge(&record));
        }
        Page::InfoGempa | Page::DataBantuan => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_dashboard() {
        let cli = Cli::try_parse_from(["gempalog"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn submit_parses_all_fields() {
        let cli = Cli::try_parse_from([
            "gempalog",
            "submit",
            "--name",
            "Budi",
            "--aid-type",
            "Makanan",
            "--quantity",
            "5",
            "--destination",
            "Padang",
            "--config",
            "/tmp/gempalog.toml",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("/tmp/gempalog.toml")));
        match cli.command {
            Some(Command::Submit { name, aid_type, quantity, destination }) => {
                assert_eq!(name, "Budi");
                assert_eq!(aid_type, "Makanan");
                assert_eq!(quantity.get(), 5);
                assert_eq!(destination, "Padang");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let res = Cli::try_parse_from([
            "gempalog",
            "submit",
            "--name",
            "Budi",
            "--aid-type",
            "Makanan",
            "--quantity",
            "0",
            "--destination",
            "Padang",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn configure_starts_from_defaults_when_the_file_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gempalog.toml");
        std::fs::write(&path, "recent_limit = 0\n").unwrap();

        assert!(load_config(Some(path.as_path())).is_err());
        assert_eq!(config_for_configure(Some(path.as_path())), Config::default());

        std::fs::write(&path, "recent_limit = [\n").unwrap();
        assert_eq!(config_for_configure(Some(path.as_path())), Config::default());
    }

    #[test]
    fn configure_keeps_a_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gempalog.toml");
        std::fs::write(&path, "recent_limit = 3\n").unwrap();

        assert_eq!(config_for_configure(Some(path.as_path())).recent_limit, 3);
    }

    #[test]
    fn show_takes_a_page() {
        let cli = Cli::try_parse_from(["gempalog", "show", "data-bantuan"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Show { page }) if page == "data-bantuan"));
    }
}
