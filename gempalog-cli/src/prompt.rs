//! Interactive prompts: page navigation, the aid form and configuration.

use anyhow::Result;
use gempalog_core::{AidSubmission, AidType, Config, Page, view::formulir};
use inquire::{CustomType, InquireError, Select, Text};
use std::{fmt, num::NonZeroU32, path::Path};

/// One entry of the navigation menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Open(Page),
    Exit,
}

impl MenuItem {
    pub fn all() -> Vec<MenuItem> {
        Page::all().iter().copied().map(MenuItem::Open).chain([MenuItem::Exit]).collect()
    }
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuItem::Open(page) => write!(f, "{page}"),
            MenuItem::Exit => f.write_str("Keluar"),
        }
    }
}

/// Treat Esc / Ctrl-C as "stop asking" rather than an error.
fn cancellable<T>(res: Result<T, InquireError>) -> Result<Option<T>> {
    match res {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Ask which page to show next. `None` means the user wants to leave.
pub fn navigate() -> Result<Option<Page>> {
    let choice = cancellable(Select::new("Navigasi", MenuItem::all()).prompt())?;

    Ok(match choice {
        Some(MenuItem::Open(page)) => Some(page),
        Some(MenuItem::Exit) | None => None,
    })
}

/// Collect the aid form. `None` when the user cancels midway.
pub fn aid_form() -> Result<Option<AidSubmission>> {
    cancellable(ask_submission())
}

fn ask_submission() -> Result<AidSubmission, InquireError> {
    let sender_name = Text::new(formulir::FIELD_SENDER).prompt()?;

    let aid_type = Select::new(formulir::FIELD_AID_TYPE, AidType::all().to_vec()).prompt()?;

    let quantity = CustomType::<NonZeroU32>::new(formulir::FIELD_QUANTITY)
        .with_default(NonZeroU32::MIN)
        .with_error_message("Masukkan bilangan bulat minimal 1")
        .prompt()?;

    let destination = Text::new(formulir::FIELD_DESTINATION).prompt()?;

    Ok(AidSubmission { sender_name, aid_type, quantity, destination })
}

/// Prompt for each setting, starting from the current values, and save.
pub fn configure(config: Config, path: Option<&Path>) -> Result<()> {
    let Some(config) = cancellable(ask_settings(config))? else {
        println!("Konfigurasi dibatalkan.");
        return Ok(());
    };

    let saved = match path {
        Some(path) => {
            config.save_to(path)?;
            path.to_path_buf()
        }
        None => config.save()?,
    };

    println!("Konfigurasi disimpan di {}", saved.display());
    Ok(())
}

fn ask_settings(mut config: Config) -> Result<Config, InquireError> {
    let current_store = config.store_path.display().to_string();
    config.store_path = Text::new("Lokasi file data bantuan").with_default(&current_store).prompt()?.into();

    config.recent_limit = CustomType::<usize>::new("Jumlah gempa terkini yang ditampilkan")
        .with_default(config.recent_limit)
        .prompt()?;

    config.feed.recent_url =
        Text::new("URL gempa terkini BMKG").with_default(&config.feed.recent_url).prompt()?;

    config.feed.felt_url =
        Text::new("URL gempa dirasakan BMKG").with_default(&config.feed.felt_url).prompt()?;

    config.feed.timeout_secs = CustomType::<u64>::new("Batas waktu permintaan BMKG (detik)")
        .with_default(config.feed.timeout_secs)
        .prompt()?;

    Ok(config)
}
