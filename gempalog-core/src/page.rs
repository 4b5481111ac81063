use std::fmt;

/// The dashboard views reachable from the navigation menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    InfoGempa,
    FormulirBantuan,
    DataBantuan,
}

impl Page {
    /// Stable identifier used on the command line.
    pub fn slug(&self) -> &'static str {
        match self {
            Page::InfoGempa => "info-gempa",
            Page::FormulirBantuan => "formulir-bantuan",
            Page::DataBantuan => "data-bantuan",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::InfoGempa => "Info Gempa",
            Page::FormulirBantuan => "Formulir Bantuan",
            Page::DataBantuan => "Data Bantuan",
        }
    }

    pub const fn all() -> &'static [Page] {
        &[Page::InfoGempa, Page::FormulirBantuan, Page::DataBantuan]
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl TryFrom<&str> for Page {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.trim().to_lowercase();

        match lower.as_str() {
            "info-gempa" | "info" | "gempa" => Ok(Page::InfoGempa),
            "formulir-bantuan" | "formulir" | "form" => Ok(Page::FormulirBantuan),
            "data-bantuan" | "data" => Ok(Page::DataBantuan),
            _ => Err(anyhow::anyhow!(
                "Unknown page '{value}'. Supported pages: info-gempa, formulir-bantuan, data-bantuan."
            )),
        }
    }
}
