pub mod profile;
pub mod store;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "rate-filter")]
#[command(about = "Filters shipping-rate quotes through admin display rules")]
pub struct CliConfig {
    #[arg(long, help = "JSON file with the discovered quotes")]
    pub quotes: String,

    #[arg(long, help = "Profile file (TOML or JSON) with manual configs and rules")]
    pub profile: String,

    #[arg(long, help = "Also list hidden quotes with their reasons")]
    pub show_hidden: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("quotes", &self.quotes)?;
        validate_path("profile", &self.profile)?;
        Ok(())
    }
}
