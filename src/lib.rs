pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::profile::FilterProfile;
pub use config::store::{FileProfileStore, JsonQuoteFile};
pub use crate::core::engine::evaluate;
pub use crate::core::pattern::ServicePattern;
pub use crate::core::rules::{DisplayRule, RuleKind, RuleSet};
pub use domain::model::{
    FilterOutcome, HiddenBy, HiddenQuote, ManualServiceConfig, Quote, ServiceIdentity,
};
pub use domain::ports::{ProfileStore, QuoteSource};
pub use utils::error::{FilterError, Result};
