pub mod engine;
pub mod pattern;
pub mod rules;

pub use crate::domain::model::{FilterOutcome, HiddenQuote, ManualServiceConfig, Quote};
pub use crate::domain::ports::{ProfileStore, QuoteSource};
pub use crate::utils::error::Result;
