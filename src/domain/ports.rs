use crate::config::profile::FilterProfile;
use crate::domain::model::Quote;
use crate::utils::error::Result;

/// Supplies the raw quote list. How the quotes were obtained is the
/// implementor's business; the engine only requires carrier, service,
/// display name, and a non-negative rate.
pub trait QuoteSource {
    fn quotes(&self) -> Result<Vec<Quote>>;
}

/// Loads and persists a filter profile (manual configs plus rules) as an
/// opaque ordered list. The engine reads profiles but never writes them;
/// callers persist the lists produced by `RuleSet` mutations.
pub trait ProfileStore {
    fn load(&self) -> Result<FilterProfile>;
    fn save(&self, profile: &FilterProfile) -> Result<()>;
}
