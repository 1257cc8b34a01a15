use serde::{Deserialize, Serialize};

/// The (carrier, service) pair identifying a quote or a manual config entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceIdentity {
    pub carrier: String,
    pub service: String,
}

impl ServiceIdentity {
    pub fn new(carrier: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            carrier: carrier.into(),
            service: service.into(),
        }
    }
}

/// A single carrier+service rate offer returned by a rate-discovery source.
///
/// Quotes are immutable inputs; the engine builds its own per-quote records
/// and never writes back into the list it was given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub carrier: String,
    pub service: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub rate: f64,
}

impl Quote {
    pub fn new(
        carrier: impl Into<String>,
        service: impl Into<String>,
        display_name: impl Into<String>,
        rate: f64,
    ) -> Self {
        Self {
            carrier: carrier.into(),
            service: service.into(),
            display_name: display_name.into(),
            rate,
        }
    }

    pub fn identity(&self) -> ServiceIdentity {
        ServiceIdentity::new(self.carrier.clone(), self.service.clone())
    }

    /// Display name, falling back to "Carrier Service" when none was set.
    pub fn display_label(&self) -> String {
        if self.display_name.is_empty() {
            format!("{} {}", self.carrier, self.service)
        } else {
            self.display_name.clone()
        }
    }
}

/// Admin-set visibility/order override for a specific identity, applied
/// before any rule runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualServiceConfig {
    pub carrier: String,
    pub service: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub display_order: i32,
}

fn default_visible() -> bool {
    true
}

impl ManualServiceConfig {
    pub fn new(carrier: impl Into<String>, service: impl Into<String>, visible: bool) -> Self {
        Self {
            carrier: carrier.into(),
            service: service.into(),
            display_name: String::new(),
            visible,
            display_order: 0,
        }
    }
}

/// Which mechanism hid a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HiddenBy {
    Manual,
    Rule,
}

/// A quote excluded from display, annotated with the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiddenQuote {
    #[serde(flatten)]
    pub quote: Quote,
    pub hidden_by: HiddenBy,
    pub hidden_reason: String,
}

/// Result of one evaluation: both lists preserve original discovery order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOutcome {
    pub visible: Vec<Quote>,
    pub hidden: Vec<HiddenQuote>,
}

/// Formats a rate for display, always with two decimals.
pub fn format_rate(value: f64) -> String {
    format!("{:.2}", value)
}
