//! Wildcard matching for "Carrier:Service" pattern strings.
//!
//! Pattern format: `"Carrier:Service"` (e.g. `"USPS:Priority"`, `"FedEx:*"`,
//! `"*:Ground"`). Each side is an exact literal, `*`, a `prefix*`, or a
//! `*suffix`. Comparison is case-insensitive on both sides. A pattern with
//! no `:` or with an empty side matches nothing.

use crate::domain::model::ServiceIdentity;

/// One side of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SegmentPattern {
    Any,
    Prefix(String),
    Suffix(String),
    Exact(String),
}

impl SegmentPattern {
    // A lone "*" is Any; "**" falls through to a prefix match on "*".
    fn compile(segment: &str) -> Self {
        if segment == "*" {
            SegmentPattern::Any
        } else if let Some(prefix) = segment.strip_suffix('*') {
            SegmentPattern::Prefix(prefix.to_lowercase())
        } else if let Some(suffix) = segment.strip_prefix('*') {
            SegmentPattern::Suffix(suffix.to_lowercase())
        } else {
            SegmentPattern::Exact(segment.to_lowercase())
        }
    }

    fn matches(&self, value: &str) -> bool {
        let value = value.to_lowercase();
        match self {
            SegmentPattern::Any => true,
            SegmentPattern::Prefix(prefix) => value.starts_with(prefix.as_str()),
            SegmentPattern::Suffix(suffix) => value.ends_with(suffix.as_str()),
            SegmentPattern::Exact(exact) => value == *exact,
        }
    }
}

/// A `"Carrier:Service"` pattern compiled once, matched many times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicePattern {
    carrier: SegmentPattern,
    service: SegmentPattern,
}

impl ServicePattern {
    /// Compiles a pattern string. Returns `None` for malformed patterns
    /// (no `:`, or an empty carrier or service side). Segments past the
    /// second `:` are ignored.
    pub fn parse(pattern: &str) -> Option<Self> {
        let mut segments = pattern.split(':');
        let carrier = segments.next().unwrap_or("");
        let service = segments.next().unwrap_or("");
        if carrier.is_empty() || service.is_empty() {
            return None;
        }
        Some(Self {
            carrier: SegmentPattern::compile(carrier),
            service: SegmentPattern::compile(service),
        })
    }

    pub fn matches(&self, carrier: &str, service: &str) -> bool {
        self.carrier.matches(carrier) && self.service.matches(service)
    }

    pub fn matches_identity(&self, identity: &ServiceIdentity) -> bool {
        self.matches(&identity.carrier, &identity.service)
    }
}

/// Convenience form of the matching contract: a malformed pattern simply
/// matches nothing.
pub fn matches(identity: &ServiceIdentity, pattern: &str) -> bool {
    ServicePattern::parse(pattern)
        .map(|compiled| compiled.matches_identity(identity))
        .unwrap_or(false)
}
