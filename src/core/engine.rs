//! The rule-evaluation engine behind the quote display filter.
//!
//! `evaluate` is a pure function over its inputs. Every call rebuilds its
//! per-quote records from scratch; nothing is cached between calls and the
//! input slices are never mutated.

use crate::core::pattern::ServicePattern;
use crate::core::rules::{DisplayRule, RuleKind};
use crate::domain::model::{
    format_rate, FilterOutcome, HiddenBy, HiddenQuote, ManualServiceConfig, Quote,
};

/// Per-quote evaluation state, rebuilt on every `evaluate` call.
#[derive(Debug)]
struct EvaluationRecord {
    quote: Quote,
    hidden_by: Option<HiddenBy>,
    hidden_reason: Option<String>,
    /// Set when some rule deliberately kept or hid this quote; read by
    /// RemoveUnmatched to tell "rules touched this" from "rules ignored it".
    matched_by_rule: bool,
}

impl EvaluationRecord {
    fn new(quote: Quote) -> Self {
        Self {
            quote,
            hidden_by: None,
            hidden_reason: None,
            matched_by_rule: false,
        }
    }

    fn is_hidden(&self) -> bool {
        self.hidden_by.is_some()
    }

    fn hide(&mut self, by: HiddenBy, reason: String) {
        self.hidden_by = Some(by);
        self.hidden_reason = Some(reason);
    }
}

/// Filters `quotes` down to the subset that should be shown, applying the
/// manual visibility overlay first and then every enabled rule in priority
/// order (ties break by stored position). Returns both partitions in
/// original discovery order, each hidden quote annotated with its reason.
pub fn evaluate(
    quotes: &[Quote],
    manual_configs: &[ManualServiceConfig],
    rules: &[DisplayRule],
) -> FilterOutcome {
    let mut records: Vec<EvaluationRecord> = quotes
        .iter()
        .cloned()
        .map(EvaluationRecord::new)
        .collect();

    apply_manual_overlay(&mut records, manual_configs);

    let mut active: Vec<&DisplayRule> = rules.iter().filter(|rule| rule.enabled).collect();
    active.sort_by_key(|rule| rule.priority);

    for rule in active {
        tracing::debug!("Applying rule: {}", rule);
        apply_rule(rule, &mut records);
    }

    let outcome = partition(records);
    tracing::debug!(
        "Evaluated {} quotes: {} visible, {} hidden",
        quotes.len(),
        outcome.visible.len(),
        outcome.hidden.len()
    );
    outcome
}

/// Per-service admin flags run once, before any rule. A manually hidden
/// quote is permanently excluded; rules never reconsider it.
fn apply_manual_overlay(records: &mut [EvaluationRecord], configs: &[ManualServiceConfig]) {
    for record in records.iter_mut() {
        let config = configs.iter().find(|config| {
            config.carrier.eq_ignore_ascii_case(&record.quote.carrier)
                && config.service.eq_ignore_ascii_case(&record.quote.service)
        });
        if let Some(config) = config {
            if !config.visible {
                tracing::trace!(
                    "{}:{} manually disabled",
                    record.quote.carrier,
                    record.quote.service
                );
                record.hide(HiddenBy::Manual, "Manually disabled".to_string());
            }
        }
    }
}

fn apply_rule(rule: &DisplayRule, records: &mut [EvaluationRecord]) {
    match &rule.kind {
        RuleKind::ConditionalHide {
            hide_service,
            if_service_exists,
        } => apply_conditional_hide(
            records,
            hide_service,
            if_service_exists.as_deref(),
            &rule.description,
        ),
        RuleKind::PriorityList { priority_services } => {
            apply_priority_list(records, priority_services, &rule.description)
        }
        RuleKind::PricePriorityList { priority_services } => {
            apply_price_priority_list(records, priority_services, &rule.description)
        }
        RuleKind::RemoveUnmatched => apply_remove_unmatched(records, &rule.description),
    }
}

fn description_suffix(description: &str) -> String {
    if description.is_empty() {
        String::new()
    } else {
        format!(" ({})", description)
    }
}

fn apply_conditional_hide(
    records: &mut [EvaluationRecord],
    hide_service: &str,
    if_service_exists: Option<&str>,
    description: &str,
) {
    // Empty condition means unconditional; a malformed condition pattern
    // matches nothing, so the condition can never hold.
    let condition = if_service_exists.filter(|pattern| !pattern.is_empty());
    let condition_met = match condition {
        None => true,
        Some(pattern) => ServicePattern::parse(pattern)
            .map(|compiled| {
                records
                    .iter()
                    .any(|r| !r.is_hidden() && compiled.matches(&r.quote.carrier, &r.quote.service))
            })
            .unwrap_or(false),
    };
    if !condition_met {
        return;
    }

    let Some(hide) = ServicePattern::parse(hide_service) else {
        return;
    };
    let reason = match condition {
        Some(pattern) => format!(
            "Hidden because {} exists{}",
            pattern,
            description_suffix(description)
        ),
        None => format!("Always hidden{}", description_suffix(description)),
    };
    for record in records.iter_mut() {
        if !record.is_hidden() && hide.matches(&record.quote.carrier, &record.quote.service) {
            record.matched_by_rule = true;
            record.hide(HiddenBy::Rule, reason.clone());
        }
    }
}

/// Walks the pattern list in order. The first pattern with any live match
/// claims its first match as the winner (kept visible); every match of
/// every pattern after that point is hidden. Surplus matches of the winning
/// pattern itself are left untouched.
fn apply_priority_list(records: &mut [EvaluationRecord], patterns: &[String], description: &str) {
    let mut winner_chosen = false;
    for pattern in patterns {
        let Some(compiled) = ServicePattern::parse(pattern) else {
            continue;
        };
        let matching: Vec<usize> = records
            .iter()
            .enumerate()
            .filter(|(_, r)| {
                !r.is_hidden() && compiled.matches(&r.quote.carrier, &r.quote.service)
            })
            .map(|(index, _)| index)
            .collect();
        if matching.is_empty() {
            continue;
        }

        if !winner_chosen {
            records[matching[0]].matched_by_rule = true;
            winner_chosen = true;
        } else {
            let reason = format!("Hidden by priority rule{}", description_suffix(description));
            for index in matching {
                records[index].matched_by_rule = true;
                records[index].hide(HiddenBy::Rule, reason.clone());
            }
        }
    }
}

/// Groups every live quote matching any pattern, keeps the cheapest, hides
/// the rest. A single-member group has nothing to compare and hides nothing,
/// but is still claimed.
fn apply_price_priority_list(
    records: &mut [EvaluationRecord],
    patterns: &[String],
    description: &str,
) {
    let compiled: Vec<ServicePattern> = patterns
        .iter()
        .filter_map(|pattern| ServicePattern::parse(pattern))
        .collect();
    if compiled.is_empty() {
        return;
    }

    let mut group: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| {
            !r.is_hidden()
                && compiled
                    .iter()
                    .any(|p| p.matches(&r.quote.carrier, &r.quote.service))
        })
        .map(|(index, _)| index)
        .collect();
    for &index in &group {
        records[index].matched_by_rule = true;
    }
    if group.len() <= 1 {
        return;
    }

    // Stable sort: rate ties resolve to the earliest-discovered quote.
    group.sort_by(|&a, &b| {
        records[a]
            .quote
            .rate
            .partial_cmp(&records[b].quote.rate)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let cheapest = &records[group[0]].quote;
    let reason = format!(
        "Hidden - more expensive than {} {} (${}){}",
        cheapest.carrier,
        cheapest.service,
        format_rate(cheapest.rate),
        description_suffix(description)
    );
    for &index in &group[1..] {
        records[index].hide(HiddenBy::Rule, reason.clone());
    }
}

fn apply_remove_unmatched(records: &mut [EvaluationRecord], description: &str) {
    let reason = format!(
        "Not matched by any previous rule{}",
        description_suffix(description)
    );
    for record in records.iter_mut() {
        if !record.is_hidden() && !record.matched_by_rule {
            record.hide(HiddenBy::Rule, reason.clone());
        }
    }
}

fn partition(records: Vec<EvaluationRecord>) -> FilterOutcome {
    let mut visible = Vec::new();
    let mut hidden = Vec::new();
    for record in records {
        match record.hidden_by {
            None => visible.push(record.quote),
            Some(by) => hidden.push(HiddenQuote {
                quote: record.quote,
                hidden_by: by,
                hidden_reason: record.hidden_reason.unwrap_or_default(),
            }),
        }
    }
    FilterOutcome { visible, hidden }
}
