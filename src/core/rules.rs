//! Display rules and the ordered rule set the admin tooling edits.

use std::fmt;

/// The four rule semantics, one explicit tag per variant. Legacy numeric
/// and loosely-typed encodings are normalized into this form at the
/// configuration boundary before reaching the evaluator.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleKind {
    /// Hide every quote matching `hide_service`, either unconditionally or
    /// only while some unhidden quote matches `if_service_exists`.
    ConditionalHide {
        hide_service: String,
        if_service_exists: Option<String>,
    },
    /// Keep the first live match of the first pattern that has any; hide
    /// every match of every pattern after the winning one.
    PriorityList { priority_services: Vec<String> },
    /// Of all live quotes matching any pattern, keep the cheapest and hide
    /// the rest.
    PricePriorityList { priority_services: Vec<String> },
    /// Hide every live quote no earlier rule claimed.
    RemoveUnmatched,
}

impl RuleKind {
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::ConditionalHide { .. } => "ConditionalHide",
            RuleKind::PriorityList { .. } => "PriorityList",
            RuleKind::PricePriorityList { .. } => "PricePriorityList",
            RuleKind::RemoveUnmatched => "RemoveUnmatched",
        }
    }
}

/// One admin-defined rule. `priority` orders evaluation (lower first, ties
/// break by stored position); disabled rules are skipped entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRule {
    pub kind: RuleKind,
    pub description: String,
    pub enabled: bool,
    pub priority: i32,
}

impl DisplayRule {
    pub fn new(kind: RuleKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            enabled: true,
            priority: 0,
        }
    }
}

impl fmt::Display for DisplayRule {
    /// One-line summary in the voice of the admin rule cards.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            RuleKind::ConditionalHide {
                hide_service,
                if_service_exists,
            } => match if_service_exists.as_deref().filter(|p| !p.is_empty()) {
                Some(condition) => write!(f, "Hide {} if {} exists", hide_service, condition),
                None => write!(f, "Hide {} always", hide_service),
            },
            RuleKind::PriorityList { priority_services } => write!(
                f,
                "Priority list: show first available from {}",
                priority_services.join(", ")
            ),
            RuleKind::PricePriorityList { priority_services } => {
                write!(f, "Cheapest from: {}", priority_services.join(", "))
            }
            RuleKind::RemoveUnmatched => {
                write!(f, "Remove services not matched by previous rules")
            }
        }
    }
}

/// The ordered rule list plus the monotonic priority counter.
///
/// Every mutation works on this owned value; the evaluator only ever sees
/// a `&[DisplayRule]` snapshot, so edits never alias a prior evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: Vec<DisplayRule>,
    next_priority: i32,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing rule list. The priority counter resumes at the
    /// list length, as the original admin session did.
    pub fn from_rules(rules: Vec<DisplayRule>) -> Self {
        let next_priority = rules.len() as i32;
        Self {
            rules,
            next_priority,
        }
    }

    pub fn rules(&self) -> &[DisplayRule] {
        &self.rules
    }

    pub fn into_rules(self) -> Vec<DisplayRule> {
        self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Appends a rule, forcing `enabled` and assigning the next priority.
    /// The counter only ever increases; deleted priorities are not reused.
    pub fn add(&mut self, mut rule: DisplayRule) {
        rule.enabled = true;
        rule.priority = self.next_priority;
        self.next_priority += 1;
        self.rules.push(rule);
    }

    /// Removes the rule at `index` without renumbering the survivors.
    /// Out-of-range indices are a no-op.
    pub fn delete(&mut self, index: usize) {
        if index < self.rules.len() {
            self.rules.remove(index);
        }
    }

    /// Swaps the rule with its predecessor and reassigns both priorities
    /// to their new positional indices.
    pub fn move_up(&mut self, index: usize) {
        if index > 0 && index < self.rules.len() {
            self.rules.swap(index - 1, index);
            self.rules[index - 1].priority = (index - 1) as i32;
            self.rules[index].priority = index as i32;
        }
    }

    /// Swaps the rule with its successor and reassigns both priorities
    /// to their new positional indices.
    pub fn move_down(&mut self, index: usize) {
        if index + 1 < self.rules.len() {
            self.rules.swap(index, index + 1);
            self.rules[index].priority = index as i32;
            self.rules[index + 1].priority = (index + 1) as i32;
        }
    }

    pub fn toggle_enabled(&mut self, index: usize) {
        if let Some(rule) = self.rules.get_mut(index) {
            rule.enabled = !rule.enabled;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hide_rule(pattern: &str) -> DisplayRule {
        DisplayRule::new(
            RuleKind::ConditionalHide {
                hide_service: pattern.to_string(),
                if_service_exists: None,
            },
            "",
        )
    }

    #[test]
    fn add_assigns_monotonic_priorities() {
        let mut set = RuleSet::new();
        set.add(hide_rule("UPS:*"));
        set.add(hide_rule("FedEx:*"));
        set.add(hide_rule("USPS:*"));
        let priorities: Vec<i32> = set.rules().iter().map(|r| r.priority).collect();
        assert_eq!(priorities, vec![0, 1, 2]);
    }

    #[test]
    fn delete_does_not_renumber_and_counter_is_never_reused() {
        let mut set = RuleSet::new();
        set.add(hide_rule("a:*"));
        set.add(hide_rule("b:*"));
        set.add(hide_rule("c:*"));
        set.delete(0);
        set.add(hide_rule("d:*"));

        let priorities: Vec<i32> = set.rules().iter().map(|r| r.priority).collect();
        assert_eq!(priorities, vec![1, 2, 3]);
    }

    #[test]
    fn delete_out_of_range_is_a_no_op() {
        let mut set = RuleSet::from_rules(vec![hide_rule("a:*")]);
        set.delete(5);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn moves_swap_and_reassign_positional_priorities() {
        let mut set = RuleSet::new();
        set.add(hide_rule("a:*"));
        set.add(hide_rule("b:*"));
        set.add(hide_rule("c:*"));

        set.move_up(2);
        let order: Vec<String> = set
            .rules()
            .iter()
            .map(|r| match &r.kind {
                RuleKind::ConditionalHide { hide_service, .. } => hide_service.clone(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(order, vec!["a:*", "c:*", "b:*"]);
        assert_eq!(set.rules()[1].priority, 1);
        assert_eq!(set.rules()[2].priority, 2);

        set.move_down(0);
        assert_eq!(set.rules()[0].priority, 0);
        assert_eq!(set.rules()[1].priority, 1);
    }

    #[test]
    fn moves_at_the_edges_are_no_ops() {
        let mut set = RuleSet::new();
        set.add(hide_rule("a:*"));
        set.add(hide_rule("b:*"));
        let before = set.clone();
        set.move_up(0);
        set.move_down(1);
        set.move_down(7);
        assert_eq!(set, before);
    }

    #[test]
    fn toggle_flips_enabled() {
        let mut set = RuleSet::new();
        set.add(hide_rule("a:*"));
        assert!(set.rules()[0].enabled);
        set.toggle_enabled(0);
        assert!(!set.rules()[0].enabled);
        set.toggle_enabled(0);
        assert!(set.rules()[0].enabled);
        set.toggle_enabled(9); // out of range, no panic
    }

    #[test]
    fn priority_counter_resumes_at_list_length() {
        let mut set = RuleSet::from_rules(vec![hide_rule("a:*"), hide_rule("b:*")]);
        set.add(hide_rule("c:*"));
        assert_eq!(set.rules()[2].priority, 2);
    }

    #[test]
    fn summaries_read_like_admin_cards() {
        let conditional = DisplayRule::new(
            RuleKind::ConditionalHide {
                hide_service: "USPS:Priority".into(),
                if_service_exists: Some("UPS:*".into()),
            },
            "",
        );
        assert_eq!(conditional.to_string(), "Hide USPS:Priority if UPS:* exists");

        let unconditional = DisplayRule::new(
            RuleKind::ConditionalHide {
                hide_service: "UPS:*".into(),
                if_service_exists: Some("".into()),
            },
            "",
        );
        assert_eq!(unconditional.to_string(), "Hide UPS:* always");

        let priority = DisplayRule::new(
            RuleKind::PriorityList {
                priority_services: vec!["USPS:Priority".into(), "FedEx:Ground".into()],
            },
            "",
        );
        assert_eq!(
            priority.to_string(),
            "Priority list: show first available from USPS:Priority, FedEx:Ground"
        );

        let price = DisplayRule::new(
            RuleKind::PricePriorityList {
                priority_services: vec!["*:Ground".into()],
            },
            "",
        );
        assert_eq!(price.to_string(), "Cheapest from: *:Ground");

        let unmatched = DisplayRule::new(RuleKind::RemoveUnmatched, "");
        assert_eq!(
            unmatched.to_string(),
            "Remove services not matched by previous rules"
        );
    }
}
