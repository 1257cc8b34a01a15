use crate::config::profile::FilterProfile;
use crate::core::pattern::ServicePattern;
use crate::core::rules::RuleKind;
use crate::utils::error::{FilterError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(FilterError::ValidationError {
            message: format!("{} path cannot be empty", field_name),
        });
    }
    if path.contains('\0') {
        return Err(FilterError::ValidationError {
            message: format!("{} path contains null bytes", field_name),
        });
    }
    Ok(())
}

/// Advisory linting over a profile: flags rule shapes the admin form would
/// reject. The engine accepts all of them (malformed parts degrade to
/// no-ops), so lints are warnings, never errors.
pub fn lint_profile(profile: &FilterProfile) -> Vec<String> {
    let mut warnings = Vec::new();

    for (index, rule) in profile.rules.iter().enumerate() {
        let label = format!("Rule {}", index + 1);
        match &rule.kind {
            RuleKind::ConditionalHide {
                hide_service,
                if_service_exists,
            } => {
                if hide_service.is_empty() {
                    warnings.push(format!("{}: no hide pattern, rule has no effect", label));
                } else {
                    lint_pattern(&mut warnings, &label, hide_service);
                }
                if let Some(condition) = if_service_exists.as_deref() {
                    if !condition.is_empty() {
                        lint_pattern(&mut warnings, &label, condition);
                    }
                }
            }
            RuleKind::PriorityList { priority_services }
            | RuleKind::PricePriorityList { priority_services } => {
                if priority_services.len() < 2 {
                    warnings.push(format!(
                        "{}: fewer than two patterns, nothing to choose between",
                        label
                    ));
                }
                for pattern in priority_services {
                    lint_pattern(&mut warnings, &label, pattern);
                }
            }
            RuleKind::RemoveUnmatched => {}
        }
    }

    warnings
}

fn lint_pattern(warnings: &mut Vec<String>, label: &str, pattern: &str) {
    if ServicePattern::parse(pattern).is_none() {
        warnings.push(format!(
            "{}: pattern \"{}\" is malformed and matches nothing",
            label, pattern
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_is_rejected() {
        assert!(validate_path("quotes", "").is_err());
        assert!(validate_path("quotes", "./quotes.json").is_ok());
    }

    #[test]
    fn lint_flags_malformed_rules_without_rejecting_them() {
        let profile: FilterProfile = serde_json::from_str(
            r#"{
                "rules": [
                    {"ruleType": 0, "hideService": "NoColon"},
                    {"ruleType": 0},
                    {"ruleType": 1, "priorityServices": ["USPS:*"]},
                    {"ruleType": 3}
                ]
            }"#,
        )
        .unwrap();

        let warnings = lint_profile(&profile);
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].contains("malformed"));
        assert!(warnings[1].contains("no hide pattern"));
        assert!(warnings[2].contains("fewer than two patterns"));
    }

    #[test]
    fn clean_profiles_lint_clean() {
        let profile: FilterProfile = serde_json::from_str(
            r#"{
                "rules": [
                    {"ruleType": 0, "hideService": "UPS:*", "ifServiceExists": "USPS:*"},
                    {"ruleType": 2, "priorityServices": ["*:Ground", "*:Priority"]}
                ]
            }"#,
        )
        .unwrap();
        assert!(lint_profile(&profile).is_empty());
    }
}
