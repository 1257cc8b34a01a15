//! Persistence model for a filter profile and the legacy-format boundary.
//!
//! Upstream stores encode rules loosely: `ruleType` may be a number or a
//! string, field names may be PascalCase, and flags may be absent. All of
//! that is normalized here, at deserialization time, so the evaluator only
//! ever sees the tagged `DisplayRule` form.

use crate::core::rules::{DisplayRule, RuleKind, RuleSet};
use crate::domain::model::ManualServiceConfig;
use crate::utils::error::{FilterError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fs;
use std::path::Path;

/// Manual visibility configs plus the ordered rule list, the unit the
/// configuration store persists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterProfile {
    #[serde(default)]
    pub manual_services: Vec<ManualServiceConfig>,
    #[serde(
        default,
        serialize_with = "serialize_rules",
        deserialize_with = "deserialize_rules"
    )]
    pub rules: Vec<DisplayRule>,
}

impl FilterProfile {
    /// Loads a profile from a TOML or JSON file, chosen by extension
    /// (anything other than `.toml` is read as JSON).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| FilterError::ConfigError {
            message: format!("Cannot read profile file {}: {}", path.display(), e),
        })?;
        if is_toml(path) {
            Ok(toml::from_str(&content)?)
        } else {
            Ok(serde_json::from_str(&content)?)
        }
    }

    /// Writes the profile in normalized form, creating parent directories
    /// as needed.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_toml(path) {
            toml::to_string_pretty(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Hands the rule list to the admin mutation ops.
    pub fn rule_set(&self) -> RuleSet {
        RuleSet::from_rules(self.rules.clone())
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false)
}

/// Wire form of a rule: tolerant on the way in, normalized on the way out.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRule {
    #[serde(default, alias = "RuleType")]
    rule_type: RuleTag,
    #[serde(default, alias = "HideService", skip_serializing_if = "Option::is_none")]
    hide_service: Option<String>,
    #[serde(
        default,
        alias = "IfServiceExists",
        skip_serializing_if = "Option::is_none"
    )]
    if_service_exists: Option<String>,
    #[serde(default, alias = "PriorityServices")]
    priority_services: Vec<String>,
    #[serde(default, alias = "Description")]
    description: Option<String>,
    #[serde(default = "default_enabled", alias = "Enabled")]
    enabled: bool,
    #[serde(default, alias = "Priority")]
    priority: i32,
}

fn default_enabled() -> bool {
    true
}

/// `ruleType` as stored: the legacy numeric encoding or a variant name.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum RuleTag {
    Number(i64),
    Name(String),
}

impl Default for RuleTag {
    fn default() -> Self {
        RuleTag::Number(0)
    }
}

impl From<RawRule> for DisplayRule {
    fn from(raw: RawRule) -> Self {
        let name = match &raw.rule_type {
            RuleTag::Number(1) => "PriorityList",
            RuleTag::Number(2) => "PricePriorityList",
            RuleTag::Number(3) => "RemoveUnmatched",
            // Out-of-range numbers fall back to ConditionalHide.
            RuleTag::Number(_) => "ConditionalHide",
            RuleTag::Name(name) => name.as_str(),
        };
        let kind = match name {
            "PriorityList" => RuleKind::PriorityList {
                priority_services: raw.priority_services,
            },
            "PricePriorityList" => RuleKind::PricePriorityList {
                priority_services: raw.priority_services,
            },
            "RemoveUnmatched" => RuleKind::RemoveUnmatched,
            // Unrecognized names fall back to ConditionalHide too; with no
            // hide pattern the rule matches nothing and is a no-op.
            _ => RuleKind::ConditionalHide {
                hide_service: raw.hide_service.unwrap_or_default(),
                if_service_exists: raw.if_service_exists,
            },
        };
        DisplayRule {
            kind,
            description: raw.description.unwrap_or_default(),
            enabled: raw.enabled,
            priority: raw.priority,
        }
    }
}

impl From<&DisplayRule> for RawRule {
    fn from(rule: &DisplayRule) -> Self {
        let mut raw = RawRule {
            rule_type: RuleTag::Name(rule.kind.name().to_string()),
            hide_service: None,
            if_service_exists: None,
            priority_services: Vec::new(),
            description: Some(rule.description.clone()),
            enabled: rule.enabled,
            priority: rule.priority,
        };
        match &rule.kind {
            RuleKind::ConditionalHide {
                hide_service,
                if_service_exists,
            } => {
                raw.hide_service = Some(hide_service.clone());
                raw.if_service_exists = if_service_exists.clone();
            }
            RuleKind::PriorityList { priority_services }
            | RuleKind::PricePriorityList { priority_services } => {
                raw.priority_services = priority_services.clone();
            }
            RuleKind::RemoveUnmatched => {}
        }
        raw
    }
}

fn serialize_rules<S: Serializer>(rules: &[DisplayRule], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    let raw: Vec<RawRule> = rules.iter().map(RawRule::from).collect();
    raw.serialize(serializer)
}

fn deserialize_rules<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Vec<DisplayRule>, D::Error> {
    let raw = Vec::<RawRule>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(DisplayRule::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_rule_types_normalize_to_tagged_variants() {
        let profile: FilterProfile = serde_json::from_str(
            r#"{
                "rules": [
                    {"ruleType": 0, "hideService": "UPS:*"},
                    {"ruleType": 1, "priorityServices": ["USPS:*"]},
                    {"ruleType": 2, "priorityServices": ["*:Ground"]},
                    {"ruleType": 3}
                ]
            }"#,
        )
        .unwrap();

        let names: Vec<&str> = profile.rules.iter().map(|r| r.kind.name()).collect();
        assert_eq!(
            names,
            vec![
                "ConditionalHide",
                "PriorityList",
                "PricePriorityList",
                "RemoveUnmatched"
            ]
        );
    }

    #[test]
    fn out_of_range_and_unknown_tags_fall_back_to_conditional_hide() {
        let profile: FilterProfile = serde_json::from_str(
            r#"{
                "rules": [
                    {"ruleType": 7, "hideService": "UPS:*"},
                    {"ruleType": -1},
                    {"ruleType": "SomethingElse"},
                    {}
                ]
            }"#,
        )
        .unwrap();

        assert!(profile
            .rules
            .iter()
            .all(|r| r.kind.name() == "ConditionalHide"));
    }

    #[test]
    fn pascal_case_store_fields_are_accepted() {
        let profile: FilterProfile = serde_json::from_str(
            r#"{
                "rules": [{
                    "RuleType": "ConditionalHide",
                    "HideService": "USPS:Priority",
                    "IfServiceExists": "UPS:*",
                    "Description": "prefer UPS",
                    "Enabled": false,
                    "Priority": 4
                }]
            }"#,
        )
        .unwrap();

        let rule = &profile.rules[0];
        assert_eq!(
            rule.kind,
            RuleKind::ConditionalHide {
                hide_service: "USPS:Priority".into(),
                if_service_exists: Some("UPS:*".into()),
            }
        );
        assert_eq!(rule.description, "prefer UPS");
        assert!(!rule.enabled);
        assert_eq!(rule.priority, 4);
    }

    #[test]
    fn defaults_match_the_admin_form() {
        let profile: FilterProfile =
            serde_json::from_str(r#"{"rules": [{"ruleType": "RemoveUnmatched"}]}"#).unwrap();
        let rule = &profile.rules[0];
        assert!(rule.enabled);
        assert_eq!(rule.priority, 0);
        assert_eq!(rule.description, "");
    }

    #[test]
    fn serialization_writes_the_tagged_string_form() {
        let profile: FilterProfile =
            serde_json::from_str(r#"{"rules": [{"ruleType": 2, "priorityServices": ["*:*"]}]}"#)
                .unwrap();
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains(r#""ruleType":"PricePriorityList""#));
        assert!(!json.contains(r#""ruleType":2"#));

        let reread: FilterProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(reread, profile);
    }

    #[test]
    fn toml_profiles_parse() {
        let profile: FilterProfile = toml::from_str(
            r#"
                [[manualServices]]
                carrier = "UPS"
                service = "Ground"
                visible = false

                [[rules]]
                ruleType = 1
                priorityServices = ["USPS:Priority", "FedEx:Ground"]
                description = "prefer USPS"
            "#,
        )
        .unwrap();

        assert_eq!(profile.manual_services.len(), 1);
        assert!(!profile.manual_services[0].visible);
        assert_eq!(profile.rules[0].kind.name(), "PriorityList");
        assert_eq!(profile.rules[0].description, "prefer USPS");
    }
}
