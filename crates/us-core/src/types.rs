//! Core type definitions for URL Switch
//!
//! These types are the persisted JSON shape the extension stores and
//! exchanges on import/export. Field names serialize in camelCase.

use serde::{Deserialize, Serialize};

#[cfg(feature = "ts")]
use ts_rs::TS;

// =============================================================================
// Rules
// =============================================================================

/// A single URL rewrite rule: regex match, templated replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(TS), ts(export))]
pub struct Rule {
    /// Opaque identifier, unique within the owning group
    pub id: String,
    /// Display name
    pub name: String,
    pub enabled: bool,
    /// Regex source matched against the full URL
    pub from_pattern: String,
    /// Target template with `$1`, `$2`, ... placeholders
    pub to_pattern: String,
    /// Lower is evaluated first
    pub priority: u32,
}

/// Rule data without an identifier.
///
/// This is what the inverter and the options form produce; the caller
/// decides when the rule gets an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(TS), ts(export))]
pub struct RuleDraft {
    pub name: String,
    pub enabled: bool,
    pub from_pattern: String,
    pub to_pattern: String,
    pub priority: u32,
}

impl RuleDraft {
    /// Attach an identifier.
    pub fn into_rule(self, id: impl Into<String>) -> Rule {
        Rule {
            id: id.into(),
            name: self.name,
            enabled: self.enabled,
            from_pattern: self.from_pattern,
            to_pattern: self.to_pattern,
            priority: self.priority,
        }
    }

    /// Attach a freshly generated identifier.
    pub fn with_new_id(self) -> Rule {
        self.into_rule(new_id())
    }
}

impl From<Rule> for RuleDraft {
    fn from(rule: Rule) -> Self {
        Self {
            name: rule.name,
            enabled: rule.enabled,
            from_pattern: rule.from_pattern,
            to_pattern: rule.to_pattern,
            priority: rule.priority,
        }
    }
}

/// Generate a fresh identifier for a rule or group.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// =============================================================================
// Rule Groups
// =============================================================================

/// A named collection of rules that is enabled or disabled as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(TS), ts(export))]
pub struct RuleGroup {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    /// Display order only; matching order comes from `Rule::priority`
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl RuleGroup {
    pub fn find_rule(&self, rule_id: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.id == rule_id)
    }
}

// =============================================================================
// Match Results
// =============================================================================

/// Result of applying one rule to one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(TS), ts(export))]
pub struct RuleMatch {
    pub rule: Rule,
    pub target_url: String,
}

/// Every match for a URL, in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(TS), ts(export))]
pub struct MultiRuleMatches {
    pub matches: Vec<RuleMatch>,
    pub current_url: String,
}

// =============================================================================
// Settings
// =============================================================================

/// Global extension settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "ts", derive(TS), ts(export))]
pub struct Settings {
    /// Master switch for all rule processing
    pub enabled: bool,
    /// Navigate automatically instead of offering the switch
    pub auto_redirect: bool,
    /// Delay before an automatic navigation, in milliseconds
    #[cfg_attr(feature = "ts", ts(type = "number"))]
    pub redirect_delay: u64,
}

impl Default for Settings {
    fn default() -> Self {
        crate::defaults::default_settings()
    }
}
