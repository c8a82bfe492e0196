//! Rule group editing
//!
//! Every operation takes the current groups and returns a new list.
//! Addressing an unknown group or rule returns the groups unchanged.

use crate::inverter::invert_rule;
use crate::types::{new_id, Rule, RuleDraft, RuleGroup};

/// Apply `f` to the group with `group_id`.
fn map_group<F>(groups: &[RuleGroup], group_id: &str, f: F) -> Vec<RuleGroup>
where
    F: Fn(&RuleGroup) -> RuleGroup,
{
    groups
        .iter()
        .map(|group| if group.id == group_id { f(group) } else { group.clone() })
        .collect()
}

// =============================================================================
// Groups
// =============================================================================

/// Append an empty group with a fresh id.
pub fn add_group(groups: &[RuleGroup], name: &str, enabled: bool) -> Vec<RuleGroup> {
    let mut updated = groups.to_vec();
    updated.push(RuleGroup {
        id: new_id(),
        name: name.to_string(),
        enabled,
        rules: Vec::new(),
    });
    updated
}

pub fn rename_group(groups: &[RuleGroup], group_id: &str, name: &str) -> Vec<RuleGroup> {
    map_group(groups, group_id, |group| RuleGroup {
        name: name.to_string(),
        ..group.clone()
    })
}

/// Remove a group and all its rules.
pub fn delete_group(groups: &[RuleGroup], group_id: &str) -> Vec<RuleGroup> {
    groups.iter().filter(|group| group.id != group_id).cloned().collect()
}

pub fn toggle_group(groups: &[RuleGroup], group_id: &str) -> Vec<RuleGroup> {
    map_group(groups, group_id, |group| RuleGroup {
        enabled: !group.enabled,
        ..group.clone()
    })
}

// =============================================================================
// Rules
// =============================================================================

/// Append a rule with a fresh id, and optionally its reverse.
pub fn add_rule(
    groups: &[RuleGroup],
    group_id: &str,
    draft: &RuleDraft,
    create_reverse: bool,
) -> Vec<RuleGroup> {
    map_group(groups, group_id, |group| {
        let rule = draft.clone().with_new_id();
        let mut updated = group.clone();
        if create_reverse {
            let reverse = invert_rule(&rule).with_new_id();
            updated.rules.push(rule);
            updated.rules.push(reverse);
        } else {
            updated.rules.push(rule);
        }
        updated
    })
}

/// Append the reverse of an existing rule to the same group.
pub fn add_reverse_rule(groups: &[RuleGroup], group_id: &str, rule_id: &str) -> Vec<RuleGroup> {
    map_group(groups, group_id, |group| {
        let mut updated = group.clone();
        if let Some(rule) = group.find_rule(rule_id) {
            updated.rules.push(invert_rule(rule).with_new_id());
        }
        updated
    })
}

/// Replace the rule with the same id.
pub fn update_rule(groups: &[RuleGroup], group_id: &str, rule: &Rule) -> Vec<RuleGroup> {
    map_group(groups, group_id, |group| RuleGroup {
        rules: group
            .rules
            .iter()
            .map(|existing| if existing.id == rule.id { rule.clone() } else { existing.clone() })
            .collect(),
        ..group.clone()
    })
}

pub fn delete_rule(groups: &[RuleGroup], group_id: &str, rule_id: &str) -> Vec<RuleGroup> {
    map_group(groups, group_id, |group| RuleGroup {
        rules: group.rules.iter().filter(|rule| rule.id != rule_id).cloned().collect(),
        ..group.clone()
    })
}

pub fn toggle_rule(groups: &[RuleGroup], group_id: &str, rule_id: &str) -> Vec<RuleGroup> {
    map_group(groups, group_id, |group| RuleGroup {
        rules: group
            .rules
            .iter()
            .map(|rule| {
                if rule.id == rule_id {
                    Rule { enabled: !rule.enabled, ..rule.clone() }
                } else {
                    rule.clone()
                }
            })
            .collect(),
        ..group.clone()
    })
}
