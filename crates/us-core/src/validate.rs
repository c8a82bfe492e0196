//! Rule validation
//!
//! The selector assumes patterns were validated before they were stored.
//! These checks are what the editing surfaces run before saving.

use std::collections::HashSet;
use std::fmt;

use regex::Regex;

use crate::error::RuleError;
use crate::types::{RuleDraft, RuleGroup};

/// Check a rule before it is saved.
pub fn validate_draft(draft: &RuleDraft) -> Result<(), RuleError> {
    if draft.name.trim().is_empty() {
        return Err(RuleError::EmptyName);
    }
    if draft.from_pattern.trim().is_empty() || draft.to_pattern.trim().is_empty() {
        return Err(RuleError::EmptyPattern);
    }
    if draft.priority == 0 {
        return Err(RuleError::ZeroPriority);
    }
    Regex::new(&draft.from_pattern)?;
    Ok(())
}

/// One problem found in a rule set.
#[derive(Debug)]
pub struct RuleIssue {
    pub group_id: String,
    /// `None` for problems with the group itself
    pub rule_id: Option<String>,
    pub kind: IssueKind,
}

#[derive(Debug)]
pub enum IssueKind {
    DuplicateGroupId,
    DuplicateRuleId,
    Invalid(RuleError),
}

impl fmt::Display for RuleIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.rule_id {
            Some(rule_id) => write!(f, "group '{}', rule '{}': ", self.group_id, rule_id)?,
            None => write!(f, "group '{}': ", self.group_id)?,
        }
        match &self.kind {
            IssueKind::DuplicateGroupId => write!(f, "duplicate group id"),
            IssueKind::DuplicateRuleId => write!(f, "duplicate rule id"),
            IssueKind::Invalid(e) => write!(f, "{e}"),
        }
    }
}

/// Report every problem in a rule set.
pub fn validate_groups(groups: &[RuleGroup]) -> Vec<RuleIssue> {
    let mut issues = Vec::new();
    let mut group_ids: HashSet<&str> = HashSet::new();

    for group in groups {
        if !group_ids.insert(&group.id) {
            issues.push(RuleIssue {
                group_id: group.id.clone(),
                rule_id: None,
                kind: IssueKind::DuplicateGroupId,
            });
        }

        let mut rule_ids: HashSet<&str> = HashSet::new();
        for rule in &group.rules {
            if !rule_ids.insert(&rule.id) {
                issues.push(RuleIssue {
                    group_id: group.id.clone(),
                    rule_id: Some(rule.id.clone()),
                    kind: IssueKind::DuplicateRuleId,
                });
            }
            if let Err(e) = validate_draft(&RuleDraft::from(rule.clone())) {
                issues.push(RuleIssue {
                    group_id: group.id.clone(),
                    rule_id: Some(rule.id.clone()),
                    kind: IssueKind::Invalid(e),
                });
            }
        }
    }

    issues
}
