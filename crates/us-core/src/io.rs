//! Rule file import and export
//!
//! The persisted form is a JSON array of rule groups.

use std::collections::HashSet;

use regex::Regex;

use crate::error::ImportError;
use crate::types::RuleGroup;

/// Parse an exported rule file.
pub fn import_rule_groups(json: &str) -> Result<Vec<RuleGroup>, ImportError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_array() {
        return Err(ImportError::NotAnArray);
    }
    Ok(serde_json::from_value(value)?)
}

/// Serialize rule groups for export.
pub fn export_rule_groups(groups: &[RuleGroup]) -> Result<String, ImportError> {
    Ok(serde_json::to_string_pretty(groups)?)
}

pub struct NormalizeStats {
    pub before: usize,
    pub after: usize,
    pub deduped: usize,
    pub invalid: usize,
}

/// Drop rules whose pattern does not compile and rules that repeat an
/// earlier rule's pattern pair within the same group.
pub fn normalize_groups(groups: &mut [RuleGroup]) -> NormalizeStats {
    let before = groups.iter().map(|group| group.rules.len()).sum();
    let mut invalid = 0usize;
    let mut deduped = 0usize;

    for group in groups.iter_mut() {
        let group_id = group.id.as_str();
        group.rules.retain(|rule| {
            let ok = Regex::new(&rule.from_pattern).is_ok();
            if !ok {
                log::warn!("dropping rule '{}' in group '{}': invalid pattern", rule.id, group_id);
                invalid += 1;
            }
            ok
        });

        let mut seen: HashSet<(String, String)> = HashSet::new();
        group.rules.retain(|rule| {
            let key = (rule.from_pattern.clone(), rule.to_pattern.clone());
            if seen.contains(&key) {
                deduped += 1;
                false
            } else {
                seen.insert(key);
                true
            }
        });
    }

    let after = groups.iter().map(|group| group.rules.len()).sum();

    NormalizeStats {
        before,
        after,
        deduped,
        invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_rule_groups;

    #[test]
    fn test_export_import_roundtrip() {
        let groups = default_rule_groups();
        let json = export_rule_groups(&groups).unwrap();
        assert!(json.contains("\"fromPattern\""));
        assert_eq!(import_rule_groups(&json).unwrap(), groups);
    }

    #[test]
    fn test_import_rejects_object() {
        assert!(matches!(
            import_rule_groups(r#"{"ruleGroups": []}"#),
            Err(ImportError::NotAnArray)
        ));
    }

    #[test]
    fn test_import_rejects_bad_json() {
        assert!(matches!(import_rule_groups("[{"), Err(ImportError::Json(_))));
        assert!(matches!(
            import_rule_groups(r#"[{"id": "g"}]"#),
            Err(ImportError::Json(_))
        ));
    }

    #[test]
    fn test_normalize() {
        let mut groups = default_rule_groups();
        let mut duplicate = groups[0].rules[0].clone();
        duplicate.id = "copy".to_string();
        let mut broken = groups[0].rules[1].clone();
        broken.id = "broken".to_string();
        broken.from_pattern = "(".to_string();
        groups[0].rules.push(duplicate);
        groups[0].rules.push(broken);

        let stats = normalize_groups(&mut groups);
        assert_eq!(stats.before, 5);
        assert_eq!(stats.after, 3);
        assert_eq!(stats.deduped, 1);
        assert_eq!(stats.invalid, 1);
        assert_eq!(groups, default_rule_groups());
    }
}
