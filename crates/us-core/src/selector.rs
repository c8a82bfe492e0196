//! Rule Selector
//!
//! Resolves which rules apply to a URL and computes their target URLs.
//! Every call is pure: the groups are borrowed, never modified.

use regex::Regex;

use crate::template;
use crate::types::{MultiRuleMatches, Rule, RuleGroup, RuleMatch};

// =============================================================================
// Selector
// =============================================================================

struct CompiledRule<'a> {
    rule: &'a Rule,
    regex: Regex,
}

/// Enabled rules of a group set, compiled and in evaluation order.
///
/// Building a selector compiles every pattern once; reuse it when matching
/// many URLs against the same groups.
pub struct Selector<'a> {
    rules: Vec<CompiledRule<'a>>,
}

impl<'a> Selector<'a> {
    /// Collect enabled rules of enabled groups, sorted by ascending priority.
    ///
    /// The sort is stable, so equal priorities keep group order and then
    /// rule order within the group. Rules whose pattern does not compile
    /// are skipped.
    pub fn new(groups: &'a [RuleGroup]) -> Self {
        let mut enabled: Vec<&'a Rule> = groups
            .iter()
            .filter(|group| group.enabled)
            .flat_map(|group| group.rules.iter().filter(|rule| rule.enabled))
            .collect();
        enabled.sort_by_key(|rule| rule.priority);

        let rules = enabled
            .into_iter()
            .filter_map(|rule| match Regex::new(&rule.from_pattern) {
                Ok(regex) => Some(CompiledRule { rule, regex }),
                Err(e) => {
                    log::warn!(
                        "skipping rule '{}' ({}): invalid pattern: {}",
                        rule.name,
                        rule.id,
                        e
                    );
                    None
                }
            })
            .collect();

        Self { rules }
    }

    /// Number of rules that take part in matching.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule in evaluation order that matches `url`.
    pub fn first_match(&self, url: &str) -> Option<RuleMatch> {
        let found = self.rules.iter().find_map(|compiled| compiled.apply(url));
        match &found {
            Some(m) => log::debug!("'{}' matched rule '{}' -> '{}'", url, m.rule.id, m.target_url),
            None => log::debug!("no rule matched '{}'", url),
        }
        found
    }

    /// Every matching rule, in evaluation order.
    pub fn all_matches(&self, url: &str) -> Vec<RuleMatch> {
        self.rules
            .iter()
            .filter_map(|compiled| compiled.apply(url))
            .collect()
    }

    /// Every matching rule together with the URL they were computed for.
    pub fn all_matches_for(&self, url: &str) -> MultiRuleMatches {
        MultiRuleMatches {
            matches: self.all_matches(url),
            current_url: url.to_string(),
        }
    }
}

impl CompiledRule<'_> {
    fn apply(&self, url: &str) -> Option<RuleMatch> {
        let caps = self.regex.captures(url)?;
        Some(RuleMatch {
            rule: self.rule.clone(),
            target_url: template::expand(&self.rule.to_pattern, &caps),
        })
    }
}

// =============================================================================
// Entry Points
// =============================================================================

/// First matching rule for `url`, or `None` when nothing matches.
pub fn select_first_match(url: &str, groups: &[RuleGroup]) -> Option<RuleMatch> {
    Selector::new(groups).first_match(url)
}

/// All matching rules for `url` in priority order; empty when nothing matches.
pub fn select_all_matches(url: &str, groups: &[RuleGroup]) -> Vec<RuleMatch> {
    Selector::new(groups).all_matches(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: &str, from: &str, to: &str, priority: u32) -> Rule {
        Rule {
            id: id.to_string(),
            name: id.to_string(),
            enabled: true,
            from_pattern: from.to_string(),
            to_pattern: to.to_string(),
            priority,
        }
    }

    fn group(id: &str, enabled: bool, rules: Vec<Rule>) -> RuleGroup {
        RuleGroup {
            id: id.to_string(),
            name: id.to_string(),
            enabled,
            rules,
        }
    }

    #[test]
    fn test_simple_domain_match() {
        let groups = vec![group(
            "g",
            true,
            vec![rule("gh", r"^https?://github\.com/(.*)$", "https://github.dev/$1", 1)],
        )];
        let m = select_first_match("https://github.com/foo/bar", &groups).unwrap();
        assert_eq!(m.rule.id, "gh");
        assert_eq!(m.target_url, "https://github.dev/foo/bar");
    }

    #[test]
    fn test_priority_order() {
        let groups = vec![group(
            "g",
            true,
            vec![
                rule("second", r"example\.com", "https://two/", 2),
                rule("first", r"example\.com", "https://one/", 1),
            ],
        )];
        let matches = select_all_matches("https://example.com/", &groups);
        let ids: Vec<_> = matches.iter().map(|m| m.rule.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn test_equal_priority_keeps_group_then_rule_order() {
        let groups = vec![
            group("a", true, vec![rule("a1", "x", "1", 3), rule("a2", "x", "2", 3)]),
            group("b", true, vec![rule("b1", "x", "3", 1), rule("b2", "x", "4", 3)]),
        ];
        let matches = select_all_matches("x", &groups);
        let ids: Vec<_> = matches.iter().map(|m| m.rule.id.as_str()).collect();
        assert_eq!(ids, vec!["b1", "a1", "a2", "b2"]);
    }

    #[test]
    fn test_disabled_group_excludes_enabled_rules() {
        let groups = vec![group(
            "g",
            false,
            vec![rule("gh", r"^https?://github\.com/(.*)$", "https://github.dev/$1", 1)],
        )];
        assert!(select_first_match("https://github.com/foo", &groups).is_none());
        assert!(select_all_matches("https://github.com/foo", &groups).is_empty());
    }

    #[test]
    fn test_disabled_rule_excluded() {
        let mut off = rule("off", "x", "off", 1);
        off.enabled = false;
        let groups = vec![group("g", true, vec![off, rule("on", "x", "on", 2)])];
        let m = select_first_match("x", &groups).unwrap();
        assert_eq!(m.rule.id, "on");
        assert_eq!(select_all_matches("x", &groups).len(), 1);
    }

    #[test]
    fn test_invalid_pattern_skipped() {
        let groups = vec![group(
            "g",
            true,
            vec![rule("bad", "(unclosed", "nope", 1), rule("good", "site", "yes", 2)],
        )];
        let m = select_first_match("https://site/", &groups).unwrap();
        assert_eq!(m.rule.id, "good");
        assert_eq!(Selector::new(&groups).len(), 1);
    }

    #[test]
    fn test_missing_group_reference_is_empty() {
        let groups = vec![group(
            "g",
            true,
            vec![rule("r", r"^https://a\.com/(.*)$", "https://b.com/$1$2", 1)],
        )];
        let m = select_first_match("https://a.com/path", &groups).unwrap();
        assert_eq!(m.target_url, "https://b.com/path");
    }

    #[test]
    fn test_no_capture_pattern_keeps_template() {
        let groups = vec![group("g", true, vec![rule("r", r"a\.com", "https://b.com/fixed", 1)])];
        let m = select_first_match("https://a.com/anything", &groups).unwrap();
        assert_eq!(m.target_url, "https://b.com/fixed");
    }

    #[test]
    fn test_no_match() {
        let groups = vec![group("g", true, vec![rule("r", r"a\.com", "b", 1)])];
        assert!(select_first_match("https://c.com/", &groups).is_none());
        assert!(select_all_matches("https://c.com/", &groups).is_empty());
        assert!(select_all_matches("https://c.com/", &[]).is_empty());
    }

    #[test]
    fn test_all_matches_for_echoes_url() {
        let groups = vec![group("g", true, vec![rule("r", "c", "d", 1)])];
        let result = Selector::new(&groups).all_matches_for("https://c.com/");
        assert_eq!(result.current_url, "https://c.com/");
        assert_eq!(result.matches.len(), 1);
    }
}
