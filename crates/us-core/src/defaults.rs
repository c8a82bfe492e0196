//! Default configuration installed on first run.
//!
//! Both values are built fresh on every call; callers own them.

use crate::types::{Rule, RuleGroup, Settings};

pub const DEFAULT_REDIRECT_DELAY_MS: u64 = 1000;

pub fn default_settings() -> Settings {
    Settings {
        enabled: true,
        auto_redirect: false,
        redirect_delay: DEFAULT_REDIRECT_DELAY_MS,
    }
}

fn rule(id: &str, name: &str, from_pattern: &str, to_pattern: &str) -> Rule {
    Rule {
        id: id.to_string(),
        name: name.to_string(),
        enabled: true,
        from_pattern: from_pattern.to_string(),
        to_pattern: to_pattern.to_string(),
        priority: 1,
    }
}

/// GitHub repository switching and a Stack Overflow to dev.to search.
pub fn default_rule_groups() -> Vec<RuleGroup> {
    vec![
        RuleGroup {
            id: "github".to_string(),
            name: "GitHub".to_string(),
            enabled: true,
            rules: vec![
                rule(
                    "github-to-github-dev",
                    "GitHub to GitHub Dev",
                    r"^https?://github\.com/([^/]+/[^/]+)(?:/.*)?$",
                    "https://github.dev/$1",
                ),
                rule(
                    "github-dev-to-github",
                    "GitHub Dev to GitHub",
                    r"^https?://github\.dev/([^/]+/[^/]+)(?:/.*)?$",
                    "https://github.com/$1",
                ),
            ],
        },
        RuleGroup {
            id: "stackoverflow".to_string(),
            name: "Stack Overflow".to_string(),
            enabled: true,
            rules: vec![rule(
                "stackoverflow-to-dev",
                "Stack Overflow to Dev.to",
                r"^https?://stackoverflow\.com/questions/([\d]+)/([\w-]+)(?:\?.*)?$",
                "https://dev.to/search?q=$2",
            )],
        },
    ]
}
