//! Simple-domain rule helpers
//!
//! A simple-domain rule swaps the hostname and keeps the path:
//!
//! ```
//! use us_core::domain::simple_patterns;
//!
//! let (from, to) = simple_patterns("github.com", "github.dev");
//! assert_eq!(from, r"^https?://github\.com/(.*)$");
//! assert_eq!(to, "https://github.dev/$1");
//! ```

use crate::error::RuleError;
use crate::types::RuleDraft;

/// Separator between the two halves of a generated rule name.
pub const NAME_SEPARATOR: &str = " → ";

/// Escape the dots of a domain for use inside a pattern.
pub fn escape_domain(domain: &str) -> String {
    domain.replace('.', "\\.")
}

/// Drop the escaping backslash from every `\X`, so `a\-b\.com` becomes
/// `a-b.com`. A trailing lone `\` is dropped as well.
pub fn unescape_domain(domain: &str) -> String {
    let mut out = String::with_capacity(domain.len());
    let mut chars = domain.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.extend(chars.next()),
            _ => out.push(c),
        }
    }
    out
}

/// Build the from/to pattern pair for a domain swap.
pub fn simple_patterns(from_domain: &str, to_domain: &str) -> (String, String) {
    (
        format!("^https?://{}/(.*)$", escape_domain(from_domain)),
        format!("https://{}/$1", to_domain),
    )
}

/// `"<from> → <to>"`
pub fn domain_rule_name(from_domain: &str, to_domain: &str) -> String {
    format!("{from_domain}{NAME_SEPARATOR}{to_domain}")
}

/// Build a complete simple-domain rule from two domains.
pub fn simple_rule(
    from_domain: &str,
    to_domain: &str,
    priority: u32,
) -> Result<RuleDraft, RuleError> {
    let from_domain = from_domain.trim();
    let to_domain = to_domain.trim();
    if from_domain.is_empty() || to_domain.is_empty() {
        return Err(RuleError::MissingDomain);
    }

    let (from_pattern, to_pattern) = simple_patterns(from_domain, to_domain);
    Ok(RuleDraft {
        name: domain_rule_name(from_domain, to_domain),
        enabled: true,
        from_pattern,
        to_pattern,
        priority,
    })
}
