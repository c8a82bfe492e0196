//! Rule Inverter
//!
//! Derives the reverse of a rule so a user who maps A to B can also get B
//! to A. Rules recognized as simple domain swaps invert exactly. Anything
//! else goes through a textual transposition of capture groups and
//! placeholders, which is a suggestion for the user to review and can be
//! wrong for nested groups, alternation or lookaround.

use crate::domain::{domain_rule_name, simple_patterns, unescape_domain, NAME_SEPARATOR};
use crate::template;
use crate::types::{Rule, RuleDraft};

const FROM_PREFIX: &str = "^https?://";
const FROM_SUFFIX: &str = "/(.*)$";
const TO_PREFIX: &str = "https://";
const TO_SUFFIX: &str = "/$1";

/// Suffix appended to an advanced rule name that has no `" → "` to swap.
pub const REVERSED_SUFFIX: &str = " (Reversed)";

// =============================================================================
// Classification
// =============================================================================

/// Structural kind of a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    /// `^https?://<from>/(.*)$` paired with `https://<to>/$1`
    SimpleDomain { from_domain: String, to_domain: String },
    /// Any other pattern pair
    Advanced,
}

/// Classify a pattern pair against the fixed simple-domain templates.
///
/// The from-domain may contain ASCII alphanumerics, `-`, `.` and `\` (for
/// escapes) and is returned with its escaping backslashes dropped. The to-domain may contain
/// ASCII alphanumerics, `-` and `.`.
pub fn classify(from_pattern: &str, to_pattern: &str) -> RuleKind {
    let from_domain = from_pattern
        .strip_prefix(FROM_PREFIX)
        .and_then(|rest| rest.strip_suffix(FROM_SUFFIX))
        .filter(|domain| is_domain_text(domain, true));
    let to_domain = to_pattern
        .strip_prefix(TO_PREFIX)
        .and_then(|rest| rest.strip_suffix(TO_SUFFIX))
        .filter(|domain| is_domain_text(domain, false));

    match (from_domain, to_domain) {
        (Some(from), Some(to)) => RuleKind::SimpleDomain {
            from_domain: unescape_domain(from),
            to_domain: to.to_string(),
        },
        _ => RuleKind::Advanced,
    }
}

#[inline]
fn is_domain_text(text: &str, allow_backslash: bool) -> bool {
    !text.is_empty()
        && text.bytes().all(|b| {
            b.is_ascii_alphanumeric() || b == b'.' || b == b'-' || (allow_backslash && b == b'\\')
        })
}

// =============================================================================
// Inversion
// =============================================================================

/// Derive the reverse of `rule`.
///
/// Enabled flag and priority are copied. The result carries no id; the
/// caller attaches a fresh one.
pub fn invert_rule(rule: &Rule) -> RuleDraft {
    let kind = classify(&rule.from_pattern, &rule.to_pattern);
    log::debug!("inverting rule '{}' as {:?}", rule.id, kind);

    let (name, from_pattern, to_pattern) = match kind {
        RuleKind::SimpleDomain { from_domain, to_domain } => {
            let (from, to) = simple_patterns(&to_domain, &from_domain);
            (domain_rule_name(&to_domain, &from_domain), from, to)
        }
        RuleKind::Advanced => (
            reversed_name(&rule.name),
            template::render(&template::tokenize(&rule.to_pattern)),
            groups_to_placeholders(&rule.from_pattern),
        ),
    };

    RuleDraft {
        name,
        enabled: rule.enabled,
        from_pattern,
        to_pattern,
        priority: rule.priority,
    }
}

/// Swap the halves of `"A → B"`, otherwise append the reversed suffix.
pub fn reversed_name(name: &str) -> String {
    let parts: Vec<&str> = name.split(NAME_SEPARATOR).collect();
    match parts.as_slice() {
        [a, b] => format!("{b}{NAME_SEPARATOR}{a}"),
        _ => format!("{name}{REVERSED_SUFFIX}"),
    }
}

struct OpenGroup {
    start: usize,
    capture: Option<usize>,
    has_inner_capture: bool,
}

/// Replace every capture group that contains no other capture group with
/// `$k`, where k is its capture index in `pattern`.
///
/// Escaped parentheses and parentheses inside character classes are
/// literal. Non-capturing groups, and capture groups wrapping other capture
/// groups, are left as written.
pub fn groups_to_placeholders(pattern: &str) -> String {
    let chars: Vec<(usize, char)> = pattern.char_indices().collect();
    let mut stack: Vec<OpenGroup> = Vec::new();
    let mut leaves: Vec<(usize, usize, usize)> = Vec::new();
    let mut capture_count = 0usize;
    let mut i = 0;

    while i < chars.len() {
        let (pos, c) = chars[i];
        match c {
            '\\' => i += 1,
            '[' => i = skip_class(&chars, i),
            '(' => {
                let rest = &pattern[pos + 1..];
                let capture = if is_capturing(&pattern[pos + 1..]) {
                    capture_count += 1;
                    Some(capture_count)
                } else {
                    None
                };
                stack.push(OpenGroup {
                    start: pos,
                    capture,
                    has_inner_capture: false,
                });
            }
            ')' => {
                if let Some(group) = stack.pop() {
                    if let (Some(index), false) = (group.capture, group.has_inner_capture) {
                        leaves.push((group.start, pos + 1, index));
                    }
                    // Non-capturing wrappers pass inner captures up
                    if group.capture.is_some() || group.has_inner_capture {
                        if let Some(parent) = stack.last_mut() {
                            parent.has_inner_capture = true;
                        }
                    }
                }
            }
            _ => {}
        }
        i += 1;
    }

    leaves.sort_by_key(|&(start, _, _)| start);

    let mut out = String::with_capacity(pattern.len());
    let mut last = 0;
    for (start, end, index) in leaves {
        out.push_str(&pattern[last..start]);
        out.push('$');
        out.push_str(&index.to_string());
        last = end;
    }
    out.push_str(&pattern[last..]);
    out
}

/// Does the group whose body starts at `rest` capture?
fn is_capturing(rest: &str) -> bool {
    if !rest.starts_with('?') {
        return true;
    }
    rest.starts_with("?P<")
        || (rest.starts_with("?<") && !rest.starts_with("?<=") && !rest.starts_with("?<!"))
}

/// Index of the `]` closing the class opened at `open`, or the last index
/// when the class is unterminated.
fn skip_class(chars: &[(usize, char)], open: usize) -> usize {
    let mut i = open + 1;
    if chars.get(i).map(|&(_, c)| c) == Some('^') {
        i += 1;
    }
    // A leading ']' is a literal member
    if chars.get(i).map(|&(_, c)| c) == Some(']') {
        i += 1;
    }
    while i < chars.len() {
        match chars[i].1 {
            '\\' => i += 2,
            '[' => i = skip_class(chars, i) + 1,
            ']' => return i,
            _ => i += 1,
        }
    }
    chars.len().saturating_sub(1)
}
