//! Target template tokenizer and expansion
//!
//! A `toPattern` is literal text with `$<n>` placeholders referring to
//! 1-based capture groups. Placeholders are recognized in a single left to
//! right pass; text produced by a substitution is never re-scanned.

use regex::Captures;

/// One piece of a tokenized template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text copied verbatim
    Literal(&'a str),
    /// `$<n>`, n >= 1
    Group(usize),
}

/// Split a template into literal and placeholder segments.
///
/// A `$` followed by a run of digits is a placeholder; the whole digit run
/// is the index. `$0` and a lone `$` are kept as literal text. An index that
/// overflows `usize` saturates, so it names a group that never exists.
pub fn tokenize(template: &str) -> Vec<Segment<'_>> {
    let bytes = template.as_bytes();
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'$' {
            pos += 1;
            continue;
        }

        let digits_start = pos + 1;
        let mut digits_end = digits_start;
        while digits_end < bytes.len() && bytes[digits_end].is_ascii_digit() {
            digits_end += 1;
        }

        let digits = &template[digits_start..digits_end];
        let index = if digits.is_empty() {
            None
        } else {
            Some(digits.parse::<usize>().unwrap_or(usize::MAX)).filter(|&n| n > 0)
        };

        match index {
            Some(n) => {
                if literal_start < pos {
                    segments.push(Segment::Literal(&template[literal_start..pos]));
                }
                segments.push(Segment::Group(n));
                literal_start = digits_end;
                pos = digits_end;
            }
            None => pos = digits_end.max(pos + 1),
        }
    }

    if literal_start < bytes.len() {
        segments.push(Segment::Literal(&template[literal_start..]));
    }

    segments
}

/// Expand a template against a successful match.
///
/// Missing or non-participating groups expand to the empty string.
pub fn expand(template: &str, caps: &Captures<'_>) -> String {
    let mut out = String::with_capacity(template.len());
    for segment in tokenize(template) {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Group(n) => {
                if let Some(m) = caps.get(n) {
                    out.push_str(m.as_str());
                }
            }
        }
    }
    out
}

/// Render segments back to template text.
pub fn render(segments: &[Segment<'_>]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Group(n) => {
                out.push('$');
                out.push_str(&n.to_string());
            }
        }
    }
    out
}
