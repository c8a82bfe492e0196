use proptest::prelude::*;
use us_core::{invert_rule, select_all_matches, select_first_match, Rule, RuleGroup};

const PATTERNS: &[(&str, &str)] = &[
    (r"^https?://github\.com/(.*)$", "https://github.dev/$1"),
    (r"^https?://([^/]+)/", "https://mirror.example/$1"),
    (r"example", "https://fixed.example/"),
    (r"^https://nowhere\.invalid/", "https://never/"),
    (r"(unclosed", "https://broken/"),
];

const URLS: &[&str] = &[
    "https://github.com/rust-lang/rust",
    "https://www.example.com/page",
    "http://other.org/",
];

fn arb_rule() -> impl Strategy<Value = Rule> {
    (0..PATTERNS.len(), 1u32..4, any::<bool>(), "[a-z]{1,6}").prop_map(
        |(pattern, priority, enabled, id)| {
            let (from, to) = PATTERNS[pattern];
            Rule {
                id: id.clone(),
                name: id,
                enabled,
                from_pattern: from.to_string(),
                to_pattern: to.to_string(),
                priority,
            }
        },
    )
}

fn arb_groups() -> impl Strategy<Value = Vec<RuleGroup>> {
    prop::collection::vec(
        (any::<bool>(), prop::collection::vec(arb_rule(), 0..5)),
        0..4,
    )
    .prop_map(|groups| {
        groups
            .into_iter()
            .enumerate()
            .map(|(idx, (enabled, rules))| RuleGroup {
                id: format!("g{idx}"),
                name: format!("Group {idx}"),
                enabled,
                rules,
            })
            .collect()
    })
}

// ---------------------------------------------------------------------------
// Ordering: ascending priority, ties in flattening order
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn all_matches_sorted_and_stable(groups in arb_groups(), url_idx in 0..URLS.len()) {
        let url = URLS[url_idx];
        let matches = select_all_matches(url, &groups);

        // Recompute the expected order independently.
        let mut expected: Vec<(u32, usize, String)> = Vec::new();
        let mut pos = 0usize;
        for group in &groups {
            for rule in &group.rules {
                if group.enabled && rule.enabled {
                    if let Ok(re) = regex::Regex::new(&rule.from_pattern) {
                        if re.is_match(url) {
                            expected.push((rule.priority, pos, rule.to_pattern.clone()));
                        }
                    }
                }
                pos += 1;
            }
        }
        expected.sort_by_key(|&(priority, pos, _)| (priority, pos));

        prop_assert_eq!(matches.len(), expected.len());
        for window in matches.windows(2) {
            prop_assert!(window[0].rule.priority <= window[1].rule.priority);
        }
        for (m, (priority, _, to)) in matches.iter().zip(expected.iter()) {
            prop_assert_eq!(m.rule.priority, *priority);
            prop_assert_eq!(&m.rule.to_pattern, to);
        }
    }

    #[test]
    fn first_match_is_head_of_all(groups in arb_groups(), url_idx in 0..URLS.len()) {
        let url = URLS[url_idx];
        let all = select_all_matches(url, &groups);
        let first = select_first_match(url, &groups);
        prop_assert_eq!(first.as_ref(), all.first());
    }

    #[test]
    fn disabled_groups_never_match(groups in arb_groups(), url_idx in 0..URLS.len()) {
        let url = URLS[url_idx];
        let disabled: Vec<RuleGroup> = groups
            .into_iter()
            .map(|group| RuleGroup { enabled: false, ..group })
            .collect();
        prop_assert!(select_all_matches(url, &disabled).is_empty());
        prop_assert!(select_first_match(url, &disabled).is_none());
    }

    #[test]
    fn selection_is_deterministic(groups in arb_groups(), url_idx in 0..URLS.len()) {
        let url = URLS[url_idx];
        prop_assert_eq!(select_all_matches(url, &groups), select_all_matches(url, &groups));
    }
}

// ---------------------------------------------------------------------------
// Inversion
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn simple_domain_double_inversion(
        from in "[a-z0-9]{1,10}(\\.[a-z0-9]{1,6}){0,2}",
        to in "[a-z0-9]{1,10}(\\.[a-z0-9]{1,6}){0,2}",
        priority in 1u32..100,
    ) {
        let draft = us_core::domain::simple_rule(&from, &to, priority).unwrap();
        let rule = draft.clone().into_rule("original");
        let once = invert_rule(&rule).into_rule("once");
        let twice = invert_rule(&once);

        prop_assert_eq!(&twice.from_pattern, &draft.from_pattern);
        prop_assert_eq!(&twice.to_pattern, &draft.to_pattern);
        prop_assert_eq!(twice.priority, priority);
    }

    #[test]
    fn inversion_never_panics(from in ".{0,40}", to in ".{0,40}", name in ".{0,20}") {
        let rule = Rule {
            id: "r".to_string(),
            name,
            enabled: true,
            from_pattern: from,
            to_pattern: to,
            priority: 1,
        };
        let _ = invert_rule(&rule);
    }
}
