//! URL Switch Core Library
//!
//! This crate provides the rule engine behind the URL Switch extension:
//! given a page URL and the user's rule groups it finds the rules that
//! apply and computes where each would send the user, and given a rule it
//! derives the rule for the opposite direction.
//!
//! Everything here is pure. Inputs are borrowed and never modified, no
//! state is kept between calls, and identical inputs always produce
//! identical outputs (apart from freshly generated ids).
//!
//! # Modules
//!
//! - `types`: Rules, groups, matches and settings in their persisted shape
//! - `template`: `$n` placeholder tokenizer and expansion
//! - `selector`: Priority-ordered rule selection for a URL
//! - `inverter`: Simple/advanced classification and reverse rules
//! - `domain`: Simple-domain pattern and name helpers
//! - `validate`: Checks run before rules are saved
//! - `edit`: Pure group and rule editing operations
//! - `redirect`: Navigate/offer decision for a loaded page
//! - `defaults`: First-run settings and rule groups
//! - `io`: JSON import/export and rule file normalization

pub mod defaults;
pub mod domain;
pub mod edit;
pub mod error;
pub mod inverter;
pub mod io;
pub mod redirect;
pub mod selector;
pub mod template;
pub mod types;
pub mod validate;

// Re-export commonly used types
pub use error::{ImportError, RuleError};
pub use inverter::{classify, invert_rule, RuleKind};
pub use redirect::{plan_redirect, RedirectPlan};
pub use selector::{select_all_matches, select_first_match, Selector};
pub use types::{MultiRuleMatches, Rule, RuleDraft, RuleGroup, RuleMatch, Settings};
