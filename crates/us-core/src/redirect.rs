//! Redirect planning
//!
//! Decides what the extension should do with the page it just loaded.
//! Timing and tab updates belong to the caller.

use serde::Serialize;

use crate::selector::Selector;
use crate::types::{RuleGroup, Settings};

/// What to do with the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum RedirectPlan {
    /// Rule processing is switched off
    Disabled,
    /// No rule applies
    NoMatch,
    /// Navigate to `target_url` after `delay_ms`
    #[serde(rename_all = "camelCase")]
    Navigate { target_url: String, delay_ms: u64 },
    /// Offer a one-click switch to `target_url`
    #[serde(rename_all = "camelCase")]
    Offer { target_url: String },
}

impl RedirectPlan {
    pub fn target_url(&self) -> Option<&str> {
        match self {
            Self::Navigate { target_url, .. } | Self::Offer { target_url } => Some(target_url),
            Self::Disabled | Self::NoMatch => None,
        }
    }
}

/// Plan the action for `url` given the rule groups and settings.
///
/// A match that rewrites the URL to itself is treated as no match.
pub fn plan_redirect(url: &str, groups: &[RuleGroup], settings: &Settings) -> RedirectPlan {
    if !settings.enabled {
        return RedirectPlan::Disabled;
    }

    let target_url = match Selector::new(groups).first_match(url) {
        Some(m) if m.target_url != url => m.target_url,
        _ => return RedirectPlan::NoMatch,
    };

    if settings.auto_redirect {
        RedirectPlan::Navigate {
            target_url,
            delay_ms: settings.redirect_delay,
        }
    } else {
        RedirectPlan::Offer { target_url }
    }
}
