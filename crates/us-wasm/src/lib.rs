//! WebAssembly bindings for URL Switch
//!
//! The background worker loads the user's rule groups once (and again
//! whenever storage changes) and then asks for matches per tab URL. The
//! options page calls the stateless helpers directly.

use std::sync::RwLock;

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

use us_core::{
    defaults::{default_rule_groups, default_settings},
    domain,
    inverter::{classify, invert_rule, RuleKind},
    io::{export_rule_groups, import_rule_groups},
    redirect::{plan_redirect as plan, RedirectPlan},
    validate::validate_draft,
    Rule, RuleDraft, RuleGroup, RuleMatch, Selector, Settings,
};

mod logging;

static RULE_GROUPS: RwLock<Option<Vec<RuleGroup>>> = RwLock::new(None);

fn set(target: &Object, key: &str, value: &JsValue) {
    let _ = Reflect::set(target, &key.into(), value);
}

fn err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Run `f` against the loaded groups, or an empty set when none are loaded.
fn with_groups<T>(f: impl FnOnce(&[RuleGroup]) -> T) -> T {
    match RULE_GROUPS.read() {
        Ok(guard) => f(guard.as_deref().unwrap_or(&[])),
        Err(poisoned) => f(poisoned.into_inner().as_deref().unwrap_or(&[])),
    }
}

// =============================================================================
// Setup
// =============================================================================

/// Route `log` output to the browser console at `level`
/// ("error", "warn", "info", "debug", "trace").
#[wasm_bindgen]
pub fn init_logging(level: &str) -> Result<(), JsValue> {
    logging::init(level).map_err(err)
}

/// Replace the loaded rule groups with the JSON array in `json`.
/// Returns the number of groups loaded.
#[wasm_bindgen]
pub fn load_rule_groups(json: &str) -> Result<u32, JsValue> {
    let groups = import_rule_groups(json).map_err(err)?;
    let count = groups.len() as u32;
    let mut guard = RULE_GROUPS
        .write()
        .map_err(|_| JsValue::from_str("Rule state is unavailable"))?;
    *guard = Some(groups);
    log::debug!("loaded {} rule groups", count);
    Ok(count)
}

#[wasm_bindgen]
pub fn is_loaded() -> bool {
    RULE_GROUPS.read().map(|guard| guard.is_some()).unwrap_or(false)
}

// =============================================================================
// Matching
// =============================================================================

/// First matching rule for `url`: `null` or `{ rule, targetUrl }`.
#[wasm_bindgen]
pub fn find_matching_rule(url: &str) -> JsValue {
    with_groups(|groups| match Selector::new(groups).first_match(url) {
        Some(m) => match_to_js(&m),
        None => JsValue::NULL,
    })
}

/// All matching rules for `url`: `{ matches, currentUrl }`.
#[wasm_bindgen]
pub fn find_all_matching_rules(url: &str) -> JsValue {
    let all = with_groups(|groups| Selector::new(groups).all_matches_for(url));

    let result = Object::new();
    let array = Array::new();
    for m in &all.matches {
        array.push(&match_to_js(m));
    }
    set(&result, "matches", &array);
    set(&result, "currentUrl", &JsValue::from_str(&all.current_url));
    result.into()
}

/// What to do with a freshly loaded page: `{ action, targetUrl?, delayMs? }`.
#[wasm_bindgen]
pub fn plan_redirect(url: &str, settings_json: &str) -> Result<JsValue, JsValue> {
    let settings: Settings = serde_json::from_str(settings_json).map_err(err)?;
    let redirect = with_groups(|groups| plan(url, groups, &settings));

    let result = Object::new();
    let action = match &redirect {
        RedirectPlan::Disabled => "disabled",
        RedirectPlan::NoMatch => "noMatch",
        RedirectPlan::Navigate { delay_ms, .. } => {
            set(&result, "delayMs", &JsValue::from_f64(*delay_ms as f64));
            "navigate"
        }
        RedirectPlan::Offer { .. } => "offer",
    };
    set(&result, "action", &JsValue::from_str(action));
    if let Some(target_url) = redirect.target_url() {
        set(&result, "targetUrl", &JsValue::from_str(target_url));
    }
    Ok(result.into())
}

// =============================================================================
// Rule Editing Helpers
// =============================================================================

/// Derive the reverse of the rule in `rule_json`; the result has no id.
#[wasm_bindgen]
pub fn create_reverse_rule(rule_json: &str) -> Result<JsValue, JsValue> {
    let rule: Rule = serde_json::from_str(rule_json).map_err(err)?;
    Ok(draft_to_js(&invert_rule(&rule)))
}

/// `{ isSimple, fromDomain?, toDomain? }`
#[wasm_bindgen]
pub fn classify_rule(from_pattern: &str, to_pattern: &str) -> JsValue {
    let result = Object::new();
    match classify(from_pattern, to_pattern) {
        RuleKind::SimpleDomain { from_domain, to_domain } => {
            set(&result, "isSimple", &JsValue::TRUE);
            set(&result, "fromDomain", &JsValue::from_str(&from_domain));
            set(&result, "toDomain", &JsValue::from_str(&to_domain));
        }
        RuleKind::Advanced => set(&result, "isSimple", &JsValue::FALSE),
    }
    result.into()
}

/// Build a simple-domain rule (without id) from two domains.
#[wasm_bindgen]
pub fn simple_rule(from_domain: &str, to_domain: &str, priority: u32) -> Result<JsValue, JsValue> {
    domain::simple_rule(from_domain, to_domain, priority)
        .map(|draft| draft_to_js(&draft))
        .map_err(err)
}

/// `undefined` when the rule can be saved, otherwise the error message.
#[wasm_bindgen]
pub fn validate_rule(draft_json: &str) -> Option<String> {
    let draft: RuleDraft = match serde_json::from_str(draft_json) {
        Ok(draft) => draft,
        Err(e) => return Some(e.to_string()),
    };
    validate_draft(&draft).err().map(|e| e.to_string())
}

#[wasm_bindgen]
pub fn default_rule_groups_json() -> Result<String, JsValue> {
    export_rule_groups(&default_rule_groups()).map_err(err)
}

#[wasm_bindgen]
pub fn default_settings_json() -> Result<String, JsValue> {
    serde_json::to_string(&default_settings()).map_err(err)
}

// =============================================================================
// Conversions
// =============================================================================

fn rule_to_js(rule: &Rule) -> JsValue {
    let obj = Object::new();
    set(&obj, "id", &JsValue::from_str(&rule.id));
    set(&obj, "name", &JsValue::from_str(&rule.name));
    set(&obj, "enabled", &JsValue::from_bool(rule.enabled));
    set(&obj, "fromPattern", &JsValue::from_str(&rule.from_pattern));
    set(&obj, "toPattern", &JsValue::from_str(&rule.to_pattern));
    set(&obj, "priority", &JsValue::from(rule.priority));
    obj.into()
}

fn draft_to_js(draft: &RuleDraft) -> JsValue {
    let obj = Object::new();
    set(&obj, "name", &JsValue::from_str(&draft.name));
    set(&obj, "enabled", &JsValue::from_bool(draft.enabled));
    set(&obj, "fromPattern", &JsValue::from_str(&draft.from_pattern));
    set(&obj, "toPattern", &JsValue::from_str(&draft.to_pattern));
    set(&obj, "priority", &JsValue::from(draft.priority));
    obj.into()
}

fn match_to_js(m: &RuleMatch) -> JsValue {
    let obj = Object::new();
    set(&obj, "rule", &rule_to_js(&m.rule));
    set(&obj, "targetUrl", &JsValue::from_str(&m.target_url));
    obj.into()
}
