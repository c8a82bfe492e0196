//! Browser-side tests, run with `wasm-pack test --headless --chrome`.

#![cfg(target_arch = "wasm32")]

use js_sys::Reflect;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use us_wasm::*;

wasm_bindgen_test_configure!(run_in_browser);

fn get(value: &JsValue, key: &str) -> JsValue {
    Reflect::get(value, &key.into()).unwrap()
}

#[wasm_bindgen_test]
fn loads_defaults_and_matches() {
    let json = default_rule_groups_json().unwrap();
    assert_eq!(load_rule_groups(&json).unwrap(), 2);
    assert!(is_loaded());

    let m = find_matching_rule("https://github.com/rust-lang/rust/pulls");
    assert_eq!(get(&m, "targetUrl").as_string().unwrap(), "https://github.dev/rust-lang/rust");

    assert!(find_matching_rule("https://example.com/").is_null());

    let all = find_all_matching_rules("https://github.com/rust-lang/rust");
    assert_eq!(get(&all, "currentUrl").as_string().unwrap(), "https://github.com/rust-lang/rust");
}

#[wasm_bindgen_test]
fn plans_offer_with_default_settings() {
    load_rule_groups(&default_rule_groups_json().unwrap()).unwrap();
    let settings = default_settings_json().unwrap();
    let plan = plan_redirect("https://github.dev/serde-rs/serde", &settings).unwrap();
    assert_eq!(get(&plan, "action").as_string().unwrap(), "offer");
    assert_eq!(get(&plan, "targetUrl").as_string().unwrap(), "https://github.com/serde-rs/serde");
}

#[wasm_bindgen_test]
fn reverses_simple_rule() {
    let rule = r#"{"id":"r","name":"github.com → github.dev","enabled":true,
        "fromPattern":"^https?://github\\.com/(.*)$",
        "toPattern":"https://github.dev/$1","priority":1}"#;
    let reversed = create_reverse_rule(rule).unwrap();
    assert_eq!(get(&reversed, "fromPattern").as_string().unwrap(), r"^https?://github\.dev/(.*)$");
    assert_eq!(get(&reversed, "toPattern").as_string().unwrap(), "https://github.com/$1");
    assert!(get(&reversed, "id").is_undefined());
}

#[wasm_bindgen_test]
fn classifies_and_validates() {
    let kind = classify_rule(r"^https?://a\.com/(.*)$", "https://b.com/$1");
    assert_eq!(get(&kind, "isSimple").as_bool(), Some(true));
    assert_eq!(get(&kind, "fromDomain").as_string().unwrap(), "a.com");

    let draft = r#"{"name":"x","enabled":true,"fromPattern":"(","toPattern":"y","priority":1}"#;
    assert!(validate_rule(draft).is_some());
}
