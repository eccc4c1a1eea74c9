//! WebAssembly bindings for pagetools userscripts
//!
//! The userscript keeps all DOM work (querying, event listeners, opening the
//! diff tab); these exports supply the decisions.

use wasm_bindgen::prelude::*;
use pt_core::{
    cleaner::{CleanerRules, REDIRECT_LINK_SELECTOR},
    guard_link, is_ad_label, is_search_page, nav_action_for_key, render_diff_page,
    CompareError, KeyContext, LinkDecision, ManifestUrl, NavAction,
};

fn set(target: &js_sys::Object, key: &str, value: &JsValue) {
    let _ = js_sys::Reflect::set(target, &key.into(), value);
}

fn string_array(values: &[&str]) -> js_sys::Array {
    let array = js_sys::Array::new();
    for value in values {
        array.push(&JsValue::from_str(value));
    }
    array
}

fn parse_url(url: &str) -> Result<ManifestUrl, JsValue> {
    ManifestUrl::parse(url).map_err(|e| {
        web_sys::console::warn_1(&JsValue::from_str(&format!("pagetools: {}", e)));
        JsValue::from_str(&e.to_string())
    })
}

fn action_name(action: NavAction) -> &'static str {
    match action {
        NavAction::Previous => "previous",
        NavAction::Next => "next",
        NavAction::BuildPage => "buildPage",
        NavAction::OpenCompare => "compare",
    }
}

// =============================================================================
// Manifest navigator
// =============================================================================

#[wasm_bindgen]
pub fn parse_manifest_url(url: &str) -> Result<JsValue, JsValue> {
    let manifest = parse_url(url)?;
    let labels = manifest.labels();

    let result = js_sys::Object::new();
    set(&result, "build", &JsValue::from(manifest.build() as f64));
    set(&result, "base", &JsValue::from_str(manifest.base()));
    match manifest.previous() {
        Some(previous) => set(&result, "previous", &JsValue::from_str(&previous)),
        None => set(&result, "previous", &JsValue::NULL),
    }
    match manifest.next() {
        Some(next) => set(&result, "next", &JsValue::from_str(&next)),
        None => set(&result, "next", &JsValue::NULL),
    }
    set(&result, "buildPage", &JsValue::from_str(&manifest.build_page()));

    let label_obj = js_sys::Object::new();
    set(&label_obj, "previous", &JsValue::from_str(&labels.previous));
    set(&label_obj, "next", &JsValue::from_str(&labels.next));
    set(&label_obj, "back", &JsValue::from_str(&labels.back));
    set(&label_obj, "compare", &JsValue::from_str(&labels.compare));
    set(&label_obj, "compareTitle", &JsValue::from_str(&labels.compare_title));
    set(&label_obj, "defaultTarget", &JsValue::from_str(&labels.default_target));
    set(&result, "labels", &label_obj);

    Ok(result.into())
}

/// Resolve a keyboard shortcut. Returns `{ action, href }` or null.
#[wasm_bindgen]
pub fn nav_for_key(
    url: &str,
    key: &str,
    modal_open: bool,
    editing_text: bool,
) -> Result<JsValue, JsValue> {
    let manifest = parse_url(url)?;
    let ctx = KeyContext { modal_open, editing_text };

    let Some(action) = nav_action_for_key(key, ctx) else {
        return Ok(JsValue::NULL);
    };

    let result = js_sys::Object::new();
    set(&result, "action", &JsValue::from_str(action_name(action)));
    match manifest.navigate(action) {
        Some(href) => set(&result, "href", &JsValue::from_str(&href)),
        None => set(&result, "href", &JsValue::NULL),
    }
    Ok(result.into())
}

/// Validate the compare dialog input. Rejections carry the user-facing message.
#[wasm_bindgen]
pub fn plan_compare(url: &str, input: &str) -> Result<JsValue, JsValue> {
    let manifest = parse_url(url)?;
    let plan = manifest
        .plan_compare(input)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let result = js_sys::Object::new();
    set(&result, "current", &JsValue::from(plan.current as f64));
    set(&result, "target", &JsValue::from(plan.target as f64));
    set(&result, "currentUrl", &JsValue::from_str(&plan.current_url));
    set(&result, "targetUrl", &JsValue::from_str(&plan.target_url));
    Ok(result.into())
}

/// Message for a failed manifest fetch. `build` is a JS number, as returned
/// by `parse_manifest_url`.
#[wasm_bindgen]
pub fn fetch_error_message(build: f64, status: u16) -> String {
    CompareError::Fetch { build: build as u64, status }.to_string()
}

/// Diff two manifest bodies into a complete HTML page.
#[wasm_bindgen]
pub fn diff_page(old_build: &str, new_build: &str, old_text: &str, new_text: &str) -> JsValue {
    let page = render_diff_page(old_build, new_build, old_text, new_text);

    let result = js_sys::Object::new();
    set(&result, "html", &JsValue::from_str(&page.html));
    set(&result, "changeCount", &JsValue::from(page.change_count as u32));
    set(&result, "oldLines", &JsValue::from(page.old_line_count as u32));
    set(&result, "newLines", &JsValue::from(page.new_line_count as u32));
    result.into()
}

// =============================================================================
// Search cleaner
// =============================================================================

#[wasm_bindgen]
pub fn is_search_page_js(url: &str) -> bool {
    is_search_page(url)
}

#[wasm_bindgen]
pub fn is_ad_label_js(text: &str) -> bool {
    is_ad_label(text)
}

/// Selector lists for `querySelectorAll`.
#[wasm_bindgen]
pub fn cleaner_selectors() -> JsValue {
    let rules = CleanerRules::default();

    let result = js_sys::Object::new();
    set(&result, "ads", &JsValue::from_str(&rules.ad_selector_list()));
    set(&result, "results", &JsValue::from_str(&rules.result_selector_list()));
    set(&result, "labels", &JsValue::from_str(&rules.label_selector_list()));
    set(&result, "links", &JsValue::from_str(&REDIRECT_LINK_SELECTOR.to_string()));
    result.into()
}

/// Decide how to protect one `a[data-sb]` anchor.
#[wasm_bindgen]
pub fn guard_link_js(href: Option<String>, already_cleaned: bool) -> JsValue {
    let result = js_sys::Object::new();
    match guard_link(href.as_deref(), already_cleaned) {
        LinkDecision::Skip => set(&result, "action", &JsValue::from_str("skip")),
        LinkDecision::Redirect => set(&result, "action", &JsValue::from_str("redirect")),
        LinkDecision::Protect(link) => {
            set(&result, "action", &JsValue::from_str("protect"));
            set(&result, "realHref", &JsValue::from_str(link.real_href()));
            set(&result, "strip", &string_array(link.strip_attributes()));
            set(&result, "events", &string_array(link.guarded_events()));
        }
    }
    result.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_names() {
        assert_eq!(action_name(NavAction::Previous), "previous");
        assert_eq!(action_name(NavAction::OpenCompare), "compare");
    }

    #[test]
    fn test_fetch_error_message() {
        assert_eq!(fetch_error_message(1199.0, 404), "Failed to fetch build 1199: 404");
        assert_eq!(
            fetch_error_message(5_000_000_000.0, 500),
            "Failed to fetch build 5000000000: 500"
        );
    }
}
