//! Search results cleaner
//!
//! Two heuristics decide which elements go away:
//!
//! - a result container (`div.g`, `div.ads-ad`, ...) that holds a label
//!   element whose whole text is "Ad", "Sponsored" or "Sponsored result"
//! - any element matching one of the explicit ad container selectors
//!
//! The host reruns a pass on load, on DOM mutation and on scroll. Passes are
//! idempotent: a second pass over an already cleaned tree changes nothing.

use log::{debug, info};

use crate::dom::{selector_list, Element, PageElement, Selector};
use crate::link::{
    guard_link, unwrap_redirect, LinkDecision, CLEANED_MARKER, REAL_HREF_ATTR, REDIRECT_SOURCE_ATTR,
};
use crate::url::extract_host;

/// Explicit ad containers.
pub const AD_SELECTORS: [Selector; 5] = [
    Selector::attr_eq("div", "data-text-ad", "1"),
    Selector::has_attr("div", "data-text-ad"),
    Selector::attr_eq("div", "aria-label", "Ads"),
    Selector::attr_eq("div", "data-testid", "ad"),
    Selector::attr_eq("div", "aria-label", "Sponsored"),
];

/// Containers that are removed only when they carry an ad label.
pub const RESULT_SELECTORS: [Selector; 4] = [
    Selector::class("div", "g"),
    Selector::class("div", "ads-ad"),
    Selector::class("div", "uEierd"),
    Selector::class("div", "v5yQqb"),
];

/// Elements whose text is checked for an ad label.
pub const LABEL_SELECTORS: [Selector; 3] =
    [Selector::tag("span"), Selector::tag("div"), Selector::tag("abbr")];

/// Anchors that carry a tracking redirect.
pub const REDIRECT_LINK_SELECTOR: Selector = Selector::has_attr("a", REDIRECT_SOURCE_ATTR);

/// What caused a cleaning pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanTrigger {
    Load,
    Mutation,
    Scroll,
}

/// Whether `text` is an ad marker: "Ad", "Sponsored" or "Sponsored result",
/// case-insensitive, surrounding whitespace ignored.
pub fn is_ad_label(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("ad") || trimmed.eq_ignore_ascii_case("sponsored") {
        return true;
    }

    let Some(head) = trimmed.get(..9) else {
        return false;
    };
    if !head.eq_ignore_ascii_case("sponsored") {
        return false;
    }
    let rest = &trimmed[9..];
    let word = rest.trim_start();
    word.len() < rest.len() && word.eq_ignore_ascii_case("result")
}

/// Whether `url` is a Google search page the cleaner should run on:
/// `https://www.google.<tld>/...` with a lowercase ASCII tld. Userinfo in
/// the authority disqualifies the URL.
pub fn is_search_page(url: &str) -> bool {
    let (Some(rest), Some(host)) = (url.strip_prefix("https://"), extract_host(url)) else {
        return false;
    };
    // Userinfo in front of the host leaves `rest` not starting with it
    let Some(path) = rest.strip_prefix(host) else {
        return false;
    };
    let Some(tld) = host.strip_prefix("www.google.") else {
        return false;
    };
    !tld.is_empty()
        && tld.bytes().all(|b| b.is_ascii_lowercase() || b == b'.')
        && path.starts_with('/')
}

/// Heuristics for one cleaning pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanerRules {
    pub ad_selectors: Vec<Selector>,
    pub result_selectors: Vec<Selector>,
    pub label_selectors: Vec<Selector>,
    /// Also pin anchors whose href already points at the redirect endpoint,
    /// using the decoded destination.
    pub unwrap_redirects: bool,
}

impl Default for CleanerRules {
    fn default() -> Self {
        Self {
            ad_selectors: AD_SELECTORS.to_vec(),
            result_selectors: RESULT_SELECTORS.to_vec(),
            label_selectors: LABEL_SELECTORS.to_vec(),
            unwrap_redirects: false,
        }
    }
}

impl CleanerRules {
    pub fn ad_selector_list(&self) -> String {
        selector_list(&self.ad_selectors)
    }

    pub fn result_selector_list(&self) -> String {
        selector_list(&self.result_selectors)
    }

    pub fn label_selector_list(&self) -> String {
        selector_list(&self.label_selectors)
    }

    fn is_label<E: PageElement>(&self, element: &E) -> bool {
        self.label_selectors.iter().any(|s| s.matches(element))
            && is_ad_label(&element.text_content())
    }

    fn has_ad_label<E: PageElement>(&self, element: &E) -> bool {
        element
            .children()
            .iter()
            .any(|child| self.is_label(child) || self.has_ad_label(child))
    }

    /// Whether this element should be removed from the page.
    pub fn should_remove<E: PageElement>(&self, element: &E) -> bool {
        if self.ad_selectors.iter().any(|s| s.matches(element)) {
            return true;
        }
        self.result_selectors.iter().any(|s| s.matches(element)) && self.has_ad_label(element)
    }

    /// Elements under `root` to remove, in document order. Descendants of an
    /// element already in the set are not listed separately.
    pub fn find_removals<'a, E: PageElement>(&self, root: &'a E) -> Vec<&'a E> {
        let mut out = Vec::new();
        self.collect_removals(root, &mut out);
        out
    }

    fn collect_removals<'a, E: PageElement>(&self, element: &'a E, out: &mut Vec<&'a E>) {
        for child in element.children() {
            if self.should_remove(child) {
                out.push(child);
            } else {
                self.collect_removals(child, out);
            }
        }
    }
}

/// Outcome of one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanReport {
    pub trigger: CleanTrigger,
    pub removed: usize,
    pub links_protected: usize,
}

/// Applies the rules to an owned page tree, pass after pass.
#[derive(Debug, Default)]
pub struct Cleaner {
    rules: CleanerRules,
    passes: u64,
    total_removed: usize,
}

impl Cleaner {
    pub fn new(rules: CleanerRules) -> Self {
        Self {
            rules,
            passes: 0,
            total_removed: 0,
        }
    }

    pub fn rules(&self) -> &CleanerRules {
        &self.rules
    }

    pub fn passes(&self) -> u64 {
        self.passes
    }

    pub fn total_removed(&self) -> usize {
        self.total_removed
    }

    pub fn clean(&mut self, root: &mut Element, trigger: CleanTrigger) -> CleanReport {
        self.passes += 1;
        let removed = prune(root, &self.rules);
        let links_protected = protect_links(root, self.rules.unwrap_redirects);
        self.total_removed += removed;

        if removed > 0 {
            info!("{:?} pass removed {} ad element(s)", trigger, removed);
        }
        debug!(
            "pass {} ({:?}): removed {}, protected {} link(s)",
            self.passes, trigger, removed, links_protected
        );

        CleanReport {
            trigger,
            removed,
            links_protected,
        }
    }
}

fn prune(element: &mut Element, rules: &CleanerRules) -> usize {
    let children = element.children_mut();
    let before = children.len();
    children.retain(|child| !rules.should_remove(child));
    let mut removed = before - children.len();
    for child in children.iter_mut() {
        removed += prune(child, rules);
    }
    removed
}

fn protect_links(element: &mut Element, unwrap_redirects: bool) -> usize {
    let mut protected = 0;
    if REDIRECT_LINK_SELECTOR.matches(&*element) && pin_anchor(element, unwrap_redirects) {
        protected += 1;
    }
    for child in element.children_mut().iter_mut() {
        protected += protect_links(child, unwrap_redirects);
    }
    protected
}

fn pin_anchor(anchor: &mut Element, unwrap_redirects: bool) -> bool {
    let href = anchor.attribute("href").map(str::to_string);
    let decision = guard_link(href.as_deref(), anchor.has_attribute(CLEANED_MARKER));
    let real_href = match decision {
        LinkDecision::Protect(link) => {
            for name in link.strip_attributes() {
                anchor.remove_attribute(name);
            }
            link.real_href().to_string()
        }
        LinkDecision::Redirect if unwrap_redirects => {
            let Some(target) = href.as_deref().and_then(unwrap_redirect) else {
                return false;
            };
            for name in crate::link::TRACKING_ATTRIBUTES {
                anchor.remove_attribute(name);
            }
            target
        }
        LinkDecision::Redirect | LinkDecision::Skip => return false,
    };

    anchor.set_attribute(REAL_HREF_ATTR, &real_href);
    anchor.set_attribute(CLEANED_MARKER, "true");
    anchor.set_attribute("href", &real_href);
    true
}
