//! Redirect-link protection
//!
//! Search result anchors start out with their real target in `href` and a
//! `data-sb` attribute holding a tracking redirect. The page rewrites `href`
//! to the redirect on mousedown, contextmenu, click or touchstart. A
//! `ProtectedLink` pins the real target so the host can undo such rewrites.

use crate::url::{extract_path_and_query, percent_decode, query_param};

/// Marker set on anchors that were already processed.
pub const CLEANED_MARKER: &str = "data-cleaned-link";
/// Attribute that records the pinned target.
pub const REAL_HREF_ATTR: &str = "data-real-href";
/// Attribute holding the tracking redirect.
pub const REDIRECT_SOURCE_ATTR: &str = "data-sb";

/// Attributes that drive rewriting or tracking.
pub const TRACKING_ATTRIBUTES: [&str; 4] =
    ["onmousedown", "data-ved", "ping", REDIRECT_SOURCE_ATTR];

/// Events the host must intercept in the capture phase.
pub const GUARDED_EVENTS: [&str; 4] = ["mousedown", "contextmenu", "click", "touchstart"];

/// What to do with one candidate anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkDecision {
    /// Already processed, or no href to protect
    Skip,
    /// The href already points at the redirect endpoint; leave it alone
    Redirect,
    Protect(ProtectedLink),
}

/// A pinned link target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedLink {
    real_href: String,
}

impl ProtectedLink {
    pub fn real_href(&self) -> &str {
        &self.real_href
    }

    pub fn strip_attributes(&self) -> &'static [&'static str] {
        &TRACKING_ATTRIBUTES
    }

    pub fn guarded_events(&self) -> &'static [&'static str] {
        &GUARDED_EVENTS
    }

    /// Href to write back after an intercepted event, if it drifted.
    pub fn restore(&self, observed: &str) -> Option<&str> {
        (observed != self.real_href).then_some(self.real_href.as_str())
    }

    /// Value the anchor keeps when anything tries to assign `href`.
    pub fn accept_write(&self, _attempted: &str) -> &str {
        &self.real_href
    }
}

/// Whether an href goes through the `/url?` redirect endpoint.
pub fn is_redirect_href(href: &str) -> bool {
    href.contains("/url?")
}

/// Decide how to treat an anchor that carries a redirect source.
pub fn guard_link(href: Option<&str>, already_cleaned: bool) -> LinkDecision {
    if already_cleaned {
        return LinkDecision::Skip;
    }
    match href {
        None | Some("") => LinkDecision::Skip,
        Some(href) if is_redirect_href(href) => LinkDecision::Redirect,
        Some(href) => LinkDecision::Protect(ProtectedLink {
            real_href: href.to_string(),
        }),
    }
}

/// Recover the destination of a `/url?q=...` (or `url=`) redirect href.
pub fn unwrap_redirect(href: &str) -> Option<String> {
    let rest = extract_path_and_query(href);
    if !rest.starts_with("/url?") {
        return None;
    }
    let raw = query_param(rest, "q")
        .filter(|v| !v.is_empty())
        .or_else(|| query_param(rest, "url"))
        .filter(|v| !v.is_empty())?;
    let target = percent_decode(raw)?;
    let is_web = target.starts_with("http://") || target.starts_with("https://");
    is_web.then_some(target)
}
