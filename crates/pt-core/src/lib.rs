//! pagetools core library
//!
//! Host-independent logic behind two browser helpers: a search results
//! cleaner and a CI build manifest navigator. Nothing here touches a real DOM
//! or the network; host bindings feed page state in and apply the results.
//!
//! # Modules
//!
//! - `diff`: LCS line differ producing an `Alignment`
//! - `render`: side-by-side rows for an alignment
//! - `page`: self-contained HTML comparison page
//! - `manifest`: manifest URL parsing, navigation and compare validation
//! - `dom`: `PageElement` seam, owned `Element` tree and simple selectors
//! - `cleaner`: ad removal heuristics and cleaning passes
//! - `link`: redirect-link protection
//! - `url`: allocation-free URL slicing helpers

pub mod cleaner;
pub mod diff;
pub mod dom;
pub mod link;
pub mod manifest;
pub mod page;
pub mod render;
pub mod url;

// Re-export commonly used types
pub use cleaner::{
    is_ad_label, is_search_page, CleanReport, CleanTrigger, Cleaner, CleanerRules,
};
pub use diff::{diff_lines, split_lines, Alignment, DiffRecord};
pub use dom::{Element, PageElement, Selector};
pub use link::{guard_link, unwrap_redirect, LinkDecision, ProtectedLink};
pub use manifest::{
    nav_action_for_key, validate_compare_target, CompareError, ComparePlan, KeyContext,
    ManifestError, ManifestUrl, NavAction, NavLabels,
};
pub use page::{render_diff_page, DiffPage};
pub use render::{render_alignment, RenderedDiff, Row, RowKind};
