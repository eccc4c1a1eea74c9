//! Build manifest navigation
//!
//! Artifact URLs look like `http://ci.example.com/job/x/1234/artifact/manifest.xml`.
//! The build number is the path segment right before `/artifact/manifest.xml`;
//! everything in front of it is kept verbatim as the base.

use std::fmt;

use log::warn;

/// Fixed tail of every manifest URL.
pub const MANIFEST_SUFFIX: &str = "/artifact/manifest.xml";

/// Error type for manifest URL handling.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ManifestError {
    #[error("Could not parse build number from URL: {0}")]
    UnrecognizedUrl(String),
}

/// Error type for a comparison attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompareError {
    #[error("Please enter a valid build number")]
    InvalidTarget(String),
    #[error("Cannot compare a build with itself")]
    SameBuild(u64),
    #[error("Failed to fetch build {build}: {status}")]
    Fetch { build: u64, status: u16 },
    #[error("Failed to fetch build {build}: {message}")]
    Transport { build: u64, message: String },
}

impl CompareError {
    /// Build number the failure refers to, if any.
    pub fn build(&self) -> Option<u64> {
        match self {
            Self::InvalidTarget(_) => None,
            Self::SameBuild(build) | Self::Fetch { build, .. } | Self::Transport { build, .. } => {
                Some(*build)
            }
        }
    }
}

/// Navigation request from a button or a keyboard shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Previous,
    Next,
    /// Go back to the build page the manifest belongs to
    BuildPage,
    /// Open the compare dialog
    OpenCompare,
}

/// A parsed manifest artifact URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestUrl {
    base: String,
    build: u64,
    suffix: String,
}

impl ManifestUrl {
    pub fn parse(url: &str) -> Result<Self, ManifestError> {
        let unrecognized = || ManifestError::UnrecognizedUrl(url.to_string());

        let head = url.strip_suffix(MANIFEST_SUFFIX).ok_or_else(unrecognized)?;
        let base = head.trim_end_matches(|c: char| c.is_ascii_digit());
        let digits = &head[base.len()..];

        if digits.is_empty() || !base.ends_with('/') {
            return Err(unrecognized());
        }
        let build = digits.parse::<u64>().map_err(|_| unrecognized())?;

        Ok(Self {
            base: base.to_string(),
            build,
            suffix: MANIFEST_SUFFIX.to_string(),
        })
    }

    pub fn build(&self) -> u64 {
        self.build
    }

    /// Everything before the build number, including the trailing slash.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Manifest URL of another build in the same job.
    pub fn url_for(&self, build: u64) -> String {
        format!("{}{}{}", self.base, build, self.suffix)
    }

    /// None when already at build 1.
    pub fn previous(&self) -> Option<String> {
        (self.build > 1).then(|| self.url_for(self.build - 1))
    }

    /// None when the build number has no successor.
    pub fn next(&self) -> Option<String> {
        self.build.checked_add(1).map(|next| self.url_for(next))
    }

    pub fn build_page(&self) -> String {
        format!("{}{}", self.base, self.build)
    }

    /// Target location for a navigation action. `OpenCompare` stays on the page.
    pub fn navigate(&self, action: NavAction) -> Option<String> {
        match action {
            NavAction::Previous => self.previous(),
            NavAction::Next => self.next(),
            NavAction::BuildPage => Some(self.build_page()),
            NavAction::OpenCompare => None,
        }
    }

    pub fn labels(&self) -> NavLabels {
        NavLabels::for_build(self.build)
    }

    /// Validate user input and plan the two fetches.
    pub fn plan_compare(&self, input: &str) -> Result<ComparePlan, CompareError> {
        let target = validate_compare_target(input, self.build)?;
        Ok(ComparePlan {
            current: self.build,
            target,
            current_url: self.url_for(self.build),
            target_url: self.url_for(target),
        })
    }
}

impl fmt::Display for ManifestUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.base, self.build, self.suffix)
    }
}

/// Texts for the navigation overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLabels {
    pub previous: String,
    pub next: String,
    pub back: String,
    pub compare: String,
    pub compare_title: String,
    /// Pre-filled compare input
    pub default_target: String,
}

impl NavLabels {
    pub fn for_build(build: u64) -> Self {
        Self {
            previous: format!("\u{2190} Previous ({})", build.saturating_sub(1)),
            next: match build.checked_add(1) {
                Some(next) => format!("Next ({}) \u{2192}", next),
                None => "Next \u{2192}".to_string(),
            },
            back: "\u{2934} Go Back".to_string(),
            compare: "\u{2696} Compare...".to_string(),
            compare_title: format!("Compare Build {} with:", build),
            default_target: build.saturating_sub(1).to_string(),
        }
    }
}

/// Two fetches that make up one comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparePlan {
    pub current: u64,
    pub target: u64,
    pub current_url: String,
    pub target_url: String,
}

/// Parse the compare dialog input. Rejects anything that is not a positive
/// integer, and the current build itself.
pub fn validate_compare_target(input: &str, current: u64) -> Result<u64, CompareError> {
    let trimmed = input.trim();
    let target = match trimmed.parse::<u64>() {
        Ok(target) if target >= 1 => target,
        _ => {
            warn!("rejected compare target {:?}", input);
            return Err(CompareError::InvalidTarget(input.to_string()));
        }
    };

    if target == current {
        warn!("rejected compare target {}: same as current build", target);
        return Err(CompareError::SameBuild(target));
    }

    Ok(target)
}

/// Focus state that gates the keyboard shortcuts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyContext {
    pub modal_open: bool,
    /// Focus is in an INPUT or TEXTAREA
    pub editing_text: bool,
}

/// Map a `KeyboardEvent.key` value to a navigation action.
pub fn nav_action_for_key(key: &str, ctx: KeyContext) -> Option<NavAction> {
    if ctx.modal_open || ctx.editing_text {
        return None;
    }

    match key {
        "ArrowLeft" | "p" | "P" => Some(NavAction::Previous),
        "ArrowRight" | "n" | "N" => Some(NavAction::Next),
        "b" | "B" | "Backspace" => Some(NavAction::BuildPage),
        "c" | "C" => Some(NavAction::OpenCompare),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://ci.example.com/job/compiler-psdb/1234/artifact/manifest.xml";

    #[test]
    fn test_parse_manifest_url() {
        let url = ManifestUrl::parse(URL).unwrap();
        assert_eq!(url.build(), 1234);
        assert_eq!(url.base(), "http://ci.example.com/job/compiler-psdb/");
        assert_eq!(url.to_string(), URL);
    }

    #[test]
    fn test_parse_rejects_other_urls() {
        for bad in [
            "http://ci.example.com/job/x/lastBuild/artifact/manifest.xml",
            "http://ci.example.com/job/x/12/artifact/other.xml",
            "http://ci.example.com/job/x12/artifact/manifest.xml",
            "1234/artifact/manifest.xml",
            "",
        ] {
            assert!(
                matches!(ManifestUrl::parse(bad), Err(ManifestError::UnrecognizedUrl(_))),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    fn test_navigation_targets() {
        let url = ManifestUrl::parse(URL).unwrap();
        assert_eq!(
            url.previous().as_deref(),
            Some("http://ci.example.com/job/compiler-psdb/1233/artifact/manifest.xml")
        );
        assert_eq!(
            url.next().as_deref(),
            Some("http://ci.example.com/job/compiler-psdb/1235/artifact/manifest.xml")
        );
        assert_eq!(url.build_page(), "http://ci.example.com/job/compiler-psdb/1234");
        assert_eq!(url.navigate(NavAction::OpenCompare), None);
        assert_eq!(url.navigate(NavAction::BuildPage), Some(url.build_page()));
    }

    #[test]
    fn test_no_previous_for_first_build() {
        let url = ManifestUrl::parse("http://ci/job/x/1/artifact/manifest.xml").unwrap();
        assert_eq!(url.previous(), None);
        assert_eq!(url.navigate(NavAction::Previous), None);
        assert_eq!(url.next().as_deref(), Some("http://ci/job/x/2/artifact/manifest.xml"));
    }

    #[test]
    fn test_last_representable_build() {
        let max = format!("http://ci/job/x/{}/artifact/manifest.xml", u64::MAX);
        let url = ManifestUrl::parse(&max).unwrap();
        assert_eq!(url.build(), u64::MAX);
        assert_eq!(url.next(), None);
        assert_eq!(url.navigate(NavAction::Next), None);
        assert!(url.previous().is_some());

        let labels = url.labels();
        assert_eq!(labels.next, "Next \u{2192}");
        assert_eq!(labels.previous, format!("\u{2190} Previous ({})", u64::MAX - 1));

        let too_long = "http://ci/job/x/18446744073709551616/artifact/manifest.xml";
        assert!(matches!(ManifestUrl::parse(too_long), Err(ManifestError::UnrecognizedUrl(_))));
    }

    #[test]
    fn test_labels() {
        let labels = NavLabels::for_build(1234);
        assert_eq!(labels.previous, "\u{2190} Previous (1233)");
        assert_eq!(labels.next, "Next (1235) \u{2192}");
        assert_eq!(labels.compare_title, "Compare Build 1234 with:");
        assert_eq!(labels.default_target, "1233");
    }

    #[test]
    fn test_validate_compare_target() {
        assert_eq!(validate_compare_target(" 1200 ", 1234), Ok(1200));
        assert_eq!(validate_compare_target("1300", 1234), Ok(1300));
        assert_eq!(
            validate_compare_target("abc", 1234),
            Err(CompareError::InvalidTarget("abc".to_string()))
        );
        assert!(matches!(validate_compare_target("0", 1234), Err(CompareError::InvalidTarget(_))));
        assert!(matches!(validate_compare_target("-5", 1234), Err(CompareError::InvalidTarget(_))));
        assert!(matches!(validate_compare_target("", 1234), Err(CompareError::InvalidTarget(_))));
        assert_eq!(validate_compare_target("1234", 1234), Err(CompareError::SameBuild(1234)));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CompareError::InvalidTarget("x".into()).to_string(),
            "Please enter a valid build number"
        );
        assert_eq!(CompareError::SameBuild(3).to_string(), "Cannot compare a build with itself");
        assert_eq!(
            CompareError::Fetch { build: 1199, status: 404 }.to_string(),
            "Failed to fetch build 1199: 404"
        );
        assert_eq!(CompareError::Fetch { build: 1199, status: 404 }.build(), Some(1199));
    }

    #[test]
    fn test_plan_compare() {
        let url = ManifestUrl::parse(URL).unwrap();
        let plan = url.plan_compare("1200").unwrap();
        assert_eq!(plan.current, 1234);
        assert_eq!(plan.target, 1200);
        assert_eq!(plan.current_url, URL);
        assert!(plan.target_url.ends_with("/1200/artifact/manifest.xml"));
        assert!(url.plan_compare("1234").is_err());
    }

    #[test]
    fn test_nav_action_for_key() {
        let idle = KeyContext::default();
        assert_eq!(nav_action_for_key("ArrowLeft", idle), Some(NavAction::Previous));
        assert_eq!(nav_action_for_key("N", idle), Some(NavAction::Next));
        assert_eq!(nav_action_for_key("Backspace", idle), Some(NavAction::BuildPage));
        assert_eq!(nav_action_for_key("c", idle), Some(NavAction::OpenCompare));
        assert_eq!(nav_action_for_key("x", idle), None);

        let typing = KeyContext { modal_open: false, editing_text: true };
        assert_eq!(nav_action_for_key("p", typing), None);
        let modal = KeyContext { modal_open: true, editing_text: false };
        assert_eq!(nav_action_for_key("ArrowRight", modal), None);
    }
}
