use pt_core::{ManifestUrl, NavLabels};
use serde::Serialize;

pub struct NavOptions {
    pub url: String,
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct NavInfo {
    pub build: u64,
    pub previous: Option<String>,
    pub next: Option<String>,
    pub build_page: String,
    pub labels: LabelInfo,
}

#[derive(Debug, Serialize)]
pub struct LabelInfo {
    pub previous: String,
    pub next: String,
    pub back: String,
    pub compare: String,
}

impl From<NavLabels> for LabelInfo {
    fn from(labels: NavLabels) -> Self {
        Self {
            previous: labels.previous,
            next: labels.next,
            back: labels.back,
            compare: labels.compare,
        }
    }
}

impl NavInfo {
    pub fn new(manifest: &ManifestUrl) -> Self {
        Self {
            build: manifest.build(),
            previous: manifest.previous(),
            next: manifest.next(),
            build_page: manifest.build_page(),
            labels: manifest.labels().into(),
        }
    }
}

pub fn run_nav(opts: NavOptions) -> Result<(), String> {
    let manifest = ManifestUrl::parse(&opts.url).map_err(|e| e.to_string())?;
    let info = NavInfo::new(&manifest);

    if opts.json {
        let text = serde_json::to_string_pretty(&info)
            .map_err(|e| format!("Failed to serialize JSON: {}", e))?;
        println!("{}", text);
        return Ok(());
    }

    println!("Build {}", info.build);
    println!("  Previous:   {}", info.previous.as_deref().unwrap_or("-"));
    println!("  Next:       {}", info.next.as_deref().unwrap_or("-"));
    println!("  Build page: {}", info.build_page);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_info() {
        let manifest =
            ManifestUrl::parse("http://ci.example.com/job/x/1/artifact/manifest.xml").unwrap();
        let info = NavInfo::new(&manifest);
        assert_eq!(info.build, 1);
        assert_eq!(info.previous, None);
        assert_eq!(
            info.next.as_deref(),
            Some("http://ci.example.com/job/x/2/artifact/manifest.xml")
        );
        assert_eq!(info.build_page, "http://ci.example.com/job/x/1");

        let value = serde_json::to_value(&info).unwrap();
        assert!(value["previous"].is_null());
        assert_eq!(value["labels"]["next"], "Next (2) \u{2192}");
    }

    #[test]
    fn test_nav_info_without_next_build() {
        let url = format!("http://ci.example.com/job/x/{}/artifact/manifest.xml", u64::MAX);
        let info = NavInfo::new(&ManifestUrl::parse(&url).unwrap());
        assert_eq!(info.next, None);
        assert_eq!(info.labels.next, "Next \u{2192}");
    }
}
