use std::path::PathBuf;
use std::time::Duration;

use log::{debug, info};
use pt_core::{render_diff_page, CompareError, ComparePlan, ManifestUrl};

use crate::output::{self, DiffSummary};

pub struct CompareOptions {
    pub url: String,
    pub target: String,
    pub output: Option<String>,
    pub timeout_secs: u64,
    pub json: bool,
}

/// Why a single fetch failed, before it is tied to a build number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    Status(u16),
    Transport(String),
}

impl FetchFailure {
    fn for_build(self, build: u64) -> CompareError {
        match self {
            Self::Status(status) => CompareError::Fetch { build, status },
            Self::Transport(message) => CompareError::Transport { build, message },
        }
    }
}

/// Where manifest bodies come from.
#[allow(async_fn_in_trait)]
pub trait ManifestSource {
    async fn fetch(&self, url: &str) -> Result<String, FetchFailure>;
}

pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {}", e))?;
        Ok(Self { client })
    }
}

impl ManifestSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<String, FetchFailure> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchFailure::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchFailure::Transport(e.to_string()))
    }
}

/// Fetch both manifests concurrently. The first failure, checked in
/// (current, target) order, aborts the comparison.
pub async fn fetch_pair<S: ManifestSource>(
    source: &S,
    plan: &ComparePlan,
) -> Result<(String, String), CompareError> {
    let (current, target) =
        tokio::join!(source.fetch(&plan.current_url), source.fetch(&plan.target_url));

    let current = current.map_err(|e| e.for_build(plan.current))?;
    let target = target.map_err(|e| e.for_build(plan.target))?;
    Ok((current, target))
}

pub fn default_output(plan: &ComparePlan) -> PathBuf {
    PathBuf::from(format!("diff-{}-vs-{}.html", plan.current, plan.target))
}

pub fn run_compare(opts: CompareOptions) -> Result<(), String> {
    let manifest = ManifestUrl::parse(&opts.url).map_err(|e| e.to_string())?;
    let plan = manifest.plan_compare(&opts.target).map_err(|e| e.to_string())?;
    info!("comparing build {} with {}", plan.current, plan.target);

    let source = HttpSource::new(Duration::from_secs(opts.timeout_secs))?;
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| format!("Failed to start tokio runtime: {}", e))?;
    let (current_text, target_text) = runtime
        .block_on(fetch_pair(&source, &plan))
        .map_err(|e| e.to_string())?;

    let page = render_diff_page(
        &plan.current.to_string(),
        &plan.target.to_string(),
        &current_text,
        &target_text,
    );

    let output_path = opts.output.map(PathBuf::from).unwrap_or_else(|| default_output(&plan));
    output::write_page(&output_path, &page.html)?;

    let summary = DiffSummary::new(
        &plan.current.to_string(),
        &plan.target.to_string(),
        &page,
        &output_path,
    );
    output::print_summary(&summary, opts.json)
}
