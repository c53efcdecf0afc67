use crate::analyzer::{MatchEngine, SubstringMatcher};
use crate::config::DEFAULT_PANEL;
use crate::model::{FetchResult, SearchResult};
use crate::parser::{MietublParser, ModelExtractor};
use crate::scraper::PageFetcher;
use std::sync::Arc;
use tracing::{info, warn};

pub const MODEL_REQUIRED: &str = "Model name is required";

/// Fetch, extract and match for one compatibility lookup.
///
/// Holds no per-request state, so one instance can serve concurrent callers.
pub struct CompatibilitySearch {
    fetcher: Arc<dyn PageFetcher>,
    parser: MietublParser,
    matcher: SubstringMatcher,
    default_panel: String,
}

impl CompatibilitySearch {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self::with_default_panel(fetcher, DEFAULT_PANEL)
    }

    pub fn with_default_panel(fetcher: Arc<dyn PageFetcher>, default_panel: impl Into<String>) -> Self {
        Self {
            fetcher,
            parser: MietublParser::new(),
            matcher: SubstringMatcher::new(),
            default_panel: default_panel.into(),
        }
    }

    pub fn default_panel(&self) -> &str {
        &self.default_panel
    }

    /// Looks up `model` in `panel` (default panel when absent or empty).
    ///
    /// With `pre_fetched_html` the vendor is not contacted. Otherwise the model is
    /// posted to the vendor, which pre-filters, and the result is filtered again locally.
    pub async fn search(&self, model: &str, panel: Option<&str>, pre_fetched_html: Option<String>) -> SearchResult {
        if model.is_empty() {
            return SearchResult::failure(MODEL_REQUIRED);
        }
        let panel = panel.filter(|p| !p.is_empty()).unwrap_or(self.default_panel.as_str());

        let html = match pre_fetched_html {
            Some(html) => html,
            None => match self.fetcher.fetch(Some(model)).await {
                Ok(html) => html,
                Err(e) => {
                    warn!("Search for {:?} failed to fetch: {}", model, e);
                    return SearchResult::failure(e.to_string());
                }
            },
        };

        let groups = match self.parser.extract(&html, Some(panel)) {
            Ok(groups) => groups,
            Err(e) => {
                warn!("Search for {:?} failed to parse: {}", model, e);
                return SearchResult::failure(e.to_string());
            }
        };

        let outcome = self.matcher.match_groups(&groups, model);
        info!(
            "Search {:?} in {:?}: {} groups extracted, {} matches in {} groups",
            model,
            panel,
            groups.len(),
            outcome.matches.len(),
            outcome.groups.len()
        );
        SearchResult::found(outcome, html)
    }

    /// Raw page fetch: posts `query` when present, otherwise a plain GET.
    pub async fn fetch(&self, query: Option<&str>) -> FetchResult {
        match self.fetcher.fetch(query).await {
            Ok(html) => FetchResult::fetched(html),
            Err(e) => {
                warn!("Raw fetch failed: {}", e);
                FetchResult::failure(e.to_string())
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::FetchError;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub(crate) const FIXTURE: &str = r#"
        <html><body>
          <div class="wrapper compatible-panel">
            <div class="compatible-models">
              <div class="clear"><h3>HD clear glass</h3></div>
              <div class="data-wrapper">
                <div class="mbox">
                  <span class="model">iPhone 11</span>
                  <span class="model">iPhone 11 Pro</span>
                  <span class="model">iPhone 11</span>
                </div>
                <div class="mbox"><span class="model">iPhone XS Max</span></div>
              </div>
            </div>
            <div class="compatible-models">
              <div class="clear"><h3>Privacy glass</h3></div>
              <div class="data-wrapper">
                <div class="mbox"><span class="model">iPhone 11 Pro Max</span></div>
              </div>
            </div>
          </div>
        </body></html>"#;

    /// Serves a canned response and records every query it was asked for.
    pub(crate) struct StubFetcher {
        pub calls: AtomicUsize,
        pub queries: Mutex<Vec<Option<String>>>,
        response: fn() -> Result<String, FetchError>,
    }

    impl StubFetcher {
        pub(crate) fn new(response: fn() -> Result<String, FetchError>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                queries: Mutex::new(Vec::new()),
                response,
            }
        }

        pub(crate) fn serving_fixture() -> Self {
            Self::new(|| Ok(FIXTURE.to_string()))
        }

        pub(crate) fn timing_out() -> Self {
            Self::new(|| {
                Err(FetchError::Timeout {
                    url: "https://vendor.test/".to_string(),
                    seconds: 10,
                })
            })
        }
    }

    #[async_trait::async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch(&self, query: Option<&str>) -> Result<String, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.queries.lock().unwrap().push(query.map(str::to_string));
            (self.response)()
        }
    }

    fn search_with(stub: &Arc<StubFetcher>) -> CompatibilitySearch {
        CompatibilitySearch::new(stub.clone())
    }

    #[tokio::test]
    async fn end_to_end_search() {
        let stub = Arc::new(StubFetcher::serving_fixture());
        let result = search_with(&stub).search("11 pro", None, None).await;

        assert!(result.success);
        assert_eq!(result.matches, vec!["iPhone 11 Pro"]);
        assert_eq!(result.groups, vec![vec!["iPhone 11".to_string(), "iPhone 11 Pro".to_string()]]);
        assert_eq!(result.raw_html.as_deref(), Some(FIXTURE));
        assert!(result.error.is_none());
        assert_eq!(*stub.queries.lock().unwrap(), vec![Some("11 pro".to_string())]);
    }

    #[tokio::test]
    async fn explicit_panel_only_returns_its_groups() {
        let stub = Arc::new(StubFetcher::serving_fixture());
        let result = search_with(&stub).search("iphone", Some("privacy glass"), None).await;
        assert_eq!(result.matches, vec!["iPhone 11 Pro Max"]);
        assert_eq!(result.groups, vec![vec!["iPhone 11 Pro Max".to_string()]]);
    }

    #[tokio::test]
    async fn empty_panel_uses_default() {
        let stub = Arc::new(StubFetcher::serving_fixture());
        let result = search_with(&stub).search("xs", Some(""), None).await;
        assert_eq!(result.matches, vec!["iPhone XS Max"]);
    }

    #[tokio::test]
    async fn empty_model_never_fetches() {
        let stub = Arc::new(StubFetcher::serving_fixture());
        let result = search_with(&stub).search("", None, None).await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some(MODEL_REQUIRED));
        assert!(result.matches.is_empty() && result.groups.is_empty());
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn pre_fetched_html_skips_fetcher() {
        let stub = Arc::new(StubFetcher::timing_out());
        let result = search_with(&stub)
            .search("iPhone 11", None, Some(FIXTURE.to_string()))
            .await;

        assert!(result.success);
        assert_eq!(result.matches, vec!["iPhone 11", "iPhone 11 Pro"]);
        assert_eq!(result.groups.len(), 1);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn timeout_becomes_failure_envelope() {
        let stub = Arc::new(StubFetcher::timing_out());
        let result = search_with(&stub).search("iPhone", None, None).await;

        assert!(!result.success);
        assert_eq!(
            result.error.as_deref(),
            Some("Request to https://vendor.test/ timed out after 10s")
        );
        assert!(result.matches.is_empty());
        assert!(result.groups.is_empty());
        assert!(result.raw_html.is_none());
    }

    #[tokio::test]
    async fn no_match_is_still_a_success() {
        let stub = Arc::new(StubFetcher::serving_fixture());
        let result = search_with(&stub).search("Galaxy", None, None).await;
        assert!(result.success);
        assert!(result.matches.is_empty());
        assert!(result.groups.is_empty());
    }

    #[tokio::test]
    async fn raw_fetch_passes_query_through() {
        let stub = Arc::new(StubFetcher::serving_fixture());
        let search = search_with(&stub);

        assert_eq!(search.fetch(None).await, FetchResult::fetched(FIXTURE.to_string()));
        search.fetch(Some("xs")).await;
        assert_eq!(
            *stub.queries.lock().unwrap(),
            vec![None, Some("xs".to_string())]
        );

        let failing = Arc::new(StubFetcher::timing_out());
        let result = search_with(&failing).fetch(None).await;
        assert!(!result.success);
        assert!(result.html.is_none());
    }
}
