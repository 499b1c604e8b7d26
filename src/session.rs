use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Mutex;

use crate::browser;
use crate::clipboard;
use crate::data_models::{
    DEFAULT_PLACEHOLDER, DateRange, FileCategory, FileTypeFilter, SearchFormState, SearchOutcome,
};
use crate::query_builder;
use crate::search_client::{CseClient, classify};

/// Form state plus the outcome of the latest search to resolve.
///
/// Searches are not cancelled or serialized: if two overlap, the one that
/// finishes last decides the outcome.
pub struct SearchSession {
    client: Arc<CseClient>,
    form: SearchFormState,
    placeholder: String,
    today: Option<NaiveDate>,
    outcome: Arc<Mutex<SearchOutcome>>,
}

impl SearchSession {
    pub fn new(client: Arc<CseClient>) -> Self {
        Self {
            client,
            form: SearchFormState::default(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            today: None,
            outcome: Arc::new(Mutex::new(SearchOutcome::Idle)),
        }
    }

    /// Resolves date ranges against a fixed day instead of the clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn set_free_text(&mut self, text: impl Into<String>) {
        self.form.free_text = text.into();
    }

    pub fn set_exact_phrase(&mut self, phrase: impl Into<String>) {
        self.form.exact_phrase = phrase.into();
    }

    pub fn set_exclude_terms(&mut self, raw: impl Into<String>) {
        self.form.exclude_terms = raw.into();
    }

    pub fn set_custom_site(&mut self, site: impl Into<String>) {
        self.form.custom_site = site.into();
    }

    pub fn set_date_range(&mut self, range: Option<DateRange>) {
        self.form.date_range = range;
    }

    pub fn set_file_type(&mut self, filter: Option<FileTypeFilter>) {
        self.form.file_type = filter;
    }

    pub fn select_file_type(&mut self, category: FileCategory) {
        self.form.file_type = Some(category.filter());
        self.placeholder = category.placeholder();
    }

    pub fn toggle_site(&mut self, site: &str) {
        self.form.toggle_site(site);
    }

    /// Back to a fresh form with no results.
    pub async fn clear(&mut self) {
        self.form = SearchFormState::default();
        self.placeholder = DEFAULT_PLACEHOLDER.to_string();
        *self.outcome.lock().await = SearchOutcome::Idle;
    }

    pub fn preview(&self) -> String {
        match self.today {
            Some(today) => query_builder::synthesize(&self.form, today),
            None => query_builder::synthesize_now(&self.form),
        }
    }

    pub async fn outcome(&self) -> SearchOutcome {
        self.outcome.lock().await.clone()
    }

    /// Runs one search with the current preview. Returns `None` without
    /// touching the outcome when the query is blank.
    pub async fn search(&self) -> Option<SearchOutcome> {
        let query = self.preview();
        self.search_query(&query).await
    }

    pub async fn search_query(&self, query: &str) -> Option<SearchOutcome> {
        if query.trim().is_empty() {
            return None;
        }

        *self.outcome.lock().await = SearchOutcome::Loading;

        let result = self.client.search(query).await;
        if let Err(e) = &result {
            tracing::error!(error = %e, "search failed");
        }
        let outcome = classify(result);

        *self.outcome.lock().await = outcome.clone();
        Some(outcome)
    }

    pub fn copy_query(&self) -> bool {
        clipboard::copy_query(&self.preview())
    }

    pub fn open_in_browser(&self) {
        browser::open_in_browser(&self.preview());
    }
}
