use chrono::{Duration, NaiveDate, Utc};

use crate::data_models::{FileTypeFilter, SearchFormState};

pub const INDEX_OF_CLAUSE: &str = "intitle:index.of";
pub const EXCLUDE_PAGE_EXTENSIONS: &str = "-inurl:(jsp|pl|php|html|aspx|htm|cf|shtml)";
pub const EXCLUDE_SPAM_DOMAINS: &str =
    "-inurl:(listen77|mp3raid|mp3toss|mp3drug|index_of|index-of|wallywashis|downloadmana)";

/// Builds the advanced query for `form`, resolving the date range against `today`.
///
/// Tokens are emitted in a fixed order (text, phrase, file type, exclusions,
/// sites, date) and always end with the two `-inurl:` exclusions. Nothing is
/// reordered or deduplicated.
pub fn synthesize(form: &SearchFormState, today: NaiveDate) -> String {
    let mut parts: Vec<String> = Vec::new();

    if !form.free_text.is_empty() {
        parts.push(form.free_text.clone());
    }
    if !form.exact_phrase.is_empty() {
        parts.push(format!("\"{}\"", form.exact_phrase));
    }

    match &form.file_type {
        Some(FileTypeFilter::Extensions(exts)) => {
            parts.push(format!("+({exts})"));
            parts.push(INDEX_OF_CLAUSE.to_string());
        }
        Some(FileTypeFilter::DirectoryListing) => parts.push(INDEX_OF_CLAUSE.to_string()),
        Some(FileTypeFilter::Other) | None => {}
    }

    for term in form.exclusion_terms() {
        parts.push(format!("-{term}"));
    }

    if let Some(sites) = site_clause(&form.selected_sites) {
        parts.push(sites);
    }
    if !form.custom_site.is_empty() {
        parts.push(format!("site:{}", form.custom_site));
    }

    if let Some(range) = form.date_range {
        let cutoff = today - Duration::days(range.days());
        parts.push(format!("after:{}", cutoff.format("%Y-%m-%d")));
    }

    parts.push(EXCLUDE_PAGE_EXTENSIONS.to_string());
    parts.push(EXCLUDE_SPAM_DOMAINS.to_string());

    parts.join(" ")
}

/// Same as [`synthesize`] with today's UTC date.
pub fn synthesize_now(form: &SearchFormState) -> String {
    synthesize(form, Utc::now().date_naive())
}

fn site_clause(sites: &[String]) -> Option<String> {
    match sites {
        [] => None,
        [single] => Some(format!("site:{single}")),
        many => {
            let joined = many
                .iter()
                .map(|s| format!("site:{s}"))
                .collect::<Vec<String>>()
                .join(" OR ");
            Some(format!("({joined})"))
        }
    }
}

#[test]
fn test_site_clause() {
    assert_eq!(site_clause(&[]), None);
    assert_eq!(
        site_clause(&["github.com".to_string()]),
        Some("site:github.com".to_string())
    );
    assert_eq!(
        site_clause(&[
            "wikipedia.org".to_string(),
            "github.com".to_string(),
            ".edu".to_string()
        ]),
        Some("(site:wikipedia.org OR site:github.com OR site:.edu)".to_string())
    );
}

#[test]
fn test_empty_form_is_only_boilerplate() {
    let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    let query = synthesize(&SearchFormState::default(), today);
    assert_eq!(
        query,
        format!("{EXCLUDE_PAGE_EXTENSIONS} {EXCLUDE_SPAM_DOMAINS}")
    );
}
