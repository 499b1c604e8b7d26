use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PLACEHOLDER: &str = "Search anything";

/// What the file-type shortcut contributes to the query.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FileTypeFilter {
    /// `ext1|ext2|...` alternation, emitted as `+(...)` plus the index-of clause.
    Extensions(String),
    /// Only the `intitle:index.of` clause.
    DirectoryListing,
    /// Sentinel: the shortcut contributes nothing.
    Other,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    Video,
    Books,
    Music,
    Software,
    Images,
    Other,
}

impl FileCategory {
    pub const ALL: [FileCategory; 6] = [
        FileCategory::Video,
        FileCategory::Books,
        FileCategory::Music,
        FileCategory::Software,
        FileCategory::Images,
        FileCategory::Other,
    ];

    pub fn id(self) -> &'static str {
        match self {
            FileCategory::Video => "video",
            FileCategory::Books => "books",
            FileCategory::Music => "music",
            FileCategory::Software => "software",
            FileCategory::Images => "images",
            FileCategory::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FileCategory::Video => "TV/Movies/Video",
            FileCategory::Books => "Books",
            FileCategory::Music => "Music",
            FileCategory::Software => "Software/ISO/DMG/Games",
            FileCategory::Images => "Images",
            FileCategory::Other => "Other",
        }
    }

    /// `None` for the "other" sentinel.
    pub fn extensions(self) -> Option<&'static str> {
        match self {
            FileCategory::Video => Some("mkv|mp4|avi|mov|mpg|wmv|divx|mpeg"),
            FileCategory::Books => Some(
                "MOBI|CBZ|CBR|CBC|CHM|EPUB|FB2|LIT|LRF|ODT|PDF|PRC|PDB|PML|RB|RTF|TCR|DOC|DOCX",
            ),
            FileCategory::Music => Some("mp3|wav|ac3|ogg|flac|wma|m4a|aac|mod"),
            FileCategory::Software => Some("exe|iso|dmg|tar|7z|bz2|gz|rar|zip|apk"),
            FileCategory::Images => Some("jpg|png|bmp|gif|tif|tiff|psd"),
            FileCategory::Other => None,
        }
    }

    /// Example search shown as a hint once the category is picked.
    pub fn example(self) -> &'static str {
        match self {
            FileCategory::Video => "The.Blacklist.S01",
            FileCategory::Books => "1985",
            FileCategory::Music => "K.Flay discography",
            FileCategory::Software => "GTA V",
            FileCategory::Images => "Donald Trump",
            FileCategory::Other => "Search anything",
        }
    }

    pub fn placeholder(self) -> String {
        format!("{DEFAULT_PLACEHOLDER} e.g {}", self.example())
    }

    pub fn filter(self) -> FileTypeFilter {
        match self.extensions() {
            Some(exts) => FileTypeFilter::Extensions(exts.to_string()),
            None => FileTypeFilter::Other,
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteShortcut {
    pub id: &'static str,
    pub value: &'static str,
    pub label: &'static str,
}

pub const SITE_SHORTCUTS: [SiteShortcut; 6] = [
    SiteShortcut { id: "wikipedia", value: "wikipedia.org", label: "Wikipedia" },
    SiteShortcut { id: "youtube", value: "youtube.com", label: "YouTube" },
    SiteShortcut { id: "github", value: "github.com", label: "GitHub" },
    SiteShortcut { id: "stackoverflow", value: "stackoverflow.com", label: "StackOverflow" },
    SiteShortcut { id: "gov", value: ".gov", label: "Government (.gov)" },
    SiteShortcut { id: "edu", value: ".edu", label: "Education (.edu)" },
];

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    #[serde(alias = "d")]
    #[value(alias = "d")]
    Day,
    #[serde(alias = "w")]
    #[value(alias = "w")]
    Week,
    #[serde(alias = "m")]
    #[value(alias = "m")]
    Month,
    #[serde(alias = "y")]
    #[value(alias = "y")]
    Year,
}

impl DateRange {
    pub fn days(self) -> i64 {
        match self {
            DateRange::Day => 1,
            DateRange::Week => 7,
            DateRange::Month => 30,
            DateRange::Year => 365,
        }
    }
}

/// Everything the user can fill in. The query string is
/// re-derived from it after every change.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SearchFormState {
    pub free_text: String,
    pub file_type: Option<FileTypeFilter>,
    pub exact_phrase: String,
    /// Raw comma separated input, parsed by [`SearchFormState::exclusion_terms`].
    pub exclude_terms: String,
    pub selected_sites: Vec<String>,
    pub custom_site: String,
    pub date_range: Option<DateRange>,
}

impl SearchFormState {
    pub fn exclusion_terms(&self) -> Vec<&str> {
        self.exclude_terms
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Adds the site at the end of the selection, or removes it if already selected.
    pub fn toggle_site(&mut self, site: &str) {
        if let Some(pos) = self.selected_sites.iter().position(|s| s == site) {
            self.selected_sites.remove(pos);
        } else {
            self.selected_sites.push(site.to_string());
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub display_link: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchInformation {
    pub total_results: String,
    pub search_time: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum SearchOutcome {
    #[default]
    Idle,
    Loading,
    Success(Vec<SearchResult>),
    Empty,
    Failure(String),
}

impl SearchOutcome {
    pub fn results(&self) -> &[SearchResult] {
        match self {
            SearchOutcome::Success(results) => results,
            _ => &[],
        }
    }
}
