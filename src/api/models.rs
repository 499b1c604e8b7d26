use serde::Serialize;

use crate::data_models::{SearchOutcome, SiteShortcut};

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub outcome: SearchOutcome,
    pub processing_time_ms: u128,
}

#[derive(Debug, Serialize)]
pub struct FileTypeOption {
    pub id: &'static str,
    pub label: &'static str,
    pub extensions: Option<&'static str>,
    pub placeholder: String,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub file_types: Vec<FileTypeOption>,
    pub sites: Vec<SiteShortcut>,
}
