use anyhow::{Context, Result};

/// Fetch the OpenAPI document from an http(s) URL, or read it from disk
/// for any other location.
pub fn fetch_document(doc_url: &str) -> Result<String> {
    if doc_url.starts_with("http://") || doc_url.starts_with("https://") {
        log::debug!("fetching document from {doc_url}");
        let response = reqwest::blocking::get(doc_url)
            .with_context(|| format!("failed to fetch document from {doc_url}"))?
            .error_for_status()
            .with_context(|| format!("document fetch from {doc_url} returned an error status"))?;
        response
            .text()
            .with_context(|| format!("failed to read document body from {doc_url}"))
    } else {
        std::fs::read_to_string(doc_url)
            .with_context(|| format!("failed to read document {doc_url}"))
    }
}
