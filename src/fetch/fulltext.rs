//! Best-effort PDF acquisition. Downloads happen into memory and extraction
//! works on the in-memory document, so there is nothing to clean up on any
//! exit path. Every failure maps to `None`; callers fall back to the
//! abstract.

use tracing::{debug, warn};

/// Download a PDF and extract its plain text. Never errors out: transport
/// failures, bad statuses, and unparseable documents all yield `None`.
pub async fn fetch_pdf_text(client: &reqwest::Client, url: &str) -> Option<String> {
    let resp = match client.get(url).send().await {
        Ok(r) => r,
        Err(e) => {
            warn!(error = ?e, url, "pdf download failed");
            return None;
        }
    };
    if !resp.status().is_success() {
        warn!(status = %resp.status(), url, "pdf download returned non-success");
        return None;
    }
    let bytes = match resp.bytes().await {
        Ok(b) => b,
        Err(e) => {
            warn!(error = ?e, url, "pdf body read failed");
            return None;
        }
    };
    extract_pdf_text(&bytes)
}

/// Extract text from raw PDF bytes with lopdf.
pub fn extract_pdf_text(bytes: &[u8]) -> Option<String> {
    let doc = match lopdf::Document::load_mem(bytes) {
        Ok(d) => d,
        Err(e) => {
            debug!(error = ?e, "pdf parse failed");
            return None;
        }
    };
    let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
    if pages.is_empty() {
        return None;
    }
    match doc.extract_text(&pages) {
        Ok(text) if !text.trim().is_empty() => Some(text),
        Ok(_) => None,
        Err(e) => {
            debug!(error = ?e, "pdf text extraction failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_yield_none() {
        assert_eq!(extract_pdf_text(b"not a pdf at all"), None);
        assert_eq!(extract_pdf_text(&[]), None);
    }
}
