// service/verification_service.rs
use std::sync::Arc;

use regex::Regex;

use crate::service::{error::ServiceError, ocr::OcrEngine};

/// Decides whether a submitted screenshot is genuine evidence that the
/// submitter subscribed to the order's channel.
///
/// There is no public API to check another viewer's subscription, so the
/// check is OCR + heuristics over a user-submitted screenshot, backstopped
/// by manual admin review.
pub struct VerificationService {
    ocr: Arc<dyn OcrEngine>,
}

impl VerificationService {
    pub fn new(ocr: Arc<dyn OcrEngine>) -> Self {
        Self { ocr }
    }

    pub async fn verify_subscription_proof(
        &self,
        youtube_link: &str,
        screenshot: &str,
    ) -> Result<bool, ServiceError> {
        let handle = extract_channel_handle(youtube_link)?;

        let extracted = match self.ocr.extract_text(screenshot).await {
            Ok(text) => text.to_lowercase(),
            Err(err) => {
                // Extraction failure degrades to "no match"; the claim stays
                // reviewable by an admin.
                tracing::warn!("OCR extraction failed for {}: {}", screenshot, err);
                String::new()
            }
        };

        Ok(verify_content(&extracted, &handle))
    }
}

/// Pulls the @handle segment out of a channel link, lowercased.
pub fn extract_channel_handle(youtube_link: &str) -> Result<String, ServiceError> {
    let re = Regex::new(r"@([\w-]+)").unwrap();
    re.captures(youtube_link)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
        .ok_or_else(|| ServiceError::MalformedChannelLink(youtube_link.to_string()))
}

/// Strips whitespace and every character outside `[a-z0-9@_-]`, lowercasing
/// the rest. Applied to both the OCR output and the target handle so that
/// punctuation noise cannot break the comparison.
fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(|c| c.to_lowercase())
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '@' | '-' | '_'))
        .collect()
}

fn is_separator(b: u8) -> bool {
    matches!(b, b'-' | b'_')
}

/// True when `text` contains `handle`, tolerating a single inserted
/// separator between consecutive handle characters (OCR likes to smear
/// underscores and dashes into handles).
fn contains_handle_fuzzy(text: &str, handle: &str) -> bool {
    if handle.is_empty() {
        return false;
    }
    if text.contains(handle) {
        return true;
    }

    let tb = text.as_bytes();
    let hb = handle.as_bytes();

    'outer: for start in 0..tb.len() {
        if tb[start] != hb[0] {
            continue;
        }
        let mut ti = start + 1;
        for &expected in &hb[1..] {
            if ti < tb.len() && tb[ti] == expected {
                ti += 1;
                continue;
            }
            if ti + 1 < tb.len() && is_separator(tb[ti]) && tb[ti + 1] == expected {
                ti += 2;
                continue;
            }
            continue 'outer;
        }
        return true;
    }

    false
}

/// A positive match requires both the channel handle and the literal word
/// "subscribed" to appear in the extracted text.
pub fn verify_content(extracted_text: &str, handle: &str) -> bool {
    let clean_text = normalize(extracted_text);
    let target = normalize(handle);

    let has_handle = contains_handle_fuzzy(&clean_text, &target)
        || contains_handle_fuzzy(&clean_text, &format!("@{}", target));
    let has_subscribed = clean_text.contains("subscribed");

    has_handle && has_subscribed
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::service::ocr::{OcrEngine, OcrError};

    #[test]
    fn extracts_handle_from_channel_links() {
        assert_eq!(
            extract_channel_handle("https://youtube.com/@TechChannel").unwrap(),
            "techchannel"
        );
        assert_eq!(
            extract_channel_handle("https://www.youtube.com/@some-creator_1/videos").unwrap(),
            "some-creator_1"
        );
    }

    #[test]
    fn link_without_handle_is_malformed() {
        let err = extract_channel_handle("https://youtube.com/watch?v=abc123").unwrap_err();
        assert!(matches!(err, ServiceError::MalformedChannelLink(_)));
    }

    #[test]
    fn normalization_strips_noise() {
        assert_eq!(normalize("  Sub scribed! to @Tech, Channel. "), "subscribedto@techchannel");
    }

    #[test]
    fn match_requires_both_handle_and_subscribed() {
        assert!(verify_content("You are Subscribed to @techchannel", "techchannel"));
        // handle present, word missing
        assert!(!verify_content("watching @techchannel right now", "techchannel"));
        // word present, handle missing
        assert!(!verify_content("subscribed to some other channel", "techchannel"));
        assert!(!verify_content("", "techchannel"));
    }

    #[test]
    fn handle_match_tolerates_single_inserted_separators() {
        // OCR smeared the handle with separators between characters
        assert!(verify_content("subscribed t-e-c-h", "tech"));
        assert!(verify_content("subscribed te_ch", "tech"));
        // two separators in a row is beyond tolerance
        assert!(!verify_content("subscribed te--ch", "tech"));
    }

    #[test]
    fn handle_with_at_prefix_matches() {
        assert!(verify_content("subscribed @techchannel", "techchannel"));
    }

    struct FailingOcr;

    #[async_trait]
    impl OcrEngine for FailingOcr {
        async fn extract_text(&self, _image_url: &str) -> Result<String, OcrError> {
            Err(OcrError::Timeout)
        }
    }

    struct FixedOcr(&'static str);

    #[async_trait]
    impl OcrEngine for FixedOcr {
        async fn extract_text(&self, _image_url: &str) -> Result<String, OcrError> {
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn ocr_failure_degrades_to_no_match() {
        let service = VerificationService::new(Arc::new(FailingOcr));
        let verified = service
            .verify_subscription_proof("https://youtube.com/@techchannel", "shot.png")
            .await
            .unwrap();
        assert!(!verified);
    }

    #[tokio::test]
    async fn positive_proof_verifies() {
        let service = VerificationService::new(Arc::new(FixedOcr(
            "Subscribed \n @TechChannel",
        )));
        let verified = service
            .verify_subscription_proof("https://youtube.com/@TechChannel", "shot.png")
            .await
            .unwrap();
        assert!(verified);
    }

    #[tokio::test]
    async fn malformed_link_errors_before_ocr_runs() {
        let service = VerificationService::new(Arc::new(FailingOcr));
        let result = service
            .verify_subscription_proof("https://youtube.com/watch?v=zzz", "shot.png")
            .await;
        assert!(matches!(result, Err(ServiceError::MalformedChannelLink(_))));
    }
}
