use crate::models::{ReviewRecord, ScrapeRequest};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

/// Destination for the records of a finished run
#[async_trait]
pub trait ReviewSink: Send + Sync {
    /// Persist the records, returning where they went
    async fn persist(&self, request: &ScrapeRequest, records: &[ReviewRecord]) -> Result<PathBuf>;
}

/// Writes a pretty-printed JSON array into a directory
pub struct JsonFileSink {
    output_dir: PathBuf,
}

impl JsonFileSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

/// `<company with whitespace as underscores>_<source>_reviews.json`
pub fn output_file_name(request: &ScrapeRequest) -> String {
    let company = request.company().split_whitespace().collect::<Vec<_>>().join("_");
    format!("{}_{}_reviews.json", company, request.source().key())
}

#[async_trait]
impl ReviewSink for JsonFileSink {
    async fn persist(&self, request: &ScrapeRequest, records: &[ReviewRecord]) -> Result<PathBuf> {
        let path = self.output_dir.join(output_file_name(request));
        let json = serde_json::to_string_pretty(records).context("Failed to serialize reviews")?;

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .with_context(|| format!("Failed to create {}", self.output_dir.display()))?;
        tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        info!(count = records.len(), path = %path.display(), "💾 Saved {} reviews", records.len());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Rating, Source};

    fn request() -> ScrapeRequest {
        ScrapeRequest::parse("Acme  Cloud Suite", "2024-01-01", "2024-01-31", "TrustRadius").unwrap()
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name(&request()), "Acme_Cloud_Suite_trustradius_reviews.json");
    }

    #[tokio::test]
    async fn test_writes_pretty_json_array() {
        let dir = std::env::temp_dir().join(format!("review-scout-sink-{}", std::process::id()));
        let records = vec![ReviewRecord {
            source: Source::TrustRadius,
            title: "Solid".to_string(),
            reviewer: "Ana".to_string(),
            date: "2024-01-10".to_string(),
            rating: Some(Rating::from_ten_point(8.0)),
            pros: "Fast".to_string(),
            cons: String::new(),
            problems_solved: String::new(),
        }];

        let path = JsonFileSink::new(&dir).persist(&request(), &records).await.unwrap();
        let written = tokio::fs::read_to_string(&path).await.unwrap();

        assert!(written.starts_with("[\n  {\n    \"source\": \"TrustRadius\""), "{written}");
        let parsed: Vec<ReviewRecord> = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, records);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
