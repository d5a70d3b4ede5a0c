use std::collections::HashMap;
use tracing::info;

use crate::grammars::Language;

#[derive(Debug, Default)]
pub struct CrawlStats {
    pub repos_attempted: u64,
    pub repos_processed: u64,
    pub repos_skipped_no_prs: u64,
    pub repos_skipped_too_many_prs: u64,
    pub repos_skipped_already_processed: u64,
    pub repos_failed: u64,
    pub prs_processed: u64,
    pub functions_detected: u64,
    pub classes_detected: u64,
    pub imports_extracted: u64,
    /// Distribution of analyzed file-changes by file language.
    pub language_counts: HashMap<&'static str, u64>,
}

impl CrawlStats {
    pub fn record_file_language(&mut self, language: Language) {
        *self.language_counts.entry(language.as_str()).or_insert(0) += 1;
    }

    pub fn log_summary(&self, api_calls: u64, rate_limit_remaining: i64) {
        info!("=== crawl statistics ===");
        info!("total api calls: {api_calls}");
        info!("remaining rate limit: {rate_limit_remaining}");
        info!("repos attempted: {}", self.repos_attempted);
        info!("repos successfully processed: {}", self.repos_processed);
        info!(
            "repos skipped (already processed): {}",
            self.repos_skipped_already_processed
        );
        info!("repos skipped (no PRs): {}", self.repos_skipped_no_prs);
        info!(
            "repos skipped (too many PRs): {}",
            self.repos_skipped_too_many_prs
        );
        info!("repos failed: {}", self.repos_failed);
        info!("PRs processed: {}", self.prs_processed);
        info!("functions detected: {}", self.functions_detected);
        info!("classes detected: {}", self.classes_detected);
        info!("imports extracted: {}", self.imports_extracted);
        info!("language distribution: {:?}", self.language_counts);
    }
}
