//! The crawl loop: repositories → merged PRs → commits → file-changes, with
//! the analysis engine invoked per analyzable file-change and every record
//! appended to its per-language JSONL stream.

use anyhow::Result;
use chrono::Utc;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

use super::client::{CommitFile, GithubClient, PullRequest};
use super::records::{
    CommitRecord, FileChangeRecord, HunkRecord, ImportChangeRecord, PrRecord, PrStats,
    ReviewCommentRecord, SymbolChangeRecord,
};
use super::repolist::{self, RepoInfo};
use super::sink::{self, JsonlSink};
use super::stats::CrawlStats;
use crate::engine::{PatchAnalyzer, SymbolKind};
use crate::grammars::Language;

const REPO_BATCH_SIZE: usize = 50;

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub repos_dir: PathBuf,
    pub target_repos: usize,
    pub max_prs_per_repo: Option<usize>,
    pub min_stars: u64,
    pub skip_if_too_many_prs: usize,
}

pub struct Crawler {
    client: GithubClient,
    analyzer: PatchAnalyzer,
    sink: JsonlSink,
    config: CrawlConfig,
    stats: CrawlStats,
}

impl Crawler {
    pub fn new(client: GithubClient, sink: JsonlSink, config: CrawlConfig) -> Self {
        Self {
            client,
            analyzer: PatchAnalyzer::new(),
            sink,
            config,
            stats: CrawlStats::default(),
        }
    }

    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    pub async fn run(&mut self, languages: &[String]) -> Result<()> {
        for language in languages {
            if let Err(err) = self.crawl_language(language).await {
                error!("failed to crawl language {language}: {err}");
            } else {
                info!("completed language: {language}");
            }
            sleep(Duration::from_secs(5)).await;
        }
        self.stats
            .log_summary(self.client.api_calls(), self.client.rate_limit_remaining());
        Ok(())
    }

    async fn crawl_language(&mut self, language: &str) -> Result<()> {
        let target = self.config.target_repos;
        info!("starting crawl for {language}, target {target} repos");

        let mut processed = sink::processed_repos(self.sink.dir(), language);
        let mut completed = processed.len();
        info!("resuming from previous progress: {completed}/{target} repos");
        if completed >= target {
            info!("target already reached");
            return Ok(());
        }

        let mut start_index = 0usize;
        while completed < target {
            let batch = repolist::load_batch(
                &self.config.repos_dir,
                language,
                self.config.min_stars,
                start_index,
                REPO_BATCH_SIZE,
            )?;
            if batch.is_empty() {
                warn!("no more repositories available ({completed}/{target} processed)");
                break;
            }

            for repo in &batch {
                if completed >= target {
                    break;
                }
                if processed.contains(&repo.full_name) {
                    info!("skipping already processed repo: {}", repo.full_name);
                    self.stats.repos_skipped_already_processed += 1;
                    continue;
                }

                self.stats.repos_attempted += 1;
                info!("processing repo: {}", repo.full_name);
                match self.crawl_repo(language, repo).await {
                    Ok(pr_count) if pr_count > 0 => {
                        completed += 1;
                        processed.insert(repo.full_name.clone());
                        self.stats.repos_processed += 1;
                        info!(
                            "completed repo {}: {pr_count} PRs ({completed}/{target})",
                            repo.full_name
                        );
                    }
                    Ok(_) => {}
                    Err(err) => {
                        error!("error processing repo {}: {err}", repo.full_name);
                        self.stats.repos_failed += 1;
                    }
                }
            }

            let batch_len = batch.len();
            start_index += REPO_BATCH_SIZE;
            if batch_len < REPO_BATCH_SIZE {
                break;
            }
        }

        info!("completed crawling {language}: {completed}/{target} repositories");
        Ok(())
    }

    /// Returns the number of PRs successfully processed; a repository counts
    /// toward the target only when at least one succeeded.
    async fn crawl_repo(&mut self, language: &str, repo: &RepoInfo) -> Result<usize> {
        let listing = self
            .client
            .list_merged_prs(&repo.owner, &repo.name, self.config.skip_if_too_many_prs)
            .await?;
        let Some(mut prs) = listing else {
            self.stats.repos_skipped_too_many_prs += 1;
            return Ok(0);
        };
        if prs.is_empty() {
            warn!("no merged PRs found for {}", repo.full_name);
            self.stats.repos_skipped_no_prs += 1;
            return Ok(0);
        }
        if let Some(max) = self.config.max_prs_per_repo {
            prs.truncate(max);
        }

        let total = prs.len();
        let mut processed_count = 0usize;
        for (idx, pr) in prs.iter().enumerate() {
            info!("processing PR {}/{total} (#{})", idx + 1, pr.number);
            match self.process_pr(language, repo, pr).await {
                Ok(true) => {
                    processed_count += 1;
                    self.stats.prs_processed += 1;
                }
                Ok(false) => {}
                Err(err) => warn!("error processing PR #{}: {err}", pr.number),
            }
            sleep(Duration::from_secs(1)).await;
        }
        Ok(processed_count)
    }

    async fn process_pr(&mut self, language: &str, repo: &RepoInfo, pr: &PullRequest) -> Result<bool> {
        let owner = &repo.owner;
        let name = &repo.name;

        let commits = self.client.pr_commits(owner, name, pr.number).await?;
        if commits.is_empty() {
            warn!("no commits found for PR #{}", pr.number);
            return Ok(false);
        }
        let files = self.client.pr_files(owner, name, pr.number).await?;
        let reviews = self.client.pr_reviews(owner, name, pr.number).await?;
        let review_comments = self.client.pr_review_comments(owner, name, pr.number).await?;

        let pr_record = PrRecord {
            repo_full_name: repo.full_name.clone(),
            repo_language: repo.language.clone(),
            repo_stars: repo.stars,
            pr_number: pr.number,
            pr_title: pr.title.clone().unwrap_or_default(),
            pr_body: pr.body.clone().unwrap_or_default(),
            pr_author: pr.user.as_ref().map(|u| u.login.clone()).unwrap_or_default(),
            pr_created_at: pr.created_at.clone(),
            pr_merged_at: pr.merged_at.clone(),
            pr_stats: PrStats {
                additions: files.iter().map(|f| f.additions).sum(),
                deletions: files.iter().map(|f| f.deletions).sum(),
                changed_files: files.len(),
                commits_count: commits.len(),
                reviews_count: reviews.len(),
                review_comments_count: review_comments.len(),
            },
            processed_at: Utc::now(),
        };
        self.sink.append(&stream(language, "pr_data"), &pr_record)?;

        for review in &reviews {
            let Some(body) = review.body.as_deref().filter(|b| !b.is_empty()) else {
                continue;
            };
            let record = ReviewCommentRecord {
                repo_full_name: repo.full_name.clone(),
                pr_number: pr.number,
                comment_type: "review",
                reviewer: review
                    .user
                    .as_ref()
                    .map(|u| u.login.clone())
                    .unwrap_or_default(),
                comment_text: body.to_string(),
                state: review.state.clone(),
                file_path: None,
                line_number: None,
                created_at: review.submitted_at.clone(),
            };
            self.sink
                .append(&stream(language, "review_comments"), &record)?;
        }
        for comment in &review_comments {
            let Some(body) = comment.body.as_deref().filter(|b| !b.is_empty()) else {
                continue;
            };
            let record = ReviewCommentRecord {
                repo_full_name: repo.full_name.clone(),
                pr_number: pr.number,
                comment_type: "review_comment",
                reviewer: comment
                    .user
                    .as_ref()
                    .map(|u| u.login.clone())
                    .unwrap_or_default(),
                comment_text: body.to_string(),
                state: None,
                file_path: comment.path.clone(),
                line_number: comment.line,
                created_at: comment.created_at.clone(),
            };
            self.sink
                .append(&stream(language, "review_comments"), &record)?;
        }

        for commit in &commits {
            let Some(detail) = self.client.commit_details(owner, name, &commit.sha).await? else {
                continue;
            };
            let author = commit.commit.author.clone().unwrap_or_default();
            let committed_at = commit
                .commit
                .committer
                .as_ref()
                .and_then(|c| c.date.clone());
            let commit_record = CommitRecord {
                repo_full_name: repo.full_name.clone(),
                pr_number: pr.number,
                commit_hash: commit.sha.clone(),
                commit_message: commit.commit.message.clone(),
                commit_author: author.name,
                commit_author_email: author.email,
                committed_at,
                commit_stats: detail.stats.clone(),
            };
            self.sink.append(&stream(language, "commits"), &commit_record)?;

            self.process_commit_files(language, repo, pr.number, &detail.sha, &detail.files)?;
            sleep(Duration::from_millis(300)).await;
        }

        info!("processed PR #{} with {} commits", pr.number, commits.len());
        Ok(true)
    }

    fn process_commit_files(
        &mut self,
        language: &str,
        repo: &RepoInfo,
        pr_number: u64,
        commit_hash: &str,
        files: &[CommitFile],
    ) -> Result<()> {
        // the engine is pure per file-change, so the whole commit fans out
        let inputs: Vec<(Option<&str>, Option<Language>)> = files
            .iter()
            .map(|f| (f.patch.as_deref(), Language::from_path(&f.filename)))
            .collect();
        let analyses = self.analyzer.analyze_many(&inputs);

        for (file, analysis) in files.iter().zip(&analyses) {
            self.sink.append(
                &stream(language, "file_changes"),
                &FileChangeRecord {
                    repo_full_name: repo.full_name.clone(),
                    pr_number,
                    commit_hash: commit_hash.to_string(),
                    file_path: file.filename.clone(),
                    file_language: analysis.language,
                    change_type: file.status.clone(),
                    additions: file.additions,
                    deletions: file.deletions,
                    changes: file.changes,
                    patch_content: file.patch.clone().unwrap_or_default(),
                },
            )?;

            let Some(file_language) = analysis.language else {
                continue;
            };
            self.stats.record_file_language(file_language);

            for (hunk_index, hunk) in analysis.hunks.iter().enumerate() {
                self.sink.append(
                    &stream(language, "diff_hunks"),
                    &HunkRecord {
                        repo_full_name: repo.full_name.clone(),
                        pr_number,
                        commit_hash: commit_hash.to_string(),
                        file_path: file.filename.clone(),
                        file_language,
                        hunk_index,
                        old_start: hunk.old_start,
                        old_count: hunk.old_count,
                        new_start: hunk.new_start,
                        new_count: hunk.new_count,
                        section: hunk.section.clone(),
                        content: hunk.content(),
                    },
                )?;
            }

            for change in &analysis.symbol_changes {
                let record = SymbolChangeRecord {
                    repo_full_name: repo.full_name.clone(),
                    pr_number,
                    commit_hash: commit_hash.to_string(),
                    file_path: file.filename.clone(),
                    file_language,
                    kind: change.kind,
                    name: change.name.clone(),
                    change_type: change.change_type,
                    old_signature: change.old_signature.clone(),
                    new_signature: change.new_signature.clone(),
                };
                match change.kind {
                    SymbolKind::Function => {
                        self.sink
                            .append(&stream(language, "function_changes"), &record)?;
                        self.stats.functions_detected += 1;
                    }
                    SymbolKind::Class => {
                        self.sink.append(&stream(language, "class_changes"), &record)?;
                        self.stats.classes_detected += 1;
                    }
                }
            }

            for import in &analysis.import_changes {
                self.sink.append(
                    &stream(language, "imports"),
                    &ImportChangeRecord {
                        repo_full_name: repo.full_name.clone(),
                        pr_number,
                        commit_hash: commit_hash.to_string(),
                        file_path: file.filename.clone(),
                        file_language,
                        module_name: import.module.clone(),
                        import_statement: import.statement.clone(),
                        change_type: import.change_type,
                    },
                )?;
                self.stats.imports_extracted += 1;
            }
        }

        Ok(())
    }
}

fn stream(language: &str, suffix: &str) -> String {
    format!("{language}_{suffix}")
}
