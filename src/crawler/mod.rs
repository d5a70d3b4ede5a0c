pub mod client;
pub mod records;
pub mod repolist;
pub mod runner;
pub mod sink;
pub mod stats;

pub use client::GithubClient;
pub use repolist::RepoInfo;
pub use runner::{CrawlConfig, Crawler};
pub use sink::JsonlSink;
pub use stats::CrawlStats;
