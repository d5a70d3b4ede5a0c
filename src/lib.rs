//! # patchmine
//!
//! Collects merged pull requests from GitHub repositories and turns their raw
//! unified-diff patches into structured, language-aware change records: which
//! functions and classes were added, removed, or modified, and which import
//! statements changed.
//!
//! ## Record Streams
//!
//! Eight per-language JSONL streams: PR metadata, review comments, commits,
//! file changes, diff hunks, function changes, class changes, imports.
//!
//! ## Supported Languages
//!
//! Python, JavaScript/TypeScript, Java, Go, C/C++. Detection is heuristic
//! line matching over diff fragments — deliberately not a real parser, since
//! hunks are syntactically incomplete by construction.

pub mod crawler;
pub mod engine;
pub mod grammars;
