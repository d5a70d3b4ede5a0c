use rayon::prelude::*;
use tracing::warn;

use super::hunk::{parse_hunks, Hunk};
use super::imports::{detect_import_changes, ImportChange};
use super::symbols::{detect_symbol_changes, SymbolChange};
use crate::grammars::{grammar_for, Language};

/// Everything the engine derives from one file-change: the parsed hunks and
/// the symbol/import changes found in them. Built fresh per call and handed
/// off whole; the engine keeps nothing across calls.
#[derive(Debug, Clone)]
pub struct FileChangeAnalysis {
    pub language: Option<Language>,
    pub hunks: Vec<Hunk>,
    pub symbol_changes: Vec<SymbolChange>,
    pub import_changes: Vec<ImportChange>,
}

impl FileChangeAnalysis {
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }
}

/// The analysis orchestrator: a pure function of (patch text, language tag).
pub struct PatchAnalyzer;

impl PatchAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyzes one file-change. Never fails: an absent or empty patch yields
    /// zero hunks, a malformed patch degrades to zero hunks with a warning,
    /// and an unknown language tag degrades to empty symbol/import results.
    pub fn analyze(&self, patch: Option<&str>, language: Option<Language>) -> FileChangeAnalysis {
        let hunks = match parse_hunks(patch.unwrap_or_default()) {
            Ok(hunks) => hunks,
            Err(err) => {
                warn!("treating file as zero-hunk: {err}");
                Vec::new()
            }
        };

        let grammar = grammar_for(language);
        let symbol_changes = detect_symbol_changes(&hunks, grammar);
        let import_changes = detect_import_changes(&hunks, grammar);

        FileChangeAnalysis {
            language,
            hunks,
            symbol_changes,
            import_changes,
        }
    }

    /// Analyzes a batch of file-changes in parallel. The engine holds no
    /// shared mutable state, so entries are independent.
    pub fn analyze_many(
        &self,
        files: &[(Option<&str>, Option<Language>)],
    ) -> Vec<FileChangeAnalysis> {
        files
            .par_iter()
            .map(|(patch, language)| self.analyze(*patch, *language))
            .collect()
    }
}

impl Default for PatchAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
