use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::hunk::{Hunk, LineKind};
use crate::grammars::{LanguageGrammar, RuleKind};

/// An import statement is a complete, atomic line: it is either present or
/// absent, so there is no modified state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportChangeType {
    Added,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportChange {
    pub module: String,
    pub statement: String,
    pub change_type: ImportChangeType,
}

/// Extracts added/removed import statements from the hunks, in order of first
/// occurrence. Duplicates are collapsed by exact statement text per change
/// type; a module removed in one place and re-added in another (a reordering)
/// keeps both entries — the output is faithful to the literal diff, not to
/// inferred intent. Comment lines are skipped.
pub fn detect_import_changes(hunks: &[Hunk], grammar: &LanguageGrammar) -> Vec<ImportChange> {
    if grammar.is_empty() {
        return Vec::new();
    }

    let mut seen: HashSet<(ImportChangeType, String)> = HashSet::new();
    let mut changes = Vec::new();

    for hunk in hunks {
        for line in &hunk.lines {
            let change_type = match line.kind {
                LineKind::Added => ImportChangeType::Added,
                LineKind::Removed => ImportChangeType::Removed,
                LineKind::Context => continue,
            };
            if grammar.is_comment(&line.text) {
                continue;
            }
            let Some(matched) = grammar.match_line(&line.text) else {
                continue;
            };
            if matched.kind != RuleKind::Import {
                continue;
            }

            let statement = line.text.trim().to_string();
            if seen.insert((change_type, statement.clone())) {
                changes.push(ImportChange {
                    module: matched.name,
                    statement,
                    change_type,
                });
            }
        }
    }

    changes
}
