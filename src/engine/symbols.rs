use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::hunk::{Hunk, LineKind};
use crate::grammars::{LanguageGrammar, RuleKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Function,
    Class,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Added,
    Removed,
    Modified,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolChange {
    pub kind: SymbolKind,
    pub name: String,
    pub change_type: ChangeType,
    pub old_signature: Option<String>,
    pub new_signature: Option<String>,
}

/// Which line-kinds a `(kind, name)` group was observed with, plus the first
/// signature text seen per kind.
#[derive(Debug, Default)]
struct Evidence {
    order: usize,
    added: bool,
    removed: bool,
    context: bool,
    added_text: Option<String>,
    removed_text: Option<String>,
    context_text: Option<String>,
}

/// Detects function/class declarations that were added, removed, or modified.
///
/// Every hunk line (and the hunk's section trailer, as context-kind evidence)
/// is matched against the grammar; candidates are grouped by `(kind, name)`
/// and classified in one pass:
///
/// - only added-line evidence → `added`
/// - only removed-line evidence → `removed`
/// - mixed line-kinds, or any context-kind evidence → `modified`
///
/// `modified` wins ties: a declaration seen in both an added and a removed
/// role within one patch is a body edit or in-place rename, not an unrelated
/// add+remove pair. Same-named declarations in different scopes are not
/// disambiguated; constructs that match no naming rule are dropped.
pub fn detect_symbol_changes(hunks: &[Hunk], grammar: &LanguageGrammar) -> Vec<SymbolChange> {
    if grammar.is_empty() {
        return Vec::new();
    }

    let mut groups: HashMap<(SymbolKind, String), Evidence> = HashMap::new();
    let mut next_order = 0usize;

    for hunk in hunks {
        if !hunk.section.is_empty() {
            observe(
                &mut groups,
                &mut next_order,
                grammar,
                &hunk.section,
                LineKind::Context,
            );
        }
        for line in &hunk.lines {
            observe(&mut groups, &mut next_order, grammar, &line.text, line.kind);
        }
    }

    let mut changes: Vec<(usize, SymbolChange)> = groups
        .into_iter()
        .map(|((kind, name), evidence)| {
            let change_type = if (evidence.added && evidence.removed) || evidence.context {
                ChangeType::Modified
            } else if evidence.added {
                ChangeType::Added
            } else {
                ChangeType::Removed
            };
            let old_signature = evidence
                .removed_text
                .or_else(|| evidence.context_text.clone());
            let new_signature = evidence.added_text.or(evidence.context_text);
            (
                evidence.order,
                SymbolChange {
                    kind,
                    name,
                    change_type,
                    old_signature,
                    new_signature,
                },
            )
        })
        .collect();

    changes.sort_by_key(|(order, _)| *order);
    changes.into_iter().map(|(_, change)| change).collect()
}

fn observe(
    groups: &mut HashMap<(SymbolKind, String), Evidence>,
    next_order: &mut usize,
    grammar: &LanguageGrammar,
    text: &str,
    line_kind: LineKind,
) {
    let Some(matched) = grammar.match_line(text) else {
        return;
    };
    let kind = match matched.kind {
        RuleKind::Function => SymbolKind::Function,
        RuleKind::Class => SymbolKind::Class,
        RuleKind::Import => return,
    };

    let evidence = groups.entry((kind, matched.name)).or_insert_with(|| {
        let order = *next_order;
        *next_order += 1;
        Evidence {
            order,
            ..Evidence::default()
        }
    });

    let signature = text.trim().to_string();
    match line_kind {
        LineKind::Added => {
            evidence.added = true;
            evidence.added_text.get_or_insert(signature);
        }
        LineKind::Removed => {
            evidence.removed = true;
            evidence.removed_text.get_or_insert(signature);
        }
        LineKind::Context => {
            evidence.context = true;
            evidence.context_text.get_or_insert(signature);
        }
    }
}
