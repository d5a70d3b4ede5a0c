use super::{Language, LanguageGrammar, PatternRule, RuleKind};

// Grouped `import ( ... )` blocks span several diff lines and cannot be
// matched by a single-line rule; only the members that are themselves plain
// or aliased import lines are caught.
pub(super) fn grammar() -> LanguageGrammar {
    LanguageGrammar {
        language: Some(Language::Golang),
        line_comment: "//",
        rules: vec![
            PatternRule::new(RuleKind::Import, r#"^\s*import\s+"([^"]+)""#, 1),
            PatternRule::new(
                RuleKind::Import,
                r#"^\s*import\s+([a-zA-Z_][a-zA-Z0-9_]*)\s+"([^"]+)""#,
                2,
            ),
            PatternRule::new(
                RuleKind::Class,
                r"type\s+([a-zA-Z_][a-zA-Z0-9_]*)\s+struct\s*\{",
                1,
            ),
            PatternRule::new(
                RuleKind::Function,
                r"func\s+([a-zA-Z_][a-zA-Z0-9_]*)\s*\(",
                1,
            ),
            PatternRule::new(
                RuleKind::Function,
                r"func\s+\([^)]*\)\s+([a-zA-Z_][a-zA-Z0-9_]*)\s*\(",
                1,
            ),
        ],
    }
}
