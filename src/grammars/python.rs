use super::{Language, LanguageGrammar, PatternRule, RuleKind};

pub(super) fn grammar() -> LanguageGrammar {
    LanguageGrammar {
        language: Some(Language::Python),
        line_comment: "#",
        rules: vec![
            PatternRule::new(RuleKind::Import, r"^\s*from\s+(\S+)\s+import\s+.+", 1),
            PatternRule::new(RuleKind::Import, r"^\s*import\s+(.+)", 1),
            PatternRule::new(
                RuleKind::Class,
                r"class\s+([a-zA-Z_][a-zA-Z0-9_]*)\s*[(:]",
                1,
            ),
            PatternRule::new(
                RuleKind::Function,
                r"def\s+([a-zA-Z_][a-zA-Z0-9_]*)\s*\(",
                1,
            ),
        ],
    }
}
