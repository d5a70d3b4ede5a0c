use super::{Language, LanguageGrammar, PatternRule, RuleKind};

pub(super) fn grammar() -> LanguageGrammar {
    LanguageGrammar {
        language: Some(Language::Java),
        line_comment: "//",
        rules: vec![
            PatternRule::new(RuleKind::Import, r"^\s*import\s+(?:static\s+)?([^;]+);", 1),
            PatternRule::new(
                RuleKind::Class,
                r"(?:public|private|protected|abstract|final|\s)*\s*class\s+([a-zA-Z_][a-zA-Z0-9_]*)\s*[{<]",
                1,
            ),
            PatternRule::new(
                RuleKind::Function,
                r"(?:public|private|protected|static|\s)*\s+\w+\s+([a-zA-Z_][a-zA-Z0-9_]*)\s*\(",
                1,
            ),
        ],
    }
}
