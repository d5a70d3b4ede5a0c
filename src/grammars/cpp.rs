use super::{Language, LanguageGrammar, PatternRule, RuleKind};

pub(super) fn grammar() -> LanguageGrammar {
    LanguageGrammar {
        language: Some(Language::Cpp),
        line_comment: "//",
        rules: vec![
            PatternRule::new(RuleKind::Import, r"^\s*#include\s*<([^>]+)>", 1),
            PatternRule::new(RuleKind::Import, r#"^\s*#include\s*"([^"]+)""#, 1),
            PatternRule::new(RuleKind::Import, r"^\s*using\s+namespace\s+([^;]+);", 1),
            PatternRule::new(
                RuleKind::Class,
                r"class\s+([a-zA-Z_][a-zA-Z0-9_]*)\s*[{:]",
                1,
            ),
            PatternRule::new(
                RuleKind::Class,
                r"struct\s+([a-zA-Z_][a-zA-Z0-9_]*)\s*[{:]",
                1,
            ),
            // Out-of-class definitions keep the qualified Type::method name.
            PatternRule::new(
                RuleKind::Function,
                r"([a-zA-Z_][a-zA-Z0-9_]*::[a-zA-Z_][a-zA-Z0-9_]*)\s*\(",
                1,
            ),
            PatternRule::new(
                RuleKind::Function,
                r"(?:inline\s+)?(?:static\s+)?(?:virtual\s+)?(?:const\s+)?\w+\s+([a-zA-Z_][a-zA-Z0-9_]*)\s*\(",
                1,
            ),
        ],
    }
}
