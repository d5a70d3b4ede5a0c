//! Shared grammar for the JS/TS extension family. TypeScript-only forms
//! (`interface`, `import type`) live here too since both languages resolve
//! to the same tag.

use super::{Language, LanguageGrammar, PatternRule, RuleKind};

pub(super) fn grammar() -> LanguageGrammar {
    LanguageGrammar {
        language: Some(Language::Javascript),
        line_comment: "//",
        rules: vec![
            PatternRule::new(
                RuleKind::Import,
                r#"^\s*import\s+type\s+(.+?)\s+from\s+["']([^"']+)["']"#,
                2,
            ),
            PatternRule::new(
                RuleKind::Import,
                r#"^\s*import\s+(.+?)\s+from\s+["']([^"']+)["']"#,
                2,
            ),
            PatternRule::new(RuleKind::Import, r#"^\s*import\s+["']([^"']+)["']"#, 1),
            PatternRule::new(
                RuleKind::Import,
                r#"^\s*const\s+(.+?)\s*=\s*require\s*\(\s*["']([^"']+)["']\s*\)"#,
                2,
            ),
            PatternRule::new(
                RuleKind::Import,
                r#"^\s*require\s*\(\s*["']([^"']+)["']\s*\)"#,
                1,
            ),
            PatternRule::new(
                RuleKind::Class,
                r"class\s+([a-zA-Z_$][a-zA-Z0-9_$]*)\s*[{(]",
                1,
            ),
            PatternRule::new(
                RuleKind::Class,
                r"interface\s+([a-zA-Z_$][a-zA-Z0-9_$]*)\s*[{<]",
                1,
            ),
            PatternRule::new(
                RuleKind::Function,
                r"function\s+([a-zA-Z_$][a-zA-Z0-9_$]*)\s*\(",
                1,
            ),
            PatternRule::new(
                RuleKind::Function,
                r"const\s+([a-zA-Z_$][a-zA-Z0-9_$]*)\s*=\s*\(",
                1,
            ),
            PatternRule::new(
                RuleKind::Function,
                r"([a-zA-Z_$][a-zA-Z0-9_$]*)\s*:\s*function\s*\(",
                1,
            ),
            PatternRule::new(
                RuleKind::Function,
                r"([a-zA-Z_$][a-zA-Z0-9_$]*)\s*\([^)]*\)\s*=>",
                1,
            ),
        ],
    }
}
