pub mod cpp;
pub mod golang;
pub mod java;
pub mod javascript;
pub mod python;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Canonical language tag. One tag covers a whole file-extension family:
/// `.js/.jsx/.ts/.tsx` all resolve to `Javascript`, the C/C++ header and
/// source extensions all resolve to `Cpp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Javascript,
    Java,
    Golang,
    Cpp,
}

impl Language {
    pub fn from_path(path: &str) -> Option<Self> {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())?
            .to_ascii_lowercase();

        match extension.as_str() {
            "py" => Some(Language::Python),
            "js" | "jsx" | "ts" | "tsx" => Some(Language::Javascript),
            "java" => Some(Language::Java),
            "go" => Some(Language::Golang),
            "cpp" | "cc" | "cxx" | "c++" | "hpp" | "h" => Some(Language::Cpp),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Javascript => "javascript",
            Language::Java => "java",
            Language::Golang => "golang",
            Language::Cpp => "cpp",
        }
    }

    pub fn all() -> [Language; 5] {
        [
            Language::Python,
            Language::Javascript,
            Language::Java,
            Language::Golang,
            Language::Cpp,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Function,
    Class,
    Import,
}

/// A single line-matching rule. `name_group` selects the capture group that
/// holds the symbol or module name (the ES6 `import X from 'mod'` rule, for
/// example, captures the module in group 2).
#[derive(Debug)]
pub struct PatternRule {
    pub kind: RuleKind,
    pub pattern: Regex,
    pub name_group: usize,
}

impl PatternRule {
    pub(crate) fn new(kind: RuleKind, pattern: &str, name_group: usize) -> Self {
        Self {
            kind,
            pattern: Regex::new(pattern).expect("invalid grammar pattern"),
            name_group,
        }
    }

    fn extract_name(&self, line: &str) -> Option<String> {
        self.pattern
            .captures(line)
            .and_then(|caps| caps.get(self.name_group))
            .map(|m| m.as_str().trim().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub kind: RuleKind,
    pub name: String,
}

/// The per-language rule bundle. Rule order is significant: the first rule
/// matching a line claims it, which resolves overlapping patterns (import
/// rules come first, then class rules, then function rules).
#[derive(Debug)]
pub struct LanguageGrammar {
    pub language: Option<Language>,
    pub rules: Vec<PatternRule>,
    pub line_comment: &'static str,
}

impl LanguageGrammar {
    fn empty() -> Self {
        Self {
            language: None,
            rules: Vec::new(),
            line_comment: "",
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn match_line(&self, line: &str) -> Option<RuleMatch> {
        for rule in &self.rules {
            if let Some(name) = rule.extract_name(line) {
                return Some(RuleMatch {
                    kind: rule.kind,
                    name,
                });
            }
        }
        None
    }

    pub fn is_comment(&self, line: &str) -> bool {
        !self.line_comment.is_empty() && line.trim_start().starts_with(self.line_comment)
    }
}

static GRAMMARS: Lazy<HashMap<Language, LanguageGrammar>> = Lazy::new(|| {
    let mut table = HashMap::with_capacity(5);
    table.insert(Language::Python, python::grammar());
    table.insert(Language::Javascript, javascript::grammar());
    table.insert(Language::Java, java::grammar());
    table.insert(Language::Golang, golang::grammar());
    table.insert(Language::Cpp, cpp::grammar());
    table
});

static EMPTY: Lazy<LanguageGrammar> = Lazy::new(LanguageGrammar::empty);

/// Looks up the grammar for a tag. Unknown or absent tags get the empty
/// grammar, so downstream detectors degrade to a no-op instead of failing.
pub fn grammar_for(language: Option<Language>) -> &'static LanguageGrammar {
    language
        .and_then(|lang| GRAMMARS.get(&lang))
        .unwrap_or(&EMPTY)
}
