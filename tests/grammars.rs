use patchmine::grammars::{grammar_for, Language, RuleKind};

#[test]
fn extension_families_resolve_to_one_tag() {
    for path in ["a.js", "b.jsx", "c.ts", "components/d.tsx"] {
        assert_eq!(Language::from_path(path), Some(Language::Javascript));
    }
    for path in ["a.cpp", "b.cc", "c.cxx", "d.c++", "e.hpp", "include/f.h"] {
        assert_eq!(Language::from_path(path), Some(Language::Cpp));
    }
}

#[test]
fn single_extension_languages_resolve_one_to_one() {
    assert_eq!(Language::from_path("pkg/mod.py"), Some(Language::Python));
    assert_eq!(Language::from_path("Main.java"), Some(Language::Java));
    assert_eq!(Language::from_path("cmd/main.go"), Some(Language::Golang));
}

#[test]
fn extension_lookup_is_case_insensitive() {
    assert_eq!(Language::from_path("LEGACY.PY"), Some(Language::Python));
}

#[test]
fn unknown_extensions_have_no_tag() {
    assert_eq!(Language::from_path("README.md"), None);
    assert_eq!(Language::from_path("Makefile"), None);
    assert_eq!(Language::from_path("script.rb"), None);
}

#[test]
fn unknown_tag_gets_the_empty_grammar() {
    assert!(grammar_for(None).is_empty());
}

#[test]
fn every_configured_language_has_rules() {
    for language in Language::all() {
        let grammar = grammar_for(Some(language));
        assert!(!grammar.is_empty(), "{language:?} grammar missing rules");
        assert!(!grammar.line_comment.is_empty());
    }
}

#[test]
fn first_matching_rule_wins() {
    // an import line is claimed by the import rule, never by a symbol rule
    let grammar = grammar_for(Some(Language::Python));
    let matched = grammar.match_line("import os").unwrap();
    assert_eq!(matched.kind, RuleKind::Import);
    assert_eq!(matched.name, "os");
}

#[test]
fn class_rules_match_before_function_rules() {
    let grammar = grammar_for(Some(Language::Javascript));
    let matched = grammar.match_line("class Store {").unwrap();
    assert_eq!(matched.kind, RuleKind::Class);
    assert_eq!(matched.name, "Store");
}

#[test]
fn comment_detection_uses_the_language_marker() {
    assert!(grammar_for(Some(Language::Python)).is_comment("  # note"));
    assert!(!grammar_for(Some(Language::Python)).is_comment("import os"));
    assert!(grammar_for(Some(Language::Golang)).is_comment("// note"));
}
