use patchmine::engine::{detect_symbol_changes, parse_hunks, ChangeType, SymbolChange, SymbolKind};
use patchmine::grammars::{grammar_for, Language};

fn detect(patch: &str, language: Language) -> Vec<SymbolChange> {
    let hunks = parse_hunks(patch).unwrap();
    detect_symbol_changes(&hunks, grammar_for(Some(language)))
}

#[test]
fn added_python_function_is_detected() {
    let patch = "@@ -1,2 +1,5 @@\n context\n+def foo():\n+    return 1\n context";
    let changes = detect(patch, Language::Python);

    assert_eq!(changes.len(), 1);
    let change = &changes[0];
    assert_eq!(change.kind, SymbolKind::Function);
    assert_eq!(change.name, "foo");
    assert_eq!(change.change_type, ChangeType::Added);
    assert_eq!(change.new_signature.as_deref(), Some("def foo():"));
    assert!(change.old_signature.is_none());
}

#[test]
fn signature_edit_is_modified_with_both_signatures() {
    let patch = "@@ -1,2 +1,2 @@\n-def foo(x):\n+def foo(x, y):\n     return x";
    let changes = detect(patch, Language::Python);

    assert_eq!(changes.len(), 1);
    let change = &changes[0];
    assert_eq!(change.name, "foo");
    assert_eq!(change.change_type, ChangeType::Modified);
    assert_eq!(change.old_signature.as_deref(), Some("def foo(x):"));
    assert_eq!(change.new_signature.as_deref(), Some("def foo(x, y):"));
}

#[test]
fn removed_class_is_detected() {
    let patch = "@@ -1,3 +1,1 @@\n-class Widget(Base):\n-    pass\n context";
    let changes = detect(patch, Language::Python);

    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].kind, SymbolKind::Class);
    assert_eq!(changes[0].name, "Widget");
    assert_eq!(changes[0].change_type, ChangeType::Removed);
}

#[test]
fn context_signature_anchors_a_body_edit() {
    let patch = "@@ -10,2 +10,2 @@\n def handler(self):\n-    return 1\n+    return 2";
    let changes = detect(patch, Language::Python);

    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].name, "handler");
    assert_eq!(changes[0].change_type, ChangeType::Modified);
}

#[test]
fn section_trailer_counts_as_context_evidence() {
    let patch = "@@ -4,2 +4,2 @@ def compute(a, b):\n     x = 1\n-    y = 2\n+    y = 3";
    let changes = detect(patch, Language::Python);

    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].name, "compute");
    assert_eq!(changes[0].change_type, ChangeType::Modified);
}

#[test]
fn mixed_evidence_across_hunks_is_never_plain_added_or_removed() {
    // foo and bar each appear once removed and once added, in sibling hunks
    let patch = "@@ -1,1 +1,1 @@\n-def foo(a):\n+def bar(a):\n@@ -9,1 +9,1 @@\n-def bar(b):\n+def foo(b):";
    let changes = detect(patch, Language::Python);

    assert_eq!(changes.len(), 2);
    for change in &changes {
        assert_eq!(change.change_type, ChangeType::Modified);
    }
}

#[test]
fn duplicate_declarations_collapse_to_one_change() {
    let patch = "@@ -1,1 +1,2 @@\n ctx\n+def foo():\n@@ -8,1 +9,2 @@\n ctx\n+def foo():";
    let changes = detect(patch, Language::Python);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].change_type, ChangeType::Added);
}

#[test]
fn anonymous_constructs_are_dropped() {
    let patch = "@@ -1,1 +1,2 @@\n ctx\n+result = map(lambda x: x + 1, items)";
    let changes = detect(patch, Language::Python);
    assert!(changes.is_empty());
}

#[test]
fn go_method_receiver_is_detected() {
    let patch = "@@ -1,1 +1,3 @@\n ctx\n+func (s *Server) Start() error {\n+\treturn nil";
    let changes = detect(patch, Language::Golang);

    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].kind, SymbolKind::Function);
    assert_eq!(changes[0].name, "Start");
    assert_eq!(changes[0].change_type, ChangeType::Added);
}

#[test]
fn go_struct_is_a_class_change() {
    let patch = "@@ -1,1 +1,3 @@\n ctx\n+type Config struct {\n+\tName string";
    let changes = detect(patch, Language::Golang);
    assert_eq!(changes[0].kind, SymbolKind::Class);
    assert_eq!(changes[0].name, "Config");
}

#[test]
fn java_return_type_change_is_modified() {
    let patch = "@@ -3,2 +3,2 @@\n-    public int getCount() {\n+    public long getCount() {\n     }";
    let changes = detect(patch, Language::Java);

    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].name, "getCount");
    assert_eq!(changes[0].change_type, ChangeType::Modified);
}

#[test]
fn cpp_out_of_class_definition_keeps_qualified_name() {
    let patch = "@@ -1,1 +1,3 @@\n ctx\n+void Widget::resize(int w) {\n+}";
    let changes = detect(patch, Language::Cpp);

    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].kind, SymbolKind::Function);
    assert_eq!(changes[0].name, "Widget::resize");
}

#[test]
fn javascript_interface_is_a_class_change() {
    let patch = "@@ -1,1 +1,3 @@\n ctx\n+interface Props {\n+  name: string;";
    let changes = detect(patch, Language::Javascript);
    assert_eq!(changes[0].kind, SymbolKind::Class);
    assert_eq!(changes[0].name, "Props");
}

#[test]
fn unsupported_grammar_detects_nothing() {
    let patch = "@@ -1,1 +1,2 @@\n ctx\n+def foo():";
    let hunks = parse_hunks(patch).unwrap();
    let changes = detect_symbol_changes(&hunks, grammar_for(None));
    assert!(changes.is_empty());
}
