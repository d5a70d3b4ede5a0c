use patchmine::crawler::repolist::{load_batch, repo_list_file};
use std::fs;
use std::path::Path;

fn write_list(dir: &Path, language: &str, lines: &[&str]) {
    fs::write(repo_list_file(dir, language), lines.join("\n")).unwrap();
}

#[test]
fn batch_windows_count_only_qualifying_entries() {
    let dir = tempfile::TempDir::new().unwrap();
    write_list(
        dir.path(),
        "python",
        &[
            r#"{"repo_name": "octo/alpha", "star_count": 5000}"#,
            r#"{"repo_name": "octo/tiny", "star_count": 100}"#,
            r#"{"repo_name": "octo/beta", "star_count": 2000, "language": "Python"}"#,
            r#"{"repo_name": "octo/gamma", "star_count": 1500}"#,
        ],
    );

    let first = load_batch(dir.path(), "python", 1000, 0, 2).unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].full_name, "octo/alpha");
    assert_eq!(first[1].full_name, "octo/beta");
    assert_eq!(first[0].owner, "octo");
    assert_eq!(first[0].name, "alpha");

    let second = load_batch(dir.path(), "python", 1000, 2, 2).unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].full_name, "octo/gamma");
}

#[test]
fn star_filter_drops_low_star_repos() {
    let dir = tempfile::TempDir::new().unwrap();
    write_list(
        dir.path(),
        "python",
        &[r#"{"repo_name": "octo/tiny", "star_count": 10}"#],
    );

    let repos = load_batch(dir.path(), "python", 1000, 0, 50).unwrap();
    assert!(repos.is_empty());
}

#[test]
fn list_files_use_github_language_naming() {
    let dir = Path::new("lists");
    assert!(repo_list_file(dir, "cpp").ends_with("top_c++_stars_this_year.jsonl"));
    assert!(repo_list_file(dir, "golang").ends_with("top_go_stars_this_year.jsonl"));
    assert!(repo_list_file(dir, "python").ends_with("top_python_stars_this_year.jsonl"));
}

#[test]
fn malformed_entries_are_skipped() {
    let dir = tempfile::TempDir::new().unwrap();
    write_list(
        dir.path(),
        "python",
        &[
            "garbage line",
            r#"{"repo_name": "octo/alpha", "star_count": 5000}"#,
        ],
    );

    let repos = load_batch(dir.path(), "python", 1000, 0, 50).unwrap();
    assert_eq!(repos.len(), 1);
}

#[test]
fn missing_list_file_is_an_error() {
    let dir = tempfile::TempDir::new().unwrap();
    assert!(load_batch(dir.path(), "python", 1000, 0, 50).is_err());
}
