use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `@@ -oldStart[,oldCount] +newStart[,newCount] @@ section`
static HUNK_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@(.*)$").unwrap());

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("patch has content but no recognizable hunk header")]
    MalformedPatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Added,
    Removed,
    Context,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HunkLine {
    pub kind: LineKind,
    pub text: String,
}

/// One contiguous block of a patch. Immutable once parsed; `lines` preserves
/// file order, which downstream detectors rely on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hunk {
    pub old_start: u32,
    pub old_count: u32,
    pub new_start: u32,
    pub new_count: u32,
    /// Trailing text after the closing `@@` — git puts the enclosing
    /// declaration here.
    pub section: String,
    pub lines: Vec<HunkLine>,
}

impl Hunk {
    /// Lines present in the old version (removed + context).
    pub fn old_line_span(&self) -> u32 {
        self.lines
            .iter()
            .filter(|line| line.kind != LineKind::Added)
            .count() as u32
    }

    /// Lines present in the new version (added + context).
    pub fn new_line_span(&self) -> u32 {
        self.lines
            .iter()
            .filter(|line| line.kind != LineKind::Removed)
            .count() as u32
    }

    /// Marker-prefixed body, the shape the hunk record stream stores.
    pub fn content(&self) -> String {
        let mut body = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                body.push('\n');
            }
            body.push(match line.kind {
                LineKind::Added => '+',
                LineKind::Removed => '-',
                LineKind::Context => ' ',
            });
            body.push_str(&line.text);
        }
        body
    }
}

/// Tokenizes one unified-diff patch string into hunks.
///
/// An empty or whitespace-only patch yields an empty sequence (binary files,
/// renames without content, deletions reported without body). Lines before
/// the first hunk header are file headers and are skipped. A non-empty patch
/// with no header at all is `MalformedPatch` — recoverable, the caller treats
/// the file as zero-hunk.
///
/// Declared counts are advisory: real-world patches occasionally truncate,
/// so a mismatch against the classified lines is never fatal.
pub fn parse_hunks(patch: &str) -> Result<Vec<Hunk>, PatchError> {
    if patch.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut hunks: Vec<Hunk> = Vec::new();

    for line in patch.lines() {
        if let Some(caps) = HUNK_HEADER.captures(line) {
            hunks.push(Hunk {
                old_start: caps[1].parse().unwrap_or(0),
                old_count: caps.get(2).map_or(1, |m| m.as_str().parse().unwrap_or(1)),
                new_start: caps[3].parse().unwrap_or(0),
                new_count: caps.get(4).map_or(1, |m| m.as_str().parse().unwrap_or(1)),
                section: caps
                    .get(5)
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default(),
                lines: Vec::new(),
            });
            continue;
        }

        let Some(hunk) = hunks.last_mut() else {
            continue;
        };

        let (kind, text) = match line.as_bytes().first() {
            Some(b'+') => (LineKind::Added, &line[1..]),
            Some(b'-') => (LineKind::Removed, &line[1..]),
            Some(b' ') => (LineKind::Context, &line[1..]),
            // e.g. `\ No newline at end of file`
            _ => (LineKind::Context, line),
        };
        hunk.lines.push(HunkLine {
            kind,
            text: text.to_string(),
        });
    }

    if hunks.is_empty() {
        return Err(PatchError::MalformedPatch);
    }
    Ok(hunks)
}
