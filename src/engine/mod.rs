pub mod analyzer;
pub mod hunk;
pub mod imports;
pub mod symbols;

pub use analyzer::{FileChangeAnalysis, PatchAnalyzer};
pub use hunk::{parse_hunks, Hunk, HunkLine, LineKind, PatchError};
pub use imports::{detect_import_changes, ImportChange, ImportChangeType};
pub use symbols::{detect_symbol_changes, ChangeType, SymbolChange, SymbolKind};
