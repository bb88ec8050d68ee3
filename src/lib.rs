// File operations module
pub mod file;

// Locale module
pub mod locale;

// Context stack module
pub mod context;

// Insertion rules module
pub mod rules;

// Line rewriter module
pub mod rewrite;

// JSON report module
pub mod json;

// Re-exports
pub use file::{FileContent, FileError, read_file, write_file, compute_checksum};
pub use locale::{Locale, detect_locale};
pub use context::ContextStack;
pub use rules::{InsertionRule, RuleSet, RulesError};
pub use rewrite::{
    Insertion, RewriteOutcome, RewriteError, WriteMode,
    rewrite_content, rewrite_file, split_lines,
};
pub use json::{RewriteReport, InsertionJson, generate_execution_id};
