//! Single-pass line rewriter
//!
//! Walks the file top to bottom, keeps a [`ContextStack`] of open blocks and
//! emits configured lines ahead of marker lines. Existing lines are never
//! removed or reordered.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::context::ContextStack;
use crate::file::{FileError, compute_checksum, read_file, write_file};
use crate::locale::{Locale, detect_locale};
use crate::rules::{RuleSet, RulesError};

/// A line added by the rewriter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    /// Line number in the rewritten output (1-indexed)
    pub line: usize,
    /// Locale block the line was inserted into
    pub locale: Locale,
    /// Name of the rule that produced it
    pub rule: String,
    /// The inserted text, verbatim
    pub text: String,
}

/// Whether the rewritten content is written back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Overwrite the source file in place
    #[default]
    Overwrite,
    /// Compute the result only
    DryRun,
}

/// Result of one rewrite pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    /// Rewritten text, newline-joined with a trailing newline
    pub content: String,
    /// Number of lines in the input
    pub lines_in: usize,
    /// Number of lines in the output
    pub lines_out: usize,
    /// Inserted lines in output order
    pub insertions: Vec<Insertion>,
    /// Lines not inserted because the output already had them in place
    pub duplicates_skipped: usize,
    /// Closing lines seen while no block was open
    pub stack_underflows: usize,
    /// Blocks still open after the last line
    pub unclosed_blocks: usize,
    /// BLAKE3 checksum of the input
    pub original_checksum: String,
    /// BLAKE3 checksum of the output
    pub final_checksum: String,
}

impl RewriteOutcome {
    pub fn inserted_count(&self) -> usize {
        self.insertions.len()
    }

    /// True when the output differs byte-wise from the input
    pub fn changed(&self) -> bool {
        self.original_checksum != self.final_checksum
    }

    /// Human-readable notes about suspicious nesting
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.stack_underflows > 0 {
            warnings.push(format!(
                "{} closing line(s) found with no open block",
                self.stack_underflows
            ));
        }
        if self.unclosed_blocks > 0 {
            warnings.push(format!(
                "{} block(s) still open at end of file",
                self.unclosed_blocks
            ));
        }
        warnings
    }
}

/// Error types for rewrite operations
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    #[error(transparent)]
    File(#[from] FileError),

    #[error(transparent)]
    Rules(#[from] RulesError),
}

/// Append `line` unless the last buffered line already reads the same
///
/// Returns true when the line was appended.
fn push_unless_repeated(out: &mut Vec<String>, line: &str) -> bool {
    if out.last().is_some_and(|prev| prev.trim() == line.trim()) {
        return false;
    }
    out.push(line.to_string());
    true
}

/// True when the last buffered lines already read as `block`
fn ends_with_block(out: &[String], block: &[String]) -> bool {
    if block.is_empty() || out.len() < block.len() {
        return false;
    }
    out[out.len() - block.len()..]
        .iter()
        .zip(block)
        .all(|(prev, line)| prev.trim() == line.trim())
}

/// Characters that end a line: `\n`, `\r`, vertical tab, form feed, the
/// file/group/record separators, NEL and the Unicode line and paragraph
/// separators
pub(crate) fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}'
            | '\u{2028}' | '\u{2029}'
    )
}

/// Split text into lines on every [`is_line_break`] character
///
/// `\r\n` counts as one break. A trailing break does not start an empty
/// final line, and empty text has no lines.
pub fn split_lines(content: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = content.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&content[start..i]);
        start = i + c.len_utf8();
        if c == '\r' && chars.next_if(|&(_, next)| next == '\n').is_some() {
            start += 1;
        }
    }
    if start < content.len() {
        lines.push(&content[start..]);
    }
    lines
}

/// Rewrite text in memory
///
/// For each line, in order: a keyed opening line pushes onto the context
/// stack, then every rule whose marker starts the trimmed line and whose
/// scope matches the stack emits its lines for the current locale, then the
/// line itself is copied, then a closing line pops the stack.
///
/// A rule's lines are skipped as a whole when the output already ends with
/// them, and one at a time when a single line repeats its predecessor.
///
/// # Arguments
/// * `content` - The file content to rewrite
/// * `rules` - Insertion rules, evaluated in order
///
/// # Returns
/// * `RewriteOutcome` with the new content and what was inserted
pub fn rewrite_content(content: &str, rules: &RuleSet) -> RewriteOutcome {
    rewrite_checked(content, compute_checksum(content), rules)
}

fn rewrite_checked(content: &str, original_checksum: String, rules: &RuleSet) -> RewriteOutcome {
    let mut stack = ContextStack::new();
    let mut out: Vec<String> = Vec::new();
    let mut insertions = Vec::new();
    let mut duplicates_skipped = 0;
    let mut lines_in = 0;

    for line in split_lines(content) {
        lines_in += 1;
        let trimmed = line.trim();

        stack.observe_open(trimmed);

        for rule in &rules.rules {
            if !trimmed.starts_with(rule.marker.as_str()) || !stack.matches_scope(&rule.scope) {
                continue;
            }
            let Some(locale) = stack.segment(0).and_then(detect_locale) else {
                continue;
            };
            let block = rule.lines_for(locale);
            // A block inserted by an earlier run sits right before the marker
            if ends_with_block(&out, block) {
                debug!(rule = %rule.name, locale = %locale, "lines already present");
                duplicates_skipped += block.len();
                continue;
            }
            for text in block {
                if push_unless_repeated(&mut out, text) {
                    debug!(
                        line = out.len(),
                        locale = %locale,
                        rule = %rule.name,
                        context = %stack.path(),
                        "inserted line"
                    );
                    insertions.push(Insertion {
                        line: out.len(),
                        locale,
                        rule: rule.name.clone(),
                        text: text.clone(),
                    });
                } else {
                    duplicates_skipped += 1;
                }
            }
        }

        out.push(line.to_string());

        stack.observe_close(trimmed);
    }

    if stack.underflows() > 0 {
        warn!(count = stack.underflows(), "closing line with no open block");
    }
    if stack.depth() > 0 {
        warn!(
            depth = stack.depth(),
            context = %stack.path(),
            "blocks left open at end of input"
        );
    }

    let lines_out = out.len();
    let mut new_content = out.join("\n");
    new_content.push('\n');

    RewriteOutcome {
        original_checksum,
        final_checksum: compute_checksum(&new_content),
        content: new_content,
        lines_in,
        lines_out,
        insertions,
        duplicates_skipped,
        stack_underflows: stack.underflows(),
        unclosed_blocks: stack.depth(),
    }
}

/// Rewrite a file and, unless `mode` is [`WriteMode::DryRun`], overwrite it
///
/// The file is always rewritten in `Overwrite` mode, even when nothing was
/// inserted, so the trailing newline is normalized.
pub fn rewrite_file<P: AsRef<Path>>(
    path: P,
    rules: &RuleSet,
    mode: WriteMode,
) -> Result<RewriteOutcome, RewriteError> {
    let path_ref = path.as_ref();
    let file_content = read_file(path_ref)?;

    let outcome = rewrite_checked(&file_content.content, file_content.checksum.clone(), rules);

    if mode == WriteMode::Overwrite {
        write_file(path_ref, &outcome.content)?;
    }

    info!(
        file = %file_content.path,
        bytes = file_content.len,
        inserted = outcome.inserted_count(),
        duplicates = outcome.duplicates_skipped,
        dry_run = mode == WriteMode::DryRun,
        "rewrite finished"
    );

    Ok(outcome)
}
