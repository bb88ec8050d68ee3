//! Insertion rules: which lines go where, per locale

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::locale::Locale;
use crate::rewrite::is_line_break;

/// A single insertion: literal lines placed before a marker line
///
/// The rule fires on a line whose trimmed form starts with `marker` when the
/// context stack reads `<locale>.<scope...>` from the outermost block. The
/// locale entry selects which lines to insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertionRule {
    /// Short name used in reports
    pub name: String,
    /// Prefix of the trimmed line that triggers the rule
    pub marker: String,
    /// Block identifiers expected after the locale on the context stack
    pub scope: Vec<String>,
    /// Lines to insert, verbatim including indentation
    pub lines: BTreeMap<Locale, Vec<String>>,
}

impl InsertionRule {
    /// Lines configured for `locale`, empty if none
    pub fn lines_for(&self, locale: Locale) -> &[String] {
        self.lines.get(&locale).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Ordered collection of insertion rules
///
/// Rules are evaluated in order for every line, so when two rules share a
/// marker their lines land in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    pub rules: Vec<InsertionRule>,
}

/// Error types for rule loading
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("Failed to read rules file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse rules file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Rule '{name}' has an empty marker")]
    EmptyMarker { name: String },

    #[error("Rule '{name}' has a line break inside its {locale} line {index}")]
    LineBreakInLine {
        name: String,
        locale: Locale,
        index: usize,
    },
}

const TH_STATUS: &str = "        statusLabel: 'สถานะ',";
const EN_STATUS: &str = "        statusLabel: 'Status',";
const TH_ACTIONS: &str = "        actionsLabel: 'การจัดการ',";
const EN_ACTIONS: &str = "        actionsLabel: 'Actions',";

fn rule(
    name: &str,
    marker: &str,
    scope: &[&str],
    lines: Vec<(Locale, Vec<&str>)>,
) -> InsertionRule {
    InsertionRule {
        name: name.to_string(),
        marker: marker.to_string(),
        scope: scope.iter().map(|s| s.to_string()).collect(),
        lines: lines
            .into_iter()
            .map(|(locale, ls)| (locale, ls.into_iter().map(str::to_string).collect()))
            .collect(),
    }
}

impl Default for RuleSet {
    /// Status column for the admin locations table, status and actions
    /// columns for the admin lockers table.
    fn default() -> Self {
        Self {
            rules: vec![
                rule(
                    "locations",
                    "backAdmin:",
                    &["admin", "locations"],
                    vec![(Locale::Thai, vec![TH_STATUS]), (Locale::English, vec![EN_STATUS])],
                ),
                rule(
                    "lockers",
                    "manageCompartments:",
                    &["admin", "lockers"],
                    vec![
                        (Locale::Thai, vec![TH_STATUS, TH_ACTIONS]),
                        (Locale::English, vec![EN_STATUS, EN_ACTIONS]),
                    ],
                ),
            ],
        }
    }
}

impl RuleSet {
    /// Parse a rule set from JSON text
    pub fn from_json_str(json: &str, origin: &str) -> Result<Self, RulesError> {
        let set: RuleSet = serde_json::from_str(json).map_err(|source| RulesError::Parse {
            path: origin.to_string(),
            source,
        })?;
        set.validate()?;
        Ok(set)
    }

    /// Load a rule set from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, RulesError> {
        let path_ref = path.as_ref();
        let origin = path_ref.display().to_string();
        let json = fs::read_to_string(path_ref).map_err(|source| RulesError::Read {
            path: origin.clone(),
            source,
        })?;
        Self::from_json_str(&json, &origin)
    }

    fn validate(&self) -> Result<(), RulesError> {
        // An empty marker would match every line in scope
        if let Some(bad) = self.rules.iter().find(|r| r.marker.is_empty()) {
            return Err(RulesError::EmptyMarker { name: bad.name.clone() });
        }
        // Each entry must stay one output line
        for rule in &self.rules {
            for (locale, lines) in &rule.lines {
                if let Some(index) = lines.iter().position(|l| l.chars().any(is_line_break)) {
                    return Err(RulesError::LineBreakInLine {
                        name: rule.name.clone(),
                        locale: *locale,
                        index,
                    });
                }
            }
        }
        Ok(())
    }
}
