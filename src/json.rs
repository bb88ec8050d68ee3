use serde::Serialize;

use crate::locale::Locale;
use crate::rewrite::{Insertion, RewriteOutcome};

/// Generate a fresh execution id (UUID v4)
pub fn generate_execution_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// One inserted line, as reported
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsertionJson {
    pub line: usize,
    pub locale: Locale,
    pub rule: String,
    pub text: String,
}

impl From<&Insertion> for InsertionJson {
    fn from(insertion: &Insertion) -> Self {
        Self {
            line: insertion.line,
            locale: insertion.locale,
            rule: insertion.rule.clone(),
            text: insertion.text.clone(),
        }
    }
}

/// Report of a single run, printed as text or JSON
#[derive(Debug, Clone, Serialize)]
pub struct RewriteReport {
    pub execution_id: String,
    pub file: String,
    pub success: bool,
    pub changed: bool,
    pub dry_run: bool,
    pub lines_in: usize,
    pub lines_out: usize,
    pub inserted_count: usize,
    pub duplicate_count: usize,
    pub original_checksum: String,
    pub final_checksum: String,
    pub insertions: Vec<InsertionJson>,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RewriteReport {
    /// Build a success report from a rewrite outcome
    pub fn success(
        execution_id: String,
        file: String,
        dry_run: bool,
        outcome: &RewriteOutcome,
    ) -> Self {
        Self {
            execution_id,
            file,
            success: true,
            changed: outcome.changed(),
            dry_run,
            lines_in: outcome.lines_in,
            lines_out: outcome.lines_out,
            inserted_count: outcome.inserted_count(),
            duplicate_count: outcome.duplicates_skipped,
            original_checksum: outcome.original_checksum.clone(),
            final_checksum: outcome.final_checksum.clone(),
            insertions: outcome.insertions.iter().map(InsertionJson::from).collect(),
            warnings: outcome.warnings(),
            error: None,
        }
    }

    /// Build a failure report
    pub fn failure(execution_id: String, file: String, dry_run: bool, error: String) -> Self {
        Self {
            execution_id,
            file,
            success: false,
            changed: false,
            dry_run,
            lines_in: 0,
            lines_out: 0,
            inserted_count: 0,
            duplicate_count: 0,
            original_checksum: String::new(),
            final_checksum: String::new(),
            insertions: Vec::new(),
            warnings: Vec::new(),
            error: Some(error),
        }
    }

    /// Plain-text summary
    pub fn to_human(&self) -> String {
        if !self.success {
            return format!("Error: {}", self.error.as_deref().unwrap_or("Unknown error"));
        }

        let mut text = format!(
            "{} {} line(s) into {}\n\
             Skipped {} line(s) already present\n\
             Lines: {} -> {}\n\
             Final checksum: {}",
            if self.dry_run { "Would insert" } else { "Inserted" },
            self.inserted_count,
            self.file,
            self.duplicate_count,
            self.lines_in,
            self.lines_out,
            self.final_checksum,
        );
        for insertion in &self.insertions {
            text.push_str(&format!(
                "\n  {}:{} [{}] {}",
                insertion.locale,
                insertion.line,
                insertion.rule,
                insertion.text.trim()
            ));
        }
        for warning in &self.warnings {
            text.push_str(&format!("\nWarning: {}", warning));
        }
        text
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| {
            r#"{"error": "Failed to serialize report"}"#.to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::rewrite_content;
    use crate::rules::RuleSet;

    const INPUT: &str =
        "en: {\n  admin: {\n    locations: {\n      backAdmin: 'Back',\n    },\n  },\n},\n";

    #[test]
    fn test_execution_id_is_uuid() {
        let id = generate_execution_id();
        assert_eq!(id.len(), 36);
        assert_ne!(id, generate_execution_id());
    }

    #[test]
    fn test_success_report_json_shape() {
        let outcome = rewrite_content(INPUT, &RuleSet::default());
        let report =
            RewriteReport::success("run-1".to_string(), "t.ts".to_string(), false, &outcome);

        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["changed"], true);
        assert_eq!(json["inserted_count"], 1);
        assert_eq!(json["lines_out"], 8);
        assert_eq!(json["insertions"][0]["locale"], "en");
        assert_eq!(json["insertions"][0]["line"], 4);
        assert_eq!(json["insertions"][0]["rule"], "locations");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_human_summary() {
        let outcome = rewrite_content(INPUT, &RuleSet::default());
        let report =
            RewriteReport::success("run-1".to_string(), "t.ts".to_string(), true, &outcome);

        let text = report.to_human();
        assert!(text.starts_with("Would insert 1 line(s) into t.ts"));
        assert!(text.contains("en:4 [locations] statusLabel: 'Status',"));
        assert!(text.contains("Lines: 7 -> 8"));
    }

    #[test]
    fn test_failure_report() {
        let report = RewriteReport::failure(
            "run-2".to_string(),
            "t.ts".to_string(),
            true,
            "File not found: t.ts".to_string(),
        );

        assert_eq!(report.to_human(), "Error: File not found: t.ts");
        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["dry_run"], true);
        assert_eq!(json["error"], "File not found: t.ts");
    }
}
