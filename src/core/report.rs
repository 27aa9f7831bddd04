use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::facts::{MethodFact, RouteFact};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassEntry {
    pub file: PathBuf,
    pub extends: Option<String>,
    pub methods: Vec<MethodFact>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub file: PathBuf,
}

/// Inventory of a source project's controllers, models, routes, libraries
/// and helpers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub controllers: IndexMap<String, ClassEntry>,
    pub models: IndexMap<String, ClassEntry>,
    pub routes: Vec<RouteFact>,
    pub libraries: IndexMap<String, FileEntry>,
    pub helpers: IndexMap<String, FileEntry>,
    /// Files that could not be read or parsed, keyed by path.
    #[serde(rename = "_errors", default, skip_serializing_if = "IndexMap::is_empty")]
    pub errors: IndexMap<PathBuf, String>,
}

impl AnalysisReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn route(&self, uri: &str) -> Option<&RouteFact> {
        self.routes.iter().find(|route| route.uri == uri)
    }
}

/// One section of a [`MigrationReport`].
///
/// Serializes as `{"success": <value>}` or `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Outcome<T> {
    Failed { success: bool, error: String },
    Completed { success: T },
}

impl<T> Outcome<T> {
    pub fn failed(error: impl Into<String>) -> Self {
        Outcome::Failed {
            success: false,
            error: error.into(),
        }
    }

    pub fn completed(value: T) -> Self {
        Outcome::Completed { success: value }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Completed { success } => Some(success),
            Outcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Failed { error, .. } => Some(error),
            Outcome::Completed { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MigrationReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Outcome<AnalysisReport>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion: Option<Outcome<bool>>,
}

impl MigrationReport {
    pub fn is_empty(&self) -> bool {
        self.analysis.is_none() && self.conversion.is_none()
    }

    pub fn conversion_succeeded(&self) -> bool {
        matches!(
            self.conversion,
            Some(Outcome::Completed { success: true })
        )
    }

    pub fn analysis(&self) -> Option<&AnalysisReport> {
        self.analysis.as_ref().and_then(Outcome::value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_outcome_shapes() {
        let ok: Outcome<bool> = Outcome::completed(true);
        let failed: Outcome<bool> = Outcome::failed("No converter found for CI3");
        assert_eq!(serde_json::to_value(&ok).unwrap(), json!({"success": true}));
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({"success": false, "error": "No converter found for CI3"})
        );
    }

    #[test]
    fn test_outcome_round_trips_failure() {
        let parsed: Outcome<bool> =
            serde_json::from_value(json!({"success": false, "error": "boom"})).unwrap();
        assert_eq!(parsed.error(), Some("boom"));
        let parsed: Outcome<bool> = serde_json::from_value(json!({"success": false})).unwrap();
        assert_eq!(parsed.value(), Some(&false));
    }

    #[test]
    fn test_conversion_succeeded() {
        let mut report = MigrationReport::default();
        assert!(report.is_empty());
        assert!(!report.conversion_succeeded());
        report.conversion = Some(Outcome::completed(true));
        assert!(report.conversion_succeeded());
        report.conversion = Some(Outcome::failed("x"));
        assert!(!report.conversion_succeeded());
    }

    #[test]
    fn test_errors_key_is_underscored() {
        let mut report = AnalysisReport::default();
        report
            .errors
            .insert(PathBuf::from("Broken.php"), "syntax error".into());
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["_errors"]["Broken.php"], "syntax error");
    }
}
