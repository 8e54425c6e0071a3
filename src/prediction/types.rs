use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// FieldRecord
// ---------------------------------------------------------------------------

/// One patient row: field name → raw string value, in header order.
///
/// Keys are unique. A repeated header keeps its first position and takes the
/// later value. A header with no matching value cell maps to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRecord {
    fields: Vec<(String, Option<String>)>,
}

impl FieldRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a field.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Raw value for a field, `None` when absent or when the cell was missing.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == name)
    }

    /// Fields in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Factor / PredictionResult
// ---------------------------------------------------------------------------

/// A contributing factor shown next to the prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub name: String,
    pub value: f64,
}

/// The structured result handed back to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub patient_name: String,
    pub prediction: String,
    pub confidence: f64,
    pub factors: Vec<Factor>,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Output of a condition model: the winning condition and its match ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// `None` when nothing matched.
    pub condition: Option<String>,
    pub score: f64,
}

impl Classification {
    pub fn matched(condition: impl Into<String>, score: f64) -> Self {
        Self {
            condition: Some(condition.into()),
            score,
        }
    }

    pub fn no_match() -> Self {
        Self {
            condition: None,
            score: 0.0,
        }
    }

    pub fn is_match(&self) -> bool {
        self.condition.is_some() && self.score > 0.0
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Confidence-driven qualifier prefixed to the predicted condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    /// Strict thresholds, checked from the top: > 0.8, > 0.6, > 0.4.
    pub fn from_confidence(confidence: f64) -> Option<Self> {
        if confidence > 0.8 {
            Some(Self::Severe)
        } else if confidence > 0.6 {
            Some(Self::Moderate)
        } else if confidence > 0.4 {
            Some(Self::Mild)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mild => "Mild",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
        }
    }

    /// `"Severe Diabetes"`, or the bare label when no qualifier applies.
    pub fn qualify(label: &str, confidence: f64) -> String {
        match Self::from_confidence(confidence) {
            Some(severity) => format!("{} {label}", severity.as_str()),
            None => label.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// PredictionError
// ---------------------------------------------------------------------------

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    #[error("CSV must contain a header line and a data line (found {lines} line(s))")]
    MalformedInput { lines: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keeps_first_position_and_last_value() {
        let mut record = FieldRecord::new();
        record.insert("Name", Some("A".into()));
        record.insert("Glucose", Some("90".into()));
        record.insert("Name", Some("B".into()));

        let keys: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Name", "Glucose"]);
        assert_eq!(record.get("Name"), Some("B"));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn record_missing_cell_is_none_but_present() {
        let mut record = FieldRecord::new();
        record.insert("Iron", None);
        assert!(record.contains("Iron"));
        assert_eq!(record.get("Iron"), None);
        assert_eq!(record.get("Absent"), None);
    }

    #[test]
    fn result_serializes_camel_case() {
        let result = PredictionResult {
            patient_name: "John Doe".into(),
            prediction: "Severe Diabetes".into(),
            confidence: 1.0,
            factors: vec![Factor {
                name: "Glucose".into(),
                value: 0.6,
            }],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["patientName"], "John Doe");
        assert_eq!(json["prediction"], "Severe Diabetes");
        assert_eq!(json["confidence"], 1.0);
        assert_eq!(json["factors"][0]["name"], "Glucose");
        assert_eq!(json.as_object().unwrap().len(), 4);
    }

    #[test]
    fn severity_boundaries_are_strict() {
        assert_eq!(Severity::from_confidence(0.81), Some(Severity::Severe));
        assert_eq!(Severity::from_confidence(0.80), Some(Severity::Moderate));
        assert_eq!(Severity::from_confidence(0.61), Some(Severity::Moderate));
        assert_eq!(Severity::from_confidence(0.60), Some(Severity::Mild));
        assert_eq!(Severity::from_confidence(0.41), Some(Severity::Mild));
        assert_eq!(Severity::from_confidence(0.40), None);
        assert_eq!(Severity::from_confidence(0.0), None);
    }

    #[test]
    fn qualify_prefixes_label() {
        assert_eq!(Severity::qualify("Diabetes", 1.0), "Severe Diabetes");
        assert_eq!(Severity::qualify("Normal Condition", 0.65), "Moderate Normal Condition");
        assert_eq!(Severity::qualify("Anemia", 1.0 / 3.0), "Anemia");
    }

    #[test]
    fn no_match_is_not_a_match() {
        assert!(!Classification::no_match().is_match());
        assert!(Classification::matched("Anemia", 0.34).is_match());
    }

    #[test]
    fn malformed_input_message_counts_lines() {
        let err = PredictionError::MalformedInput { lines: 1 };
        assert!(err.to_string().contains("found 1 line"));
    }
}
