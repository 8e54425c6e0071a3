use super::parser::parse_lab_value;
use super::reference::{DiseasePattern, DISEASE_PATTERNS};
use super::types::{Classification, FieldRecord};

// ---------------------------------------------------------------------------
// Pattern scoring
// ---------------------------------------------------------------------------

/// Share of a pattern's indicators whose value strictly exceeds its threshold.
/// Absent or non-numeric values never match.
pub fn score_pattern(record: &FieldRecord, pattern: &DiseasePattern) -> f64 {
    if pattern.indicators.is_empty() {
        return 0.0;
    }

    let matching = pattern
        .indicators
        .iter()
        .filter(|indicator| {
            record
                .get(indicator.field)
                .and_then(parse_lab_value)
                .is_some_and(|value| value > indicator.threshold)
        })
        .count();

    matching as f64 / pattern.indicators.len() as f64
}

/// Score every pattern independently, in table order.
pub fn score_all<'a>(
    record: &FieldRecord,
    patterns: &'a [DiseasePattern],
) -> Vec<(&'a str, f64)> {
    patterns
        .iter()
        .map(|pattern| (pattern.name, score_pattern(record, pattern)))
        .collect()
}

/// Highest score; on a tie the earliest entry wins.
pub fn top_match<'a>(scores: &[(&'a str, f64)]) -> Option<(&'a str, f64)> {
    let mut best: Option<(&'a str, f64)> = None;
    for &(name, score) in scores {
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((name, score)),
        }
    }
    best
}

// ---------------------------------------------------------------------------
// ConditionModel
// ---------------------------------------------------------------------------

/// Decides which condition a record points to.
pub trait ConditionModel: Send + Sync {
    fn classify(&self, record: &FieldRecord) -> Classification;
}

/// Threshold rule table: the pattern with the highest match ratio wins, and a
/// top ratio of 0 is no match.
#[derive(Debug, Clone, Copy)]
pub struct RuleTableModel {
    patterns: &'static [DiseasePattern],
}

impl RuleTableModel {
    pub fn new(patterns: &'static [DiseasePattern]) -> Self {
        Self { patterns }
    }
}

impl Default for RuleTableModel {
    fn default() -> Self {
        Self::new(DISEASE_PATTERNS)
    }
}

impl ConditionModel for RuleTableModel {
    fn classify(&self, record: &FieldRecord) -> Classification {
        let scores = score_all(record, self.patterns);
        tracing::debug!(?scores, "Disease pattern scores");

        match top_match(&scores) {
            Some((name, score)) if score > 0.0 => Classification::matched(name, score),
            _ => Classification::no_match(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::parser::parse_record;
    use crate::prediction::reference::Indicator;

    fn record(csv: &str) -> FieldRecord {
        parse_record(csv).unwrap()
    }

    #[test]
    fn all_diabetes_indicators_exceeded() {
        let r = record("Name,Glucose,HbA1c,Insulin\nJohn Doe,150,7.0,30");
        assert_eq!(score_pattern(&r, &DISEASE_PATTERNS[0]), 1.0);
    }

    #[test]
    fn threshold_is_strict() {
        let r = record("Glucose,HbA1c,Insulin\n126,6.5,25");
        assert_eq!(score_pattern(&r, &DISEASE_PATTERNS[0]), 0.0);
    }

    #[test]
    fn partial_match_ratio() {
        let r = record("Glucose,HbA1c,Insulin\n130,5.0,oops");
        let score = score_pattern(&r, &DISEASE_PATTERNS[0]);
        assert!((score - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn missing_fields_score_zero() {
        let r = record("Name\nJane");
        for pattern in DISEASE_PATTERNS {
            assert_eq!(score_pattern(&r, pattern), 0.0);
        }
    }

    #[test]
    fn empty_pattern_scores_zero() {
        let pattern = DiseasePattern {
            name: "Empty",
            indicators: &[],
        };
        assert_eq!(score_pattern(&record("A\n1"), &pattern), 0.0);
    }

    #[test]
    fn scores_follow_table_order() {
        let r = record("ALT,AST\n50,50");
        let scores = score_all(&r, DISEASE_PATTERNS);
        assert_eq!(scores.len(), 5);
        assert_eq!(scores[3].0, "Liver Disease");
        assert!((scores[3].1 - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn tie_goes_to_first_pattern() {
        let scores = vec![("Diabetes", 1.0 / 3.0), ("Anemia", 1.0 / 3.0), ("Kidney Disease", 0.0)];
        assert_eq!(top_match(&scores), Some(("Diabetes", 1.0 / 3.0)));
    }

    #[test]
    fn highest_score_wins() {
        let scores = vec![("Diabetes", 1.0 / 3.0), ("Anemia", 2.0 / 3.0)];
        assert_eq!(top_match(&scores).map(|(n, _)| n), Some("Anemia"));
    }

    #[test]
    fn top_match_of_nothing() {
        assert_eq!(top_match(&[]), None);
    }

    #[test]
    fn rule_model_no_match_on_zero() {
        let model = RuleTableModel::default();
        let classification = model.classify(&record("Name,Glucose\nJane Doe,80"));
        assert_eq!(classification, Classification::no_match());
    }

    #[test]
    fn rule_model_tie_break_between_diseases() {
        // One Diabetes indicator and one Kidney indicator: Diabetes is listed first.
        let model = RuleTableModel::default();
        let classification = model.classify(&record("Glucose,BUN\n200,30"));
        assert_eq!(classification.condition.as_deref(), Some("Diabetes"));
    }

    #[test]
    fn rule_model_custom_table() {
        static CUSTOM: &[DiseasePattern] = &[DiseasePattern {
            name: "Hyperlipidemia",
            indicators: &[Indicator {
                field: "Cholesterol",
                threshold: 240.0,
            }],
        }];
        let model = RuleTableModel::new(CUSTOM);
        let classification = model.classify(&record("Cholesterol\n260"));
        assert_eq!(classification, Classification::matched("Hyperlipidemia", 1.0));
    }
}
