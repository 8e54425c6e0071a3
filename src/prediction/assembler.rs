use std::sync::Arc;

use crate::config::{
    DEFAULT_CONFIDENCE, FACTOR_LIMIT, IDENTITY_FIELD, NORMAL_CONDITION, UNKNOWN_PATIENT,
};

use super::normalize::{rank_factors, FactorStrategy};
use super::parser::parse_record;
use super::scoring::{ConditionModel, RuleTableModel};
use super::types::{FieldRecord, PredictionError, PredictionResult, Severity};

/// Turns a parsed record into a prediction result.
///
/// Holds no per-request state; one instance can serve any number of
/// concurrent requests.
#[derive(Clone)]
pub struct PredictionAssembler {
    model: Arc<dyn ConditionModel>,
    strategy: FactorStrategy,
}

impl Default for PredictionAssembler {
    fn default() -> Self {
        Self::new(Arc::new(RuleTableModel::default()), FactorStrategy::default())
    }
}

impl PredictionAssembler {
    pub fn new(model: Arc<dyn ConditionModel>, strategy: FactorStrategy) -> Self {
        Self { model, strategy }
    }

    pub fn with_strategy(strategy: FactorStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    pub fn strategy(&self) -> FactorStrategy {
        self.strategy
    }

    /// Parse then assemble.
    pub fn predict_csv(&self, text: &str) -> Result<PredictionResult, PredictionError> {
        let record = parse_record(text)?;
        Ok(self.assemble(&record))
    }

    pub fn assemble(&self, record: &FieldRecord) -> PredictionResult {
        let patient_name = match record.get(IDENTITY_FIELD) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => UNKNOWN_PATIENT.to_string(),
        };

        let classification = self.model.classify(record);
        let (label, confidence) = match classification.condition {
            Some(condition) if classification.score > 0.0 => (condition, classification.score),
            _ => (NORMAL_CONDITION.to_string(), DEFAULT_CONFIDENCE),
        };

        let prediction = Severity::qualify(&label, confidence);
        let factors = rank_factors(self.strategy.factors(record, IDENTITY_FIELD), FACTOR_LIMIT);

        let summary: Vec<(&str, f64)> = factors.iter().map(|f| (f.name.as_str(), f.value)).collect();
        tracing::debug!(%prediction, confidence, factors = ?summary, "Assembled prediction");

        PredictionResult {
            patient_name,
            prediction,
            confidence,
            factors,
        }
    }
}

/// Predict with the default rule table and range-scaled factors.
pub fn predict_csv(text: &str) -> Result<PredictionResult, PredictionError> {
    PredictionAssembler::default().predict_csv(text)
}
