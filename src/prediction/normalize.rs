//! Factor normalization.
//!
//! `RangeScaled` rescales each field against its known range (or divides by
//! 100 when the field has none). `ReferenceDeviation` measures the relative
//! distance from a typical value and scales the largest deviation to 1.
//! Neither strategy clamps its output.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::parser::numeric_or_zero;
use super::reference::{normal_range, reference_value};
use super::types::{Factor, FieldRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorStrategy {
    #[default]
    RangeScaled,
    ReferenceDeviation,
}

impl FactorStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RangeScaled => "range",
            Self::ReferenceDeviation => "deviation",
        }
    }

    /// Compute factors for every non-identity field, in record order.
    pub fn factors(&self, record: &FieldRecord, identity_field: &str) -> Vec<Factor> {
        match self {
            Self::RangeScaled => normalize_factors(record, identity_field),
            Self::ReferenceDeviation => deviation_factors(record, identity_field),
        }
    }
}

impl fmt::Display for FactorStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FactorStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "range" | "range_scaled" => Ok(Self::RangeScaled),
            "deviation" | "reference_deviation" => Ok(Self::ReferenceDeviation),
            other => Err(format!("unknown factor strategy '{other}'")),
        }
    }
}

/// Normalize one raw value: `(v - min) / (max - min)` for known ranges,
/// `v / 100` otherwise. Unparseable input is 0.
pub fn normalize_value(raw: Option<&str>, field: &str) -> f64 {
    let value = numeric_or_zero(field, raw);
    match normal_range(field) {
        Some(range) => (value - range.min) / (range.max - range.min),
        None => value / 100.0,
    }
}

pub fn normalize_factors(record: &FieldRecord, identity_field: &str) -> Vec<Factor> {
    record
        .iter()
        .filter(|(name, _)| *name != identity_field)
        .map(|(name, raw)| Factor {
            name: name.to_string(),
            value: normalize_value(raw, name),
        })
        .collect()
}

/// Relative deviation from the reference value, scaled so the largest is 1.
/// Fields without a reference value are skipped, and so are values whose
/// deviation overflows to a non-finite number.
pub fn deviation_factors(record: &FieldRecord, identity_field: &str) -> Vec<Factor> {
    let mut factors: Vec<Factor> = record
        .iter()
        .filter(|(name, _)| *name != identity_field)
        .filter_map(|(name, raw)| {
            let reference = reference_value(name)?;
            let value = numeric_or_zero(name, raw);
            let deviation = ((value - reference) / reference).abs();
            if !deviation.is_finite() {
                tracing::debug!(field = name, value = ?raw, "Non-finite deviation skipped");
                return None;
            }
            Some(Factor {
                name: display_name(name),
                value: deviation,
            })
        })
        .collect();

    let max = factors.iter().map(|f| f.value).fold(0.0_f64, f64::max);
    if max > 0.0 {
        for factor in &mut factors {
            factor.value /= max;
        }
    }

    factors
}

/// Display label for a deviation factor: underscores become spaces and each
/// letter run is title-cased (`white_blood_cells` is `White Blood Cells`,
/// `ALT` is `Alt`). Letters after a digit start a new run.
pub fn display_name(field: &str) -> String {
    let mut label = String::with_capacity(field.len());
    let mut in_word = false;
    for c in field.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if in_word {
                label.extend(c.to_lowercase());
            } else {
                label.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            label.push(c);
            in_word = false;
        }
    }
    label
}

/// Stable sort by descending value, then keep the first `limit`. Values that
/// compare equal (including `0.0` and `-0.0`) keep their record order.
pub fn rank_factors(mut factors: Vec<Factor>, limit: usize) -> Vec<Factor> {
    factors.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
    factors.truncate(limit);
    factors
}
