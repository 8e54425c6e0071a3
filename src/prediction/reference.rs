/// One piece of evidence for a disease: a field and the value it must exceed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indicator {
    pub field: &'static str,
    pub threshold: f64,
}

/// A named disease and its ordered indicators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiseasePattern {
    pub name: &'static str,
    pub indicators: &'static [Indicator],
}

impl DiseasePattern {
    pub fn threshold(&self, field: &str) -> Option<f64> {
        self.indicators
            .iter()
            .find(|i| i.field == field)
            .map(|i| i.threshold)
    }
}

/// Linear rescaling bounds for a lab field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalRange {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
}

/// Single typical value for a lab field, used for deviation scoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceValue {
    pub field: &'static str,
    pub value: f64,
}

const fn indicator(field: &'static str, threshold: f64) -> Indicator {
    Indicator { field, threshold }
}

/// Predefined disease patterns. Order matters: earlier entries win ties.
pub static DISEASE_PATTERNS: &[DiseasePattern] = &[
    DiseasePattern {
        name: "Diabetes",
        indicators: &[
            indicator("Glucose", 126.0),
            indicator("HbA1c", 6.5),
            indicator("Insulin", 25.0),
        ],
    },
    DiseasePattern {
        name: "Anemia",
        indicators: &[
            indicator("Hemoglobin", 12.0),
            indicator("RBC", 4.0),
            indicator("Iron", 60.0),
        ],
    },
    DiseasePattern {
        name: "Thyroid Disorder",
        indicators: &[
            indicator("TSH", 4.5),
            indicator("T3", 2.0),
            indicator("T4", 12.0),
        ],
    },
    DiseasePattern {
        name: "Liver Disease",
        indicators: &[
            indicator("ALT", 40.0),
            indicator("AST", 40.0),
            indicator("Bilirubin", 1.2),
        ],
    },
    DiseasePattern {
        name: "Kidney Disease",
        indicators: &[
            indicator("Creatinine", 1.2),
            indicator("BUN", 20.0),
            indicator("eGFR", 60.0),
        ],
    },
];

pub static NORMAL_RANGES: &[NormalRange] = &[
    NormalRange { field: "Glucose", min: 70.0, max: 200.0 },
    NormalRange { field: "Hemoglobin", min: 7.0, max: 18.0 },
    NormalRange { field: "WBC", min: 3.0, max: 15.0 },
    NormalRange { field: "Platelets", min: 150.0, max: 450.0 },
    NormalRange { field: "Creatinine", min: 0.5, max: 2.0 },
];

pub static REFERENCE_VALUES: &[ReferenceValue] = &[
    ReferenceValue { field: "Glucose", value: 100.0 },
    ReferenceValue { field: "Cholesterol", value: 200.0 },
    ReferenceValue { field: "Hemoglobin", value: 14.0 },
    ReferenceValue { field: "Platelets", value: 250.0 },
    ReferenceValue { field: "White Blood Cells", value: 7.5 },
    ReferenceValue { field: "Red Blood Cells", value: 5.0 },
    ReferenceValue { field: "HCT", value: 45.0 },
    ReferenceValue { field: "MCH", value: 30.0 },
    ReferenceValue { field: "MCHC", value: 34.0 },
    ReferenceValue { field: "MCV", value: 90.0 },
    ReferenceValue { field: "RDW", value: 13.0 },
    ReferenceValue { field: "Neutrophils", value: 60.0 },
    ReferenceValue { field: "Lymphocytes", value: 30.0 },
    ReferenceValue { field: "Monocytes", value: 8.0 },
    ReferenceValue { field: "Eosinophils", value: 3.0 },
    ReferenceValue { field: "Basophils", value: 1.0 },
    ReferenceValue { field: "AST", value: 25.0 },
    ReferenceValue { field: "ALT", value: 25.0 },
    ReferenceValue { field: "ALP", value: 100.0 },
    ReferenceValue { field: "Bilirubin", value: 1.0 },
    ReferenceValue { field: "Protein", value: 7.0 },
    ReferenceValue { field: "Albumin", value: 4.0 },
    ReferenceValue { field: "Insulin", value: 10.0 },
];

/// Look up the rescaling range for a field (exact, case-sensitive match).
pub fn normal_range(field: &str) -> Option<&'static NormalRange> {
    NORMAL_RANGES.iter().find(|r| r.field == field)
}

/// Look up the typical value for a field (exact, case-sensitive match).
pub fn reference_value(field: &str) -> Option<f64> {
    REFERENCE_VALUES
        .iter()
        .find(|r| r.field == field)
        .map(|r| r.value)
}
