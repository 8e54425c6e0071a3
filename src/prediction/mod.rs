//! Blood-test CSV → condition prediction.
//!
//! Pipeline: `parser` builds a `FieldRecord` from the header and first data
//! row, `scoring` matches it against the static disease patterns, `normalize`
//! turns every non-identity field into a factor, and `assembler` combines the
//! two into a `PredictionResult`.
//!
//! Everything here is synchronous and free of shared mutable state. The
//! pattern and range tables in `reference` are `static` data.

pub mod assembler;
pub mod normalize;
pub mod parser;
pub mod reference;
pub mod scoring;
pub mod types;

pub use assembler::{predict_csv, PredictionAssembler};
pub use normalize::FactorStrategy;
pub use scoring::{ConditionModel, RuleTableModel};
pub use types::{Classification, Factor, FieldRecord, PredictionError, PredictionResult, Severity};
