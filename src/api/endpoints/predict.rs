//! Prediction endpoint.
//!
//! `POST /predict` — multipart upload with a `file` field holding a
//! single-row CSV. Responds with the prediction JSON or `{"error", "code"}`.

use axum::extract::{Multipart, State};
use axum::Json;
use tracing::Instrument;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::prediction::PredictionResult;

const CSV_MIME: &str = "text/csv";

/// `POST /predict` — run the CSV-to-prediction transformation on an upload.
pub async fn predict(
    State(ctx): State<ApiContext>,
    multipart: Multipart,
) -> Result<Json<PredictionResult>, ApiError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("predict", %request_id);
    handle(ctx, multipart).instrument(span).await
}

async fn handle(
    ctx: ApiContext,
    mut multipart: Multipart,
) -> Result<Json<PredictionResult>, ApiError> {
    let limit = ctx.max_upload_bytes;
    let mut upload: Option<(Option<String>, Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::from_multipart(e, limit))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::from_multipart(e, limit))?;
        upload = Some((file_name, content_type, bytes.to_vec()));
    }

    let (file_name, content_type, bytes) = upload.ok_or_else(|| {
        tracing::warn!("Upload rejected: no file field");
        ApiError::NoFile
    })?;

    if bytes.len() > limit {
        tracing::warn!(size = bytes.len(), limit, "Upload rejected: too large");
        return Err(ApiError::PayloadTooLarge { limit });
    }

    if !is_csv_upload(file_name.as_deref(), content_type.as_deref()) {
        let shown = file_name.unwrap_or_else(|| content_type.unwrap_or_default());
        tracing::warn!(file = %shown, "Upload rejected: not a CSV file");
        return Err(ApiError::UnsupportedFileType(shown));
    }

    let text = String::from_utf8(bytes).map_err(|_| ApiError::InvalidEncoding)?;
    tracing::info!(file = file_name.as_deref().unwrap_or("-"), size = text.len(), "Received CSV upload");

    let result = ctx.assembler.predict_csv(&text).map_err(|e| {
        tracing::warn!("Prediction rejected: {e}");
        ApiError::from(e)
    })?;

    tracing::info!(
        prediction = %result.prediction,
        confidence = result.confidence,
        factors = result.factors.len(),
        "Prediction complete"
    );

    Ok(Json(result))
}

/// A part is CSV when its file name's extension guesses to `text/csv`. Without
/// a file name the declared content type decides.
pub fn is_csv_upload(file_name: Option<&str>, content_type: Option<&str>) -> bool {
    match file_name {
        Some(name) if !name.is_empty() => mime_guess::from_path(name)
            .iter()
            .any(|mime| mime.essence_str() == CSV_MIME),
        _ => content_type
            .map(|ct| ct.split(';').next().unwrap_or("").trim().eq_ignore_ascii_case(CSV_MIME))
            .unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_extension_is_accepted() {
        assert!(is_csv_upload(Some("blood_test.csv"), None));
        assert!(is_csv_upload(Some("RESULTS.CSV"), Some("application/octet-stream")));
    }

    #[test]
    fn other_extensions_are_rejected() {
        assert!(!is_csv_upload(Some("notes.txt"), Some("text/csv")));
        assert!(!is_csv_upload(Some("scan.pdf"), None));
        assert!(!is_csv_upload(Some("no_extension"), None));
    }

    #[test]
    fn content_type_decides_without_name() {
        assert!(is_csv_upload(None, Some("text/csv")));
        assert!(is_csv_upload(None, Some("text/csv; charset=utf-8")));
        assert!(!is_csv_upload(None, Some("text/plain")));
        assert!(!is_csv_upload(None, None));
    }
}
