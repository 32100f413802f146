use axum::{
    Json,
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::info;

use crate::core::document::export_pdf;
use crate::errors::AppResult;

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub text: String,
}

/// Render the given text as a downloadable PDF.
pub async fn export_pdf_handler(Json(request): Json<ExportRequest>) -> AppResult<Response> {
    let document = export_pdf(&request.text)?;
    info!(
        pages = document.page_count,
        bytes = document.bytes.len(),
        "PDF export generated"
    );

    let disposition = format!("attachment; filename=\"{}\"", document.filename);
    let mut response = document.bytes.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
    Ok(response)
}
