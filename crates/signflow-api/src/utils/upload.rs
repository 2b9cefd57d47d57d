//! Multipart form extraction

use axum::extract::Multipart;
use signflow_core::models::UploadedFile;
use signflow_core::AppError;

/// Fields accepted by the upload routes. Everything is optional here; the
/// orchestration layer decides what is required.
#[derive(Debug, Default)]
pub struct SigningForm {
    pub file: Option<UploadedFile>,
    pub workflow: Option<String>,
    pub uploader_user_id: Option<String>,
}

/// Read `file`, `workflow` and `uploaderUserId` from a multipart body.
///
/// Unknown fields are skipped. A second `file` field is rejected.
pub async fn extract_signing_form(mut multipart: Multipart) -> Result<SigningForm, AppError> {
    let mut form = SigningForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "file" => {
                if form.file.is_some() {
                    return Err(AppError::InvalidInput(
                        "Multiple file fields are not allowed; send exactly one field named 'file'"
                            .to_string(),
                    ));
                }
                let filename = field.file_name().map(|s| s.to_string());
                let content_type = field.content_type().map(|s| s.to_string());
                let data = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read file data: {}", e))
                })?;
                form.file = Some(UploadedFile::new(data, filename, content_type));
            }
            "workflow" => form.workflow = Some(read_text(field).await?),
            "uploaderUserId" => form.uploader_user_id = Some(read_text(field).await?),
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read form field: {}", e)))
}
