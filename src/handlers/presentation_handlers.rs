use actix_multipart::{Field, Multipart};
use actix_web::{HttpResponse, web};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use futures_util::TryStreamExt;
use serde::Deserialize;

use crate::errors::AppError;
use crate::generate::OutlineGenerator;
use crate::models::document::NewDocument;
use crate::models::presentation::{NewPresentation, PresentationPatch, PresentationSettings};
use crate::models::slide_image::NewSlideImage;
use crate::store::MemStore;

const DEFAULT_MODEL: &str = "groq-mixtral";
const DEFAULT_THEME: &str = "professional";
const DEFAULT_TITLE: &str = "Untitled Presentation";
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

struct UploadedFile {
    filename: String,
    content_type: String,
    bytes: Vec<u8>,
}

fn field_identity(field: &Field) -> (String, Option<String>) {
    let cd = field.content_disposition();
    let name = cd.and_then(|cd| cd.get_name()).unwrap_or("").to_string();
    let filename = cd.and_then(|cd| cd.get_filename()).map(str::to_string);
    (name, filename)
}

async fn read_field_bytes(field: &mut Field) -> Result<Vec<u8>, AppError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await? {
        if bytes.len() + chunk.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::Validation(
                "File exceeds the 10 MB upload limit".to_string(),
            ));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

async fn read_field_text(field: &mut Field) -> Result<String, AppError> {
    let bytes = read_field_bytes(field).await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

async fn drain_field(field: &mut Field) -> Result<(), AppError> {
    while field.try_next().await?.is_some() {}
    Ok(())
}

/// POST /presentations/generate-outline
/// Multipart: `prompt`, optional `aiModel`, optional `documents[]`.
/// Generates an outline, creates the presentation, and persists the uploaded
/// documents against it. Generation failure creates nothing.
pub async fn generate_outline(
    store: web::Data<MemStore>,
    generator: web::Data<dyn OutlineGenerator>,
    mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let mut prompt = String::new();
    let mut model = DEFAULT_MODEL.to_string();
    let mut uploads: Vec<UploadedFile> = Vec::new();

    while let Some(mut field) = payload.try_next().await? {
        let (name, filename) = field_identity(&field);
        match name.as_str() {
            "prompt" => prompt = read_field_text(&mut field).await?,
            "aiModel" => {
                let value = read_field_text(&mut field).await?;
                if !value.trim().is_empty() {
                    model = value.trim().to_string();
                }
            }
            "documents" => {
                let content_type = field
                    .content_type()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "text/plain".to_string());
                let bytes = read_field_bytes(&mut field).await?;
                uploads.push(UploadedFile {
                    filename: filename.unwrap_or_else(|| "document.txt".to_string()),
                    content_type,
                    bytes,
                });
            }
            _ => drain_field(&mut field).await?,
        }
    }

    let prompt = prompt.trim().to_string();
    if prompt.is_empty() {
        return Err(AppError::Validation("Prompt is required".to_string()));
    }

    // Text extraction is a pass-through; binary formats would need a real
    // extractor (pdf, docx) in front of this.
    let mut document_context = String::new();
    for file in &uploads {
        let text = String::from_utf8_lossy(&file.bytes);
        document_context.push_str(&format!(
            "\n\nDocument: {}\nContent: {}\n",
            file.filename, text
        ));
    }

    let outline = generator
        .generate_outline(&prompt, &document_context, &model)
        .await?;

    let presentation = store.create_presentation(NewPresentation {
        title: outline
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        prompt,
        slides: outline.slides,
        theme: DEFAULT_THEME.to_string(),
        settings: PresentationSettings::default(),
    })?;

    for file in uploads {
        store.create_document(NewDocument {
            content: String::from_utf8_lossy(&file.bytes).into_owned(),
            filename: file.filename,
            doc_type: file.content_type,
            presentation_id: Some(presentation.id),
        })?;
    }

    Ok(HttpResponse::Ok().json(presentation))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepromptRequest {
    pub reprompt: String,
    #[serde(default)]
    pub ai_model: Option<String>,
}

/// POST /presentations/{id}/slides/{index}/reprompt
/// Regenerates one slide in place. The store is only written after
/// generation succeeds, so a failed reprompt leaves the presentation
/// untouched.
pub async fn reprompt_slide(
    store: web::Data<MemStore>,
    generator: web::Data<dyn OutlineGenerator>,
    path: web::Path<(i64, usize)>,
    body: web::Json<RepromptRequest>,
) -> Result<HttpResponse, AppError> {
    let (id, index) = path.into_inner();

    let presentation = store.get_presentation(id)?.ok_or(AppError::NotFound)?;
    if index >= presentation.slides.len() {
        return Err(AppError::Validation("Invalid slide index".to_string()));
    }

    let model = body
        .ai_model
        .clone()
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());
    let replacement = generator
        .reprompt_slide(&presentation.slides[index], &body.reprompt, &model)
        .await?;

    // Whole-array replacement: copy the array, swap one element, submit all
    // of it. The store never merges individual slides.
    let mut slides = presentation.slides;
    slides[index] = replacement;
    let updated = store
        .update_presentation(
            id,
            PresentationPatch {
                slides: Some(slides),
                ..Default::default()
            },
        )?
        .ok_or(AppError::NotFound)?;

    Ok(HttpResponse::Ok().json(updated))
}

/// PATCH /presentations/{id}
/// Shallow partial update; see `PresentationPatch` for the merge rules.
pub async fn update(
    store: web::Data<MemStore>,
    path: web::Path<i64>,
    body: web::Json<PresentationPatch>,
) -> Result<HttpResponse, AppError> {
    let updated = store
        .update_presentation(path.into_inner(), body.into_inner())?
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(updated))
}

/// POST /presentations/{id}/images
/// Multipart: `image`, `slideIndex`. Records the upload as a data URL; it
/// does not touch the presentation's slides. Merging the url into
/// `slides[j].images` is a client-driven follow-up PATCH.
pub async fn upload_image(
    store: web::Data<MemStore>,
    path: web::Path<i64>,
    mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let presentation_id = path.into_inner();
    let mut image: Option<UploadedFile> = None;
    let mut slide_index: Option<i64> = None;

    while let Some(mut field) = payload.try_next().await? {
        let (name, filename) = field_identity(&field);
        match name.as_str() {
            "image" => {
                let content_type = field
                    .content_type()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let bytes = read_field_bytes(&mut field).await?;
                image = Some(UploadedFile {
                    filename: filename.unwrap_or_else(|| "image".to_string()),
                    content_type,
                    bytes,
                });
            }
            "slideIndex" => {
                let text = read_field_text(&mut field).await?;
                slide_index = Some(text.trim().parse().map_err(|_| {
                    AppError::Validation("slideIndex must be an integer".to_string())
                })?);
            }
            _ => drain_field(&mut field).await?,
        }
    }

    let image = image.ok_or_else(|| AppError::Validation("No image file provided".to_string()))?;
    let slide_index =
        slide_index.ok_or_else(|| AppError::Validation("slideIndex is required".to_string()))?;

    let url = format!(
        "data:{};base64,{}",
        image.content_type,
        BASE64.encode(&image.bytes)
    );
    let record = store.create_slide_image(NewSlideImage {
        filename: image.filename,
        url,
        slide_index,
        presentation_id: Some(presentation_id),
    })?;

    Ok(HttpResponse::Ok().json(record))
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Pptx,
}

impl ExportFormat {
    fn label(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "PDF",
            ExportFormat::Pptx => "PPTX",
        }
    }

    fn slug(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Pptx => "pptx",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub format: ExportFormat,
}

/// POST /presentations/{id}/export
/// Export stub: acknowledges the request and returns an advisory download
/// URL. No file is produced.
pub async fn export(
    store: web::Data<MemStore>,
    path: web::Path<i64>,
    body: web::Json<ExportRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    if store.get_presentation(id)?.is_none() {
        return Err(AppError::NotFound);
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Export to {} initiated", body.format.label()),
        "downloadUrl": format!("/api/presentations/{}/download/{}", id, body.format.slug()),
    })))
}

/// GET /presentations/{id}
pub async fn get(
    store: web::Data<MemStore>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let presentation = store
        .get_presentation(path.into_inner())?
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(presentation))
}
