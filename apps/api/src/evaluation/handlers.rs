//! Interactive shell handlers. The page has two states: idle (the rendered
//! form) and processing (the in-flight submission below). Every pipeline
//! error is caught here and rendered as a page message; nothing below this
//! boundary reaches the user as a crash.

use anyhow::anyhow;
use askama::Template;
use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::response::Html;
use tracing::info;

use crate::errors::AppError;
use crate::evaluation::{run_evaluation, EvaluationReport};
use crate::extract::{extract_text, DocumentFormat};
use crate::state::AppState;

#[derive(Template)]
#[template(path = "index.html")]
pub struct ShellPage {
    pub job_description: String,
    pub report: Option<ReportView>,
    pub error: Option<String>,
}

pub struct ReportView {
    pub raw: String,
    pub tier_label: &'static str,
    pub tier_class: &'static str,
}

impl ShellPage {
    fn idle() -> Self {
        Self {
            job_description: String::new(),
            report: None,
            error: None,
        }
    }

    fn with_report(job_description: String, report: EvaluationReport) -> Self {
        Self {
            job_description,
            report: Some(ReportView {
                raw: report.raw,
                tier_label: report.tier.label(),
                tier_class: report.tier.css_class(),
            }),
            error: None,
        }
    }

    fn with_error(job_description: String, message: String) -> Self {
        Self {
            job_description,
            report: None,
            error: Some(message),
        }
    }
}

fn render(page: ShellPage) -> Result<Html<String>, AppError> {
    let body = page
        .render()
        .map_err(|e| AppError::Internal(anyhow!("template render failed: {e}")))?;
    Ok(Html(body))
}

/// GET /
pub async fn handle_index() -> Result<Html<String>, AppError> {
    render(ShellPage::idle())
}

/// One parsed multipart submission.
struct Submission {
    job_description: String,
    resume: Option<UploadedDocument>,
}

/// The uploaded blob plus what the client declared about it.
/// Exists only for the duration of one submission.
struct UploadedDocument {
    filename: String,
    content_type: Option<String>,
    data: Bytes,
}

/// POST /evaluate
pub async fn handle_evaluate(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Html<String>, AppError> {
    let submission = read_submission(&mut multipart).await?;

    let page = match evaluate_submission(&state, &submission).await {
        Ok(report) => {
            info!(
                "evaluation complete: {:.1}% match, {}",
                report.match_percentage,
                report.tier.label()
            );
            ShellPage::with_report(submission.job_description, report)
        }
        Err(e) => {
            info!("submission rejected: {e}");
            ShellPage::with_error(submission.job_description, e.user_message())
        }
    };

    render(page)
}

async fn read_submission(multipart: &mut Multipart) -> Result<Submission, AppError> {
    let mut job_description = String::new();
    let mut resume = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Internal(anyhow!("multipart read failed: {e}")))?
    {
        match field.name().unwrap_or("") {
            "job_description" => {
                job_description = field
                    .text()
                    .await
                    .map_err(|e| AppError::Internal(anyhow!("job description field: {e}")))?;
            }
            "resume" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Internal(anyhow!("resume field: {e}")))?;
                // A file input submitted with no selection arrives as an
                // empty part; treat it the same as no upload at all.
                if !data.is_empty() {
                    resume = Some(UploadedDocument {
                        filename,
                        content_type,
                        data,
                    });
                }
            }
            _ => {
                let _ = field.bytes().await;
            }
        }
    }

    Ok(Submission {
        job_description,
        resume,
    })
}

/// The guarded pipeline: no upload → `NoFileProvided` before anything runs;
/// unknown declared type → `UnsupportedFormat` before extraction or any
/// remote call.
async fn evaluate_submission(
    state: &AppState,
    submission: &Submission,
) -> Result<EvaluationReport, AppError> {
    let document = submission.resume.as_ref().ok_or(AppError::NoFileProvided)?;
    let format = resolve_format(document)?;

    let resume_text = extract_text(&document.data, format)?;
    run_evaluation(
        state.evaluator.as_ref(),
        &resume_text,
        &submission.job_description,
    )
    .await
}

fn resolve_format(document: &UploadedDocument) -> Result<DocumentFormat, AppError> {
    match document.content_type.as_deref() {
        Some(mime) => DocumentFormat::from_mime(mime)
            .ok_or_else(|| AppError::UnsupportedFormat(mime.to_string())),
        // Some clients omit the part's content type; fall back to the name.
        None => DocumentFormat::from_filename(&document.filename)
            .ok_or_else(|| AppError::UnsupportedFormat(document.filename.clone())),
    }
}
