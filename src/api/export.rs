use crate::api::stream::{ChannelWriter, Chunk, is_disconnect};
use crate::error::{Result, ServiceError};
use crate::middleware::AuthenticatedUser;
use crate::state::AppState;
use axum::{
    Extension,
    body::Body,
    extract::{Path, State},
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use futures::StreamExt;
use quire_core::render::RenderError;
use quire_core::{ExportError, ExportFormat, ExportReport, authorize, content_disposition};
use quire_types::{Book, BookId};
use std::io::Write;
use tokio::sync::OwnedSemaphorePermit;

/// Chunks buffered between the renderer and the client.
const STREAM_CHANNEL_CAPACITY: usize = 8;

/// `GET /api/export/:id/pdf`
pub async fn export_pdf(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Response> {
    let (book, permit) = prepare(&state, &user, id, ExportFormat::Pdf).await?;
    stream_pdf(&state, book, permit).await
}

/// `GET /api/export/:id/doc`
pub async fn export_doc(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Response> {
    let (book, permit) = prepare(&state, &user, id, ExportFormat::Docx).await?;
    buffered_docx(&state, book, permit).await
}

/// Loads the book, checks ownership and waits for an export slot.
async fn prepare(
    state: &AppState,
    user: &AuthenticatedUser,
    id: String,
    format: ExportFormat,
) -> Result<(Book, OwnedSemaphorePermit)> {
    let id = BookId::from(id);
    tracing::info!("Export request for book '{}' as {}", id, format);

    let book = state
        .store
        .get(&id)
        .await
        .map_err(ServiceError::Storage)?
        .ok_or(ExportError::NotFound(id))?;
    authorize(&book, &user.0)?;

    let permit = state
        .export_semaphore
        .clone()
        .acquire_owned()
        .await
        .map_err(|_| ServiceError::ServiceOverloaded)?;
    Ok((book, permit))
}

fn headers(book: &Book, format: ExportFormat) -> Result<[(header::HeaderName, HeaderValue); 2]> {
    let disposition = HeaderValue::from_str(&content_disposition(&book.title, format))
        .map_err(|e| ServiceError::Internal(format!("Invalid Content-Disposition: {}", e)))?;
    Ok([
        (header::CONTENT_TYPE, HeaderValue::from_static(format.mime_type())),
        (header::CONTENT_DISPOSITION, disposition),
    ])
}

fn is_client_gone(err: &ExportError) -> bool {
    match err {
        ExportError::Io(e) | ExportError::Render(RenderError::Io(e)) => is_disconnect(e),
        _ => false,
    }
}

fn log_report(book: &Book, format: ExportFormat, bytes: usize, report: &ExportReport) {
    tracing::info!(
        "Exported book '{}' as {} ({} bytes, {} chapters, {} skipped)",
        book.id,
        format,
        bytes,
        report.rendered_chapters,
        report.skipped.len()
    );
}

/// Renders on the blocking pool and streams the PDF as it is written.
///
/// Headers go out with the first chunk. Anything that fails before then is
/// an ordinary error response; later failures can only be logged.
async fn stream_pdf(
    state: &AppState,
    book: Book,
    permit: OwnedSemaphorePermit,
) -> Result<Response> {
    let headers = headers(&book, ExportFormat::Pdf)?;
    let exporter = state.exporter.clone();
    let chunk_size = state.config.export.stream_chunk_size;
    let (tx, rx) = async_channel::bounded::<Chunk>(STREAM_CHANNEL_CAPACITY);

    let render = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        let writer = ChannelWriter::new(tx, chunk_size);
        let result = exporter
            .export(&book, ExportFormat::Pdf, writer)
            .and_then(|(mut writer, report)| {
                writer.flush()?;
                Ok((writer.bytes_sent(), report))
            });
        (book, result)
    });

    let first = match rx.recv().await {
        Ok(first) => first,
        Err(_) => {
            // The writer is gone without sending anything: rendering failed.
            let (book, result) = render
                .await
                .map_err(|e| ServiceError::Internal(format!("Export task failed: {}", e)))?;
            return match result {
                Ok(_) => Err(ServiceError::ExportFailed(format!(
                    "Export of book '{}' produced no output",
                    book.id
                ))),
                Err(e) => Err(e.into()),
            };
        }
    };

    tokio::spawn(async move {
        match render.await {
            Ok((book, Ok((bytes, report)))) => log_report(&book, ExportFormat::Pdf, bytes, &report),
            Ok((book, Err(e))) if is_client_gone(&e) => {
                tracing::debug!("Client disconnected during export of book '{}'", book.id)
            }
            Ok((book, Err(e))) => {
                tracing::error!("Export of book '{}' failed after streaming began: {}", book.id, e)
            }
            Err(e) => tracing::error!("Export task failed after streaming began: {}", e),
        }
    });

    let body = Body::from_stream(futures::stream::once(async move { first }).chain(rx));
    Ok((headers, body).into_response())
}

/// Renders the whole package, then responds with a known length.
async fn buffered_docx(
    state: &AppState,
    book: Book,
    permit: OwnedSemaphorePermit,
) -> Result<Response> {
    let headers = headers(&book, ExportFormat::Docx)?;
    let exporter = state.exporter.clone();

    let (book, result) = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        let result = exporter.export(&book, ExportFormat::Docx, Vec::new());
        (book, result)
    })
    .await
    .map_err(|e| ServiceError::Internal(format!("Export task failed: {}", e)))?;

    let (bytes, report) = result?;
    log_report(&book, ExportFormat::Docx, bytes.len(), &report);

    let length = HeaderValue::from(bytes.len());
    Ok((headers, [(header::CONTENT_LENGTH, length)], bytes).into_response())
}
