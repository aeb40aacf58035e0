pub mod filename;
pub mod pdf;
pub mod status;

use actix_web::web;
use derive_more::Display;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use crate::render::SlipView;

pub use filename::export_filename;
pub use pdf::PdfExporter;
pub use status::{ExportStatus, ExportTracker};

#[derive(Debug, Display)]
pub enum ExportError {
    #[display(fmt = "font loading failed: {}", _0)]
    Fonts(String),

    #[display(fmt = "layout failed: {}", _0)]
    Layout(String),

    #[display(fmt = "rendering failed: {}", _0)]
    Render(String),

    #[display(fmt = "export io error: {}", _0)]
    Io(std::io::Error),
}

impl std::error::Error for ExportError {}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::Io(e)
    }
}

/// Turns a rendered slip into a downloadable file.
pub trait DocumentExporter: Send + Sync {
    fn export(&self, view: &SlipView, filename: &str) -> Result<PathBuf, ExportError>;
}

/// Run one export in the background. The caller has already claimed the
/// tracker; errors end up in the log and put the tracker back to idle.
pub fn spawn_export(
    exporter: Arc<dyn DocumentExporter>,
    tracker: Arc<ExportTracker>,
    view: SlipView,
    filename: String,
    delay: Duration,
) {
    actix_web::rt::spawn(async move {
        if !delay.is_zero() {
            actix_web::rt::time::sleep(delay).await;
        }

        let name = filename.clone();
        let result = web::block(move || exporter.export(&view, &filename)).await;

        match result {
            Ok(Ok(path)) => {
                info!(file = %path.display(), "Slip exported");
                tracker.succeed(path);
            }
            Ok(Err(e)) => {
                error!(error = %e, file = %name, "PDF generation failed");
                tracker.reset();
            }
            Err(e) => {
                error!(error = %e, file = %name, "PDF generation task aborted");
                tracker.reset();
            }
        }
    });
}
