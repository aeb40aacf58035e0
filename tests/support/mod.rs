//! Shared fixtures for the HTTP integration tests: an `AppState` over a
//! temporary file store and an exporter that writes a placeholder PDF.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use actix_web::web::{self, Data};
use slip_gaji::config::Config;
use slip_gaji::export::{DocumentExporter, ExportError};
use slip_gaji::render::SlipView;
use slip_gaji::routes;
use slip_gaji::state::AppState;
use slip_gaji::store::{FileStorage, Storage};
use tempfile::TempDir;

pub const STUB_PDF: &[u8] = b"%PDF-1.4 stub";

/// Writes `STUB_PDF` under `out_dir`, or fails when `fail` is set.
pub struct StubExporter {
    out_dir: PathBuf,
    fail: bool,
    pub calls: AtomicUsize,
}

impl StubExporter {
    pub fn new(out_dir: PathBuf, fail: bool) -> Self {
        Self {
            out_dir,
            fail,
            calls: AtomicUsize::new(0),
        }
    }
}

impl DocumentExporter for StubExporter {
    fn export(&self, _view: &SlipView, filename: &str) -> Result<PathBuf, ExportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ExportError::Render("stub failure".to_string()));
        }
        fs::create_dir_all(&self.out_dir)?;
        let path = self.out_dir.join(filename);
        fs::write(&path, STUB_PDF)?;
        Ok(path)
    }
}

pub struct TestContext {
    pub state: Data<AppState>,
    pub storage: Arc<FileStorage>,
    pub exporter: Arc<StubExporter>,
    pub config: Config,
    // keeps the store and export dir alive for the test
    pub temp_dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_options(Duration::ZERO, false)
    }

    pub fn with_options(export_delay: Duration, failing_exporter: bool) -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        Self::in_dir(temp_dir, export_delay, failing_exporter)
    }

    /// Reopen the same on-disk store, as a restarted process would.
    pub fn reopen(self) -> Self {
        let TestContext { temp_dir, config, .. } = self;
        Self::in_dir(temp_dir, config.export_delay, false)
    }

    fn in_dir(temp_dir: TempDir, export_delay: Duration, failing_exporter: bool) -> Self {
        let config = Config {
            storage_dir: temp_dir.path().join("data"),
            export_dir: temp_dir.path().join("exports"),
            export_delay,
            ..Config::default()
        };

        let storage = Arc::new(FileStorage::open(&config.storage_dir).expect("failed to open store"));
        let exporter = Arc::new(StubExporter::new(config.export_dir.clone(), failing_exporter));
        let state = Data::new(AppState::new(
            storage.clone() as Arc<dyn Storage>,
            &config,
            exporter.clone() as Arc<dyn DocumentExporter>,
        ));

        Self {
            state,
            storage,
            exporter,
            config,
            temp_dir,
        }
    }

    pub fn routes(&self) -> impl FnOnce(&mut web::ServiceConfig) + '_ {
        move |cfg| routes::configure(cfg, &self.config)
    }
}

/// Build the app under test from a context.
macro_rules! test_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($ctx.state.clone())
                .configure($ctx.routes()),
        )
        .await
    };
}
