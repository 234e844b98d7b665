//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::cli::parse::{Commands, ConfigCommands};
use crate::cli::presentation::{
    format_check_json, format_check_text, format_fingerprint_json, format_fingerprint_text,
    format_record_json, format_record_list_json, format_record_list_text, format_record_text,
    format_registration_text, format_verification_json, format_verification_text,
};
use crate::config::{ConfigLoader, CustodyConfig};
use crate::error::{ApiError, StorageError};
use crate::intake::{parse_collected_at, validate_evidence_folder};
use crate::registration::{verify, RegistrationGuard, RegistrationRequest};
use crate::report::ReportRenderer;
use crate::store::{CaseDetails, CustodyStore, Officer, SledCustodyStore};
use crate::tree::{FingerprintConfig, FingerprintEngine};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Runtime context for CLI execution: workspace, resolved config and storage paths.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    workspace_root: PathBuf,
    config: CustodyConfig,
    store_path: PathBuf,
    reports_path: PathBuf,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
        store_override: Option<PathBuf>,
    ) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(ref cfg_path) => ConfigLoader::load_from_file(cfg_path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };

        let (mut store_path, reports_path) = config.storage.resolve_paths(&workspace_root);
        if let Some(store) = store_override {
            store_path = store;
        }
        debug!(store = %store_path.display(), reports = %reports_path.display(), "Resolved storage paths");

        Ok(Self {
            workspace_root,
            config,
            store_path,
            reports_path,
        })
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn config(&self) -> &CustodyConfig {
        &self.config
    }

    fn open_store(&self) -> Result<SledCustodyStore, ApiError> {
        std::fs::create_dir_all(&self.store_path)
            .map_err(|e| ApiError::StorageError(StorageError::IoError(e)))?;
        Ok(SledCustodyStore::new(&self.store_path)?)
    }

    fn engine(&self, workers: Option<usize>) -> FingerprintEngine {
        let mut config: FingerprintConfig = self.config.fingerprint;
        if let Some(workers) = workers {
            config.workers = workers;
        }
        FingerprintEngine::new(config)
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Fingerprint {
                path,
                format,
                workers,
                summary,
            } => {
                let fp = self.engine(*workers).fingerprint(path)?;
                if format == "json" {
                    format_fingerprint_json(&fp)
                } else {
                    Ok(format_fingerprint_text(&fp, !*summary))
                }
            }
            Commands::Check { path, format } => {
                let fp = self.engine(None).fingerprint(path)?;
                let store = self.open_store()?;
                let existing = store.get_by_digest(&fp.digest)?;
                if format == "json" {
                    format_check_json(&fp, existing.as_ref())
                } else {
                    Ok(format_check_text(&fp, existing.as_ref()))
                }
            }
            Commands::Register {
                path,
                officer,
                badge,
                rank,
                unit,
                case_number,
                scene,
                collected_at,
                notes,
                remarks,
                document,
                no_report,
                format,
            } => {
                let folder = validate_evidence_folder(&path.to_string_lossy())?;
                let officer = Officer::new(officer, badge, rank.as_deref(), unit.as_deref())?;
                let case = CaseDetails::new(
                    case_number,
                    scene,
                    parse_collected_at(collected_at)?,
                    notes.as_deref(),
                )?;

                let fingerprint = self.engine(None).fingerprint(&folder)?;
                let store = self.open_store()?;
                let mut record = RegistrationGuard::new(&store).register(RegistrationRequest {
                    fingerprint,
                    officer,
                    case,
                    notes: crate::store::record::optional(remarks.as_deref()),
                    document_number: document.clone(),
                })?;

                // The record is already committed; report problems only warn
                if !*no_report {
                    match ReportRenderer::new(&self.reports_path).render(&record) {
                        Ok(report) => match store.attach_report(&record.document_number, &report) {
                            Ok(updated) => record = updated,
                            Err(err) => warn!(
                                document = %record.document_number,
                                error = %err,
                                "Report written but not attached to the record"
                            ),
                        },
                        Err(err) => warn!(
                            document = %record.document_number,
                            error = %err,
                            "Registered without a report; run `custody report` to retry"
                        ),
                    }
                }
                info!(document = %record.document_number, "Registration complete");

                if format == "json" {
                    format_record_json(&record)
                } else {
                    Ok(format_registration_text(&record))
                }
            }
            Commands::List { limit, format } => {
                let records = self.open_store()?.list_recent(*limit)?;
                if format == "json" {
                    format_record_list_json(&records)
                } else {
                    Ok(format_record_list_text(&records))
                }
            }
            Commands::Show {
                document,
                files,
                format,
            } => {
                let record = self
                    .open_store()?
                    .get_by_document(document)?
                    .ok_or_else(|| ApiError::DocumentNotFound(document.clone()))?;
                if format == "json" {
                    format_record_json(&record)
                } else {
                    Ok(format_record_text(&record, *files))
                }
            }
            Commands::Report { document } => {
                let store = self.open_store()?;
                let record = store
                    .get_by_document(document)?
                    .ok_or_else(|| ApiError::DocumentNotFound(document.clone()))?;
                let report = ReportRenderer::new(&self.reports_path).render(&record)?;
                store.attach_report(document, &report)?;
                Ok(report.display().to_string())
            }
            Commands::Verify {
                document,
                path,
                format,
            } => {
                let store = self.open_store()?;
                let verification = verify(&store, &self.engine(None), document, path)?;
                if !verification.matches {
                    return Err(ApiError::IntegrityMismatch {
                        document: verification.document_number,
                        expected: verification.expected,
                        actual: verification.actual,
                    });
                }
                if format == "json" {
                    format_verification_json(&verification)
                } else {
                    Ok(format_verification_text(&verification))
                }
            }
            Commands::Config {
                command: ConfigCommands::Show,
            } => self.config.to_toml(),
        }
    }
}
