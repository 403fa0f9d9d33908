/// Application controller
///
/// Owns every piece of mutable state (staged image, analysis phase,
/// current result, history) so the UI layer only forwards events and
/// renders what it reads back.

use chrono::{DateTime, Local};
use rand::Rng;

use crate::catalog::Catalog;
use crate::error::{AppError, StorageError};
use crate::report::{render_report, SharePayload};

use super::analysis::{simulate_analysis, AnalysisState, Diagnosis};
use super::history::{HistoryEntry, HistoryLedger, HistoryStore};
use super::upload::{DecodedImage, ImageFile, UploadState};

/// Outcome of a finished analysis
#[derive(Debug)]
pub struct Completed {
    pub diagnosis: Diagnosis,
    /// Result of persisting the history; the diagnosis stands either way
    pub persisted: Result<(), StorageError>,
}

#[derive(Debug)]
pub struct Controller {
    catalog: Catalog,
    upload: UploadState,
    analysis: AnalysisState,
    current: Option<Diagnosis>,
    history: HistoryLedger,
    store: HistoryStore,
}

impl Controller {
    /// Create a controller and restore the history from `store`
    pub fn new(catalog: Catalog, store: HistoryStore) -> Self {
        let history = HistoryLedger::load(&store);

        Self {
            catalog,
            upload: UploadState::new(),
            analysis: AnalysisState::Idle,
            current: None,
            history,
            store,
        }
    }

    pub fn upload(&self) -> &UploadState {
        &self.upload
    }

    pub fn analysis(&self) -> AnalysisState {
        self.analysis
    }

    /// Latest diagnosis, if any analysis completed
    pub fn current(&self) -> Option<&Diagnosis> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &HistoryLedger {
        &self.history
    }

    /// Whether the "Analyze" control is enabled
    pub fn can_analyze(&self) -> bool {
        self.upload.is_staged() && !self.analysis.is_busy()
    }

    // ========== Upload ==========

    /// Validate a file and return the generation of its decode request
    pub fn stage_file(&mut self, file: &ImageFile) -> Result<u64, AppError> {
        self.upload.begin_file(file)
    }

    /// Apply a decode result; `Ok(false)` means it was superseded
    pub fn finish_decode(
        &mut self,
        generation: u64,
        result: Result<DecodedImage, String>,
    ) -> Result<bool, AppError> {
        self.upload.finish_decode(generation, result)
    }

    pub fn stage_sample<R: Rng>(&mut self, rng: &mut R) -> &'static str {
        self.upload.stage_sample(rng)
    }

    pub fn reset_upload(&mut self) {
        self.upload.reset();
    }

    // ========== Analysis ==========

    /// Enter the busy state. No-op (returns false) without a staged image
    /// or while another analysis is running.
    pub fn trigger_analysis(&mut self) -> bool {
        self.analysis.trigger(self.upload.is_staged())
    }

    /// Finish the running analysis: pick a result, record it, persist.
    pub fn complete_analysis<R: Rng>(&mut self, rng: &mut R, now: DateTime<Local>) -> Completed {
        let diagnosis = simulate_analysis(&self.catalog, rng);
        self.current = Some(diagnosis);

        let entry = HistoryEntry::new(diagnosis.name, diagnosis.record, now);
        let persisted = self.history.record(entry, &self.store);

        self.analysis.finish();

        Completed {
            diagnosis,
            persisted,
        }
    }

    // ========== Export ==========

    fn require_diagnosis(&self) -> Result<&Diagnosis, AppError> {
        self.current.as_ref().ok_or(AppError::NoAnalysisYet)
    }

    pub fn share_payload(&self) -> Result<SharePayload, AppError> {
        let diagnosis = self.require_diagnosis()?;
        let url = self.upload.staged().and_then(|staged| staged.sample_url());
        Ok(SharePayload::new(diagnosis, url))
    }

    pub fn report(&self, now: DateTime<Local>) -> Result<String, AppError> {
        let diagnosis = self.require_diagnosis()?;
        Ok(render_report(diagnosis, now))
    }
}
