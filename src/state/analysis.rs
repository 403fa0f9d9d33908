/// Simulated analysis
///
/// There is no model: an analysis is a fixed delay followed by a uniform
/// pick from the catalog. The pick is a pure function of the catalog and
/// the random source; the delay is a separate async adapter.

use rand::Rng;
use std::time::Duration;

use crate::catalog::{Catalog, DiseaseRecord};

/// A catalog entry chosen as the result of an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnosis {
    pub name: &'static str,
    pub record: &'static DiseaseRecord,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnalysisState {
    #[default]
    Idle,
    /// Waiting for the simulated processing delay
    Busy,
}

impl AnalysisState {
    pub fn is_busy(&self) -> bool {
        *self == AnalysisState::Busy
    }

    /// Move to `Busy` if an image is staged and nothing is running.
    /// Returns whether the transition happened.
    pub fn trigger(&mut self, image_staged: bool) -> bool {
        if !image_staged || self.is_busy() {
            return false;
        }
        *self = AnalysisState::Busy;
        true
    }

    pub fn finish(&mut self) {
        *self = AnalysisState::Idle;
    }
}

/// Pick one catalog entry uniformly at random
pub fn simulate_analysis<R: Rng>(catalog: &Catalog, rng: &mut R) -> Diagnosis {
    let index = rng.gen_range(0..catalog.len());
    let (name, record) = catalog.entry(index).expect("index within catalog bounds");
    Diagnosis { name, record }
}

/// Wait out the simulated processing time
pub async fn processing_delay(delay: Duration) {
    tokio::time::sleep(delay).await;
}
