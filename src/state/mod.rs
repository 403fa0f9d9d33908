/// State management module
///
/// This module handles all application state, including:
/// - Image intake and decode bookkeeping (upload.rs)
/// - The simulated analysis state machine (analysis.rs)
/// - The capped, persisted history (history.rs)
/// - The controller tying them together (controller.rs)

pub mod analysis;
pub mod controller;
pub mod history;
pub mod upload;
