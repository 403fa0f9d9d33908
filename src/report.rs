/// Export surfaces: saved report, share payload and print
///
/// All three describe the current diagnosis; nothing here talks to the
/// controller state directly.

use chrono::{DateTime, Local};
use std::fmt;
use std::path::Path;

use crate::error::AppError;
use crate::state::analysis::Diagnosis;
use crate::ui::results::ResultView;

pub const SHARE_TITLE: &str = "Plant Disease Detection Results";

/// What a platform share sheet would receive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: Option<String>,
}

impl SharePayload {
    pub fn new(diagnosis: &Diagnosis, url: Option<&str>) -> Self {
        Self {
            title: SHARE_TITLE.to_string(),
            text: format!(
                "Detected: {} with {}% confidence",
                diagnosis.name, diagnosis.record.confidence
            ),
            url: url.map(str::to_string),
        }
    }
}

impl fmt::Display for SharePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        write!(f, "{}", self.text)?;
        if let Some(url) = &self.url {
            write!(f, "\n{}", url)?;
        }
        Ok(())
    }
}

/// Plain-text report of a diagnosis
pub fn render_report(diagnosis: &Diagnosis, generated_at: DateTime<Local>) -> String {
    let view = ResultView::project(diagnosis.name, diagnosis.record);
    let mut report = String::new();

    report.push_str(&format!("{}\n", SHARE_TITLE));
    report.push_str(&format!("Generated {}\n\n", generated_at.format("%-m/%-d/%Y %I:%M %p")));
    report.push_str(&format!("Disease: {}\n", view.name));
    report.push_str(&format!("{}\n\n", view.description));
    report.push_str(&format!("Confidence: {}\n", view.confidence));
    report.push_str(&format!(
        "Severity: {}% ({})\n\n",
        diagnosis.record.severity, view.severity_label
    ));

    report.push_str("Treatment\n");
    for line in &view.treatment {
        report.push_str(&format!("  {}\n", line));
    }

    report.push_str("\nPrevention\n");
    for item in &view.prevention {
        report.push_str(&format!("  - {}\n", item));
    }

    report
}

/// Write a report to `path`
pub fn save_report(path: &Path, report: &str) -> Result<(), AppError> {
    std::fs::write(path, report).map_err(AppError::Report)?;
    log::info!("💾 Report saved to {}", path.display());
    Ok(())
}

/// Send the current page to the printer, which for a desktop build is stdout
pub fn print(report: Option<&str>) {
    match report {
        Some(report) => println!("{}", report),
        None => println!("{}\n\n(no analysis yet)", SHARE_TITLE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use chrono::TimeZone;

    fn diagnosis(name: &'static str) -> Diagnosis {
        let record = Catalog::builtin().get(name).unwrap();
        Diagnosis { name, record }
    }

    #[test]
    fn test_share_payload() {
        let payload = SharePayload::new(&diagnosis("Potato Late Blight"), None);
        assert_eq!(payload.title, "Plant Disease Detection Results");
        assert_eq!(payload.text, "Detected: Potato Late Blight with 88% confidence");
        assert_eq!(
            payload.to_string(),
            "Plant Disease Detection Results\nDetected: Potato Late Blight with 88% confidence"
        );

        let with_url = SharePayload::new(&diagnosis("Apple Scab"), Some("https://example.org/leaf.jpg"));
        assert!(with_url.to_string().ends_with("\nhttps://example.org/leaf.jpg"));
    }

    #[test]
    fn test_report_contents() {
        let at = Local.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        let report = render_report(&diagnosis("Grape Black Rot"), at);

        assert!(report.starts_with("Plant Disease Detection Results\nGenerated 10/18/2026 09:30 AM\n"));
        assert!(report.contains("Disease: Grape Black Rot\n"));
        assert!(report.contains("Confidence: 85%\n"));
        assert!(report.contains(
            "Severity: 70% (Severe Infection - Immediate action needed to prevent spread)"
        ));
        assert!(report.contains("  Apply treatment within 24-48 hours\n"));
        assert!(report.contains("  - Sanitize pruning tools\n"));
    }

    #[test]
    fn test_save_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");

        save_report(&path, "hello").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");

        let missing = dir.path().join("no/such/dir/report.txt");
        assert!(matches!(save_report(&missing, "x"), Err(AppError::Report(_))));
    }
}
