/// Results panel
///
/// `ResultView::project` turns a diagnosis into display-ready values;
/// `view` lays them out. The projection holds no widget types so it can
/// be checked without a window.

use iced::widget::{column, container, progress_bar, row, text, Column};
use iced::{Element, Length};

use crate::catalog::DiseaseRecord;
use crate::state::analysis::Diagnosis;
use crate::Message;

/// Fixed advisory lines appended to every treatment block
pub const TREATMENT_ADVISORIES: [&str; 2] = [
    "Apply treatment within 24-48 hours",
    "Follow safety guidelines when using chemicals",
];

/// Severity label for a severity percentage
pub fn severity_label(severity: u8) -> &'static str {
    if severity < 30 {
        "Early Stage - Immediate treatment recommended"
    } else if severity < 70 {
        "Moderate Infection - Urgent treatment required"
    } else {
        "Severe Infection - Immediate action needed to prevent spread"
    }
}

/// Display-ready projection of a diagnosis
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub name: &'static str,
    pub description: &'static str,
    /// Confidence as a percentage string, e.g. "92%"
    pub confidence: String,
    /// Width of the severity bar, 0.0-100.0
    pub severity_width: f32,
    pub severity_label: &'static str,
    /// Recommended action followed by the fixed advisories
    pub treatment: Vec<String>,
    /// Prevention steps in record order
    pub prevention: Vec<&'static str>,
}

impl ResultView {
    pub fn project(name: &'static str, record: &'static DiseaseRecord) -> Self {
        let mut treatment = vec![format!("Recommended Action: {}", record.treatment)];
        treatment.extend(TREATMENT_ADVISORIES.iter().map(|line| line.to_string()));

        Self {
            name,
            description: record.description,
            confidence: format!("{}%", record.confidence),
            severity_width: f32::from(record.severity.min(100)),
            severity_label: severity_label(record.severity),
            treatment,
            prevention: record.prevention.to_vec(),
        }
    }
}

pub fn view<'a>(diagnosis: Option<&Diagnosis>) -> Element<'a, Message> {
    let Some(diagnosis) = diagnosis else {
        return container(text("Upload a leaf photo and press Analyze to see results.").size(16))
            .padding(20)
            .width(Length::Fill)
            .into();
    };

    let result = ResultView::project(diagnosis.name, diagnosis.record);

    let treatment = result
        .treatment
        .into_iter()
        .fold(Column::new().spacing(4), |col, line| col.push(text(line).size(14)));

    let prevention = result
        .prevention
        .into_iter()
        .fold(Column::new().spacing(4), |col, item| {
            col.push(text(format!("• {}", item)).size(14))
        });

    let content = column![
        text(result.name).size(32),
        text(result.description).size(16),
        row![
            text("Confidence").size(16),
            text(result.confidence).size(16),
        ]
        .spacing(10),
        text("Severity").size(16),
        progress_bar(0.0..=100.0, result.severity_width).height(Length::Fixed(12.0)),
        text(result.severity_label).size(14),
        text("Treatment").size(20),
        treatment,
        text("Prevention").size(20),
        prevention,
    ]
    .spacing(10);

    container(content).padding(20).width(Length::Fill).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_severity_boundaries() {
        assert_eq!(severity_label(0), "Early Stage - Immediate treatment recommended");
        assert_eq!(severity_label(29), "Early Stage - Immediate treatment recommended");
        assert_eq!(severity_label(30), "Moderate Infection - Urgent treatment required");
        assert_eq!(severity_label(69), "Moderate Infection - Urgent treatment required");
        assert_eq!(
            severity_label(70),
            "Severe Infection - Immediate action needed to prevent spread"
        );
        assert_eq!(
            severity_label(100),
            "Severe Infection - Immediate action needed to prevent spread"
        );
    }

    #[test]
    fn test_projection() {
        let catalog = Catalog::builtin();
        let record = catalog.get("Tomato Early Blight").unwrap();
        let view = ResultView::project("Tomato Early Blight", record);

        assert_eq!(view.name, "Tomato Early Blight");
        assert_eq!(view.confidence, "92%");
        assert_eq!(view.severity_width, 65.0);
        assert_eq!(view.severity_label, "Moderate Infection - Urgent treatment required");
        assert_eq!(
            view.treatment,
            vec![
                format!("Recommended Action: {}", record.treatment),
                "Apply treatment within 24-48 hours".to_string(),
                "Follow safety guidelines when using chemicals".to_string(),
            ]
        );
        assert_eq!(view.prevention, record.prevention.to_vec());
    }

    #[test]
    fn test_healthy_leaf_is_early_stage() {
        let catalog = Catalog::builtin();
        let view = ResultView::project("Healthy Leaf", catalog.get("Healthy Leaf").unwrap());
        assert_eq!(view.severity_width, 5.0);
        assert_eq!(view.severity_label, "Early Stage - Immediate treatment recommended");
    }
}
