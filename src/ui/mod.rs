/// User interface module
///
/// View functions only: they read state and emit messages, never mutate.
/// - Upload panel (upload.rs)
/// - Results panel (results.rs)
/// - History list (history.rs)

pub mod history;
pub mod results;
pub mod upload;

use iced::widget::{button, column, row, text};
use iced::{Alignment, Element};

use crate::Message;

/// Figures shown in the header banner
pub const STATS: [(&str, &str); 4] = [
    ("95%", "Accuracy"),
    ("2.3s", "Response Time"),
    ("25+", "Crops Supported"),
    ("50+", "Diseases Detected"),
];

pub fn header<'a>() -> Element<'a, Message> {
    let stats = STATS.iter().fold(row![].spacing(30), |row, (value, label)| {
        row.push(
            column![text(*value).size(24), text(*label).size(12)].align_x(Alignment::Center),
        )
    });

    column![
        text("Leaf Doctor").size(40),
        text("Plant disease detection from a single photo").size(16),
        stats,
    ]
    .spacing(12)
    .align_x(Alignment::Center)
    .into()
}

pub fn export_bar<'a>() -> Element<'a, Message> {
    row![
        button("Save Report").on_press(Message::SaveReport).padding(10),
        button("Share").on_press(Message::Share).padding(10),
        button("Print").on_press(Message::Print).padding(10),
    ]
    .spacing(10)
    .into()
}
