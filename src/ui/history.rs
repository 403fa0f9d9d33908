/// Recent analyses list
use iced::widget::{column, container, row, text, Column, Space};
use iced::{Element, Length};

use crate::state::history::{HistoryLedger, EMPTY_HISTORY_MESSAGE};
use crate::Message;

pub fn view(ledger: &HistoryLedger) -> Element<'_, Message> {
    let body: Element<'_, Message> = if ledger.is_empty() {
        text(EMPTY_HISTORY_MESSAGE).size(14).into()
    } else {
        ledger
            .entries()
            .iter()
            .fold(Column::new().spacing(8), |col, entry| {
                col.push(
                    row![
                        text(&entry.name).size(16),
                        Space::with_width(Length::Fill),
                        text(format!("{} {}", entry.date, entry.time)).size(13),
                        text(format!("{}%", entry.confidence)).size(13),
                    ]
                    .spacing(12),
                )
            })
            .into()
    };

    container(column![text("Recent Analyses").size(20), body].spacing(10))
        .padding(20)
        .width(Length::Fill)
        .into()
}
