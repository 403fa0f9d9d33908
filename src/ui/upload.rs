/// Upload panel: picker prompt or preview of the staged image
use iced::widget::{button, column, container, row, text, Image};
use iced::{Alignment, Element, Length};

use crate::state::upload::StagedImage;
use crate::Message;

/// Everything the panel needs to know, read off the controller
pub struct UploadPanel<'a> {
    pub staged: Option<&'a StagedImage>,
    pub decoding: bool,
    pub hovering: bool,
    pub busy: bool,
    pub can_analyze: bool,
}

pub fn view(panel: UploadPanel<'_>) -> Element<'_, Message> {
    let region: Element<'_, Message> = match panel.staged {
        None => prompt(panel.hovering, panel.decoding),
        Some(staged) => preview(staged),
    };

    let analyze_label = if panel.busy { "Analyzing..." } else { "Analyze" };
    let mut controls = column![
        button(analyze_label)
            .on_press_maybe(panel.can_analyze.then_some(Message::Analyze))
            .padding(10),
    ]
    .spacing(10)
    .align_x(Alignment::Center);

    if panel.busy {
        controls = controls.push(text("Analyzing leaf image...").size(14));
    }

    container(column![region, controls].spacing(20).align_x(Alignment::Center))
        .padding(20)
        .width(Length::Fill)
        .into()
}

fn prompt<'a>(hovering: bool, decoding: bool) -> Element<'a, Message> {
    let hint = if hovering {
        "Release to upload"
    } else if decoding {
        "Loading image..."
    } else {
        "Drag & drop a leaf photo here (max 5MB)"
    };

    column![
        text(hint).size(18),
        row![
            button("Browse Files").on_press(Message::BrowseImage).padding(10),
            button("Use Sample Image").on_press(Message::UseSample).padding(10),
        ]
        .spacing(10),
    ]
    .spacing(15)
    .align_x(Alignment::Center)
    .into()
}

fn preview(staged: &StagedImage) -> Element<'_, Message> {
    let picture: Element<'_, Message> = match staged {
        StagedImage::Local { handle, .. } => Image::new(handle.clone())
            .height(Length::Fixed(240.0))
            .into(),
        // Remote samples are shown by reference only
        StagedImage::Sample { .. } => text("🌿").size(96).into(),
    };

    column![
        picture,
        text(staged.label()).size(13),
        button("Remove").on_press(Message::RemoveImage).padding(8),
    ]
    .spacing(10)
    .align_x(Alignment::Center)
    .into()
}
