use chrono::Local;
use iced::widget::{column, container, row, scrollable};
use iced::widget::scrollable::RelativeOffset;
use iced::{event, window, Alignment, Element, Event, Length, Subscription, Task, Theme};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use std::path::PathBuf;

mod catalog;
mod config;
mod error;
mod report;
mod state;
mod ui;

use catalog::Catalog;
use config::AppConfig;
use error::AppError;
use state::analysis::processing_delay;
use state::controller::Controller;
use state::history::HistoryStore;
use state::upload::{decode_image, DecodedImage, DropGesture, ImageFile};

/// Extensions offered by the file picker
const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "webp", "bmp", "tiff"];

/// Main application state
struct LeafDoctor {
    config: AppConfig,
    /// Owns upload, analysis and history state
    controller: Controller,
    drop_gesture: DropGesture,
    /// A file is being dragged over the window
    hovering: bool,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked "Browse Files"
    BrowseImage,
    /// User clicked "Use Sample Image"
    UseSample,
    /// User clicked "Remove" on the preview
    RemoveImage,
    FileHovered,
    FilesHoveredLeft,
    FileDropped(PathBuf),
    /// Background decode finished for the given generation
    ImageDecoded(u64, Result<DecodedImage, String>),
    Analyze,
    /// The simulated processing delay elapsed
    AnalysisFinished,
    SaveReport,
    Share,
    Print,
}

impl LeafDoctor {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = AppConfig::from_env();
        let store = HistoryStore::new(config.history_path());
        let controller = Controller::new(Catalog::builtin(), store);

        log::info!(
            "🌿 Leaf Doctor initialized with {} past analyses",
            controller.history().len()
        );

        (
            LeafDoctor {
                config,
                controller,
                drop_gesture: DropGesture::default(),
                hovering: false,
                status: String::from("Ready. Upload a leaf photo to begin."),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::BrowseImage => {
                // Show the native file picker dialog
                let file = FileDialog::new()
                    .set_title("Select a Leaf Photo")
                    .add_filter("Images", &IMAGE_EXTENSIONS[..])
                    .pick_file();

                match file {
                    Some(path) => self.stage_path(path),
                    None => Task::none(),
                }
            }
            Message::UseSample => {
                let url = self.controller.stage_sample(&mut rand::thread_rng());
                log::info!("🖼️  Staged sample image {}", url);
                self.status = String::from("Sample image ready. Press Analyze.");
                Task::none()
            }
            Message::RemoveImage => {
                self.controller.reset_upload();
                self.status = String::from("Image removed.");
                Task::none()
            }
            Message::FileHovered => {
                self.hovering = true;
                self.drop_gesture.hovered();
                Task::none()
            }
            Message::FilesHoveredLeft => {
                self.hovering = false;
                self.drop_gesture.left();
                Task::none()
            }
            Message::FileDropped(path) => {
                self.hovering = false;
                match self.drop_gesture.dropped(path) {
                    Some(path) => self.stage_path(path),
                    None => Task::none(),
                }
            }
            Message::ImageDecoded(generation, result) => {
                match self.controller.finish_decode(generation, result) {
                    Ok(true) => {
                        self.status = String::from("Image ready. Press Analyze.");
                    }
                    Ok(false) => {
                        log::debug!("Discarded superseded decode #{}", generation);
                    }
                    Err(e) => self.show_error(e),
                }
                Task::none()
            }
            Message::Analyze => {
                if !self.controller.trigger_analysis() {
                    return Task::none();
                }

                self.status = String::from("Analyzing...");
                Task::perform(
                    processing_delay(self.config.analysis_delay),
                    |_| Message::AnalysisFinished,
                )
            }
            Message::AnalysisFinished => {
                let completed = self
                    .controller
                    .complete_analysis(&mut rand::thread_rng(), Local::now());

                log::info!(
                    "🔬 Analysis result: {} ({}%)",
                    completed.diagnosis.name,
                    completed.diagnosis.record.confidence
                );
                self.status = format!("✅ Detected {}", completed.diagnosis.name);

                if let Err(e) = completed.persisted {
                    self.show_error(AppError::Storage(e));
                }

                scrollable::snap_to(page_scroll_id(), RelativeOffset::END)
            }
            Message::SaveReport => {
                let report = match self.controller.report(Local::now()) {
                    Ok(report) => report,
                    Err(e) => {
                        self.show_error(e);
                        return Task::none();
                    }
                };

                let target = FileDialog::new()
                    .set_title("Save Report")
                    .set_file_name("leaf-doctor-report.txt")
                    .save_file();

                if let Some(path) = target {
                    match report::save_report(&path, &report) {
                        Ok(()) => self.status = format!("Report saved to {}", path.display()),
                        Err(e) => self.show_error(e),
                    }
                }
                Task::none()
            }
            Message::Share => match self.controller.share_payload() {
                Ok(payload) => {
                    self.status = String::from("Results copied to clipboard");
                    iced::clipboard::write(payload.to_string())
                }
                Err(e) => {
                    self.show_error(e);
                    Task::none()
                }
            },
            Message::Print => {
                let report = self.controller.report(Local::now()).ok();
                report::print(report.as_deref());
                Task::none()
            }
        }
    }

    /// Validate a picked or dropped file and start decoding it
    fn stage_path(&mut self, path: PathBuf) -> Task<Message> {
        let file = match ImageFile::from_path(&path) {
            Ok(file) => file,
            Err(e) => {
                log::warn!("⚠️  Cannot read {}: {}", path.display(), e);
                self.status = format!("Cannot read {}", path.display());
                return Task::none();
            }
        };

        match self.controller.stage_file(&file) {
            Ok(generation) => {
                self.status = format!("Loading {}...", path.display());
                Task::perform(decode_image(generation, path), |(generation, result)| {
                    Message::ImageDecoded(generation, result)
                })
            }
            Err(e) => {
                self.show_error(e);
                Task::none()
            }
        }
    }

    /// Route an error to an alert, the status line, or nowhere
    fn show_error(&mut self, error: AppError) {
        if error.is_silent() {
            log::debug!("Ignored: {}", error);
            return;
        }

        log::warn!("⚠️  {}", error);

        if error.is_blocking() {
            MessageDialog::new()
                .set_level(MessageLevel::Warning)
                .set_title("Leaf Doctor")
                .set_description(error.to_string())
                .set_buttons(MessageButtons::Ok)
                .show();
        } else {
            self.status = error.to_string();
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let upload = ui::upload::view(ui::upload::UploadPanel {
            staged: self.controller.upload().staged(),
            decoding: self.controller.upload().is_decoding(),
            hovering: self.hovering,
            busy: self.controller.analysis().is_busy(),
            can_analyze: self.controller.can_analyze(),
        });

        // Results close the main column so scrolling to the end lands on them
        let main_column = column![
            upload,
            iced::widget::text(&self.status).size(14),
            ui::results::view(self.controller.current()),
            ui::export_bar(),
        ]
        .spacing(20)
        .width(Length::FillPortion(2))
        .align_x(Alignment::Center);

        let history = container(ui::history::view(self.controller.history()))
            .width(Length::FillPortion(1));

        let content = column![
            ui::header(),
            row![main_column, history].spacing(20),
        ]
        .spacing(20)
        .padding(40)
        .align_x(Alignment::Center);

        container(scrollable(content).id(page_scroll_id()))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Listen for files dragged onto the window
    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
            Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FilesHoveredLeft),
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

fn page_scroll_id() -> scrollable::Id {
    scrollable::Id::new("page")
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    iced::application("Leaf Doctor", LeafDoctor::update, LeafDoctor::view)
        .subscription(LeafDoctor::subscription)
        .theme(LeafDoctor::theme)
        .centered()
        .run_with(LeafDoctor::new)
}
