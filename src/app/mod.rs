// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the spot displayer,
//! the selection model and persisted preferences.
//!
//! The `App` owns long-lived state (the [`SpotDisplayer`], the spot
//! [`Selection`], the loaded [`Config`]) and translates messages into
//! displayer calls. The displayer reports selection changes back as effects;
//! the app folds them into its selection and highlights the result.
//!
//! ```no_run
//! use spot_lens::app::{self, Flags};
//!
//! fn main() -> iced::Result {
//!     app::run(Flags::default())
//! }
//! ```

mod message;
mod subscription;
mod update;
mod view;

pub use message::{ColorChoice, Flags, Message};

use crate::config::{self, Config};
use crate::display::{DisplaySurface, EditState, SpotDisplayer};
use crate::domain::{Selection, Settings, SpotCollection};
use crate::spot_file;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::{Path, PathBuf};

pub const WINDOW_DEFAULT_HEIGHT: u32 = 700;
pub const WINDOW_DEFAULT_WIDTH: u32 = 900;
pub const MIN_WINDOW_HEIGHT: u32 = 400;
pub const MIN_WINDOW_WIDTH: u32 = 600;

const APP_NAME: &str = "SpotLens";

/// Root Iced application state.
pub struct App {
    displayer: SpotDisplayer,
    selection: Selection,
    config: Config,
    config_dir: Option<PathBuf>,
    /// Warning key raised while loading `settings.toml`.
    config_warning: Option<String>,
    /// Name of the loaded spot file, shown in the title.
    source_name: Option<String>,
    /// Last error worth showing in the status line.
    status_error: Option<String>,
    track_depth: usize,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("displayer", &self.displayer)
            .field("selected", &self.selection.len())
            .finish()
    }
}

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Current 1-based (slice, frame) of the displayer, or (1, 1) before rendering.
fn current_position(displayer: &SpotDisplayer) -> (usize, usize) {
    displayer
        .view()
        .map_or((1, 1), |view| (view.current_slice(), view.current_frame()))
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires a Fn boot closure, flags are consumed once
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes application state from the config file and the optional
    /// spot file given on the command line.
    pub fn new(flags: Flags) -> (Self, Task<Message>) {
        let config_dir = flags.config_dir.map(PathBuf::from);
        let (config, config_warning) = config::load_with_override(config_dir.clone());

        let mut status_error = None;
        let mut source_name = None;
        let (settings, spots, links) = match flags.spots_path.as_deref().map(Path::new) {
            Some(path) => match spot_file::load_from_path(path) {
                Ok(file) => {
                    source_name = path
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned());
                    (file.settings, file.spots, file.links)
                }
                Err(err) => {
                    log::error!("Failed to load {}: {}", path.display(), err);
                    status_error = Some(err.to_string());
                    (Settings::default(), SpotCollection::new(), Vec::new())
                }
            },
            None => (Settings::default(), SpotCollection::new(), Vec::new()),
        };

        let mut app = Self {
            displayer: SpotDisplayer::new(settings),
            selection: Selection::new(),
            track_depth: config::DEFAULT_TRACK_DISPLAY_DEPTH,
            config,
            config_dir,
            config_warning,
            source_name,
            status_error,
        };
        app.apply_config();
        app.displayer.set_spots(spots);
        app.displayer.set_track_links(links);

        if let Err(err) = app.displayer.render() {
            log::error!("Failed to render display: {}", err);
            app.status_error = Some(err.to_string());
        }

        (app, Task::none())
    }

    fn apply_config(&mut self) {
        let display = &self.config.display;
        let ratio = self.config.radius_display_ratio();
        let spot_visible = display.spot_visible.unwrap_or(config::DEFAULT_SPOT_VISIBLE);
        let track_visible = display
            .track_visible
            .unwrap_or(config::DEFAULT_TRACK_VISIBLE);
        let color = display.spot_color.unwrap_or_default();
        let mode = display.track_display_mode.unwrap_or_default();
        self.track_depth = display
            .track_display_depth
            .unwrap_or(config::DEFAULT_TRACK_DISPLAY_DEPTH);

        self.displayer.set_radius_display_ratio(ratio);
        self.displayer.set_spot_visible(spot_visible);
        self.displayer.set_track_visible(track_visible);
        self.displayer.set_default_color(color);
        self.displayer
            .set_display_track_mode(mode, self.track_depth);
        if let Some(radius) = self.config.selection_radius() {
            self.displayer.set_selection_radius(radius);
        }
    }

    fn title(&self) -> String {
        match &self.source_name {
            Some(name) => format!("{} - {}", name, APP_NAME),
            None => APP_NAME.to_string(),
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::create_event_subscription()
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            displayer: &mut self.displayer,
            selection: &mut self.selection,
            config: &mut self.config,
            config_dir: &self.config_dir,
            status_error: &mut self.status_error,
            track_depth: self.track_depth,
        };
        update::handle_message(&mut ctx, message)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            displayer: &self.displayer,
            status: self.status_line(),
        })
    }

    fn status_line(&self) -> String {
        if let Some(error) = &self.status_error {
            return format!("Error: {}", error);
        }
        let mut status = format!(
            "{} spots, {} selected",
            self.displayer.spots_to_show().len(),
            self.selection.len()
        );
        if let EditState::Editing(spot) = self.displayer.edit_state() {
            status.push_str(&format!(", editing {}", spot.name()));
        }
        if self.config_warning.is_some() {
            status.push_str(", settings.toml could not be read");
        }
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{ClickEvent, Viewport};
    use crate::ui::spot_canvas::CanvasMessage;
    use std::fs;
    use tempfile::tempdir;

    const SPOTS: &str = r#"
[settings]
width = 64
height = 64
nslices = 1
nframes = 2

[[spots]]
name = "a0"
frame = 0
x = 10.0
y = 10.0

[[spots]]
name = "b0"
frame = 0
x = 40.0
y = 40.0

[[spots]]
name = "a1"
frame = 1
x = 12.0
y = 11.0

[[links]]
source = "a0"
target = "a1"
"#;

    fn app_with_spots() -> (App, tempfile::TempDir) {
        let dir = tempdir().expect("temp dir");
        let spots_path = dir.path().join("spots.toml");
        fs::write(&spots_path, SPOTS).expect("write spots");
        let (app, _task) = App::new(Flags {
            spots_path: Some(spots_path.to_string_lossy().into_owned()),
            config_dir: Some(dir.path().join("config").to_string_lossy().into_owned()),
        });
        (app, dir)
    }

    fn click(app: &mut App, event: ClickEvent) {
        let _ = app.update(Message::Canvas(CanvasMessage::Clicked {
            event,
            viewport: Viewport::default(),
        }));
    }

    #[test]
    fn new_app_loads_spot_file() {
        let (app, _dir) = app_with_spots();
        assert_eq!(app.displayer.spots().len(), 3);
        assert_eq!(app.title(), "spots.toml - SpotLens");
        assert!(app.status_error.is_none());
    }

    #[test]
    fn missing_spot_file_shows_error_and_blank_display() {
        let dir = tempdir().expect("temp dir");
        let (app, _task) = App::new(Flags {
            spots_path: Some(dir.path().join("absent.toml").to_string_lossy().into_owned()),
            config_dir: Some(dir.path().to_string_lossy().into_owned()),
        });
        assert!(app.status_error.is_some());
        assert!(app.displayer.view().is_some());
        assert_eq!(app.title(), "SpotLens");
    }

    #[test]
    fn single_click_selects_and_highlights_nearest_spot() {
        let (mut app, _dir) = app_with_spots();
        click(&mut app, ClickEvent::single(11.0, 11.0));

        let a0 = app.displayer.spots().frame(0)[0].id();
        assert!(app.selection.contains(a0));
        assert_eq!(app.selection.len(), 1);
        assert!(app.displayer.spot_overlay().is_highlighted(a0));
    }

    #[test]
    fn shift_click_adds_to_selection() {
        let (mut app, _dir) = app_with_spots();
        click(&mut app, ClickEvent::single(11.0, 11.0));
        click(&mut app, ClickEvent::single(39.0, 41.0).with_additive(true));
        assert_eq!(app.selection.len(), 2);
    }

    #[test]
    fn double_click_clears_selection_and_enters_edit_mode() {
        let (mut app, _dir) = app_with_spots();
        click(&mut app, ClickEvent::single(11.0, 11.0));
        click(&mut app, ClickEvent::double(11.0, 11.0));

        assert!(app.selection.is_empty());
        assert!(matches!(app.displayer.edit_state(), EditState::Editing(_)));
        assert!(app.status_line().contains("editing a0"));
    }

    #[test]
    fn frame_navigation_is_clamped() {
        let (mut app, _dir) = app_with_spots();
        let _ = app.update(Message::PreviousFrame);
        assert_eq!(current_position(&app.displayer), (1, 1));
        let _ = app.update(Message::NextFrame);
        let _ = app.update(Message::NextFrame);
        assert_eq!(current_position(&app.displayer), (1, 2));
    }

    #[test]
    fn save_settings_persists_display_changes() {
        let (mut app, dir) = app_with_spots();
        let _ = app.update(Message::RadiusRatioChanged(0.5));
        let _ = app.update(Message::TracksVisible(false));
        let _ = app.update(Message::SaveSettings);

        let saved = config::load_from_path(&dir.path().join("config").join("settings.toml"))
            .expect("saved config");
        assert_eq!(saved.display.radius_display_ratio, Some(0.5));
        assert_eq!(saved.display.track_visible, Some(false));
    }

    #[test]
    fn config_radius_overrides_selection_radius() {
        let dir = tempdir().expect("temp dir");
        fs::write(
            dir.path().join("settings.toml"),
            "[selection]\nradius = 1.0\n",
        )
        .expect("write config");
        let spots_path = dir.path().join("spots.toml");
        fs::write(&spots_path, SPOTS).expect("write spots");
        let (mut app, _task) = App::new(Flags {
            spots_path: Some(spots_path.to_string_lossy().into_owned()),
            config_dir: Some(dir.path().to_string_lossy().into_owned()),
        });

        // Two pixels away from a0, outside the one unit radius
        click(&mut app, ClickEvent::double(12.0, 10.0));
        let EditState::Editing(spot) = app.displayer.edit_state() else {
            panic!("expected edit mode");
        };
        assert_ne!(spot.name(), "a0");
    }

    #[test]
    fn moving_to_another_frame_ends_editing() {
        let (mut app, _dir) = app_with_spots();
        click(&mut app, ClickEvent::double(11.0, 11.0));
        assert!(matches!(app.displayer.edit_state(), EditState::Editing(_)));

        let _ = app.update(Message::NextFrame);
        assert_eq!(app.displayer.edit_state(), &EditState::Idle);
        assert!(!app.status_line().contains("editing"));
    }
}
