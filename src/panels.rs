use gtk::prelude::*;
use gtk::{glib, Label, Orientation, ScrolledWindow};
use chrono::NaiveDate;
use tracing::warn;

use crate::data::{VideoRecord, DESCRIPTION_MAX_CHARS};

pub const COUNTRY_PANEL_WIDTH: f64 = 450.0;
pub const INFO_PANEL_WIDTH: f64 = 400.0;

/// Right-hand panel listing the videos of the selected country
#[derive(Clone)]
pub struct CountryPanel {
    pub root: gtk::Box,
    pub close_button: gtk::Button,
    name_label: Label,
    videos_box: gtk::Box,
}

impl CountryPanel {
    pub fn new() -> Self {
        let root = gtk::Box::builder()
            .orientation(Orientation::Vertical)
            .width_request(COUNTRY_PANEL_WIDTH as i32)
            .build();
        root.add_css_class("country-panel");

        // Header with title and close button
        let header = gtk::Box::builder()
            .orientation(Orientation::Horizontal)
            .spacing(8)
            .margin_top(24)
            .margin_start(24)
            .margin_end(16)
            .build();

        let title = Label::builder()
            .label("Información del País")
            .xalign(0.0)
            .hexpand(true)
            .build();
        title.add_css_class("panel-title");
        header.append(&title);

        let close_button = gtk::Button::builder()
            .icon_name("window-close-symbolic")
            .tooltip_text("Cerrar")
            .valign(gtk::Align::Center)
            .build();
        close_button.add_css_class("flat");
        header.append(&close_button);

        root.append(&header);

        let content = gtk::Box::builder()
            .orientation(Orientation::Vertical)
            .spacing(8)
            .margin_top(12)
            .margin_bottom(24)
            .margin_start(24)
            .margin_end(24)
            .build();

        let name_label = Label::builder()
            .xalign(0.0)
            .wrap(true)
            .build();
        name_label.add_css_class("country-name");
        content.append(&name_label);

        let videos_header = Label::builder()
            .label("Videos:")
            .xalign(0.0)
            .build();
        videos_header.add_css_class("panel-subtitle");
        content.append(&videos_header);

        let videos_box = gtk::Box::builder()
            .orientation(Orientation::Vertical)
            .spacing(16)
            .build();
        content.append(&videos_box);

        let scrolled = ScrolledWindow::builder()
            .vexpand(true)
            .hscrollbar_policy(gtk::PolicyType::Never)
            .build();
        scrolled.set_child(Some(&content));
        root.append(&scrolled);

        Self {
            root,
            close_button,
            name_label,
            videos_box,
        }
    }

    /// Replace the panel contents with `videos` for `country`.
    pub fn show_country(&self, country: &str, videos: &[&VideoRecord]) {
        self.clear();
        self.name_label.set_label(country);

        if videos.is_empty() {
            let empty = Label::builder()
                .label("No hay videos para este país.")
                .xalign(0.0)
                .build();
            empty.add_css_class("empty-videos");
            self.videos_box.append(&empty);
            return;
        }

        for video in videos {
            self.videos_box.append(&create_video_card(video));
        }
    }

    pub fn clear(&self) {
        self.name_label.set_label("");
        while let Some(child) = self.videos_box.first_child() {
            self.videos_box.remove(&child);
        }
    }
}

/// Card for one video: linked title, thumbnail, short description and date
fn create_video_card(video: &VideoRecord) -> gtk::Box {
    let card = gtk::Box::builder()
        .orientation(Orientation::Vertical)
        .spacing(8)
        .build();
    card.add_css_class("video-card");

    let content_box = gtk::Box::builder()
        .orientation(Orientation::Vertical)
        .spacing(6)
        .margin_top(16)
        .margin_bottom(16)
        .margin_start(16)
        .margin_end(16)
        .build();

    // Title opens the video in the browser
    let title_label = Label::builder()
        .label(&video.title)
        .wrap(true)
        .wrap_mode(gtk::pango::WrapMode::WordChar)
        .xalign(0.0)
        .build();
    title_label.add_css_class("video-title");

    let gesture = gtk::GestureClick::new();
    let url = video.url.clone();
    gesture.connect_released(move |_, _, _, _| {
        if let Err(e) = open::that(&url) {
            warn!("Failed to open URL {}: {}", url, e);
        }
    });
    title_label.add_controller(gesture);
    title_label.set_cursor_from_name(Some("pointer"));
    title_label.set_tooltip_text(Some(&video.url));
    content_box.append(&title_label);

    if !video.thumbnail.is_empty() {
        let picture = gtk::Picture::builder()
            .halign(gtk::Align::Start)
            .can_shrink(true)
            .content_fit(gtk::ContentFit::Cover)
            .alternative_text(&video.title)
            .visible(false)
            .build();
        picture.set_size_request(250, 140);
        picture.add_css_class("video-thumbnail");
        content_box.append(&picture);

        // Load the thumbnail asynchronously
        let url = video.thumbnail.clone();
        let picture_clone = picture.clone();
        glib::spawn_future_local(async move {
            match fetch_thumbnail(&url).await {
                Ok(texture) => {
                    picture_clone.set_paintable(Some(&texture));
                    picture_clone.set_visible(true);
                }
                Err(e) => warn!("Failed to load thumbnail {}: {}", url, e),
            }
        });
    }

    if !video.description.is_empty() {
        let description = Label::builder()
            .label(truncate_text(&video.description, DESCRIPTION_MAX_CHARS))
            .wrap(true)
            .wrap_mode(gtk::pango::WrapMode::WordChar)
            .xalign(0.0)
            .build();
        description.add_css_class("video-description");
        content_box.append(&description);
    }

    let date = Label::builder()
        .label(format!("Fecha: {}", format_upload_date(&video.upload_date)))
        .xalign(0.0)
        .build();
    date.add_css_class("video-date");
    content_box.append(&date);

    card.append(&content_box);
    card
}

async fn fetch_thumbnail(url: &str) -> anyhow::Result<gdk::Texture> {
    let bytes = reqwest::get(url).await?.error_for_status()?.bytes().await?;
    let bytes = glib::Bytes::from(&bytes.to_vec());
    Ok(gdk::Texture::from_bytes(&bytes)?)
}

/// Left-hand notice panel
pub fn create_info_panel(on_close: impl Fn() + 'static) -> gtk::Box {
    let root = gtk::Box::builder()
        .orientation(Orientation::Vertical)
        .spacing(12)
        .margin_top(24)
        .margin_bottom(24)
        .margin_start(24)
        .margin_end(24)
        .width_request(INFO_PANEL_WIDTH as i32 - 48)
        .build();
    root.add_css_class("info-panel");

    let header = gtk::Box::builder()
        .orientation(Orientation::Horizontal)
        .spacing(8)
        .build();

    let title = Label::builder()
        .label("Aviso Importante")
        .xalign(0.0)
        .hexpand(true)
        .build();
    title.add_css_class("info-title");
    header.append(&title);

    let close_button = gtk::Button::builder()
        .icon_name("window-close-symbolic")
        .tooltip_text("Cerrar")
        .build();
    close_button.add_css_class("flat");
    close_button.connect_clicked(move |_| on_close());
    header.append(&close_button);

    root.append(&header);
    root.append(&gtk::Separator::new(Orientation::Horizontal));

    let notice = Label::builder()
        .use_markup(true)
        .label("Esta página <b>no es oficial</b> ni está relacionada con <b>Zerospoker</b>.")
        .wrap(true)
        .xalign(0.0)
        .build();
    root.append(&notice);

    let origin = Label::builder()
        .use_markup(true)
        .label(
            "Ha sido creada únicamente por un <b>programador aficionado</b> a su contenido, \
             con fines no comerciales.",
        )
        .wrap(true)
        .xalign(0.0)
        .build();
    origin.add_css_class("body");
    root.append(&origin);

    root
}

/// Cut `text` to `max_chars` characters, marking the cut with "...".
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

/// Show `YYYYMMDD` or `YYYY-MM-DD` upload dates as `DD/MM/YYYY`.
///
/// Anything else is shown as given.
pub fn format_upload_date(raw: &str) -> String {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y%m%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .map(|date| date.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
