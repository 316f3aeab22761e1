//! Videomap - world map of the countries that appear in a video collection
//!
//! Countries with at least one tagged video are highlighted; clicking a
//! country opens a side panel listing its videos.

mod config;
mod countries;
mod data;
mod panels;
mod projection;
mod state;
mod topology;
mod videos;
mod world_map;

use anyhow::Context;
use gtk::{glib, Label};
use libadwaita::{prelude::*, Application, ApplicationWindow, HeaderBar, ToolbarView};
use std::rc::Rc;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::data::APP_ID;
use crate::videos::VideoIndex;
use crate::world_map::create_world_map_view;

fn main() -> glib::ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Ignoring config: {}", e);
            Config::default()
        }
    };
    info!(
        "Videomap starting (topology: {}, videos: {})",
        config.topology_path.display(),
        config.videos_path.display()
    );

    // Tokio runtime for thumbnail downloads
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to start async runtime: {}", e);
            return glib::ExitCode::FAILURE;
        }
    };
    let _guard = rt.enter();

    let app = Application::builder()
        .application_id(APP_ID)
        .build();

    let config = Rc::new(config);
    app.connect_activate(move |app| build_ui(app, &config));

    let exit_code = app.run();

    // Keep runtime alive until app exits
    drop(_guard);
    drop(rt);

    exit_code
}

fn load_videos(config: &Config) -> anyhow::Result<VideoIndex> {
    let index = VideoIndex::load(&config.videos_path)
        .with_context(|| format!("loading videos from {}", config.videos_path.display()))?;
    info!(
        "Loaded {} videos covering {} countries",
        index.len(),
        index.country_count()
    );
    Ok(index)
}

fn build_ui(app: &Application, config: &Config) {
    let videos = match load_videos(config) {
        Ok(index) => index,
        Err(e) => {
            warn!("{:#}", e);
            VideoIndex::default()
        }
    };

    let map_view = create_world_map_view(config, Rc::new(videos));

    let header_bar = HeaderBar::builder()
        .title_widget(&Label::new(Some("Videos por país")))
        .build();

    let toolbar_view = ToolbarView::builder()
        .build();
    toolbar_view.add_top_bar(&header_bar);
    toolbar_view.set_content(Some(&map_view));

    let window = ApplicationWindow::builder()
        .application(app)
        .title("Videomap")
        .default_width(1100)
        .default_height(700)
        .build();

    // Panel and card styling
    let css_provider = gtk::CssProvider::new();
    css_provider.load_from_data(
        ".country-panel {
            background-color: #f0f7fa;
            color: #333333;
        }
        .panel-title {
            font-size: 18px;
            font-weight: 600;
            color: #5ac3dd;
            border-bottom: 2px solid #5ac3dd;
            padding-bottom: 8px;
        }
        .country-name {
            font-size: 1.2em;
            font-weight: 500;
            color: #444444;
            margin-bottom: 8px;
        }
        .panel-subtitle {
            font-weight: 600;
            color: #5ac3dd;
        }
        .video-card {
            background-color: #ffffff;
            border-radius: 4px;
            box-shadow: 0 2px 4px alpha(black, 0.1);
        }
        .video-title {
            color: #1976d2;
            font-weight: 600;
        }
        .video-title:hover {
            text-decoration: underline;
        }
        .video-thumbnail {
            border-radius: 4px;
        }
        .video-description {
            color: #666666;
            font-size: 0.9em;
        }
        .video-date {
            color: #888888;
            font-style: italic;
            font-size: 0.8em;
        }
        .empty-videos {
            color: #666666;
            font-style: italic;
        }
        .info-panel {
            color: #333333;
        }
        .info-title {
            font-size: 18px;
            font-weight: 700;
            color: #f57c00;
        }"
    );

    gtk::style_context_add_provider_for_display(
        &gtk::prelude::WidgetExt::display(&window),
        &css_provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );

    window.set_content(Some(&toolbar_view));
    window.present();
}
