use gtk::prelude::*;
use gtk::{cairo, gio, glib, Align, Label, Orientation};
use libadwaita::OverlaySplitView;
use geo::MultiPolygon;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::data::{
    Rgb, BORDER, FILL_DEFAULT, FILL_DEFAULT_HOVER, FILL_PRESSED, FILL_SELECTED, FILL_WITH_VIDEOS,
    FILL_WITH_VIDEOS_HOVER, OCEAN,
};
use crate::panels::{create_info_panel, CountryPanel, COUNTRY_PANEL_WIDTH, INFO_PANEL_WIDTH};
use crate::projection::{hit_test, MapTransform, ProjectedShape};
use crate::state::{Selection, Viewport};
use crate::topology::load_topology;
use crate::videos::VideoIndex;

/// Pointer travel (in pixels) before a press turns into a pan
const DRAG_THRESHOLD: f64 = 4.0;
/// Keyboard pan step at zoom 1, in degrees
const PAN_STEP_DEGREES: f64 = 10.0;

/// A country ready to be drawn and picked
pub struct MapFeature {
    pub display_name: String,
    pub has_videos: bool,
    pub outline: ProjectedShape,
}

pub enum MapLoadState {
    Loading,
    Ready(Vec<MapFeature>),
}

struct MapState {
    load: MapLoadState,
    viewport: Viewport,
    selection: Selection,
    hovered: Option<usize>,
    pressed: Option<usize>,
    drag_start: Option<(f64, f64)>,
    dragged: bool,
}

impl Default for MapState {
    fn default() -> Self {
        Self {
            load: MapLoadState::Loading,
            viewport: Viewport::default(),
            selection: Selection::default(),
            hovered: None,
            pressed: None,
            drag_start: None,
            dragged: false,
        }
    }
}

/// Fill for a country given its interaction state
pub fn fill_color(selected: bool, has_videos: bool, hovered: bool, pressed: bool) -> Rgb {
    if pressed {
        FILL_PRESSED
    } else if selected {
        FILL_SELECTED
    } else if has_videos {
        if hovered { FILL_WITH_VIDEOS_HOVER } else { FILL_WITH_VIDEOS }
    } else if hovered {
        FILL_DEFAULT_HOVER
    } else {
        FILL_DEFAULT
    }
}

#[derive(Clone)]
struct MapView {
    state: Rc<RefCell<MapState>>,
    videos: Rc<VideoIndex>,
    drawing_area: gtk::DrawingArea,
    country_split: OverlaySplitView,
    country_panel: CountryPanel,
}

impl MapView {
    fn redraw(&self) {
        self.drawing_area.queue_draw();
    }

    fn transform(&self, viewport: &Viewport) -> MapTransform {
        MapTransform::new(
            self.drawing_area.width() as f64,
            self.drawing_area.height() as f64,
            viewport,
        )
    }

    fn feature_at(&self, x: f64, y: f64) -> Option<usize> {
        let state = self.state.borrow();
        let MapLoadState::Ready(features) = &state.load else {
            return None;
        };
        let point = self.transform(&state.viewport).to_projected(x, y);
        hit_test(features.iter().map(|f| &f.outline), point)
    }

    fn select_at(&self, x: f64, y: f64) {
        let Some(index) = self.feature_at(x, y) else {
            return;
        };
        let name = {
            let mut state = self.state.borrow_mut();
            let MapLoadState::Ready(features) = &state.load else {
                return;
            };
            let name = features[index].display_name.clone();
            state.selection.select(name.clone());
            name
        };

        let videos = self.videos.lookup(Some(&name));
        info!("Selected {} ({} videos)", name, videos.len());
        self.country_panel.show_country(&name, &videos);
        self.country_split.set_show_sidebar(true);
        self.redraw();
    }

    fn close_panel(&self) {
        self.country_split.set_show_sidebar(false);
        self.on_panel_hidden();
    }

    fn on_panel_hidden(&self) {
        {
            let mut state = self.state.borrow_mut();
            if !state.selection.is_panel_open() {
                return;
            }
            state.selection.close();
        }
        debug!("Country panel closed");
        self.country_panel.clear();
        self.redraw();
    }

    fn update_viewport(&self, update: impl FnOnce(&mut Viewport)) {
        update(&mut self.state.borrow_mut().viewport);
        self.redraw();
    }

    fn set_hovered(&self, hovered: Option<usize>) {
        let changed = {
            let mut state = self.state.borrow_mut();
            let changed = state.hovered != hovered;
            state.hovered = hovered;
            changed
        };
        if changed {
            self.redraw();
        }
    }
}

/// Build the map with its zoom controls and side panels.
///
/// The topology is decoded off the main thread; until it is ready a loading
/// label is shown. If decoding fails the map stays in that state.
pub fn create_world_map_view(config: &Config, videos: Rc<VideoIndex>) -> gtk::Widget {
    let drawing_area = gtk::DrawingArea::builder()
        .hexpand(true)
        .vexpand(true)
        .focusable(true)
        .build();

    let country_panel = CountryPanel::new();

    // Country panel slides in from the right and shrinks the map
    let country_split = OverlaySplitView::builder()
        .sidebar_position(gtk::PackType::End)
        .collapsed(false)
        .show_sidebar(false)
        .min_sidebar_width(300.0)
        .max_sidebar_width(COUNTRY_PANEL_WIDTH)
        .build();
    country_split.set_sidebar(Some(&country_panel.root));

    let view = MapView {
        state: Rc::new(RefCell::new(MapState::default())),
        videos,
        drawing_area: drawing_area.clone(),
        country_split: country_split.clone(),
        country_panel: country_panel.clone(),
    };

    let state_for_draw = view.state.clone();
    drawing_area.set_draw_func(move |_, cr, width, height| {
        let state = state_for_draw.borrow();
        draw_map(cr, width as f64, height as f64, &state);
    });

    install_pointer_controllers(&view);
    install_key_controller(&view);

    // Loading label until the topology is ready
    let stack = gtk::Stack::new();
    let loading_label = Label::builder()
        .label("Cargando mapa...")
        .halign(Align::Center)
        .valign(Align::Center)
        .build();
    loading_label.add_css_class("dim-label");
    stack.add_named(&loading_label, Some("loading"));
    stack.add_named(&drawing_area, Some("map"));
    stack.set_visible_child_name("loading");

    let overlay = gtk::Overlay::new();
    overlay.set_child(Some(&stack));

    let zoom_controls = create_zoom_controls(&view);
    zoom_controls.set_visible(false);
    overlay.add_overlay(&zoom_controls);

    // Closing from the panel button or by dismissing the sidebar clears the selection
    let view_for_close = view.clone();
    country_panel.close_button.connect_clicked(move |_| {
        view_for_close.close_panel();
    });
    let view_for_notify = view.clone();
    country_split.connect_show_sidebar_notify(move |split| {
        if !split.property::<bool>("show-sidebar") {
            view_for_notify.on_panel_hidden();
        }
    });

    country_split.set_content(Some(&overlay));

    let mut ready_widgets: Vec<gtk::Widget> = vec![zoom_controls.upcast()];

    let root: gtk::Widget = if config.show_info_panel {
        let info_split = OverlaySplitView::builder()
            .sidebar_position(gtk::PackType::Start)
            .collapsed(true)
            .show_sidebar(false)
            .max_sidebar_width(INFO_PANEL_WIDTH)
            .build();

        let info_split_for_close = info_split.clone();
        let info_panel = create_info_panel(move || info_split_for_close.set_show_sidebar(false));
        info_split.set_sidebar(Some(&info_panel));
        info_split.set_content(Some(&country_split));

        let info_button = gtk::Button::builder()
            .icon_name("dialog-information-symbolic")
            .tooltip_text("Información")
            .halign(Align::Start)
            .valign(Align::Start)
            .margin_top(10)
            .margin_start(10)
            .visible(false)
            .build();
        info_button.add_css_class("osd");
        info_button.add_css_class("circular");
        let info_split_for_button = info_split.clone();
        info_button.connect_clicked(move |_| {
            info_split_for_button.set_show_sidebar(true);
        });
        overlay.add_overlay(&info_button);
        ready_widgets.push(info_button.upcast());

        info_split.upcast()
    } else {
        country_split.clone().upcast()
    };

    // Decode and project the topology in the background
    let path = config.topology_path.clone();
    let object = config.topology_object.clone();
    let view_for_load = view.clone();
    glib::spawn_future_local(async move {
        let loaded = gio::spawn_blocking(move || {
            load_topology(&path, &object).map(|features| {
                features
                    .iter()
                    .map(|feature| (feature.display_name(), ProjectedShape::new(&feature.shape)))
                    .collect::<Vec<_>>()
            })
        })
        .await;

        let projected = match loaded {
            Ok(Ok(projected)) => projected,
            Ok(Err(e)) => {
                warn!("Failed to load map topology: {}", e);
                return;
            }
            Err(_) => {
                warn!("Map topology loader panicked");
                return;
            }
        };

        let features: Vec<MapFeature> = projected
            .into_iter()
            .map(|(display_name, outline)| MapFeature {
                has_videos: view_for_load.videos.has_videos(&display_name),
                display_name,
                outline,
            })
            .collect();
        let with_videos = features.iter().filter(|f| f.has_videos).count();
        info!(
            "Map ready: {} countries, {} with videos",
            features.len(),
            with_videos
        );

        view_for_load.state.borrow_mut().load = MapLoadState::Ready(features);
        stack.set_visible_child_name("map");
        for widget in &ready_widgets {
            widget.set_visible(true);
        }
        view_for_load.redraw();
    });

    root
}

fn create_zoom_controls(view: &MapView) -> gtk::Box {
    let controls = gtk::Box::builder()
        .orientation(Orientation::Vertical)
        .spacing(8)
        .halign(Align::End)
        .valign(Align::End)
        .margin_bottom(10)
        .margin_end(10)
        .build();

    let buttons: [(&str, &str, fn(&mut Viewport)); 3] = [
        ("list-add-symbolic", "Acercar", Viewport::zoom_in),
        ("list-remove-symbolic", "Alejar", Viewport::zoom_out),
        ("find-location-symbolic", "Restablecer mapa", Viewport::reset),
    ];

    for (icon, tooltip, action) in buttons {
        let button = gtk::Button::builder()
            .icon_name(icon)
            .tooltip_text(tooltip)
            .build();
        button.add_css_class("osd");
        button.add_css_class("circular");
        let view = view.clone();
        button.connect_clicked(move |_| view.update_viewport(action));
        controls.append(&button);
    }

    controls
}

fn install_pointer_controllers(view: &MapView) {
    let area = &view.drawing_area;

    // Hover highlight
    let motion = gtk::EventControllerMotion::new();
    let view_for_motion = view.clone();
    motion.connect_motion(move |_, x, y| {
        if view_for_motion.state.borrow().drag_start.is_some() {
            return;
        }
        let hovered = view_for_motion.feature_at(x, y);
        view_for_motion.set_hovered(hovered);
    });
    let view_for_leave = view.clone();
    motion.connect_leave(move |_| {
        view_for_leave.set_hovered(None);
    });
    area.add_controller(motion);

    // Press and click selection
    let click = gtk::GestureClick::new();
    click.set_button(gdk::BUTTON_PRIMARY);
    let view_for_press = view.clone();
    click.connect_pressed(move |_, _, x, y| {
        let pressed = view_for_press.feature_at(x, y);
        view_for_press.state.borrow_mut().pressed = pressed;
        view_for_press.drawing_area.grab_focus();
        view_for_press.redraw();
    });
    let view_for_release = view.clone();
    click.connect_released(move |_, _, x, y| {
        let was_drag = {
            let mut state = view_for_release.state.borrow_mut();
            state.pressed = None;
            state.dragged
        };
        if !was_drag {
            view_for_release.select_at(x, y);
        }
        view_for_release.redraw();
    });
    let view_for_stop = view.clone();
    click.connect_stopped(move |_| {
        view_for_stop.state.borrow_mut().pressed = None;
        view_for_stop.redraw();
    });
    area.add_controller(click);

    // Drag to pan
    let drag = gtk::GestureDrag::new();
    drag.set_button(gdk::BUTTON_PRIMARY);
    let view_for_begin = view.clone();
    drag.connect_drag_begin(move |_, _, _| {
        let mut state = view_for_begin.state.borrow_mut();
        state.drag_start = Some(state.viewport.center());
        state.dragged = false;
    });
    let view_for_update = view.clone();
    drag.connect_drag_update(move |_, dx, dy| {
        {
            let mut state = view_for_update.state.borrow_mut();
            let Some(start) = state.drag_start else {
                return;
            };
            if !state.dragged && dx.hypot(dy) < DRAG_THRESHOLD {
                return;
            }
            state.dragged = true;
            state.pressed = None;
            let (lon, lat) = view_for_update
                .transform(&state.viewport)
                .dragged_center(start, dx, dy);
            state.viewport.set_center(lon, lat);
        }
        view_for_update.redraw();
    });
    let view_for_end = view.clone();
    drag.connect_drag_end(move |_, _, _| {
        view_for_end.state.borrow_mut().drag_start = None;
    });
    area.add_controller(drag);

    // Scroll wheel zoom
    let scroll = gtk::EventControllerScroll::new(gtk::EventControllerScrollFlags::VERTICAL);
    let view_for_scroll = view.clone();
    scroll.connect_scroll(move |_, _, dy| {
        if dy < 0.0 {
            view_for_scroll.update_viewport(Viewport::zoom_in);
        } else if dy > 0.0 {
            view_for_scroll.update_viewport(Viewport::zoom_out);
        }
        glib::Propagation::Stop
    });
    area.add_controller(scroll);
}

fn install_key_controller(view: &MapView) {
    let keys = gtk::EventControllerKey::new();
    let view = view.clone();
    keys.connect_key_pressed(move |_, key, _, _| {
        let step = PAN_STEP_DEGREES / view.state.borrow().viewport.zoom() as f64;
        if key == gdk::Key::plus || key == gdk::Key::equal || key == gdk::Key::KP_Add {
            view.update_viewport(Viewport::zoom_in);
        } else if key == gdk::Key::minus || key == gdk::Key::KP_Subtract {
            view.update_viewport(Viewport::zoom_out);
        } else if key == gdk::Key::_0 || key == gdk::Key::Home {
            view.update_viewport(Viewport::reset);
        } else if key == gdk::Key::Left {
            view.update_viewport(|vp| vp.pan_by(-step, 0.0));
        } else if key == gdk::Key::Right {
            view.update_viewport(|vp| vp.pan_by(step, 0.0));
        } else if key == gdk::Key::Up {
            view.update_viewport(|vp| vp.pan_by(0.0, step));
        } else if key == gdk::Key::Down {
            view.update_viewport(|vp| vp.pan_by(0.0, -step));
        } else if key == gdk::Key::Escape {
            view.close_panel();
        } else {
            return glib::Propagation::Proceed;
        }
        glib::Propagation::Stop
    });
    view.drawing_area.add_controller(keys);
}

fn draw_map(cr: &cairo::Context, width: f64, height: f64, state: &MapState) {
    cr.set_source_rgb(OCEAN.0, OCEAN.1, OCEAN.2);
    let _ = cr.paint();

    let MapLoadState::Ready(features) = &state.load else {
        return;
    };

    let transform = MapTransform::new(width, height, &state.viewport);
    cr.set_fill_rule(cairo::FillRule::EvenOdd);
    cr.set_line_join(cairo::LineJoin::Round);
    cr.set_line_width(0.5);

    for (i, feature) in features.iter().enumerate() {
        let fill = fill_color(
            state.selection.is_selected(&feature.display_name),
            feature.has_videos,
            state.hovered == Some(i),
            state.pressed == Some(i),
        );
        trace_shape(cr, &feature.outline.shape, &transform);
        cr.set_source_rgb(fill.0, fill.1, fill.2);
        let _ = cr.fill_preserve();
        cr.set_source_rgb(BORDER.0, BORDER.1, BORDER.2);
        let _ = cr.stroke();
    }
}

fn trace_shape(cr: &cairo::Context, shape: &MultiPolygon<f64>, transform: &MapTransform) {
    cr.new_path();
    for polygon in shape {
        for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors()) {
            let mut coords = ring.coords();
            let Some(first) = coords.next() else {
                continue;
            };
            let (x, y) = transform.to_screen(*first);
            cr.move_to(x, y);
            for coord in coords {
                let (x, y) = transform.to_screen(*coord);
                cr.line_to(x, y);
            }
            cr.close_path();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_for_plain_country() {
        assert_eq!(fill_color(false, false, false, false), FILL_DEFAULT);
        assert_eq!(fill_color(false, false, true, false), FILL_DEFAULT_HOVER);
    }

    #[test]
    fn test_fill_for_country_with_videos() {
        assert_eq!(fill_color(false, true, false, false), FILL_WITH_VIDEOS);
        assert_eq!(fill_color(false, true, true, false), FILL_WITH_VIDEOS_HOVER);
    }

    #[test]
    fn test_selected_and_pressed_win() {
        for has_videos in [false, true] {
            for hovered in [false, true] {
                assert_eq!(fill_color(true, has_videos, hovered, false), FILL_SELECTED);
                assert_eq!(fill_color(false, has_videos, hovered, true), FILL_PRESSED);
            }
        }
    }
}
