use egui::{Align2, Area, Frame, Id, Key, Order, Rect, TextEdit, Ui};
use pinpoint::{CoordinateInput, SearchMap, SearchMapConfig, SearchPanel};

use crate::widget::GalileoMapWidget;

const STORAGE_KEY: &str = "pinpoint_search_input";

/// Search map application: coordinate inputs and buttons above the map.
pub struct SearchMapApp {
    panel: SearchPanel<GalileoMapWidget>,
    popup_rect: Option<Rect>,
    restored: bool,
}

impl SearchMapApp {
    /// Creates the application and attaches the map widget to it.
    ///
    /// The input fields show the initial center of the map until the input of the previous
    /// session is restored on the first frame.
    pub fn new(widget: GalileoMapWidget, config: SearchMapConfig) -> Self {
        log::info!(
            "Starting search map at {} (z-level {})",
            config.initial_view.center,
            config.initial_view.zoom
        );

        let input = CoordinateInput::from_coordinate(config.initial_view.center);
        let mut panel =
            SearchPanel::new(SearchMap::new(input).with_search_zoom(config.search_zoom));
        if let Err(err) = panel.attach(widget) {
            log::error!("Failed to attach map widget: {err}");
        }

        Self {
            panel,
            popup_rect: None,
            restored: false,
        }
    }

    fn restore_input(&mut self, frame: &eframe::Frame) {
        self.restored = true;

        let Some(input) = frame
            .storage()
            .and_then(|storage| eframe::get_value::<CoordinateInput>(storage, STORAGE_KEY))
        else {
            return;
        };

        log::debug!("Restored search input {input:?}");
        *self.panel.input_mut() = input;
    }

    fn show_controls(&mut self, ui: &mut Ui) {
        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            ui.heading("Search Map");
        });
        ui.add_space(8.0);

        let mut submitted = false;
        ui.horizontal(|ui| {
            let input = self.panel.input_mut();
            let lat = ui.add(TextEdit::singleline(&mut input.lat).hint_text("Enter latitude"));
            let lng = ui.add(TextEdit::singleline(&mut input.lng).hint_text("Enter longitude"));
            let enter = ui.input(|i| i.key_pressed(Key::Enter));
            submitted = (lat.lost_focus() || lng.lost_focus()) && enter;

            if ui.button("Search").clicked() {
                submitted = true;
            }
            if ui.button("Clear Markers").clicked() {
                self.panel.clear();
            }
        });

        if submitted {
            self.panel.search();
        }

        if let Some(err) = self.panel.last_error() {
            ui.colored_label(ui.visuals().error_fg_color, err.to_string());
        }
        ui.add_space(8.0);
    }

    fn show_map(&mut self, ui: &mut Ui) {
        let map_rect = ui.available_rect_before_wrap();
        if let Some(widget) = self.panel.widget_mut() {
            widget.render(ui);
        } else {
            ui.centered_and_justified(|ui| ui.spinner());
            return;
        }

        self.handle_click(ui, map_rect);
        self.show_popup(ui.ctx(), map_rect);
    }

    fn handle_click(&mut self, ui: &Ui, map_rect: Rect) {
        let Some(pos) = ui.input(|i| {
            if i.pointer.primary_clicked() {
                i.pointer.interact_pos()
            } else {
                None
            }
        }) else {
            return;
        };

        if !map_rect.contains(pos) || self.popup_rect.is_some_and(|rect| rect.contains(pos)) {
            return;
        }

        let Some(widget) = self.panel.widget() else {
            return;
        };
        let Some(view) = widget.screen_view() else {
            return;
        };
        let icon = widget.marker_icon().clone();

        let px = [
            (pos.x - map_rect.left()) as f64,
            (pos.y - map_rect.top()) as f64,
        ];
        self.panel.click(&view, &icon, px);
    }

    fn show_popup(&mut self, ctx: &egui::Context, map_rect: Rect) {
        self.popup_rect = None;

        let Some(widget) = self.panel.widget() else {
            return;
        };
        let Some(view) = widget.screen_view() else {
            return;
        };
        let Some((text, px)) = self.panel.popup_placement(&view, widget.marker_icon()) else {
            return;
        };

        let pos = map_rect.min + egui::vec2(px[0] as f32, px[1] as f32);
        if !map_rect.contains(pos) {
            return;
        }

        let response = Area::new(Id::new("marker_popup"))
            .order(Order::Foreground)
            .fixed_pos(pos)
            .pivot(Align2::CENTER_BOTTOM)
            .show(ctx, |ui| {
                Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(text);
                });
            });

        self.popup_rect = Some(response.response.rect);
    }
}

impl eframe::App for SearchMapApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        if !self.restored {
            self.restore_input(frame);
        }

        egui::TopBottomPanel::top("search_controls").show(ctx, |ui| {
            self.show_controls(ui);
        });

        egui::CentralPanel::default()
            .frame(Frame::NONE)
            .show(ctx, |ui| {
                self.show_map(ui);
            });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, STORAGE_KEY, self.panel.input());
    }
}
