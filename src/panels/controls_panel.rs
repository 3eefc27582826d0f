use crate::MemeApp;
use crate::event::EditorEvent;
use crate::geometry::shape::Shape;
use crate::loader::LoadTarget;

/// Largest overlay edge the drag values allow
const MAX_OVERLAY_EDGE: f32 = 2000.0;

pub fn controls_panel(app: &mut MemeApp, ctx: &egui::Context) {
    egui::SidePanel::left("controls_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Meme Editor");
            ui.separator();

            image_section(app, ui);
            ui.separator();

            text_section(app, ctx, ui);
            ui.separator();

            overlay_section(app, ctx, ui);
            ui.separator();

            let can_export = !app.editor().scene().is_empty();
            if ui
                .add_enabled(can_export, egui::Button::new("Download"))
                .on_disabled_hover_text("Add a background, an overlay or a caption first")
                .clicked()
            {
                app.dispatch(ctx, EditorEvent::Export);
            }
        });
}

fn image_section(app: &mut MemeApp, ui: &mut egui::Ui) {
    ui.label("Template");
    let current = app.editor().panel().template_key.clone();
    let mut chosen = current.clone();
    let selected_text = app
        .templates()
        .get(&current)
        .map(|template| template.label.clone())
        .unwrap_or_else(|| "Choose a template".to_owned());

    egui::ComboBox::from_id_salt("template_picker")
        .selected_text(selected_text)
        .show_ui(ui, |ui| {
            for template in app.templates().iter() {
                ui.selectable_value(&mut chosen, template.key.clone(), template.label.as_str());
            }
        });
    if chosen != current {
        log::info!("Template selected from UI: {}", chosen);
        app.load_template(&chosen);
    }

    ui.horizontal(|ui| {
        if ui.button("Upload background…").clicked() {
            app.pick_image(LoadTarget::Background);
        }
        if ui.button("Add overlay…").clicked() {
            app.pick_image(LoadTarget::Overlay);
        }
    });
}

fn text_section(app: &mut MemeApp, ctx: &egui::Context, ui: &mut egui::Ui) {
    ui.label("Caption");

    let mut text = app.editor().panel().text_input.clone();
    let response = ui.text_edit_singleline(&mut text);
    if response.changed() {
        app.dispatch(ctx, EditorEvent::TextInputChanged(text));
    }
    let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

    ui.horizontal(|ui| {
        ui.label("Color");
        let mut color = app.editor().panel().text_color;
        if ui.color_edit_button_srgba(&mut color).changed() {
            app.dispatch(ctx, EditorEvent::EditColor(color));
        }
    });

    ui.horizontal(|ui| {
        ui.label("Size");
        let defaults = &app.editor().config().text_defaults;
        let range = defaults.min_size..=defaults.max_size;
        let mut size = app.editor().panel().text_size;
        if ui
            .add(egui::Slider::new(&mut size, range).step_by(1.0).show_value(false))
            .changed()
        {
            app.dispatch(ctx, EditorEvent::EditSize(size));
        }
        ui.label(app.editor().panel().size_label());
    });

    if ui.button("Add Text").clicked() || submitted {
        app.dispatch(ctx, EditorEvent::AddText);
    }
}

fn overlay_section(app: &mut MemeApp, ctx: &egui::Context, ui: &mut egui::Ui) {
    ui.label("Overlay");

    egui::Grid::new("overlay_properties_grid")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            ui.label("Width");
            let mut width = app.editor().panel().width;
            if ui
                .add(egui::DragValue::new(&mut width).range(1.0..=MAX_OVERLAY_EDGE).suffix("px"))
                .changed()
            {
                app.dispatch(ctx, EditorEvent::EditWidth(width));
            }
            ui.end_row();

            ui.label("Height");
            let mut height = app.editor().panel().height;
            if ui
                .add(egui::DragValue::new(&mut height).range(1.0..=MAX_OVERLAY_EDGE).suffix("px"))
                .changed()
            {
                app.dispatch(ctx, EditorEvent::EditHeight(height));
            }
            ui.end_row();

            ui.label("Shape");
            let current = app.editor().panel().shape;
            let mut shape = current;
            egui::ComboBox::from_id_salt("overlay_shape")
                .selected_text(shape.label())
                .show_ui(ui, |ui| {
                    for option in Shape::ALL {
                        ui.selectable_value(&mut shape, option, option.label());
                    }
                });
            if shape != current {
                app.dispatch(ctx, EditorEvent::EditShape(shape));
            }
            ui.end_row();
        });
}
