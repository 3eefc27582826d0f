use crate::MemeApp;

pub fn central_panel(app: &mut MemeApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let canvas_size = app.editor().config().canvas_size;

        ui.vertical_centered(|ui| {
            // The canvas keeps its own size; panels around it absorb window resizes
            let (response, painter) =
                ui.allocate_painter(canvas_size, egui::Sense::click_and_drag());
            let canvas_rect = response.rect;

            // Handle input
            app.handle_canvas_input(ctx, canvas_rect);

            // Render the canvas
            app.paint_canvas(ctx, &painter, canvas_rect);
        });
    });
}
