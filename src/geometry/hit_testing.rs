use egui::Pos2;
use log::debug;

use crate::element::ElementRef;
use crate::geometry::shape::point_in_bounds;
use crate::scene::Scene;
use crate::text_measure::TextMeasure;

/// Finds the element under `pos`.
///
/// Overlays are checked first, topmost (last added) to bottom, using their
/// rectangular bounds whatever their clip shape. Texts are checked second in
/// the same reverse order, even though they paint above the overlays.
pub fn hit_test(scene: &Scene, pos: Pos2, measure: &dyn TextMeasure) -> Option<ElementRef> {
    let overlays = (0..scene.overlays().len()).rev().map(ElementRef::Overlay);
    let texts = (0..scene.texts().len()).rev().map(ElementRef::Text);

    let hit = overlays.chain(texts).find(|element| {
        scene
            .element(*element)
            .is_some_and(|view| point_in_bounds(view.bounds(measure), pos))
    });

    debug!("Hit test at {:?}: {:?}", pos, hit);
    hit
}
