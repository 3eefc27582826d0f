use log::{debug, info};

use crate::element::{ElementMut, ElementRef, ElementView, OverlayElement, TextElement};
use crate::image::ImageRef;

/// Everything that gets painted: a background, overlays (bottom first),
/// captions (always above overlays) and at most one selected element.
#[derive(Debug, Default, Clone)]
pub struct Scene {
    background: Option<ImageRef>,
    overlays: Vec<OverlayElement>,
    texts: Vec<TextElement>,
    selection: Option<ElementRef>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn background(&self) -> Option<&ImageRef> {
        self.background.as_ref()
    }

    /// Replaces the background wholesale
    pub fn set_background(&mut self, image: ImageRef) {
        info!("Background set to {:?} ({:?})", image.label(), image.size());
        self.background = Some(image);
    }

    pub fn overlays(&self) -> &[OverlayElement] {
        &self.overlays
    }

    pub fn texts(&self) -> &[TextElement] {
        &self.texts
    }

    /// Appends an overlay on top of all existing overlays
    pub fn add_overlay(&mut self, overlay: OverlayElement) -> ElementRef {
        self.overlays.push(overlay);
        let element = ElementRef::Overlay(self.overlays.len() - 1);
        info!("Added overlay {:?}", element);
        element
    }

    /// Appends a caption on top of all existing captions
    pub fn add_text(&mut self, text: TextElement) -> ElementRef {
        info!("Added text {:?}", text.content());
        self.texts.push(text);
        ElementRef::Text(self.texts.len() - 1)
    }

    pub fn contains(&self, element: ElementRef) -> bool {
        match element {
            ElementRef::Overlay(index) => index < self.overlays.len(),
            ElementRef::Text(index) => index < self.texts.len(),
        }
    }

    pub fn element(&self, element: ElementRef) -> Option<ElementView<'_>> {
        match element {
            ElementRef::Overlay(index) => self.overlays.get(index).map(ElementView::Overlay),
            ElementRef::Text(index) => self.texts.get(index).map(ElementView::Text),
        }
    }

    pub fn element_mut(&mut self, element: ElementRef) -> Option<ElementMut<'_>> {
        match element {
            ElementRef::Overlay(index) => self.overlays.get_mut(index).map(ElementMut::Overlay),
            ElementRef::Text(index) => self.texts.get_mut(index).map(ElementMut::Text),
        }
    }

    pub fn selection(&self) -> Option<ElementRef> {
        self.selection
    }

    pub fn is_selected(&self, element: ElementRef) -> bool {
        self.selection == Some(element)
    }

    /// Sets or clears the selection.
    ///
    /// A reference that is not part of this scene clears the selection, so the
    /// selection can never dangle.
    pub fn select(&mut self, element: Option<ElementRef>) {
        let element = element.filter(|e| self.contains(*e));
        if self.selection != element {
            debug!("Selection changed: {:?} -> {:?}", self.selection, element);
        }
        self.selection = element;
    }

    pub fn selected_mut(&mut self) -> Option<ElementMut<'_>> {
        let selection = self.selection?;
        self.element_mut(selection)
    }

    /// True when there is nothing to paint besides the backdrop
    pub fn is_empty(&self) -> bool {
        self.background.is_none() && self.overlays.is_empty() && self.texts.is_empty()
    }
}
