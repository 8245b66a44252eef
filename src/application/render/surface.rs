use std::collections::BTreeMap;

use super::types::{Markup, Slot, SlotContent};

/// Target of a render: anything that exposes the fixed slot set.
pub trait RenderSurface {
    fn write_text(&mut self, slot: Slot, text: &str);
    fn write_markup(&mut self, slot: Slot, markup: &Markup);
}

/// In-memory slot contents backing the landing page template.
///
/// An untouched `PageSlots` is the pre-render state: every slot reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSlots {
    contents: BTreeMap<Slot, SlotContent>,
}

impl PageSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: Slot) -> Option<&SlotContent> {
        self.contents.get(&slot)
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Raw text of a plain slot, looked up by element id. Escaped by the template.
    pub fn text(&self, id: &str) -> &str {
        match Slot::from_id(id).and_then(|slot| self.contents.get(&slot)) {
            Some(SlotContent::Text(text)) => text,
            _ => "",
        }
    }

    /// Rendered markup of a list slot, looked up by element id.
    pub fn markup(&self, id: &str) -> &str {
        match Slot::from_id(id).and_then(|slot| self.contents.get(&slot)) {
            Some(SlotContent::Markup(markup)) => markup.as_str(),
            _ => "",
        }
    }
}

impl RenderSurface for PageSlots {
    fn write_text(&mut self, slot: Slot, text: &str) {
        self.contents
            .insert(slot, SlotContent::Text(text.to_string()));
    }

    fn write_markup(&mut self, slot: Slot, markup: &Markup) {
        self.contents
            .insert(slot, SlotContent::Markup(markup.clone()));
    }
}
