//! Checklist templates and instances

use crate::ids::new_id;
use crate::models::{ChecklistItem, ChecklistTemplate, TemplateKind};

impl ChecklistTemplate {
    /// Deep-copy the template's items for a new practice or live event.
    ///
    /// Every copy gets a fresh id and starts unchecked, so ticking an item on
    /// the instance never touches the template.
    pub fn instantiate(&self) -> Vec<ChecklistItem> {
        self.items
            .iter()
            .map(|item| ChecklistItem { id: new_id("ci"), text: item.text.clone(), checked: false })
            .collect()
    }
}

/// First template of the given kind
pub fn template_for(templates: &[ChecklistTemplate], kind: TemplateKind) -> Option<&ChecklistTemplate> {
    templates.iter().find(|t| t.kind == kind)
}

/// Flip the item with `item_id`; false if no such item
pub fn toggle_item(items: &mut [ChecklistItem], item_id: &str) -> bool {
    match items.iter_mut().find(|item| item.id == item_id) {
        Some(item) => {
            item.checked = !item.checked;
            true
        }
        None => false,
    }
}

/// Number of ticked items
pub fn checked_count(items: &[ChecklistItem]) -> usize {
    items.iter().filter(|item| item.checked).count()
}
