//! Read-only checklist template catalog

use app_core::checklist::template_for;
use app_core::{ChecklistItem, ChecklistTemplate, TemplateKind};
use parking_lot::RwLock;
use std::sync::Arc;
use storage::CollectionStorage;
use tracing::{debug, error, info};

use crate::provider::LoadPhase;

/// Checklist templates used to pre-fill new practices and live events.
///
/// Templates are never edited at runtime, so the catalog has no writer:
/// stored templates win when present, otherwise the seed is used as is.
pub struct TemplateCatalog {
    storage: CollectionStorage<ChecklistTemplate>,
    phase: RwLock<LoadPhase>,
    templates: RwLock<Arc<Vec<ChecklistTemplate>>>,
}

impl TemplateCatalog {
    /// Create a catalog showing `seed` until loaded
    pub fn new(storage: CollectionStorage<ChecklistTemplate>, seed: Vec<ChecklistTemplate>) -> Self {
        Self {
            storage,
            phase: RwLock::new(LoadPhase::Uninitialized),
            templates: RwLock::new(Arc::new(seed)),
        }
    }

    /// Read stored templates once
    pub async fn load(&self) {
        {
            let mut phase = self.phase.write();
            if *phase != LoadPhase::Uninitialized {
                return;
            }
            *phase = LoadPhase::Loading;
        }

        match self.storage.get_all().await {
            Ok(stored) if !stored.is_empty() => {
                info!(count = stored.len(), "Loaded checklist templates");
                *self.templates.write() = Arc::new(stored);
            }
            Ok(_) => debug!("No stored checklist templates, using built-in set"),
            Err(e) => error!(error = %e, "Failed to load checklist templates"),
        }

        *self.phase.write() = LoadPhase::Ready;
    }

    /// Check if the initial load has not finished yet
    pub fn is_loading(&self) -> bool {
        *self.phase.read() != LoadPhase::Ready
    }

    /// All templates
    pub fn templates(&self) -> Arc<Vec<ChecklistTemplate>> {
        Arc::clone(&self.templates.read())
    }

    /// First template of `kind`
    pub fn by_kind(&self, kind: TemplateKind) -> Option<ChecklistTemplate> {
        template_for(&self.templates.read(), kind).cloned()
    }

    /// Template by id
    pub fn get(&self, id: &str) -> Option<ChecklistTemplate> {
        self.templates.read().iter().find(|t| t.id == id).cloned()
    }

    /// Fresh, unchecked checklist for a new practice or live event; empty
    /// if there is no template of `kind`
    pub fn instantiate(&self, kind: TemplateKind) -> Vec<ChecklistItem> {
        template_for(&self.templates.read(), kind)
            .map(ChecklistTemplate::instantiate)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_core::seed;
    use storage::{keys, MemoryKvStore};

    #[tokio::test]
    async fn test_seed_used_and_never_written() {
        let kv = Arc::new(MemoryKvStore::new());
        let catalog = TemplateCatalog::new(
            CollectionStorage::new(kv.clone(), keys::CHECKLIST_TEMPLATES),
            seed::checklist_templates(),
        );

        catalog.load().await;

        assert!(!catalog.is_loading());
        assert_eq!(catalog.templates().len(), 2);
        assert!(!kv.contains(keys::CHECKLIST_TEMPLATES).await);
    }

    #[tokio::test]
    async fn test_stored_templates_win() {
        let kv = Arc::new(MemoryKvStore::new());
        let custom = ChecklistTemplate {
            id: "mine".to_string(),
            name: "Acoustic set".to_string(),
            kind: TemplateKind::Live,
            items: vec![ChecklistItem::new("Capo")],
        };
        CollectionStorage::new(kv.clone(), keys::CHECKLIST_TEMPLATES)
            .save_all(&[custom])
            .await
            .unwrap();

        let catalog = TemplateCatalog::new(
            CollectionStorage::new(kv, keys::CHECKLIST_TEMPLATES),
            seed::checklist_templates(),
        );
        catalog.load().await;

        assert!(catalog.get("template-live").is_none());
        assert_eq!(catalog.by_kind(TemplateKind::Live).unwrap().name, "Acoustic set");
        assert!(catalog.by_kind(TemplateKind::Studio).is_none());
        assert!(catalog.instantiate(TemplateKind::Studio).is_empty());
    }

    #[test]
    fn test_instantiate_copies_fresh_items() {
        let catalog = TemplateCatalog::new(
            CollectionStorage::new(Arc::new(MemoryKvStore::new()), keys::CHECKLIST_TEMPLATES),
            seed::checklist_templates(),
        );

        let template = catalog.get("template-studio").unwrap();
        let items = catalog.instantiate(TemplateKind::Studio);

        assert_eq!(items.len(), template.items.len());
        assert!(items.iter().all(|item| !item.checked));
        assert!(items.iter().zip(&template.items).all(|(copy, original)| copy.id != original.id));
    }
}
