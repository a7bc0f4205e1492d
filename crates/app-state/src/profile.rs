//! The user's profile

use app_core::Profile;
use parking_lot::RwLock;
use std::sync::Arc;
use storage::DocumentStorage;
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::provider::LoadPhase;
use crate::write_behind::{PersistHandle, WriteBehind};

/// Singleton profile document.
///
/// Unlike the collections there is no seed to persist: with nothing stored
/// the blank default stays in memory until the user saves.
pub struct ProfileProvider {
    storage: DocumentStorage<Profile>,
    phase: RwLock<LoadPhase>,
    profile: watch::Sender<Arc<Profile>>,
    writer: Arc<WriteBehind<Profile>>,
}

impl ProfileProvider {
    /// Create a provider holding the blank profile
    pub fn new(storage: DocumentStorage<Profile>) -> Self {
        let (profile, _) = watch::channel(Arc::new(Profile::default()));
        let writer = Arc::new(WriteBehind::new("profile", storage.clone()));
        Self { storage, phase: RwLock::new(LoadPhase::Uninitialized), profile, writer }
    }

    /// Read the stored profile once. A profile saved while the read was in
    /// flight wins over the stored one.
    pub async fn load(&self) {
        {
            let mut phase = self.phase.write();
            if *phase != LoadPhase::Uninitialized {
                return;
            }
            *phase = LoadPhase::Loading;
        }

        match self.storage.get().await {
            Ok(Some(stored)) => {
                info!(blank = stored.is_blank(), "Loaded profile");
                let kept = self.profile.send_if_modified(|current| {
                    if self.writer.has_issued() {
                        return false;
                    }
                    *current = Arc::new(stored);
                    true
                });
                if !kept {
                    debug!("Profile saved before load finished, keeping it");
                }
            }
            Ok(None) => debug!("No stored profile"),
            Err(e) => error!(error = %e, "Failed to load profile, keeping default"),
        }

        *self.phase.write() = LoadPhase::Ready;
    }

    /// Check if the initial load has not finished yet
    pub fn is_loading(&self) -> bool {
        *self.phase.read() != LoadPhase::Ready
    }

    /// Current profile
    pub fn profile(&self) -> Arc<Profile> {
        Arc::clone(&self.profile.borrow())
    }

    /// Receive every saved profile
    pub fn subscribe(&self) -> watch::Receiver<Arc<Profile>> {
        self.profile.subscribe()
    }

    /// Replace the whole profile and persist it
    pub fn update(&self, profile: Profile) -> PersistHandle {
        let profile = Arc::new(profile);
        let generation = {
            let mut generation = 0;
            self.profile.send_modify(|current| {
                generation = self.writer.issue();
                *current = Arc::clone(&profile);
            });
            generation
        };
        self.writer.spawn(generation, profile)
    }
}
