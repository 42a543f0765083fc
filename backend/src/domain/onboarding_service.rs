use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use super::keys::ONBOARDING_SEEN_KEY;
use crate::storage::KeyValueStore;

/// Remembers whether the first-run tooltips have been shown on this device
#[derive(Clone)]
pub struct OnboardingService {
    storage: Arc<dyn KeyValueStore>,
}

impl OnboardingService {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    pub fn has_seen_onboarding(&self) -> Result<bool> {
        Ok(self.storage.get(ONBOARDING_SEEN_KEY)?.as_deref() == Some("true"))
    }

    pub fn complete_onboarding(&self) -> Result<()> {
        self.storage.set(ONBOARDING_SEEN_KEY, "true")?;
        info!("Onboarding completed");
        Ok(())
    }

    pub fn reset_onboarding(&self) -> Result<()> {
        self.storage.remove(ONBOARDING_SEEN_KEY)?;
        info!("Onboarding reset");
        Ok(())
    }
}
