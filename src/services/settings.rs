//! Runtime feature toggles

use tokio::sync::RwLock;
use tracing::info;

/// Process-wide switches changed from the settings menu. Not persisted.
#[derive(Debug)]
pub struct FeatureSettings {
    reminders_enabled: RwLock<bool>,
}

impl FeatureSettings {
    pub fn new(reminders_enabled: bool) -> Self {
        Self {
            reminders_enabled: RwLock::new(reminders_enabled),
        }
    }

    pub async fn reminders_enabled(&self) -> bool {
        *self.reminders_enabled.read().await
    }

    /// Flip the reminders switch and return the new value
    pub async fn toggle_reminders(&self) -> bool {
        let mut enabled = self.reminders_enabled.write().await;
        *enabled = !*enabled;
        info!(enabled = *enabled, "Housework reminders toggled");
        *enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_toggle_reminders() {
        let settings = FeatureSettings::new(true);
        assert!(settings.reminders_enabled().await);
        assert!(!settings.toggle_reminders().await);
        assert!(!settings.reminders_enabled().await);
        assert!(settings.toggle_reminders().await);
    }
}
