//! State storage implementation
//!
//! Conversation contexts are kept in memory, keyed by [`SessionKey`]. Every
//! context carries an expiry; an expired context is treated as absent on load
//! and removed by the periodic cleanup task.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};
use crate::config::StateConfig;
use crate::utils::errors::Result;
use super::context::{ConversationContext, SessionKey};

/// In-memory state storage
#[derive(Clone, Debug)]
pub struct StateStorage {
    contexts: Arc<RwLock<HashMap<SessionKey, ConversationContext>>>,
    ttl: chrono::Duration,
}

impl StateStorage {
    pub fn new(config: &StateConfig) -> Self {
        Self {
            contexts: Arc::new(RwLock::new(HashMap::new())),
            ttl: chrono::Duration::seconds(config.ttl_seconds as i64),
        }
    }

    /// Lifetime given to new conversations
    pub fn ttl(&self) -> chrono::Duration {
        self.ttl
    }

    /// Save conversation context, setting the default expiry when it has none
    pub async fn save_context(&self, context: &ConversationContext) -> Result<()> {
        debug!(key = %context.key, scenario = ?context.scenario, step = ?context.step, "Saving context");

        let mut context = context.clone();
        if context.expires_at.is_none() {
            context.expires_at = Some(Utc::now() + self.ttl);
        }
        self.contexts.write().await.insert(context.key, context);
        Ok(())
    }

    /// Load conversation context; expired contexts are dropped and reported as absent
    pub async fn load_context(&self, key: SessionKey) -> Result<Option<ConversationContext>> {
        let context = self.contexts.read().await.get(&key).cloned();

        match context {
            Some(context) if context.is_expired() => {
                debug!(key = %key, "Context expired");
                self.contexts.write().await.remove(&key);
                Ok(None)
            }
            other => Ok(other),
        }
    }

    pub async fn delete_context(&self, key: SessionKey) -> Result<()> {
        debug!(key = %key, "Deleting context");
        self.contexts.write().await.remove(&key);
        Ok(())
    }

    /// Remove every expired context and return how many were removed
    pub async fn cleanup_expired_contexts(&self) -> Result<u32> {
        let now = Utc::now();
        let mut contexts = self.contexts.write().await;
        let before = contexts.len();
        contexts.retain(|_, context| !context.is_expired_at(now));
        let cleaned_count = (before - contexts.len()) as u32;

        if cleaned_count > 0 {
            info!("Cleaned up {} expired contexts", cleaned_count);
        }
        Ok(cleaned_count)
    }

    /// Get storage statistics
    pub async fn get_stats(&self) -> StorageStats {
        let now = Utc::now();
        let contexts = self.contexts.read().await;
        let mut scenarios_count = HashMap::new();
        let mut expired_contexts = 0;

        for context in contexts.values() {
            if context.is_expired_at(now) {
                expired_contexts += 1;
            } else if let Some(scenario) = &context.scenario {
                *scenarios_count.entry(scenario.clone()).or_insert(0) += 1;
            }
        }

        StorageStats {
            total_contexts: contexts.len(),
            expired_contexts,
            active_contexts: contexts.len() - expired_contexts,
            scenarios_count,
        }
    }
}

/// Storage statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStats {
    pub total_contexts: usize,
    pub expired_contexts: usize,
    pub active_contexts: usize,
    pub scenarios_count: HashMap<String, usize>,
}

/// State storage manager with automatic cleanup
#[derive(Debug)]
pub struct StateStorageManager {
    storage: StateStorage,
    cleanup_interval: Duration,
    cleanup_handle: Option<tokio::task::JoinHandle<()>>,
}

impl StateStorageManager {
    pub fn new(config: &StateConfig) -> Self {
        Self {
            storage: StateStorage::new(config),
            cleanup_interval: Duration::from_secs(config.cleanup_interval_seconds),
            cleanup_handle: None,
        }
    }

    /// Start automatic cleanup task
    pub fn start_cleanup(&mut self) {
        if self.cleanup_handle.is_some() {
            warn!("Cleanup task is already running");
            return;
        }

        let storage = self.storage.clone();
        let interval = self.cleanup_interval;

        let handle = tokio::spawn(async move {
            let mut cleanup_interval = tokio::time::interval(interval);

            loop {
                cleanup_interval.tick().await;

                if let Err(e) = storage.cleanup_expired_contexts().await {
                    error!("Cleanup task failed: {}", e);
                }
                let stats = storage.get_stats().await;
                debug!(active = stats.active_contexts, scenarios = ?stats.scenarios_count, "Session store");
            }
        });

        self.cleanup_handle = Some(handle);
        info!("Started automatic cleanup task with interval {:?}", self.cleanup_interval);
    }

    pub fn stop_cleanup(&mut self) {
        if let Some(handle) = self.cleanup_handle.take() {
            handle.abort();
            info!("Stopped automatic cleanup task");
        }
    }

    pub fn storage(&self) -> &StateStorage {
        &self.storage
    }
}

impl Drop for StateStorageManager {
    fn drop(&mut self) {
        self.stop_cleanup();
    }
}
