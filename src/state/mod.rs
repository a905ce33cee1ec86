//! State management module
//!
//! This module handles conversation state for the multi-step flows

pub mod context;
pub mod scenarios;
pub mod storage;

// Re-export commonly used state components
pub use context::{ConversationContext, SessionKey};
pub use scenarios::{Scenario, ScenarioManager, ScenarioStep, SessionScope, StepValidation, InputType};
pub use storage::{StateStorage, StateStorageManager, StorageStats};
