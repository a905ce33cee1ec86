//! Conversation scenarios implementation
//!
//! Each multi-step flow is a scenario with an explicit transition table.
//! Moving to a step that the table does not allow is an
//! [`HousemateError::InvalidStateTransition`].

use std::collections::HashMap;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use crate::utils::errors::{HousemateError, Result};
use crate::utils::helpers::parse_amount;
use super::context::{ConversationContext, SessionKey};

pub const RENT: &str = "rent";
pub const ADD_EXPENSE: &str = "add_expense";
pub const UPDATE_EXPENSE: &str = "update_expense";

pub mod steps {
    pub const RENT_TOTAL: &str = "total";
    pub const RENT_ELECTRIC: &str = "electric";
    pub const RENT_WATER: &str = "water";
    pub const EXPENSE_DETAILS: &str = "details";
    pub const SELECT_EXPENSE: &str = "select_expense";
    pub const ENTER_AMOUNT: &str = "enter_amount";
    pub const DONE: &str = "done";
}

/// Whose messages drive a scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionScope {
    /// Anyone in the chat may answer
    Chat,
    /// Only the user who started it
    User,
}

/// Represents a conversation scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    pub initial_step: String,
    pub scope: SessionScope,
    pub steps: HashMap<String, ScenarioStep>,
}

/// Represents a step within a scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioStep {
    pub id: String,
    /// Steps reachable from this one
    pub next_steps: Vec<String>,
    pub validation: Option<StepValidation>,
}

/// Validation rules for a scenario step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepValidation {
    pub input_type: InputType,
    /// Pattern the trimmed input must match
    pub pattern: Option<String>,
    pub error_message: String,
}

/// Types of input expected in a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputType {
    /// A number, optionally with a `k`/`m` suffix
    Amount,
    /// The multi-line expense message, parsed by the handler
    ExpenseDetails,
    /// A positive expense id
    ExpenseId,
}

/// Scenario manager for handling all conversation scenarios
#[derive(Debug, Clone)]
pub struct ScenarioManager {
    scenarios: HashMap<String, Scenario>,
}

impl Default for ScenarioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioManager {
    /// Create a new scenario manager with the built-in scenarios
    pub fn new() -> Self {
        let mut manager = Self {
            scenarios: HashMap::new(),
        };

        manager.register_scenario(create_rent_scenario());
        manager.register_scenario(create_add_expense_scenario());
        manager.register_scenario(create_update_expense_scenario());
        manager
    }

    pub fn register_scenario(&mut self, scenario: Scenario) {
        self.scenarios.insert(scenario.id.clone(), scenario);
    }

    pub fn get_scenario(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.get(id)
    }

    fn require_scenario(&self, id: &str) -> Result<&Scenario> {
        self.get_scenario(id)
            .ok_or_else(|| HousemateError::InvalidStateTransition {
                from: "none".to_string(),
                to: id.to_string(),
            })
    }

    /// Session key a scenario is stored under for a message from `user_id` in `chat_id`
    pub fn session_key(&self, scenario_id: &str, chat_id: i64, user_id: i64) -> Result<SessionKey> {
        Ok(match self.require_scenario(scenario_id)?.scope {
            SessionScope::Chat => SessionKey::Chat(chat_id),
            SessionScope::User => SessionKey::User(user_id),
        })
    }

    /// Start a scenario at its initial step
    pub fn start_scenario(&self, context: &mut ConversationContext, scenario_id: &str, ttl: Duration) -> Result<()> {
        let scenario = self.require_scenario(scenario_id)?;
        context.start_scenario(scenario_id, &scenario.initial_step, ttl);
        Ok(())
    }

    /// Move to the next step if the transition table allows it
    pub fn next_step(&self, context: &mut ConversationContext, next_step: &str) -> Result<()> {
        let current_step = self.get_current_step(context)?;

        if !current_step.next_steps.iter().any(|s| s == next_step) {
            return Err(HousemateError::InvalidStateTransition {
                from: current_step.id.clone(),
                to: next_step.to_string(),
            });
        }

        context.next_step(next_step)
    }

    /// Validate user input for the current step
    pub fn validate_input(&self, context: &ConversationContext, input: &str) -> Result<()> {
        let step = self.get_current_step(context)?;
        let validation = match &step.validation {
            Some(validation) => validation,
            None => return Ok(()),
        };
        let input = input.trim();

        if let Some(pattern) = &validation.pattern {
            let regex = regex::Regex::new(pattern)
                .map_err(|_| HousemateError::Config("Invalid regex pattern".to_string()))?;
            if !regex.is_match(input) {
                return Err(HousemateError::validation(validation.error_message.clone()));
            }
        }

        let valid = match validation.input_type {
            InputType::Amount => parse_amount(input).is_some(),
            InputType::ExpenseDetails => !input.is_empty(),
            InputType::ExpenseId => input.parse::<i64>().map_or(false, |id| id > 0),
        };
        if !valid {
            return Err(HousemateError::validation(validation.error_message.clone()));
        }

        Ok(())
    }

    pub fn get_current_step(&self, context: &ConversationContext) -> Result<&ScenarioStep> {
        let (scenario_id, step_id) = match context.current_state() {
            (Some(scenario), Some(step)) => (scenario, step),
            _ => {
                return Err(HousemateError::InvalidStateTransition {
                    from: "no_scenario".to_string(),
                    to: "input".to_string(),
                })
            }
        };

        self.require_scenario(scenario_id)?
            .steps
            .get(step_id)
            .ok_or_else(|| HousemateError::InvalidStateTransition {
                from: scenario_id.to_string(),
                to: step_id.to_string(),
            })
    }
}

fn step(id: &str, next_steps: &[&str], validation: Option<StepValidation>) -> (String, ScenarioStep) {
    (
        id.to_string(),
        ScenarioStep {
            id: id.to_string(),
            next_steps: next_steps.iter().map(|s| s.to_string()).collect(),
            validation,
        },
    )
}

fn amount_validation(what: &str) -> Option<StepValidation> {
    Some(StepValidation {
        input_type: InputType::Amount,
        pattern: None,
        error_message: format!("Invalid amount. Please enter a valid number for the {}:", what),
    })
}

/// Total, then electric, then water
fn create_rent_scenario() -> Scenario {
    let steps = HashMap::from([
        step(steps::RENT_TOTAL, &[steps::RENT_ELECTRIC], amount_validation("total bill")),
        step(steps::RENT_ELECTRIC, &[steps::RENT_WATER], amount_validation("electric bill")),
        step(steps::RENT_WATER, &[steps::DONE], amount_validation("water bill")),
        step(steps::DONE, &[], None),
    ]);

    Scenario {
        id: RENT.to_string(),
        name: "Add Rent".to_string(),
        initial_step: steps::RENT_TOTAL.to_string(),
        scope: SessionScope::Chat,
        steps,
    }
}

fn create_add_expense_scenario() -> Scenario {
    let steps = HashMap::from([
        step(
            steps::EXPENSE_DETAILS,
            &[steps::DONE],
            Some(StepValidation {
                input_type: InputType::ExpenseDetails,
                pattern: None,
                error_message: "Please provide at least the expense name and amount.".to_string(),
            }),
        ),
        step(steps::DONE, &[], None),
    ]);

    Scenario {
        id: ADD_EXPENSE.to_string(),
        name: "Add Expense".to_string(),
        initial_step: steps::EXPENSE_DETAILS.to_string(),
        scope: SessionScope::User,
        steps,
    }
}

/// Pick an expense, then type its new amount
fn create_update_expense_scenario() -> Scenario {
    let steps = HashMap::from([
        step(
            steps::SELECT_EXPENSE,
            &[steps::ENTER_AMOUNT],
            Some(StepValidation {
                input_type: InputType::ExpenseId,
                pattern: Some(r"^\d+$".to_string()),
                error_message: "Please send the ID of the expense to update.".to_string(),
            }),
        ),
        step(steps::ENTER_AMOUNT, &[steps::DONE], amount_validation("new amount")),
        step(steps::DONE, &[], None),
    ]);

    Scenario {
        id: UPDATE_EXPENSE.to_string(),
        name: "Update Expense".to_string(),
        initial_step: steps::SELECT_EXPENSE.to_string(),
        scope: SessionScope::User,
        steps,
    }
}
