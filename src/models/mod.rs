//! Data models module
//!
//! This module contains the entities stored in the household spreadsheet
//! and the calculations performed on them.

pub mod task;
pub mod member;
pub mod expense;
pub mod rent;
pub mod report;

pub use task::{Task, TaskWeight};
pub use member::Member;
pub use expense::{Expense, CreateExpenseRequest};
pub use rent::{RentData, MemberShare};
pub use report::{Report, ReportData, Balance};
