//! Housework rotation
//!
//! Picks who does a task next. Tasks with weight rows rotate by weight, each
//! member keeping the task for as many consecutive completions as their
//! weight; other tasks rotate through the members in sheet order.

use crate::models::member::Member;
use crate::models::task::{Task, TaskWeight};
use crate::utils::errors::{HousemateError, Result};
use crate::utils::helpers::mention;

/// What triggered the rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationAction {
    /// Task completed; weighted rotation may keep the same assignee
    Done,
    /// Hand the task to the next member immediately
    Assign,
}

/// Assignee state after a rotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotation {
    pub assignee: String,
    pub turns_remaining: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotationStrategy {
    Flat(Vec<Member>),
    Weighted(Vec<TaskWeight>),
}

impl RotationStrategy {
    /// Weighted when the task has weight rows, flat otherwise
    pub fn for_task(members: Vec<Member>, weights: Vec<TaskWeight>) -> Self {
        if weights.is_empty() {
            RotationStrategy::Flat(members)
        } else {
            RotationStrategy::Weighted(weights)
        }
    }

    fn len(&self) -> usize {
        match self {
            RotationStrategy::Flat(members) => members.len(),
            RotationStrategy::Weighted(weights) => weights.len(),
        }
    }

    fn username(&self, index: usize) -> &str {
        match self {
            RotationStrategy::Flat(members) => &members[index].username,
            RotationStrategy::Weighted(weights) => &weights[index].username,
        }
    }

    fn weight(&self, index: usize) -> u32 {
        match self {
            RotationStrategy::Flat(members) => members[index].weight.max(1),
            RotationStrategy::Weighted(weights) => weights[index].weight.max(1),
        }
    }

    fn position(&self, assignee: &str) -> Option<usize> {
        let assignee = mention(assignee.trim());
        (0..self.len()).find(|&i| mention(self.username(i)).eq_ignore_ascii_case(&assignee))
    }

    /// Index of the member after `assignee`, wrapping; the first entry when `assignee` is not listed
    fn next_index(&self, assignee: &str) -> Result<usize> {
        if self.len() == 0 {
            return Err(HousemateError::validation("There is nobody to rotate this task to."));
        }
        Ok(match self.position(assignee) {
            Some(index) => (index + 1) % self.len(),
            None => 0,
        })
    }

    fn hand_over(&self, index: usize) -> Rotation {
        Rotation {
            assignee: mention(self.username(index)),
            turns_remaining: match self {
                RotationStrategy::Flat(_) => None,
                RotationStrategy::Weighted(_) => Some(self.weight(index)),
            },
        }
    }

    /// Compute the assignee after `action` on `task`
    pub fn advance(&self, task: &Task, action: RotationAction) -> Result<Rotation> {
        let next = self.next_index(&task.assignee)?;

        match (self, action) {
            (RotationStrategy::Weighted(_), RotationAction::Done) => {
                let current = match self.position(&task.assignee) {
                    Some(index) => index,
                    None => return Ok(self.hand_over(next)),
                };
                let turns = task.turns_remaining.unwrap_or_else(|| self.weight(current));
                if turns > 1 {
                    Ok(Rotation {
                        assignee: mention(self.username(current)),
                        turns_remaining: Some(turns - 1),
                    })
                } else {
                    Ok(self.hand_over(next))
                }
            }
            _ => Ok(self.hand_over(next)),
        }
    }
}

impl Rotation {
    pub fn apply(self, task: &mut Task) {
        task.assignee = self.assignee;
        task.turns_remaining = self.turns_remaining;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn task(assignee: &str, turns: Option<u32>) -> Task {
        Task {
            id: 1,
            name: "Dishes".to_string(),
            frequency: 1,
            last_done: String::new(),
            next_due: String::new(),
            assignee: assignee.to_string(),
            turns_remaining: turns,
            channel_id: None,
            note: String::new(),
        }
    }

    fn members(names: &[&str]) -> Vec<Member> {
        names.iter().enumerate().map(|(i, n)| Member::new(i as i64 + 1, *n, 1)).collect()
    }

    fn weight(username: &str, weight: u32) -> TaskWeight {
        TaskWeight { task_id: 1, username: username.to_string(), weight }
    }

    #[test]
    fn test_flat_rotation_wraps() {
        let strategy = RotationStrategy::for_task(members(&["@alice", "@bob"]), vec![]);
        let next = strategy.advance(&task("@bob", None), RotationAction::Done).unwrap();
        assert_eq!(next.assignee, "@alice");
        assert_eq!(next.turns_remaining, None);
    }

    #[test]
    fn test_absent_assignee_falls_back_to_first() {
        let strategy = RotationStrategy::for_task(members(&["@alice", "@bob"]), vec![]);
        let next = strategy.advance(&task("@mallory", None), RotationAction::Assign).unwrap();
        assert_eq!(next.assignee, "@alice");
    }

    #[test]
    fn test_empty_list_is_an_error() {
        let strategy = RotationStrategy::for_task(vec![], vec![]);
        assert!(matches!(
            strategy.advance(&task("@alice", None), RotationAction::Done),
            Err(HousemateError::Validation(_))
        ));
    }

    #[test]
    fn test_weighted_keeps_assignee_until_turns_run_out() {
        let strategy = RotationStrategy::for_task(
            members(&["@alice", "@bob"]),
            vec![weight("@alice", 2), weight("@bob", 1)],
        );

        let mut current = task("@alice", Some(2));
        let first = strategy.advance(&current, RotationAction::Done).unwrap();
        assert_eq!(first, Rotation { assignee: "@alice".to_string(), turns_remaining: Some(1) });

        first.apply(&mut current);
        let second = strategy.advance(&current, RotationAction::Done).unwrap();
        assert_eq!(second, Rotation { assignee: "@bob".to_string(), turns_remaining: Some(1) });

        second.apply(&mut current);
        let third = strategy.advance(&current, RotationAction::Done).unwrap();
        assert_eq!(third, Rotation { assignee: "@alice".to_string(), turns_remaining: Some(2) });
    }

    #[test]
    fn test_weighted_assign_hands_over_immediately() {
        let strategy = RotationStrategy::for_task(vec![], vec![weight("alice", 3), weight("bob", 2)]);
        let next = strategy.advance(&task("@alice", Some(3)), RotationAction::Assign).unwrap();
        assert_eq!(next, Rotation { assignee: "@bob".to_string(), turns_remaining: Some(2) });
    }

    proptest! {
        #[test]
        fn n_assigns_return_to_start(count in 1usize..10, start in 0usize..10) {
            let names: Vec<String> = (0..count).map(|i| format!("@m{}", i)).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let strategy = RotationStrategy::for_task(members(&refs), vec![]);

            let original = names[start % count].clone();
            let mut current = task(&original, None);
            for _ in 0..count {
                strategy.advance(&current, RotationAction::Assign).unwrap().apply(&mut current);
            }
            prop_assert_eq!(current.assignee, original);
        }
    }
}
