//! Instance identifiers and the element-id namespace derived from them.
//!
//! Every element a quiz instance creates carries its `InstanceId` in its id (or, for
//! input groups, in its `name`), so instances sharing one document never collide.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Opaque positive identifier of one rendered quiz.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct InstanceId(u64);

impl TryFrom<u64> for InstanceId {
    type Error = &'static str;

    fn try_from(raw: u64) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or("instance ids start at 1")
    }
}

impl From<InstanceId> for u64 {
    fn from(id: InstanceId) -> u64 {
        id.0
    }
}

impl InstanceId {
    /// `None` for 0; identifiers start at 1.
    pub fn new(raw: u64) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    pub fn answer_container(self, index: usize) -> String {
        format!("quiz-{}-answer-container-{}", self.0, index)
    }

    pub fn answer_input(self, index: usize) -> String {
        format!("quiz-{}-answer-{}", self.0, index)
    }

    pub fn text_input(self) -> String {
        format!("quiz-{}-answer-input", self.0)
    }

    pub fn explanation(self) -> String {
        format!("quiz-{}-explanation", self.0)
    }

    pub fn form(self) -> String {
        format!("quiz-{}-form", self.0)
    }

    pub fn check_control(self) -> String {
        format!("quiz-{}-check", self.0)
    }

    pub fn results(self) -> String {
        format!("quiz-{}-results", self.0)
    }

    pub fn retry_control(self) -> String {
        format!("quiz-{}-retry", self.0)
    }

    /// Shared `name` of the instance's radio / checkbox group.
    pub fn group_name(self) -> String {
        format!("answer-group-{}", self.0)
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Process-wide monotonically increasing counter handing out `InstanceId`s.
#[derive(Debug, Default)]
pub struct InstanceIdAllocator {
    counter: AtomicU64,
}

impl InstanceIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next identifier: 1, 2, 3, ...
    pub fn next_id(&self) -> InstanceId {
        InstanceId(self.counter.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Return the counter to 0.
    ///
    /// Test/support hook only. Calling this while instances are still live lets a new
    /// instance receive an id already in use, which breaks isolation between them.
    pub fn reset(&self) {
        self.counter.store(0, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_start_at_one_and_increase() {
        let alloc = InstanceIdAllocator::new();
        assert_eq!(alloc.next_id().get(), 1);
        assert_eq!(alloc.next_id().get(), 2);
        assert_eq!(alloc.next_id().get(), 3);
    }

    #[test]
    fn reset_restarts_the_sequence() {
        let alloc = InstanceIdAllocator::new();
        alloc.next_id();
        alloc.next_id();
        alloc.reset();
        assert_eq!(alloc.next_id().get(), 1);
    }

    #[test]
    fn zero_is_not_an_instance_id() {
        assert!(InstanceId::new(0).is_none());
        assert_eq!(InstanceId::new(7).map(InstanceId::get), Some(7));
    }

    #[test]
    fn wire_form_is_a_positive_number() {
        let id = InstanceId::new(3).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "3");
        assert_eq!(serde_json::from_str::<InstanceId>("3").unwrap(), id);
        assert!(serde_json::from_str::<InstanceId>("0").is_err());
    }

    #[test]
    fn element_ids_are_namespaced() {
        let id = InstanceId::new(2).unwrap();
        assert_eq!(id.answer_container(0), "quiz-2-answer-container-0");
        assert_eq!(id.answer_input(3), "quiz-2-answer-3");
        assert_eq!(id.text_input(), "quiz-2-answer-input");
        assert_eq!(id.group_name(), "answer-group-2");
        assert_eq!(id.results(), "quiz-2-results");
    }
}
