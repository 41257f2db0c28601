// SPDX-FileCopyrightText: 2026 Fixroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounded trailing conversation history.

use std::collections::VecDeque;

use tracing::debug;

use crate::types::Message;

/// Number of messages retained when no capacity is configured.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// An ordered, capped sequence of the most recent messages.
///
/// Appending past the capacity evicts from the front, so the sequence always
/// holds the newest `capacity` messages in arrival order.
#[derive(Debug, Clone)]
pub struct ConversationState {
    messages: VecDeque<Message>,
    capacity: usize,
}

impl ConversationState {
    /// Creates an empty history holding [`DEFAULT_HISTORY_CAPACITY`] messages.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Creates an empty history holding at most `capacity` messages (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a message, returning the evicted oldest message if the cap was hit.
    pub fn push(&mut self, message: Message) -> Option<Message> {
        self.messages.push_back(message);
        if self.messages.len() > self.capacity {
            let evicted = self.messages.pop_front();
            debug!(capacity = self.capacity, "conversation history full, evicted oldest message");
            evicted
        } else {
            None
        }
    }

    /// Appends several messages, keeping only the trailing `capacity` entries.
    pub fn extend<I>(&mut self, messages: I)
    where
        I: IntoIterator<Item = Message>,
    {
        for message in messages {
            self.push(message);
        }
    }

    /// The most recent message.
    pub fn last(&self) -> Option<&Message> {
        self.messages.back()
    }

    /// Mutable access to the most recent message, used to attach its label.
    pub fn last_mut(&mut self) -> Option<&mut Message> {
        self.messages.back_mut()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates messages oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn texts(state: &ConversationState) -> Vec<String> {
        state.iter().map(|m| m.text.clone()).collect()
    }

    #[test]
    fn eleventh_message_evicts_oldest() {
        let mut state = ConversationState::new();
        for i in 0..10 {
            assert!(state.push(Message::user(format!("m{i}"))).is_none());
        }
        assert_eq!(state.len(), 10);

        let evicted = state.push(Message::user("m10")).expect("should evict");
        assert_eq!(evicted.text, "m0");
        assert_eq!(state.len(), 10);

        let expected: Vec<String> = (1..=10).map(|i| format!("m{i}")).collect();
        assert_eq!(texts(&state), expected);
    }

    #[test]
    fn extend_keeps_trailing_window() {
        let mut state = ConversationState::with_capacity(3);
        state.push(Message::user("a"));
        state.extend(["b", "c", "d", "e"].into_iter().map(Message::user));
        assert_eq!(texts(&state), vec!["c", "d", "e"]);
    }

    #[test]
    fn last_mut_attaches_to_newest() {
        let mut state = ConversationState::new();
        state.push(Message::user("first"));
        state.push(Message::user("second"));
        state.last_mut().unwrap().answer = Some("done".into());
        assert_eq!(state.last().unwrap().text, "second");
        assert_eq!(state.last().unwrap().answer.as_deref(), Some("done"));
        assert!(state.iter().next().unwrap().answer.is_none());
    }

    #[test]
    fn zero_capacity_is_clamped_to_one() {
        let mut state = ConversationState::with_capacity(0);
        assert_eq!(state.capacity(), 1);
        state.push(Message::user("a"));
        state.push(Message::user("b"));
        assert_eq!(texts(&state), vec!["b"]);
    }

    #[test]
    fn empty_history() {
        let state = ConversationState::default();
        assert!(state.is_empty());
        assert!(state.last().is_none());
    }

    proptest! {
        #[test]
        fn history_never_exceeds_capacity(cap in 1usize..20, n in 0usize..60) {
            let mut state = ConversationState::with_capacity(cap);
            state.extend((0..n).map(|i| Message::user(i.to_string())));
            prop_assert_eq!(state.len(), n.min(cap));
            let expected: Vec<String> = (n.saturating_sub(cap)..n).map(|i| i.to_string()).collect();
            prop_assert_eq!(texts(&state), expected);
        }
    }
}
