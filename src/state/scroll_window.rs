//! The locally visible slice of the server's message log.
//!
//! Holds at most `capacity` messages for normal chat flow, ordered by index
//! ascending. Scrolling slides the window one message at a time without changing
//! its size: one element leaves at one end, one enters at the other.

use crate::model::{IndexedMessage, MessageIndex};
use std::collections::VecDeque;
use tracing::warn;

/// Default number of messages kept for tail growth.
pub const DEFAULT_CAPACITY: usize = 25;

/// Capacity-bounded, index-ordered message window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollWindow {
    messages: VecDeque<IndexedMessage>,
    capacity: usize,
}

impl Default for ScrollWindow {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl ScrollWindow {
    /// Empty window. A capacity of 0 is treated as 1.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Most messages the window holds.
    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Messages currently held.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True before the first message arrives.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &IndexedMessage> {
        self.messages.iter()
    }

    /// Index of the oldest visible message (the head).
    pub fn oldest_index(&self) -> Option<MessageIndex> {
        self.messages.front().map(IndexedMessage::index)
    }

    /// Index of the newest visible message (the tail).
    pub fn newest_index(&self) -> Option<MessageIndex> {
        self.messages.back().map(IndexedMessage::index)
    }

    /// Append a live chat message, dropping the head once the cap is reached.
    ///
    /// Returns false (window unchanged) if the message is not newer than the tail.
    pub fn push_message(&mut self, message: IndexedMessage) -> bool {
        if let Some(newest) = self.newest_index() {
            if message.index() <= newest {
                warn!(
                    index = message.index(),
                    newest, "Dropping chat message that is not newer than the window tail"
                );
                return false;
            }
        }

        if self.messages.len() >= self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
        true
    }

    /// Slide one step toward older history: drop the tail, push `message` at the head.
    ///
    /// Returns false (window unchanged) if `message` would not be older than the
    /// remaining head.
    pub fn scroll_up(&mut self, message: IndexedMessage) -> bool {
        // After the tail is dropped, the head is still messages[0] unless the window
        // held a single element.
        if self.messages.len() >= 2 {
            if let Some(oldest) = self.oldest_index() {
                if message.index() >= oldest {
                    warn!(
                        index = message.index(),
                        oldest, "Ignoring scroll-up message that is not older than the head"
                    );
                    return false;
                }
            }
        }

        self.messages.pop_back();
        self.messages.push_front(message);
        true
    }

    /// Slide one step toward newer history: drop the head, push `message` at the tail.
    ///
    /// Returns false (window unchanged) if `message` would not be newer than the
    /// remaining tail.
    pub fn scroll_down(&mut self, message: IndexedMessage) -> bool {
        if self.messages.len() >= 2 {
            if let Some(newest) = self.newest_index() {
                if message.index() <= newest {
                    warn!(
                        index = message.index(),
                        newest, "Ignoring scroll-down message that is not newer than the tail"
                    );
                    return false;
                }
            }
        }

        self.messages.pop_front();
        self.messages.push_back(message);
        true
    }
}

#[cfg(test)]
#[path = "scroll_window_tests.rs"]
mod tests;
