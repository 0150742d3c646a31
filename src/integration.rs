//! Pure core integration functions.
//!
//! Glue between the protocol decoder and the scroll window, used by the receive
//! loop. Testable without a socket or a terminal.

use crate::protocol::{self, Inbound};
use crate::state::ScrollWindow;
use tracing::{debug, warn};

/// Apply one decoded server event to the window.
///
/// Returns true if the window changed.
pub fn apply_inbound(window: &mut ScrollWindow, inbound: Inbound) -> bool {
    match inbound {
        Inbound::Chat(message) => window.push_message(message),
        Inbound::ScrollUp(message) => window.scroll_up(message),
        Inbound::ScrollDown(message) => window.scroll_down(message),
        Inbound::Ignored(reason) => {
            match reason {
                protocol::IgnoreReason::UnknownCommand(_) => {
                    debug!(%reason, "Ignoring server line")
                }
                _ => warn!(%reason, "Ignoring server line"),
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IndexedMessage, MessageIndex};

    /// Decode and apply in order; count the lines that changed the window.
    fn process_lines<'a>(
        window: &mut ScrollWindow,
        lines: impl IntoIterator<Item = &'a str>,
    ) -> usize {
        lines
            .into_iter()
            .filter(|line| apply_inbound(window, protocol::decode(line)))
            .count()
    }

    fn indices(window: &ScrollWindow) -> Vec<MessageIndex> {
        window.iter().map(IndexedMessage::index).collect()
    }

    #[test]
    fn chat_line_appends_to_tail() {
        let mut window = ScrollWindow::default();
        assert!(apply_inbound(&mut window, protocol::decode("7 hi there")));
        let last = window.iter().last().unwrap();
        assert_eq!(last, &IndexedMessage::new(7, "hi there"));
    }

    #[test]
    fn scroll_up_line_slides_window_toward_older_history() {
        let mut window = ScrollWindow::default();
        process_lines(&mut window, ["10 a", "11 b", "12 c", "13 d", "14 e"]);

        apply_inbound(&mut window, protocol::decode("/scroll_up 9 earlier msg"));

        assert_eq!(indices(&window), vec![9, 10, 11, 12, 13]);
    }

    #[test]
    fn scroll_down_line_slides_window_toward_newer_history() {
        let mut window = ScrollWindow::default();
        process_lines(&mut window, ["10 a", "11 b", "12 c"]);

        apply_inbound(&mut window, protocol::decode("/scroll_down 13 d"));

        assert_eq!(indices(&window), vec![11, 12, 13]);
    }

    #[test]
    fn ignored_lines_leave_window_unchanged() {
        let mut window = ScrollWindow::default();
        process_lines(&mut window, ["1 a"]);
        let before = window.clone();

        let changed = process_lines(&mut window, ["", "/topic hi", "garbage", "/scroll_up"]);

        assert_eq!(changed, 0);
        assert_eq!(window, before);
    }

    #[test]
    fn mixed_batch_counts_only_window_changes() {
        let mut window = ScrollWindow::default();
        let changed = process_lines(&mut window, ["1 a", "/nope", "2 b"]);
        assert_eq!(changed, 2);
        assert_eq!(indices(&window), vec![1, 2]);
    }

    #[test]
    fn thirty_chat_lines_keep_last_twenty_five() {
        let mut window = ScrollWindow::default();
        let lines: Vec<String> = (1..=30).map(|i| format!("{i} line {i}")).collect();
        process_lines(&mut window, lines.iter().map(String::as_str));

        assert_eq!(indices(&window), (6..=30).collect::<Vec<_>>());
    }
}
