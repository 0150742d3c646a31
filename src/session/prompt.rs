//! Startup prompts, read through the same line editor as the chat.

use super::keys::{Input, KeySource};
use super::shared::{lock, Edit, SharedSession};
use crate::model::AppError;
use crate::view::DisplaySurface;
use std::sync::Mutex;
use tracing::debug;

/// Show `prompt` and read one submitted line.
///
/// Returns `Ok(None)` on Ctrl+C. Scroll keys discard the pending text.
pub fn read_submission<D, K>(
    shared: &Mutex<SharedSession<D>>,
    keys: &mut K,
    prompt: &str,
) -> Result<Option<String>, AppError>
where
    D: DisplaySurface,
    K: KeySource,
{
    {
        let mut session = lock(shared);
        session.push_notice(prompt);
        session.redraw()?;
    }

    loop {
        match keys.next_input()? {
            Input::Key(key) => {
                let mut session = lock(shared);
                if key.is_scroll() {
                    debug!(?key, "Scroll key at prompt, discarding line");
                }
                let edit = session.edit(key);
                session.redraw()?;
                if let Edit::Submitted(text) = edit {
                    return Ok(Some(text));
                }
            }
            Input::Interrupt => return Ok(None),
            Input::Resize => lock(shared).redraw()?,
            Input::Idle => {}
        }
    }
}
