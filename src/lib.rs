//! scrollchat
//!
//! Terminal chat client: a line editor, a scrolling message window, and a
//! line-based TCP protocol, driven by an input thread and a receive thread.
//!
//! Pure core: [`state`], [`protocol`], [`codec`], [`integration`].
//! Impure shell: [`transport`], [`view`], [`session`].

pub mod codec;
pub mod config;
pub mod logging;
pub mod model;
pub mod protocol;
pub mod session;
pub mod state;
pub mod transport;
pub mod view;

// Decode-and-apply glue used by the receive loop
pub mod integration;
