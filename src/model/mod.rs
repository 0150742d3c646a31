//! Domain model types (pure).

pub mod error;
pub mod key_event;
pub mod message;

pub use error::{AddressError, AppError, TransportError};
pub use key_event::KeyEvent;
pub use message::{IndexedMessage, MessageIndex, MessageParseError};
