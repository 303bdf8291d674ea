//! G-key and extra mouse button bindings for the Logitech G SDK.
//!
//! Key transitions reach the application in two ways:
//!
//! - **Callback**: the SDK invokes a native callback for every press and
//!   release. [`GkeySession`] decodes it into a [`KeyEvent`] and fans it out
//!   to listeners registered by [`EventType`].
//! - **Polling**: [`api`] functions (and the session wrappers) query whether
//!   a given key or button is pressed right now.
//!
//! ```text
//! SDK thread ──► trampoline ──► KeySink ──► ListenerRegistry::dispatch
//!                (RawGkeyCode)   (KeyEvent, label)   ├─► "keyDown" / "keyUp"
//!                                                    ├─► "mouse"
//!                                                    ├─► "G4", "M1"
//!                                                    └─► "G4/M1"
//! ```
//!
//! Listeners run on the SDK's callback thread.

pub mod api;
pub mod code;
pub mod dispatch;
pub mod mock;
pub mod native;
pub mod session;

pub use code::{KeyEvent, RawGkeyCode};
pub use dispatch::{EventType, Listener, ListenerRegistry, listener};
pub use native::{GkeyLibrary, GkeyNative, KeySink};
pub use session::GkeySession;
