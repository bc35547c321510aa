//! # Narrative Core
//!
//! Sequencing for the cosmic odyssey: the personality quiz, branching
//! adventures, and the timed reveals between a choice and its consequence.
//! Characters, artifacts and scoring live in `cosmic_rules`.
//!
//! ## Core Components
//!
//! - **story**: Branching step graphs loaded from TOML
//! - **engine**: The reveal-then-advance state machine for adventures
//! - **quiz**: The same pattern for quiz questions, ending in scored stats
//! - **reveal**: Cancelable one-shot timers on tokio
//! - **session**: Owned quiz and adventure sessions that drive the timers
//! - **events**: Notices for the front end
//!
//! ## Design
//!
//! - **Single owner**: A session owns its character and engine; nothing is shared
//! - **Ticketed reveals**: A transition only applies for the reveal that scheduled it
//! - **No partial failures**: A rejected operation leaves every state untouched

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod quiz;
pub mod reveal;
pub mod session;
pub mod story;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use events::*;
pub use quiz::*;
pub use reveal::*;
pub use session::*;
pub use story::*;
