//! # Cosmic Rules
//!
//! The rules crate for Cosmic Odyssey - stat vectors, quiz scoring,
//! characters and their artifacts. It holds data and pure mechanics only;
//! sequencing and timing live in `narrative_core`.

pub mod catalog;
pub mod entities;
pub mod error;
pub mod generation;
pub mod mechanics;
pub mod roster;

pub use catalog::*;
pub use entities::*;
pub use error::*;
pub use generation::*;
pub use mechanics::*;
pub use roster::*;
