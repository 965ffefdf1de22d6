//! Renders a host status dashboard card: one immutable metrics snapshot
//! and a resolved background composed onto a fixed 1280x720 canvas and
//! encoded as PNG, for hand-off to an external delivery collaborator.

pub mod background;
pub mod delivery;
pub mod encode;
pub mod error;
pub mod format;
pub mod model;
pub mod monitor;
pub mod pipeline;
pub mod render;

pub use error::{Error, Result};
