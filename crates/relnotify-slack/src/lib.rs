//! relnotify Slack - message rendering and delivery
//!
//! Rendering is a pure function from a release tree and presentation
//! parameters to a `chat.postMessage` payload. Delivery posts that payload.

mod client;
pub mod error;
mod render;
pub mod types;

pub use client::SlackClient;
pub use error::{NotifyError, Result};
pub use render::{render_message, ReleaseLink, RenderParams};
pub use types::{Block, SlackMessage, Text};
