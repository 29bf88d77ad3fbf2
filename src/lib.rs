//! Inline hyperlink tool for rich-text editors
//!
//! Adds, replaces and removes links around a selection in a host document,
//! driven by an action menu. Follows the Elm Architecture: messages go through
//! [`update::update`], which mutates [`model::LinkModel`] and returns commands
//! for the host.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod diagnostics;
pub mod dom;
pub mod messages;
pub mod model;
pub mod mutator;
pub mod options;
pub mod tool;
pub mod tracing;
pub mod update;
pub mod util;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::ToolConfig;
pub use messages::Msg;
pub use model::LinkModel;
pub use tool::{InlineTool, LinkTool};
