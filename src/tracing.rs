//! Logging setup and state snapshots for debugging the tool
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=menu=debug,mutator=debug` - scoped filtering
//! - `RUST_LOG=config=warn` - configuration fallbacks only
//!
//! # Log Files
//!
//! Logs are written to `~/.config/inline-link/logs/inline-link.log` with daily
//! rotation, at debug level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::{LinkModel, ToolPhase};

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG and defaults to `warn`, so configuration
/// fallbacks are visible out of the box. Safe to call once per process.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "inline-link.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of tool and menu state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    pub phase: ToolPhase,
    pub menu_visible: bool,
    pub error_visible: bool,
    pub add_visible: bool,
    pub remove_visible: bool,
    pub handlers_attached: bool,
    pub has_range: bool,
    pub diagnostics: usize,
}

impl StateSnapshot {
    pub fn from_model(model: &LinkModel) -> Self {
        Self {
            phase: model.phase(),
            menu_visible: model.menu.visible,
            error_visible: model.menu.error_visible,
            add_visible: model.menu.add_visible,
            remove_visible: model.menu.remove_visible,
            handlers_attached: model.menu.handlers_attached,
            has_range: model.tool.range.is_some(),
            diagnostics: model.diagnostics.len(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &StateSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.phase != other.phase {
            changes.push(format!("phase: {:?} → {:?}", self.phase, other.phase));
        }
        if self.menu_visible != other.menu_visible {
            let status = if other.menu_visible { "shown" } else { "hidden" };
            changes.push(format!("menu {}", status));
        }
        if self.error_visible != other.error_visible {
            let status = if other.error_visible { "shown" } else { "hidden" };
            changes.push(format!("error {}", status));
        }
        if (self.add_visible, self.remove_visible) != (other.add_visible, other.remove_visible) {
            let button = match (other.add_visible, other.remove_visible) {
                (true, false) => "add",
                (false, true) => "remove",
                (false, false) => "none",
                (true, true) => "both",
            };
            changes.push(format!("button: {}", button));
        }
        if self.has_range != other.has_range {
            let status = if other.has_range { "captured" } else { "dropped" };
            changes.push(format!("range {}", status));
        }
        if self.diagnostics != other.diagnostics {
            changes.push(format!(
                "diagnostics: {} → {}",
                self.diagnostics, other.diagnostics
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }

    /// Panic if the state left behind by a handler is inconsistent
    ///
    /// `Submitting` is transient and must never survive an update.
    pub fn assert_invariants(&self, context: &str) {
        assert!(
            self.phase != ToolPhase::Submitting,
            "[{}] submission left pending",
            context
        );
        assert!(
            !(self.add_visible && self.remove_visible),
            "[{}] add and remove buttons both visible",
            context
        );
        assert_eq!(
            self.menu_visible,
            self.phase == ToolPhase::MenuOpen,
            "[{}] menu visibility out of sync with tool phase",
            context
        );
        assert_eq!(
            self.menu_visible, self.handlers_attached,
            "[{}] menu handlers out of sync with visibility",
            context
        );
    }
}
