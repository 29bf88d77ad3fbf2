//! Command types for the Elm-style architecture
//!
//! Commands are side effects the host editor performs after an update.

/// Side effect requested from the host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Close the host's inline toolbar
    CloseToolbar,
    /// Move keyboard focus into the URL input
    FocusInput,
    /// Re-render the tool button and action menu
    Redraw,
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// True if this command (or any command in a batch) matches
    pub fn contains(&self, cmd: &Cmd) -> bool {
        match self {
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.contains(cmd)),
            other => other == cmd,
        }
    }

    /// Flatten nested batches into a list of leaf commands
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::None => vec![],
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            other => vec![other],
        }
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::CloseToolbar | Cmd::FocusInput | Cmd::Redraw => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }
}
