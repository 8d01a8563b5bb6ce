// ============================================================================
// Theme Commands - Represent user intent
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeCommand {
    /// INACTIVE -> ACTIVE
    Activate,
}

impl ThemeCommand {
    pub fn name(&self) -> &'static str {
        match self {
            ThemeCommand::Activate => "Activate",
        }
    }

    /// Parse the command name used by the HTTP layer
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "Activate" => Some(ThemeCommand::Activate),
            _ => None,
        }
    }
}
