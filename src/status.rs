/// Severity of a status line message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Message shown in the status bar after an event is handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, level: StatusLevel) -> Self {
        Self { text: text.into(), level }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, StatusLevel::Info)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, StatusLevel::Success)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text, StatusLevel::Warning)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, StatusLevel::Error)
    }

    pub fn is_error(&self) -> bool {
        self.level == StatusLevel::Error
    }
}

impl Default for StatusMessage {
    fn default() -> Self {
        Self::info("Ready")
    }
}
