//! UI/backend events and error modeling for desktop GUI controller.

use client_core::SurfaceState;

pub enum UiEvent {
    Surface {
        state: SurfaceState,
        in_flight: usize,
        /// Toggle commands the backend had applied when `state` was taken.
        toggles_applied: u64,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Configuration,
    Transport,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Dispatch,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid server url")
            || message_lower.contains("failed to parse")
            || message_lower.contains("configured")
        {
            UiErrorCategory::Configuration
        } else if message_lower.contains("disconnected")
            || message_lower.contains("queue")
            || message_lower.contains("connection")
            || message_lower.contains("runtime")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
