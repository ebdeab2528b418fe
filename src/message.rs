use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageRole {
    Boss,
    Player,
    System,
}

impl MessageRole {
    // Speaker label used in the transcript sent to the generator.
    pub fn label(&self) -> &'static str {
        match self {
            MessageRole::Boss => "係長",
            MessageRole::Player => "あなた",
            MessageRole::System => "システム",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Message {
            role,
            content: content.into(),
            timestamp: Local::now(),
        }
    }

    pub fn boss(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Boss, content)
    }

    pub fn player(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Player, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn formatted_time(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }

    pub fn transcript_line(&self) -> String {
        format!("{}: {}", self.role.label(), self.content)
    }
}

pub fn format_transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .map(Message::transcript_line)
        .collect::<Vec<_>>()
        .join("\n")
}
