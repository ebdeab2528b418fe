pub mod ai;
pub mod ai_response;
pub mod app;
pub mod error;
pub mod game;
pub mod logging;
pub mod message;
pub mod meter;
pub mod settings;
pub mod tui;
pub mod ui;

// Re-export commonly used items for easier access
pub use ai::{DialogueGenerator, GenerationRequest, OpenAIGenerator, TurnResolver};
pub use ai_response::TurnOutcome;
pub use error::{AIError, AppError, GenerationError};
pub use game::{GameSession, PendingTurn, SessionStatus};
pub use message::{Message, MessageRole};
pub use meter::{MeterDeltas, MeterState};
pub use settings::Settings;
