pub mod assistant;
pub mod gemini;

pub use assistant::Assistant;
pub use gemini::{GeminiClient, VoiceCommand};
