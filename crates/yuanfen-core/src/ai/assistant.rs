//! Degrade-to-fallback wrapper over the Gemini client.
//!
//! The app never surfaces a collaborator failure to the user: every error is
//! logged and replaced with fixed copy, and the conversation continues.

use super::gemini::{GeminiClient, VoiceCommand};
use crate::constants::{
    FALLBACK_SUPPORT_BUSY, FALLBACK_SUPPORT_EMPTY, FALLBACK_VOICE_INTENT, FALLBACK_VOICE_REPLY,
};
use crate::models::ChatMessage;

pub struct Assistant {
    client: GeminiClient,
}

impl Assistant {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    /// Support-desk reply; always returns something printable.
    pub async fn support_reply(&self, history: &[ChatMessage], new_message: &str) -> String {
        match self.client.generate_support_reply(history, new_message).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => FALLBACK_SUPPORT_EMPTY.to_string(),
            Err(err) => {
                tracing::warn!("support reply failed: {err:#}");
                FALLBACK_SUPPORT_BUSY.to_string()
            }
        }
    }

    /// Voice-assistant intent + reply; falls back to the "couldn't hear you"
    /// pair on any failure.
    pub async fn voice_command(&self, audio_wav: &[u8]) -> VoiceCommand {
        match self.client.process_voice_command(audio_wav).await {
            Ok(command) => command,
            Err(err) => {
                tracing::warn!("voice command failed: {err:#}");
                VoiceCommand {
                    intent: FALLBACK_VOICE_INTENT.to_string(),
                    reply: FALLBACK_VOICE_REPLY.to_string(),
                }
            }
        }
    }

    /// Transcription for voice input; an empty string on failure leaves the
    /// input box untouched.
    pub async fn transcribe(&self, audio_wav: &[u8]) -> String {
        match self.client.transcribe_audio(audio_wav).await {
            Ok(text) => text.trim().to_string(),
            Err(err) => {
                tracing::warn!("transcription failed: {err:#}");
                String::new()
            }
        }
    }
}
