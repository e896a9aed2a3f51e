use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::SUPPORT_SYSTEM_INSTRUCTION;
use crate::models::{ChatMessage, Role};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Text model for support replies and transcription.
const CHAT_MODEL: &str = "gemini-2.5-flash";

/// Audio-capable model for the voice assistant.
const VOICE_MODEL: &str = "gemini-2.5-flash-native-audio-preview-09-2025";

const TRANSCRIBE_PROMPT: &str = "請將這段語音精準轉成繁體中文文字。";

const VOICE_PROMPT: &str = "\
這是一個針對高齡者的交友App語音助理。
請聽使用者的語音，並做兩件事：
1. 理解使用者的意圖（例如：想找人聊天、想找社團、想問如何使用）。
2. 給予一個簡短、溫暖的回應。

請以 JSON 格式回傳，格式如下：
{
  \"userIntent\": \"使用者的意圖摘要\",
  \"reply\": \"給使用者的回應\"
}";

/// Interpreted voice request: what the user wanted, and what to say back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceCommand {
    #[serde(rename = "userIntent")]
    pub intent: String,
    pub reply: String,
}

/// Gemini API client. One attempt per request; the timeout is the only
/// failure budget.
pub struct GeminiClient {
    api_key: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl GeminiClient {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
            timeout,
        }
    }

    /// One support-desk reply for the conversation so far plus a new message.
    pub async fn generate_support_reply(
        &self,
        history: &[ChatMessage],
        new_message: &str,
    ) -> Result<String> {
        let prompt = build_support_prompt(history, new_message);
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });
        self.generate(CHAT_MODEL, body).await
    }

    /// Interpret a spoken request, returning the intent and a short reply.
    pub async fn process_voice_command(&self, audio_wav: &[u8]) -> Result<VoiceCommand> {
        let body = serde_json::json!({
            "contents": [{ "parts": [
                {
                    "inline_data": {
                        "mime_type": "audio/wav",
                        "data": BASE64.encode(audio_wav),
                    }
                },
                { "text": VOICE_PROMPT }
            ]}],
            "generationConfig": { "response_mime_type": "application/json" },
        });
        let text = self.generate(VOICE_MODEL, body).await?;
        parse_voice_payload(&text)
    }

    /// Transcribe spoken audio to Traditional Chinese text.
    pub async fn transcribe_audio(&self, audio_wav: &[u8]) -> Result<String> {
        let body = serde_json::json!({
            "contents": [{ "parts": [
                {
                    "inline_data": {
                        "mime_type": "audio/wav",
                        "data": BASE64.encode(audio_wav),
                    }
                },
                { "text": TRANSCRIBE_PROMPT }
            ]}],
        });
        self.generate(CHAT_MODEL, body).await
    }

    async fn generate(&self, model: &str, body: serde_json::Value) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", GEMINI_API_BASE, model);

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .context("Failed to send request to Gemini API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API error ({}): {}", status, error_text);
        }

        let response_json: serde_json::Value = response
            .json()
            .await
            .context("Failed to parse Gemini response")?;

        let text = response_json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .context("Failed to extract text from Gemini response")?
            .to_string();

        Ok(text)
    }
}

/// Transcript prompt in the shape the support desk expects.
fn build_support_prompt(history: &[ChatMessage], new_message: &str) -> String {
    let mut prompt = format!("{SUPPORT_SYSTEM_INSTRUCTION}\n\n對話記錄:\n");
    for msg in history {
        let speaker = match msg.role {
            Role::User => "使用者",
            Role::Model | Role::System => "客服",
        };
        prompt.push_str(&format!("{speaker}: {}\n", msg.text));
    }
    prompt.push_str(&format!("使用者: {new_message}\n客服:"));
    prompt
}

/// Parse the JSON the voice model was asked to produce.
fn parse_voice_payload(text: &str) -> Result<VoiceCommand> {
    serde_json::from_str(text.trim()).context("Voice response was not the expected JSON shape")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_support_prompt_labels_speakers() {
        let history = vec![
            ChatMessage::new(Role::System, "您好！", 1),
            ChatMessage::new(Role::User, "怎麼參加社團？", 2),
            ChatMessage::new(Role::Model, "請點選下方的社團按鈕。", 3),
        ];
        let prompt = build_support_prompt(&history, "謝謝你");

        assert!(prompt.starts_with(SUPPORT_SYSTEM_INSTRUCTION));
        assert!(prompt.contains("客服: 您好！\n"));
        assert!(prompt.contains("使用者: 怎麼參加社團？\n"));
        assert!(prompt.ends_with("使用者: 謝謝你\n客服:"));
    }

    #[test]
    fn test_parse_voice_payload() {
        let cmd = parse_voice_payload(
            "{\"userIntent\": \"想找登山社團\", \"reply\": \"好的，為您介紹登山社團！\"}",
        )
        .unwrap();
        assert_eq!(cmd.intent, "想找登山社團");
        assert_eq!(cmd.reply, "好的，為您介紹登山社團！");

        // Surrounding whitespace from the model is tolerated
        assert!(parse_voice_payload("\n {\"userIntent\": \"a\", \"reply\": \"b\"} \n").is_ok());

        // Anything else is an error for the caller's fallback to handle
        assert!(parse_voice_payload("抱歉，我不懂").is_err());
        assert!(parse_voice_payload("{\"reply\": \"沒有意圖\"}").is_err());
    }

    #[tokio::test]
    #[ignore] // Requires actual API key
    async fn test_generate_support_reply() {
        let api_key = std::env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY not set");
        let client = GeminiClient::new(api_key, Duration::from_secs(30));

        let history = vec![ChatMessage::new(Role::System, "您好！", 1)];
        let reply = client
            .generate_support_reply(&history, "請問如何參加活動？")
            .await
            .unwrap();
        assert!(!reply.is_empty());
    }

    #[tokio::test]
    #[ignore] // Requires actual API key and a WAV sample
    async fn test_transcribe_audio() {
        let api_key = std::env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY not set");
        let wav_path = std::env::var("YUANFEN_TEST_WAV").expect("YUANFEN_TEST_WAV not set");
        let client = GeminiClient::new(api_key, Duration::from_secs(30));

        let audio = std::fs::read(wav_path).unwrap();
        let text = client.transcribe_audio(&audio).await.unwrap();
        assert!(!text.is_empty());
    }
}
