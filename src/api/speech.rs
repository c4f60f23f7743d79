//! Voice Intent Endpoint
//!
//! Forwards transcribed text to the remote intent classifier. The
//! transcription itself happens elsewhere; this only ships text.

use serde::Serialize;
use smarttask_core::VoiceIntentResponse;

use super::{post_json, ApiError};

#[derive(Serialize)]
pub struct VoiceTextArgs<'a> {
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<&'a str>,
}

pub async fn process_voice_text(args: &VoiceTextArgs<'_>) -> Result<VoiceIntentResponse, ApiError> {
    post_json("/speech/process-voice-text", args).await
}
