use std::io::{BufRead, BufReader};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::AssistantConfig;
use crate::error::{FolioError, Result};

const SUMMARY_CONTENT_LIMIT: usize = 3000;
const ANSWER_CONTENT_LIMIT: usize = 2000;
const SUMMARY_MAX_TOKENS: u32 = 800;
const ANSWER_MAX_TOKENS: u32 = 1000;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

const SUMMARY_SYSTEM_PROMPT: &str = "You are a documentation assistant. Produce a concise, \
accurate summary of the provided document. Highlight the core content, use markdown \
(bold for emphasis, inline code for technical terms, lists for structure), keep it \
between 150 and 300 words, and stay objective.";

const ANSWER_SYSTEM_PROMPT: &str = "You are a documentation assistant. Answer the user's \
question based on the provided document content. If the question falls outside the \
document, say so explicitly. Reply in markdown with bold emphasis, inline code for \
technical terms, lists, and code blocks for examples. Stay friendly and precise.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Proxy to an OpenAI-compatible chat-completions endpoint. Requests stream
/// server-sent events; the full answer is assembled server-side.
#[derive(Debug, Clone)]
pub struct Assistant {
    config: AssistantConfig,
}

impl Assistant {
    #[must_use]
    pub const fn new(config: AssistantConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.is_enabled()
    }

    /// Summarize one document. Blocking; callers on an async runtime must
    /// dispatch through `spawn_blocking`.
    pub fn summarize(&self, title: &str, content: &str) -> Result<String> {
        let prompt = format!(
            "Summarize the following document.\n\nTitle: {title}\n\nContent:\n{}",
            clip_chars(content, SUMMARY_CONTENT_LIMIT)
        );
        self.complete(
            vec![ChatMessage::system(SUMMARY_SYSTEM_PROMPT), ChatMessage::user(prompt)],
            SUMMARY_MAX_TOKENS,
        )
    }

    /// Answer a question about one document, with optional prior turns.
    /// Blocking, like [`Assistant::summarize`].
    pub fn ask(
        &self,
        title: &str,
        content: &str,
        question: &str,
        history: &[ChatMessage],
    ) -> Result<String> {
        let system = format!(
            "{ANSWER_SYSTEM_PROMPT}\n\nDocument title: {title}\nDocument content:\n{}",
            clip_chars(content, ANSWER_CONTENT_LIMIT)
        );
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(system));
        messages.extend_from_slice(history);
        messages.push(ChatMessage::user(question));
        self.complete(messages, ANSWER_MAX_TOKENS)
    }

    fn complete(&self, messages: Vec<ChatMessage>, max_tokens: u32) -> Result<String> {
        if !self.is_enabled() {
            return Err(FolioError::AssistantDisabled);
        }

        let body = serde_json::json!({
            "model": self.config.model,
            "messages": messages,
            "max_tokens": max_tokens,
            "temperature": 0.7,
            "top_p": 1,
            "frequency_penalty": 0,
            "presence_penalty": 0,
            "stream": true,
        });

        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let response = client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(FolioError::AssistantUpstream(format!(
                "{status}: {}",
                detail.trim()
            )));
        }

        collect_stream(BufReader::new(response))
    }
}

#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: StreamDelta,
    finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct StreamDelta {
    content: Option<String>,
}

/// Assemble an answer from an SSE chat-completions stream: skip blanks and
/// the `[DONE]` sentinel, decode `data: ` JSON chunks, concatenate delta
/// content, stop at the first finish reason. Malformed chunks are skipped.
fn collect_stream(reader: impl BufRead) -> Result<String> {
    let mut answer = String::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed == "data: [DONE]" {
            continue;
        }
        let Some(payload) = trimmed.strip_prefix("data: ") else {
            continue;
        };
        let Ok(chunk) = serde_json::from_str::<StreamChunk>(payload) else {
            continue;
        };
        let Some(choice) = chunk.choices.first() else {
            continue;
        };
        if let Some(content) = &choice.delta.content {
            answer.push_str(content);
        }
        if choice.finish_reason.is_some() {
            break;
        }
    }
    Ok(answer)
}

fn clip_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn chunk(content: &str) -> String {
        format!(
            "data: {{\"choices\":[{{\"delta\":{{\"content\":\"{content}\"}}}}]}}\n"
        )
    }

    #[test]
    fn stream_chunks_are_concatenated() {
        let stream = format!("{}{}\ndata: [DONE]\n", chunk("Hello, "), chunk("world"));
        let answer = collect_stream(Cursor::new(stream)).expect("collect");
        assert_eq!(answer, "Hello, world");
    }

    #[test]
    fn finish_reason_stops_the_stream() {
        let stream = format!(
            "{}data: {{\"choices\":[{{\"delta\":{{}},\"finish_reason\":\"stop\"}}]}}\n{}",
            chunk("done"),
            chunk("ignored")
        );
        let answer = collect_stream(Cursor::new(stream)).expect("collect");
        assert_eq!(answer, "done");
    }

    #[test]
    fn malformed_chunks_are_skipped() {
        let stream = format!("data: not json\n{}", chunk("ok"));
        let answer = collect_stream(Cursor::new(stream)).expect("collect");
        assert_eq!(answer, "ok");
    }

    #[test]
    fn non_data_lines_and_blanks_are_ignored() {
        let stream = format!(": keepalive\n\n{}", chunk("x"));
        let answer = collect_stream(Cursor::new(stream)).expect("collect");
        assert_eq!(answer, "x");
    }

    #[test]
    fn empty_stream_yields_empty_answer() {
        let answer = collect_stream(Cursor::new("data: [DONE]\n")).expect("collect");
        assert!(answer.is_empty());
    }

    #[test]
    fn clip_chars_respects_char_boundaries() {
        assert_eq!(clip_chars("hello", 3), "hel");
        assert_eq!(clip_chars("hello", 10), "hello");
        assert_eq!(clip_chars("你好世界", 2), "你好");
    }

    #[test]
    fn disabled_assistant_refuses_requests() {
        let assistant = Assistant::new(AssistantConfig::default());
        let err = assistant.summarize("t", "c").expect_err("disabled");
        assert!(matches!(err, FolioError::AssistantDisabled));
    }
}
