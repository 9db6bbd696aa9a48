use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::{timeout, Duration};

const SYSTEM_INSTRUCTION_QA: &str = "You are a helpful teaching assistant. The student is listening to a lesson and has asked a question.

If context from the lesson is provided below, use it to give a relevant, concise answer. Otherwise answer the question clearly and briefly.

- Keep answers to 1\u{2013}3 short paragraphs so they can be read aloud.
- Use plain language. No LaTeX or markdown.
- If the question is unclear or off-topic, answer politely and suggest they rephrase or wait for the relevant part of the lesson.";

pub struct GeminiConfig {
    api_key: String,
    url: String,
    timeout_ms: u64,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>, url: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            api_key: api_key.into(),
            url: url.into(),
            timeout_ms,
        }
    }
}

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("Question cannot be empty")]
    EmptyQuestion,
    #[error("Gemini request timed out")]
    Timeout,
    #[error("failed to reach Gemini: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Gemini returned status {0}")]
    UpstreamStatus(u16),
    #[error("No response from Gemini")]
    NoCandidates,
    #[error("Empty response from Gemini")]
    EmptyParts,
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    #[serde(rename = "systemInstruction")]
    system_instruction: RequestContent<'a>,
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// Builds the system instruction, appending the trimmed lesson context under
/// a labeled section when one is supplied.
fn system_instruction(context: Option<&str>) -> String {
    match context.map(str::trim).filter(|ctx| !ctx.is_empty()) {
        Some(ctx) => {
            format!("{SYSTEM_INSTRUCTION_QA}\n\nLesson context (for reference only):\n{ctx}")
        }
        None => SYSTEM_INSTRUCTION_QA.to_string(),
    }
}

/// Answers the student's question via Gemini, optionally with lesson context.
///
/// Exactly one outbound call per invocation; no retries. The empty-question
/// check here is authoritative and runs before any network activity.
pub async fn answer_question(
    question: &str,
    context: Option<&str>,
    client: &Client,
    cfg: &GeminiConfig,
) -> Result<String, GeminiError> {
    let user_text = question.trim();
    if user_text.is_empty() {
        return Err(GeminiError::EmptyQuestion);
    }

    let system_text = system_instruction(context);
    let payload = GenerateContentRequest {
        system_instruction: RequestContent {
            parts: vec![RequestPart { text: &system_text }],
        },
        contents: vec![RequestContent {
            parts: vec![RequestPart { text: user_text }],
        }],
    };

    let fut = client
        .post(&cfg.url)
        .header("x-goog-api-key", &cfg.api_key)
        .json(&payload)
        .send();

    let response = timeout(Duration::from_millis(cfg.timeout_ms), fut)
        .await
        .map_err(|_| GeminiError::Timeout)??;

    let status = response.status();
    if !status.is_success() {
        return Err(GeminiError::UpstreamStatus(status.as_u16()));
    }

    let body: GenerateContentResponse = response.json().await?;
    extract_answer(body)
}

/// Pulls the first candidate's first part out of the envelope. Everything
/// else in the reply is ignored; an empty answer is an error, never a success.
fn extract_answer(body: GenerateContentResponse) -> Result<String, GeminiError> {
    let candidate = body.candidates.into_iter().next().ok_or(GeminiError::NoCandidates)?;
    let part = candidate
        .content
        .parts
        .into_iter()
        .next()
        .ok_or(GeminiError::EmptyParts)?;

    let answer = part.text.trim().to_string();
    if answer.is_empty() {
        return Err(GeminiError::EmptyParts);
    }

    Ok(answer)
}
