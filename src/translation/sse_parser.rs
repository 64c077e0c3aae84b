//! Server-Sent Events (SSE) parser for OpenAI-compatible streaming responses.
//!
//! Lines are split on raw bytes before UTF-8 decoding, so a multi-byte
//! character cut across two network chunks is reassembled intact.

use anyhow::{Result, anyhow};
use bytes::{Bytes, BytesMut};
use futures_util::{Stream, StreamExt};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct StreamResponse {
    #[serde(default)]
    choices: Vec<StreamChoice>,
    error: Option<StreamError>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: Delta,
}

#[derive(Debug, Deserialize)]
struct Delta {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamError {
    message: String,
}

/// What a single SSE line means for the text stream.
#[derive(Debug, PartialEq, Eq)]
enum Event {
    Text(String),
    Failed(String),
    Done,
    Skip,
}

/// Converts a raw SSE byte stream into a stream of text fragments.
///
/// Transport errors and error payloads end the stream with an `Err` item.
pub fn sse_to_text_stream(
    byte_stream: impl Stream<Item = reqwest::Result<Bytes>> + Send + 'static,
) -> impl Stream<Item = Result<String>> + Send {
    async_stream::stream! {
        let mut byte_stream = std::pin::pin!(byte_stream);
        let mut buffer = BytesMut::new();

        while let Some(chunk) = byte_stream.next().await {
            match chunk {
                Ok(chunk) => buffer.extend_from_slice(&chunk),
                Err(e) => {
                    yield Err(anyhow!("Stream error: {e}"));
                    return;
                }
            }

            while let Some(line_end) = buffer.iter().position(|b| *b == b'\n') {
                let line = buffer.split_to(line_end + 1);
                let line = String::from_utf8_lossy(&line);

                match parse_sse_line(line.trim()) {
                    Event::Text(content) => yield Ok(content),
                    Event::Failed(message) => {
                        yield Err(anyhow!("API error: {message}"));
                        return;
                    }
                    Event::Done => return,
                    Event::Skip => {}
                }
            }
        }

        // Some servers close the body without a final newline.
        if !buffer.is_empty() {
            let line = String::from_utf8_lossy(&buffer);
            match parse_sse_line(line.trim()) {
                Event::Text(content) => yield Ok(content),
                Event::Failed(message) => yield Err(anyhow!("API error: {message}")),
                Event::Done | Event::Skip => {}
            }
        }
    }
}

fn parse_sse_line(line: &str) -> Event {
    let Some(data) = line.strip_prefix("data:") else {
        return Event::Skip;
    };
    let data = data.trim_start();

    if data == "[DONE]" {
        return Event::Done;
    }

    let Ok(response) = serde_json::from_str::<StreamResponse>(data) else {
        return Event::Skip;
    };

    if let Some(error) = response.error {
        return Event::Failed(error.message);
    }

    let content: String = response
        .choices
        .into_iter()
        .filter_map(|c| c.delta.content)
        .collect();

    if content.is_empty() {
        Event::Skip
    } else {
        Event::Text(content)
    }
}
