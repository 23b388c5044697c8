#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use visionboard::{
    models::category::expected_ratio, Completion, CompletionProvider, CompletionRequest,
    GenerationError, GenerationRange,
};

/// Reads the assigned range back out of the system instructions.
pub fn assigned_range(system_prompt: &str) -> Option<GenerationRange> {
    let rest = system_prompt.split("image numbers ").nth(1)?;
    let mut words = rest.split_whitespace();
    let start = words.next()?.parse().ok()?;
    words.next()?;
    let end = words.next()?.parse().ok()?;
    Some(GenerationRange::new(start, end))
}

/// The payload a well-behaved model returns for one range, in reverse order.
pub fn board_payload(range: GenerationRange) -> Value {
    let prompts: Vec<Value> = range
        .numbers()
        .rev()
        .map(|n| {
            json!({
                "imageNumber": n,
                "imagePrompt": format!("Photograph {} of the vision, soft natural light", n),
                "imageRatio": expected_ratio(n).map(|ratio| ratio.as_str()).unwrap_or("1:1"),
            })
        })
        .collect();
    json!({ "prompts": prompts })
}

/// Stub model that answers every range correctly, optionally stalling one of them.
#[derive(Default)]
pub struct StubProvider {
    pub stall_range_start: Option<u32>,
    pub calls: AtomicUsize,
}

impl StubProvider {
    pub fn stalling(start: u32) -> Self {
        Self {
            stall_range_start: Some(start),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let range = assigned_range(&request.system_prompt)
            .ok_or_else(|| GenerationError::MalformedResponse("no range in instructions".into()))?;

        if self.stall_range_start == Some(range.start) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        Ok(Completion::from_content(board_payload(range).to_string()))
    }
}
