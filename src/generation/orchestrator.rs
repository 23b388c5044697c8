use crate::{
    error::GenerationError,
    generation::{generator::PromptGenerator, validate::sort_unique},
    models::{category::TOTAL_IMAGES, partition, ImagePromptRecord},
};
use futures::future::try_join_all;

/// Number of concurrent provider calls per board.
pub const FAN_OUT: u32 = 2;

/// Splits a board across concurrent generator calls and merges the results.
#[derive(Clone)]
pub struct PromptOrchestrator {
    generator: PromptGenerator,
    total: u32,
    parts: u32,
}

impl PromptOrchestrator {
    pub fn new(generator: PromptGenerator) -> Self {
        Self {
            generator,
            total: TOTAL_IMAGES,
            parts: FAN_OUT,
        }
    }

    pub fn with_parts(mut self, parts: u32) -> Self {
        self.parts = parts;
        self
    }

    /// Generates the full board for one vision.
    ///
    /// All range calls are dispatched at once. The first failure is returned
    /// immediately and the calls still in flight are dropped.
    pub async fn generate_board(&self, prompt: &str) -> Result<Vec<ImagePromptRecord>, GenerationError> {
        let ranges = partition(self.total, self.parts)?;
        let model = self.generator.settings().model.as_str();

        log::info!("⚡ Starting {} parallel range requests", ranges.len());
        let calls = ranges
            .iter()
            .map(|range| self.generator.generate(prompt, *range, model));
        let results = try_join_all(calls).await?;

        log::info!("✨ Combining prompt results");
        let board = merge(results, self.total)?;
        log::info!("✅ Generated {} prompts", board.len());
        Ok(board)
    }
}

/// Concatenates per-range results and checks that `1..=total` is covered exactly once.
pub fn merge(
    parts: Vec<Vec<ImagePromptRecord>>,
    total: u32,
) -> Result<Vec<ImagePromptRecord>, GenerationError> {
    let mut combined: Vec<ImagePromptRecord> = parts.into_iter().flatten().collect();
    sort_unique(&mut combined)?;

    let numbers: Vec<u32> = combined.iter().map(|record| record.image_number).collect();
    let expected: Vec<u32> = (1..=total).collect();
    if numbers != expected {
        let missing = (1..=total)
            .filter(|n| numbers.binary_search(n).is_err())
            .collect();
        return Err(GenerationError::IncompleteResult {
            expected: total as usize,
            received: combined.len(),
            missing,
        });
    }

    Ok(combined)
}
