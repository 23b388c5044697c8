use crate::models::{
    category::{CATEGORY_TABLE, PROMPT_CHECKLIST, TOTAL_IMAGES},
    GenerationRange,
};
use std::fmt::Write;

/// Builds the system instruction for one range of the board.
pub fn system_prompt(range: GenerationRange) -> String {
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "You are a helpful assistant that generates optimized image prompts for Flux based on the user's vision. Generate prompts for image numbers {} through {} only.",
        range.start, range.end
    );
    let _ = writeln!(prompt);

    let _ = writeln!(prompt, "Follow these specifications exactly:");
    for rule in CATEGORY_TABLE.iter() {
        let numbers = if rule.start == rule.end {
            format!("#{}", rule.start)
        } else {
            format!("#{}-{}", rule.start, rule.end)
        };
        let _ = writeln!(
            prompt,
            "{} ({}): ratio \"{}\". {}.",
            rule.category.label(),
            numbers,
            rule.ratio,
            rule.category.content_rule()
        );
    }
    let _ = writeln!(prompt);

    let _ = writeln!(prompt, "Each prompt must include:");
    for (index, item) in PROMPT_CHECKLIST.iter().enumerate() {
        let _ = writeln!(prompt, "{}. {}", index + 1, item);
    }
    let _ = writeln!(prompt, "Keep each prompt under 75 tokens.");
    let _ = writeln!(prompt);

    let _ = writeln!(
        prompt,
        "Return exactly {} prompts, one for every image number from {} to {}, each exactly once. Image numbers must be between 1 and {}.",
        range.len(),
        range.start,
        range.end,
        TOTAL_IMAGES
    );
    let _ = write!(
        prompt,
        "Respond only with a JSON object of the form {{\"prompts\": [{{\"imageNumber\": <integer>, \"imagePrompt\": <string>, \"imageRatio\": <\"1:1\" | \"3:4\" | \"4:3\" | \"16:9\">}}]}} matching the provided schema."
    );

    prompt
}
