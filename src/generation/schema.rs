use crate::models::{ImageRatio, OutputSchema};
use serde_json::json;

pub const SCHEMA_NAME: &str = "FluxPromptsResponse";

/// Key under which the provider wraps the prompt array.
pub const WRAPPER_KEY: &str = "prompts";

pub fn prompts_schema() -> OutputSchema {
    let ratios: Vec<&str> = ImageRatio::ALL.iter().map(|ratio| ratio.as_str()).collect();

    OutputSchema {
        name: SCHEMA_NAME.to_string(),
        description: "A structured response containing image prompts for a vision board"
            .to_string(),
        schema: json!({
            "type": "object",
            "properties": {
                "prompts": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "imageNumber": { "type": "integer" },
                            "imagePrompt": { "type": "string" },
                            "imageRatio": { "type": "string", "enum": ratios }
                        },
                        "required": ["imageNumber", "imagePrompt", "imageRatio"],
                        "additionalProperties": false
                    }
                }
            },
            "required": [WRAPPER_KEY],
            "additionalProperties": false
        }),
    }
}
