use crate::{
    error::GenerationError,
    generation::schema::WRAPPER_KEY,
    models::{category::expected_ratio, Completion, GenerationRange, ImagePromptRecord, MAX_PROMPT_CHARS},
};
use serde_json::Value;

/// The shapes a parsed provider payload can take.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadShape {
    RawArray(Vec<Value>),
    WrappedArray(Vec<Value>),
    Unrecognized(Value),
}

impl PayloadShape {
    pub fn classify(value: Value) -> Self {
        match value {
            Value::Array(items) => PayloadShape::RawArray(items),
            Value::Object(mut object) => match object.remove(WRAPPER_KEY) {
                Some(Value::Array(items)) => PayloadShape::WrappedArray(items),
                Some(other) => {
                    object.insert(WRAPPER_KEY.to_string(), other);
                    PayloadShape::Unrecognized(Value::Object(object))
                }
                None => PayloadShape::Unrecognized(Value::Object(object)),
            },
            other => PayloadShape::Unrecognized(other),
        }
    }

    pub fn into_items(self) -> Result<Vec<Value>, GenerationError> {
        match self {
            PayloadShape::RawArray(items) | PayloadShape::WrappedArray(items) => Ok(items),
            PayloadShape::Unrecognized(value) => Err(GenerationError::UnexpectedShape(format!(
                "expected an array or an object with a \"{}\" array, got {}",
                WRAPPER_KEY,
                describe(&value)
            ))),
        }
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Checks one element against the record contract and the requested range.
pub fn validate_record(
    index: usize,
    item: Value,
    range: GenerationRange,
) -> Result<ImagePromptRecord, GenerationError> {
    let invalid = |reason: String| GenerationError::InvalidRecord { index, reason };

    let record: ImagePromptRecord =
        serde_json::from_value(item).map_err(|e| invalid(e.to_string()))?;

    if !range.contains(record.image_number) {
        return Err(invalid(format!(
            "imageNumber {} is outside the requested range {}",
            record.image_number, range
        )));
    }

    match expected_ratio(record.image_number) {
        Some(ratio) if ratio == record.image_ratio => {}
        Some(ratio) => {
            return Err(invalid(format!(
                "imageRatio {} does not match {} required for image {}",
                record.image_ratio, ratio, record.image_number
            )))
        }
        None => {
            return Err(invalid(format!(
                "imageNumber {} has no category",
                record.image_number
            )))
        }
    }

    let prompt_chars = record.image_prompt.trim().chars().count();
    if prompt_chars == 0 {
        return Err(invalid("imagePrompt is empty".to_string()));
    }
    if prompt_chars > MAX_PROMPT_CHARS {
        return Err(invalid(format!(
            "imagePrompt has {} characters, limit is {}",
            prompt_chars, MAX_PROMPT_CHARS
        )));
    }

    Ok(record)
}

/// Stable sort by image number, failing on the first repeated number.
pub fn sort_unique(records: &mut [ImagePromptRecord]) -> Result<(), GenerationError> {
    records.sort_by_key(|record| record.image_number);
    match records
        .windows(2)
        .find(|pair| pair[0].image_number == pair[1].image_number)
    {
        Some(pair) => Err(GenerationError::DuplicateImageNumber(pair[0].image_number)),
        None => Ok(()),
    }
}

/// Applies the full output policy to one provider completion.
pub fn validate_completion(
    completion: &Completion,
    range: GenerationRange,
) -> Result<Vec<ImagePromptRecord>, GenerationError> {
    if let Some(reason) = completion
        .refusal
        .as_deref()
        .map(str::trim)
        .filter(|reason| !reason.is_empty())
    {
        return Err(GenerationError::Refused(reason.to_string()));
    }

    let content = completion
        .content
        .as_deref()
        .map(str::trim)
        .filter(|content| !content.is_empty())
        .ok_or_else(|| {
            GenerationError::MalformedResponse(format!(
                "empty content (finish_reason: {})",
                completion.finish_reason.as_deref().unwrap_or("unknown")
            ))
        })?;

    let value: Value = serde_json::from_str(content)
        .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

    let mut records = PayloadShape::classify(value)
        .into_items()?
        .into_iter()
        .enumerate()
        .map(|(index, item)| validate_record(index, item, range))
        .collect::<Result<Vec<_>, _>>()?;

    sort_unique(&mut records)?;
    Ok(records)
}
