//! Parsing of model output into the answer schema

use crate::errors::EstateRagError;
use crate::errors::Result;
use crate::models::StructuredAnswer;

/// Parse raw model output into a [`StructuredAnswer`].
///
/// Accepts a bare JSON object, one wrapped in a Markdown code fence, or one
/// surrounded by stray prose. Anything else is a `GenerationParse` error.
pub fn parse_structured_answer(raw: &str, model: &str) -> Result<StructuredAnswer> {
    let body = strip_code_fence(raw.trim());

    let first_error = match serde_json::from_str::<StructuredAnswer>(body) {
        Ok(answer) => return Ok(answer),
        Err(e) => e,
    };

    if let Some(object) = outermost_object(body) {
        if object.len() != body.len() {
            if let Ok(answer) = serde_json::from_str::<StructuredAnswer>(object) {
                return Ok(answer);
            }
        }
    }

    let preview: String = raw.chars().take(500).collect();
    tracing::warn!("Model {} returned unparseable output: {}", model, preview);

    Err(EstateRagError::GenerationParse {
        model: model.to_string(),
        message: first_error.to_string(),
    })
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string ("json") on the opening line
    let rest = rest.find('\n').map_or("", |newline| &rest[newline + 1..]);
    rest.trim_end()
        .strip_suffix("```")
        .unwrap_or(rest)
        .trim()
}

fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}
