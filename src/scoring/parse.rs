use super::{FallbackScore, ParsedScore, ScoreOutcome};
use serde_json::Value;
use tracing::warn;

/// Removes a Markdown code fence wrapped around the whole text. An info
/// string (`json`, `JSON`, ...) is dropped only when a newline follows it,
/// so a one-line fence such as ```` ```true``` ```` keeps its content.
/// Unfenced text is only trimmed.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    let inner = match inner.split_once('\n') {
        Some((info, body)) if info.trim().chars().all(|c| c.is_ascii_alphanumeric()) => body,
        _ => inner,
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    inner.trim()
}

/// Classifies model text. Never fails: anything other than a JSON object
/// with a numeric `risk_score` becomes a fallback keeping the raw text.
pub fn parse_model_output(text: &str) -> ScoreOutcome {
    let candidate = strip_code_fences(text);

    let parsed = match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(fields)) => ParsedScore::from_fields(fields),
        Ok(other) => {
            warn!("Model returned JSON that is not an object: {}", other);
            None
        }
        Err(e) => {
            warn!("Model returned invalid JSON: {}", e);
            None
        }
    };

    match parsed {
        Some(score) => ScoreOutcome::Parsed(score),
        None => ScoreOutcome::Fallback(FallbackScore {
            raw: text.to_string(),
        }),
    }
}
