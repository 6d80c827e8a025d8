use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use thiserror::Error;

/// Score assigned when the model reply cannot be used.
pub const FALLBACK_RISK_SCORE: u8 = 50;
pub const FALLBACK_REASON: &str = "Model returned invalid JSON";

/// Transaction fields as submitted. Opaque to the handler: nothing is
/// coerced or bounded, every field is forwarded to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transaction(Map<String, Value>);

impl Transaction {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    #[error("Missing transaction payload")]
    MissingTransaction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRequest {
    pub transaction: Transaction,
}

impl ScoreRequest {
    pub fn from_json(body: &[u8]) -> Result<Self, RequestError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| RequestError::InvalidJson(e.to_string()))?;

        match value {
            Value::Object(mut root) => match root.remove("transaction") {
                Some(Value::Object(fields)) => Ok(Self {
                    transaction: Transaction::new(fields),
                }),
                _ => Err(RequestError::MissingTransaction),
            },
            _ => Err(RequestError::MissingTransaction),
        }
    }
}

/// A model reply that parsed as a JSON object with a numeric `risk_score`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedScore {
    fields: Map<String, Value>,
}

impl ParsedScore {
    /// Returns `None` unless `fields` carries a numeric `risk_score`.
    pub fn from_fields(fields: Map<String, Value>) -> Option<Self> {
        fields
            .get("risk_score")
            .is_some_and(Value::is_number)
            .then_some(Self { fields })
    }

    pub fn risk_score(&self) -> f64 {
        self.fields
            .get("risk_score")
            .and_then(Value::as_f64)
            .unwrap_or_default()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// Neutral stand-in for a reply that could not be used. `raw` keeps the
/// model text for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackScore {
    pub raw: String,
}

impl FallbackScore {
    fn into_fields(self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("risk_score".to_string(), json!(FALLBACK_RISK_SCORE));
        fields.insert("reason".to_string(), json!(FALLBACK_REASON));
        fields.insert("signals".to_string(), json!([]));
        fields.insert("raw".to_string(), Value::String(self.raw));
        fields
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScoreOutcome {
    Parsed(ParsedScore),
    Fallback(FallbackScore),
}

impl ScoreOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    pub fn risk_score(&self) -> f64 {
        match self {
            Self::Parsed(score) => score.risk_score(),
            Self::Fallback(_) => f64::from(FALLBACK_RISK_SCORE),
        }
    }

    fn into_fields(self) -> Map<String, Value> {
        match self {
            Self::Parsed(score) => score.fields,
            Self::Fallback(fallback) => fallback.into_fields(),
        }
    }
}

/// Score plus the metadata the handler stamps onto it.
#[derive(Debug, Clone)]
pub struct RiskAssessment {
    pub outcome: ScoreOutcome,
    pub model: String,
    pub backend: String,
    pub timestamp: DateTime<Utc>,
}

impl RiskAssessment {
    /// Merged response body. Metadata keys overwrite anything the model
    /// emitted under the same names.
    pub fn into_json(self) -> Value {
        let mut fields = self.outcome.into_fields();
        fields.insert("model".to_string(), Value::String(self.model));
        fields.insert("backend".to_string(), Value::String(self.backend));
        fields.insert(
            "timestamp".to_string(),
            Value::String(self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        Value::Object(fields)
    }
}
