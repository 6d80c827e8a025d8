use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub amount: String,
    pub merchant: String,
}

impl TransactionInput {
    pub fn new(amount: impl Into<String>, merchant: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            merchant: merchant.into(),
        }
    }

    /// Prefilled transaction for a quick demonstration of either end of the
    /// risk scale.
    pub fn demo(scenario: DemoScenario) -> Self {
        match scenario {
            DemoScenario::Low => Self::new("24.99", "Streaming Service Subscription"),
            DemoScenario::High => {
                Self::new("950.00", "Urgent wire to unknown international crypto broker")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DemoScenario {
    Low,
    High,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreRequestBody<'a> {
    pub transaction: &'a TransactionInput,
}

/// Score as returned by the proxy.
///
/// `reason`, `explanation` and `verdict` are all optional: the server passes
/// through whichever of them the model produced and never fills in
/// `verdict` itself. Anything else the model emitted lands in `extra`.
///
/// Only `risk_score` is strict. The text fields and `signals` come straight
/// from the model, so `null` reads as absent and any other JSON value is
/// kept as its JSON text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    pub risk_score: f64,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub reason: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub explanation: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub verdict: Option<String>,
    #[serde(default, deserialize_with = "lenient_signals")]
    pub signals: Vec<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub backend: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub timestamp: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn value_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        other => Some(value_text(other)),
    })
}

/// A list keeps one entry per element; a lone string becomes a one-entry
/// list; anything else reads as no signals.
fn lenient_signals<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter(|item| !item.is_null())
            .map(value_text)
            .collect(),
        Value::String(text) => vec![text],
        _ => Vec::new(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    pub fn from_score(score: f64) -> Self {
        if score < 30.0 {
            Self::Low
        } else if score < 70.0 {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Medium => "Medium Risk",
            Self::High => "High Risk",
        }
    }
}

impl RiskResult {
    pub fn band(&self) -> RiskBand {
        RiskBand::from_score(self.risk_score)
    }
}
