use super::Transaction;
use crate::Result;

pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a transaction risk scoring model. You reply with JSON only.";

/// Builds the user prompt for one transaction. The transaction is embedded
/// verbatim as pretty-printed JSON.
pub fn build_prompt(transaction: &Transaction) -> Result<String> {
    let transaction_json = serde_json::to_string_pretty(transaction)?;

    Ok(format!(
        "Assess the fraud risk of the card transaction below.\n\
         \n\
         Respond with strict JSON only, no Markdown, no prose, in exactly this shape:\n\
         {{\"risk_score\": <number from 0 (safe) to 100 (fraudulent)>, \
         \"reason\": <short string>, \
         \"signals\": [<string>, ...]}}\n\
         \n\
         TRANSACTION:\n\
         {transaction_json}"
    ))
}
