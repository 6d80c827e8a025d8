use super::{
    form::{FormState, ScoreForm},
    types::{RiskResult, TransactionInput},
};
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Layout {
    /// Form above result, for narrow terminals.
    #[default]
    Stacked,
    /// Form and result side by side.
    Split,
}

const SPLIT_COLUMN_WIDTH: usize = 38;

pub fn render(form: &ScoreForm, layout: Layout) -> String {
    let form_lines = form_panel(&form.input, form.is_loading());
    let result_lines = result_panel(form.current_state());

    match layout {
        Layout::Stacked => {
            let mut lines = form_lines;
            lines.push(String::new());
            lines.extend(result_lines);
            lines.join("\n")
        }
        Layout::Split => side_by_side(&form_lines, &result_lines),
    }
}

fn form_panel(input: &TransactionInput, loading: bool) -> Vec<String> {
    vec![
        "Transaction details".to_string(),
        format!("  Amount:   ${}", input.amount),
        format!("  Merchant: {}", input.merchant),
        if loading {
            "  [ Scoring... ]".to_string()
        } else {
            "  [ Score transaction ]".to_string()
        },
    ]
}

fn result_panel(state: &FormState) -> Vec<String> {
    match state {
        FormState::Idle => vec![
            "Risk result".to_string(),
            "  Submit a transaction to see its risk score.".to_string(),
        ],
        FormState::Loading => vec![
            "Risk result".to_string(),
            "  Scoring transaction...".to_string(),
        ],
        FormState::Failed(message) => vec!["Risk result".to_string(), format!("  {message}")],
        FormState::Scored(result) => scored_lines(result),
    }
}

fn scored_lines(result: &RiskResult) -> Vec<String> {
    let mut lines = vec![
        "Risk result".to_string(),
        format!(
            "  Score: {} / 100 ({})",
            result.risk_score,
            result.band().label()
        ),
    ];

    if let Some(verdict) = &result.verdict {
        lines.push(format!("  Verdict: {verdict}"));
    }
    if let Some(reason) = &result.reason {
        lines.push(format!("  Reason: {reason}"));
    }
    if let Some(explanation) = &result.explanation {
        lines.push(format!("  Explanation: {explanation}"));
    }
    if !result.signals.is_empty() {
        lines.push(format!("  Signals: {}", result.signals.join(", ")));
    }

    let meta: Vec<String> = [
        result.model.as_ref().map(|model| format!("model {model}")),
        result.backend.as_ref().map(|backend| format!("via {backend}")),
        result.timestamp.as_ref().map(|ts| format!("at {ts}")),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !meta.is_empty() {
        lines.push(format!("  ({})", meta.join(" ")));
    }

    lines
}

fn side_by_side(left: &[String], right: &[String]) -> String {
    let rows = left.len().max(right.len());
    (0..rows)
        .map(|i| {
            let l = left.get(i).map(String::as_str).unwrap_or("");
            let r = right.get(i).map(String::as_str).unwrap_or("");
            format!("{l:<SPLIT_COLUMN_WIDTH$} | {r}").trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
