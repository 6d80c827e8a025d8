mod parse;
mod prompt;
mod scorer;
mod types;

pub use parse::{parse_model_output, strip_code_fences};
pub use prompt::{DEFAULT_SYSTEM_PROMPT, build_prompt};
pub use scorer::RiskScorer;
pub use types::*;
