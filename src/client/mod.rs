//! Terminal counterpart of the scoring form: input, one request per
//! submission, and a single rendered state.

mod api;
pub mod form;
pub mod render;
mod types;

pub use api::{GuardianClient, ScoreApi};
pub use form::{FormEvent, FormState, GENERIC_ERROR, ScoreForm};
pub use render::{Layout, render};
pub use types::{DemoScenario, RiskBand, RiskResult, TransactionInput};
