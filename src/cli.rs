use crate::client::{DemoScenario, Layout, TransactionInput};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "guardian", version, about = "Transaction risk scoring proxy")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the scoring proxy (default)
    Serve,

    /// Submit one transaction to a running proxy and print the result
    Score {
        #[command(flatten)]
        transaction: TransactionArgs,

        #[arg(long, default_value = "http://127.0.0.1:8080")]
        endpoint: String,

        #[arg(long, value_enum, default_value_t = Layout::Stacked)]
        layout: Layout,
    },
}

/// Either both fields or one of the demo presets.
#[derive(Args, Debug)]
pub struct TransactionArgs {
    #[arg(short, long, required_unless_present = "demo")]
    pub amount: Option<String>,

    #[arg(short, long, required_unless_present = "demo")]
    pub merchant: Option<String>,

    /// Prefill a low or high risk sample transaction
    #[arg(long, value_enum, conflicts_with_all = ["amount", "merchant"])]
    pub demo: Option<DemoScenario>,
}

impl TransactionArgs {
    pub fn into_input(self) -> TransactionInput {
        match self.demo {
            Some(scenario) => TransactionInput::demo(scenario),
            None => TransactionInput::new(
                self.amount.unwrap_or_default(),
                self.merchant.unwrap_or_default(),
            ),
        }
    }
}
