//! `wheelbot-controller` -- interactive wheel strategy assistant.
//!
//! Reads the wheel position from a JSON state file, suggests the next
//! option sale, and posts it to the webhook server once approved.
//!
//! # Environment variables
//!
//! | Variable            | Default                          | Description            |
//! |---------------------|----------------------------------|------------------------|
//! | `WHEEL_STATE_FILE`  | `bot_state.json`                 | State file path        |
//! | `WHEEL_WEBHOOK_URL` | `http://localhost:8000/webhook`  | Webhook endpoint       |

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use wheelbot_controller::cli::{Cli, Command};
use wheelbot_controller::commands::{self, RecommendOutcome};
use wheelbot_controller::logger::init_cli_logger;
use wheelbot_controller::sender::WebhookSender;
use wheelbot_core::wheel::WheelEvent;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_cli_logger(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            println!("[ERROR] {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut out = std::io::stdout();

    match cli.command.unwrap_or(Command::Recommend) {
        Command::Recommend => {
            let sender = WebhookSender::new(&cli.webhook_url)
                .context("failed to build HTTP client")?;
            let today = chrono::Local::now().date_naive();
            tracing::debug!(url = %sender.url(), %today, "Building recommendation");

            let args = cli.recommend;
            let state_file = cli.state_file.clone();
            let proposal = tokio::task::spawn_blocking(move || {
                let stdin = std::io::stdin();
                commands::propose(
                    &state_file,
                    &args,
                    today,
                    &mut stdin.lock(),
                    &mut std::io::stdout(),
                )
            })
            .await
            .context("approval prompt failed")??;

            let Some(proposal) = proposal else {
                return Ok(ExitCode::SUCCESS);
            };
            let outcome = commands::submit(&cli.state_file, &sender, proposal, &mut out).await?;
            Ok(match outcome {
                RecommendOutcome::Rejected { .. } => ExitCode::FAILURE,
                RecommendOutcome::Placed(_) => ExitCode::SUCCESS,
            })
        }
        Command::Status => {
            commands::status(&cli.state_file, &mut out)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Assign { shares } => {
            commands::record_event(&cli.state_file, WheelEvent::PutAssigned { shares }, &mut out)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Expire => {
            commands::record_event(&cli.state_file, WheelEvent::PutExpired, &mut out)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
