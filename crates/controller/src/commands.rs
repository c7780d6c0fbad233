//! Subcommand implementations.
//!
//! Terminal I/O goes through the `input`/`out` parameters so the flows can
//! be driven from tests. `recommend` is split in two: [`propose`] does the
//! blocking prompt and [`submit`] does the async post.

use std::io::{BufRead, Write};
use std::path::Path;

use chrono::NaiveDate;
use wheelbot_core::signal::WebhookSignal;
use wheelbot_core::wheel::{WheelEvent, WheelState};

use crate::cli::RecommendArgs;
use crate::error::{ControllerError, Result};
use crate::recommend::{build_signal, TradePlan};
use crate::sender::WebhookSender;
use crate::state::BotState;

/// An approved trade, ready to post.
#[derive(Debug, Clone)]
pub struct Proposal {
    pub bot: BotState,
    pub signal: WebhookSignal,
}

/// How posting an approved trade ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendOutcome {
    /// The webhook did not accept the trade; state is unchanged.
    Rejected { status: u16 },
    /// The trade was accepted and the wheel advanced to this state.
    Placed(WheelState),
}

/// Suggest the next trade and ask for approval.
///
/// Blocking: reads the answer from `input`. Returns `None` when the operator
/// declines.
pub fn propose(
    state_file: &Path,
    args: &RecommendArgs,
    today: NaiveDate,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<Option<Proposal>> {
    let bot = BotState::load(state_file)?;

    let plan = TradePlan::from(args);
    let signal = build_signal(bot.state, &plan, today).ok_or_else(|| match bot.state {
        WheelState::Unknown => ControllerError::UnknownState,
        other => ControllerError::NothingToRecommend(other),
    })?;

    writeln!(out, "\n[Suggestion] Wheel Strategy Recommends:")?;
    writeln!(out, "{}", serde_json::to_string_pretty(&signal)?)?;

    let approved = args.yes || prompt_approval(input, out)?;
    if !approved {
        writeln!(out, "[INFO] Trade not approved. Bot state unchanged.")?;
        return Ok(None);
    }
    Ok(Some(Proposal { bot, signal }))
}

/// Post an approved trade and advance the state file on a 2xx response.
pub async fn submit(
    state_file: &Path,
    sender: &WebhookSender,
    proposal: Proposal,
    out: &mut impl Write,
) -> Result<RecommendOutcome> {
    let Proposal { mut bot, signal } = proposal;

    let delivery = sender.send(&signal).await;
    writeln!(out, "[Webhook Result] {} {}", delivery.status, delivery.body)?;

    if !delivery.is_success() {
        tracing::warn!(status = delivery.status, "Webhook did not accept the trade");
        writeln!(out, "[WARN] Trade was not accepted. Bot state unchanged.")?;
        return Ok(RecommendOutcome::Rejected {
            status: delivery.status,
        });
    }

    bot.record_trade(&signal)?;
    bot.save(state_file)?;
    tracing::info!(state = %bot.state, action = %signal.action, "Trade recorded");
    writeln!(out, "[INFO] Bot state is now {}", bot.state)?;

    Ok(RecommendOutcome::Placed(bot.state))
}

/// Print the state file contents.
pub fn status(state_file: &Path, out: &mut impl Write) -> Result<()> {
    let bot = BotState::load(state_file)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&bot)?)?;
    Ok(())
}

/// Record the outcome of the sold put (assignment or expiry).
pub fn record_event(
    state_file: &Path,
    event: WheelEvent,
    out: &mut impl Write,
) -> Result<WheelState> {
    let mut bot = BotState::load(state_file)?;
    bot.apply(event)?;
    bot.save(state_file)?;
    tracing::info!(state = %bot.state, %event, "Wheel event recorded");
    writeln!(
        out,
        "[INFO] Bot state is now {} ({} shares held)",
        bot.state, bot.shares_held
    )?;
    Ok(bot.state)
}

/// `y` (any case) approves; anything else, including end of input, declines.
fn prompt_approval(input: &mut impl BufRead, out: &mut impl Write) -> Result<bool> {
    write!(out, "\nApprove this trade? (y/n): ")?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use assert_matches::assert_matches;
    use httpmock::prelude::*;
    use serde_json::json;
    use wheelbot_core::error::CoreError;
    use wheelbot_core::signal::Action;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    /// Prompt then post, the way the binary runs `recommend`.
    async fn recommend(
        path: &Path,
        sender: &WebhookSender,
        args: &RecommendArgs,
        answer: &str,
        out: &mut Vec<u8>,
    ) -> Result<Option<RecommendOutcome>> {
        let Some(proposal) = propose(path, args, today(), &mut Cursor::new(answer), out)? else {
            return Ok(None);
        };
        submit(path, sender, proposal, out).await.map(Some)
    }

    async fn accepting_server() -> MockServer {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/webhook");
                then.status(200).json_body(json!({ "status": "success" }));
            })
            .await;
        server
    }

    #[tokio::test]
    async fn approved_put_moves_to_waiting_assignment() {
        let server = accepting_server().await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bot_state.json");
        let sender = WebhookSender::new(server.url("/webhook")).unwrap();

        let mut out = Vec::new();
        let outcome = recommend(&path, &sender, &RecommendArgs::default(), "y\n", &mut out)
            .await
            .unwrap();

        assert_eq!(outcome, Some(RecommendOutcome::Placed(WheelState::WaitingAssignment)));

        let saved = BotState::load(&path).unwrap();
        assert_eq!(saved.state, WheelState::WaitingAssignment);
        let last = saved.last_action.unwrap();
        assert_eq!(last.action, Action::SellPut);
        assert_eq!(last.expiry, NaiveDate::from_ymd_opt(2024, 2, 16).unwrap());

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("[Suggestion] Wheel Strategy Recommends:"));
        assert!(printed.contains("\"action\": \"sell_put\""));
        assert!(printed.contains("[Webhook Result] 200"));
    }

    #[tokio::test]
    async fn approved_call_returns_to_cash() {
        let server = accepting_server().await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bot_state.json");
        BotState {
            state: WheelState::Assigned,
            shares_held: 100,
            last_action: None,
        }
        .save(&path)
        .unwrap();
        let sender = WebhookSender::new(server.url("/webhook")).unwrap();

        let args = RecommendArgs {
            yes: true,
            ..RecommendArgs::default()
        };
        let outcome = recommend(&path, &sender, &args, "", &mut Vec::new())
            .await
            .unwrap();

        assert_eq!(outcome, Some(RecommendOutcome::Placed(WheelState::Cash)));
        let saved = BotState::load(&path).unwrap();
        assert_eq!(saved.shares_held, 0);
        assert_eq!(saved.last_action.unwrap().action, Action::SellCall);
    }

    #[tokio::test]
    async fn declined_trade_leaves_no_state_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bot_state.json");
        let sender = WebhookSender::new("http://127.0.0.1:9/webhook").unwrap();

        let mut out = Vec::new();
        let outcome = recommend(&path, &sender, &RecommendArgs::default(), "n\n", &mut out)
            .await
            .unwrap();

        assert_eq!(outcome, None);
        assert!(!path.exists());
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("[INFO] Trade not approved. Bot state unchanged."));
    }

    #[tokio::test]
    async fn rejected_trade_keeps_state() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/webhook");
                then.status(422).json_body(json!({ "code": "VALIDATION_ERROR" }));
            })
            .await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bot_state.json");
        let sender = WebhookSender::new(server.url("/webhook")).unwrap();

        let outcome = recommend(&path, &sender, &RecommendArgs::default(), "Y\n", &mut Vec::new())
            .await
            .unwrap();

        assert_eq!(outcome, Some(RecommendOutcome::Rejected { status: 422 }));
        assert!(!path.exists());
    }

    #[test]
    fn waiting_assignment_has_nothing_to_recommend() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bot_state.json");
        BotState {
            state: WheelState::WaitingAssignment,
            ..BotState::default()
        }
        .save(&path)
        .unwrap();

        let err = propose(
            &path,
            &RecommendArgs::default(),
            today(),
            &mut Cursor::new("y\n"),
            &mut Vec::new(),
        )
        .unwrap_err();
        assert_matches!(err, ControllerError::NothingToRecommend(WheelState::WaitingAssignment));
    }

    #[test]
    fn unknown_state_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bot_state.json");
        std::fs::write(&path, r#"{"state": "lost"}"#).unwrap();

        let err = propose(
            &path,
            &RecommendArgs::default(),
            today(),
            &mut Cursor::new("y\n"),
            &mut Vec::new(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Unknown bot state");
    }

    #[test]
    fn approval_with_yes_reads_no_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bot_state.json");
        let args = RecommendArgs {
            yes: true,
            symbol: "MSFT".into(),
            ..RecommendArgs::default()
        };

        let mut input = Cursor::new("n\n");
        let mut out = Vec::new();
        let proposal = propose(&path, &args, today(), &mut input, &mut out)
            .unwrap()
            .unwrap();

        assert_eq!(input.position(), 0);
        assert_eq!(proposal.signal.symbol, "MSFT");
        assert_eq!(proposal.bot.state, WheelState::Cash);
        assert!(!String::from_utf8(out).unwrap().contains("Approve this trade?"));
        assert!(!path.exists());
    }

    #[test]
    fn assign_and_expire_follow_the_wheel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bot_state.json");
        BotState {
            state: WheelState::WaitingAssignment,
            ..BotState::default()
        }
        .save(&path)
        .unwrap();

        let state =
            record_event(&path, WheelEvent::PutAssigned { shares: 200 }, &mut Vec::new()).unwrap();
        assert_eq!(state, WheelState::Assigned);
        assert_eq!(BotState::load(&path).unwrap().shares_held, 200);

        let err = record_event(&path, WheelEvent::PutExpired, &mut Vec::new()).unwrap_err();
        assert_matches!(err, ControllerError::Core(CoreError::Conflict(_)));
    }

    #[test]
    fn status_prints_default_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        status(&dir.path().join("bot_state.json"), &mut out).unwrap();
        let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed["state"], "cash");
        assert_eq!(printed["shares_held"], 0);
    }
}
