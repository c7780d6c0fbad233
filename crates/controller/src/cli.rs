use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use wheelbot_core::wheel::SHARES_PER_CONTRACT;

use crate::recommend::{
    TradePlan, DEFAULT_CALL_PREMIUM, DEFAULT_CALL_STRIKE, DEFAULT_CONTRACTS, DEFAULT_PUT_PREMIUM,
    DEFAULT_PUT_STRIKE, DEFAULT_SYMBOL,
};

#[derive(Parser, Debug)]
#[command(name = "wheelbot-controller")]
#[command(about = "Recommend, approve and track wheel strategy trades")]
#[command(version)]
pub struct Cli {
    /// Path of the JSON state file
    #[arg(long, env = "WHEEL_STATE_FILE", default_value = "bot_state.json", global = true)]
    pub state_file: PathBuf,

    /// Webhook endpoint of the API server
    #[arg(
        long,
        env = "WHEEL_WEBHOOK_URL",
        default_value = "http://localhost:8000/webhook",
        global = true
    )]
    pub webhook_url: String,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub recommend: RecommendArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Suggest the next trade and send it once approved (default)
    Recommend,
    /// Print the current state file
    Status,
    /// Record that the sold put was assigned
    Assign {
        /// Shares received on assignment
        #[arg(long, default_value_t = SHARES_PER_CONTRACT)]
        shares: u32,
    },
    /// Record that the sold put expired worthless
    Expire,
}

/// Options of the `recommend` flow. Global so they work with or without
/// the subcommand name.
#[derive(Args, Debug, Clone)]
#[command(next_help_heading = "Recommend options")]
pub struct RecommendArgs {
    /// Underlying ticker
    #[arg(long, default_value = DEFAULT_SYMBOL, global = true)]
    pub symbol: String,

    #[arg(long, default_value_t = DEFAULT_PUT_STRIKE, global = true)]
    pub put_strike: f64,

    #[arg(long, default_value_t = DEFAULT_PUT_PREMIUM, global = true)]
    pub put_premium: f64,

    #[arg(long, default_value_t = DEFAULT_CALL_STRIKE, global = true)]
    pub call_strike: f64,

    #[arg(long, default_value_t = DEFAULT_CALL_PREMIUM, global = true)]
    pub call_premium: f64,

    /// Contracts per trade
    #[arg(long, default_value_t = DEFAULT_CONTRACTS, global = true)]
    pub quantity: u32,

    /// Approve without prompting
    #[arg(short, long, global = true)]
    pub yes: bool,
}

impl Default for RecommendArgs {
    fn default() -> Self {
        let plan = TradePlan::default();
        Self {
            symbol: plan.symbol,
            put_strike: plan.put_strike,
            put_premium: plan.put_premium,
            call_strike: plan.call_strike,
            call_premium: plan.call_premium,
            quantity: plan.quantity,
            yes: false,
        }
    }
}

impl From<&RecommendArgs> for TradePlan {
    fn from(args: &RecommendArgs) -> Self {
        Self {
            symbol: args.symbol.clone(),
            put_strike: args.put_strike,
            put_premium: args.put_premium,
            call_strike: args.call_strike,
            call_premium: args.call_premium,
            quantity: args.quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_parses() {
        let cli = Cli::try_parse_from(["wheelbot-controller"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.state_file, PathBuf::from("bot_state.json"));
    }

    #[test]
    fn recommend_defaults_match_trade_plan() {
        let cli = Cli::try_parse_from(["wheelbot-controller", "recommend"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Recommend)));
        assert_eq!(TradePlan::from(&cli.recommend), TradePlan::default());
        assert!(!cli.recommend.yes);
    }

    #[test]
    fn recommend_flags_work_without_subcommand() {
        let cli =
            Cli::try_parse_from(["wheelbot-controller", "--yes", "--symbol", "MSFT"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.recommend.yes);
        assert_eq!(cli.recommend.symbol, "MSFT");
        assert_eq!(cli.recommend.put_strike, DEFAULT_PUT_STRIKE);
    }

    #[test]
    fn recommend_flags_work_after_subcommand() {
        let cli = Cli::try_parse_from([
            "wheelbot-controller",
            "recommend",
            "-y",
            "--put-strike",
            "175",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Command::Recommend)));
        assert!(cli.recommend.yes);
        assert_eq!(cli.recommend.put_strike, 175.0);
    }

    #[test]
    fn assign_defaults_to_one_contract_of_shares() {
        let cli = Cli::try_parse_from(["wheelbot-controller", "assign"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Assign { shares: 100 })));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "wheelbot-controller",
            "status",
            "--state-file",
            "/tmp/wheel.json",
        ])
        .unwrap();
        assert_eq!(cli.state_file, PathBuf::from("/tmp/wheel.json"));
    }
}
