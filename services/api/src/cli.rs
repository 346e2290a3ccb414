use crate::server;
use clap::{Args, Parser, Subcommand};
use placement_portal::error::AppError;
use placement_portal::portal::eligibility::{evaluate, TierEligibility};
use placement_portal::portal::Tier;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Placement Portal",
    about = "Run the college placement portal or check tier eligibility from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Placement eligibility helpers
    Eligibility {
        #[command(subcommand)]
        command: EligibilityCommand,
    },
}

#[derive(Subcommand, Debug)]
enum EligibilityCommand {
    /// Evaluate the tier rule for one student and one job
    Check(CheckArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// JSON fixture with users, sessions, jobs and profiles to preload
    #[arg(long)]
    pub(crate) seed: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Tier of the offer the student already holds (TIER_1, TIER_2, TIER_3); omit if unplaced
    #[arg(long, value_parser = parse_tier)]
    pub(crate) student_tier: Option<Tier>,
    /// Tier of the job being considered
    #[arg(long, value_parser = parse_tier)]
    pub(crate) job_tier: Tier,
    /// Treat the job as a dream offer
    #[arg(long)]
    pub(crate) dream_offer: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckReport {
    student_tier: Option<Tier>,
    job_tier: Tier,
    is_dream_offer: bool,
    #[serde(flatten)]
    result: TierEligibility,
}

fn parse_tier(raw: &str) -> Result<Tier, String> {
    Tier::parse(raw).ok_or_else(|| format!("unknown tier '{raw}', expected TIER_1, TIER_2 or TIER_3"))
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Eligibility {
            command: EligibilityCommand::Check(args),
        } => run_check(args),
    }
}

fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let report = check_report(&args);
    let rendered = serde_json::to_string_pretty(&report)
        .map_err(|err| AppError::Io(std::io::Error::other(err)))?;
    println!("{rendered}");
    Ok(())
}

fn check_report(args: &CheckArgs) -> CheckReport {
    CheckReport {
        student_tier: args.student_tier,
        job_tier: args.job_tier,
        is_dream_offer: args.dream_offer,
        result: evaluate(args.student_tier, args.job_tier, args.dream_offer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn check_command_parses_tiers() {
        let cli = Cli::try_parse_from([
            "placement-portal-api",
            "eligibility",
            "check",
            "--student-tier",
            "tier_2",
            "--job-tier",
            "TIER_1",
        ])
        .expect("arguments parse");

        let Some(Command::Eligibility {
            command: EligibilityCommand::Check(args),
        }) = cli.command
        else {
            panic!("expected eligibility check");
        };
        assert_eq!(args.student_tier, Some(Tier::Tier2));
        assert_eq!(args.job_tier, Tier::Tier1);
        assert!(!args.dream_offer);

        let report = serde_json::to_value(check_report(&args)).expect("report serializes");
        assert_eq!(report["eligible"], json!(true));
        assert_eq!(report["jobTier"], json!("TIER_1"));
    }

    #[test]
    fn unknown_tier_is_rejected() {
        let err = Cli::try_parse_from([
            "placement-portal-api",
            "eligibility",
            "check",
            "--job-tier",
            "TIER_4",
        ])
        .expect_err("tier rejected");
        assert!(err.to_string().contains("unknown tier"));
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["placement-portal-api"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }
}
