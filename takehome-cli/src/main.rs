use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use takehome_core::{EarnerKind, FiscalYearVariant, IncomeSolver, TaxModel};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod report;

use report::Comparison;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Take-home pay calculator for employees and consultants in India.
///
/// Amounts are in the unit of the selected fiscal year: thousands of rupees a
/// year for fy2018-19 and fy2018-19-gst, rupees a month for
/// fy2021-22-marginal. Net figures are always per month.
#[derive(Debug, Parser)]
#[command(name = "takehome", version, about, long_about = None)]
struct Cli {
    /// Rate table to apply.
    #[arg(long, global = true, default_value = "fy2018-19", value_parser = parse_year)]
    year: FiscalYearVariant,

    /// Print the full breakdown as JSON instead of a sentence.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Net income for a gross income.
    Net {
        #[arg(long)]
        gross: Decimal,

        #[arg(long, default_value = "employee")]
        earner: EarnerKind,
    },

    /// Gross income needed for a net income.
    Gross {
        #[arg(long)]
        target: Decimal,

        #[arg(long, default_value = "consultant")]
        earner: EarnerKind,
    },

    /// Employee and consultant take-home pay for the same CTC.
    Compare {
        #[arg(long)]
        ctc: Decimal,
    },
}

fn parse_year(s: &str) -> Result<FiscalYearVariant, String> {
    FiscalYearVariant::parse(s).ok_or_else(|| {
        let known: Vec<_> = FiscalYearVariant::ALL.iter().map(|v| v.as_str()).collect();
        format!("unknown fiscal year '{s}', expected one of: {}", known.join(", "))
    })
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Writes to stderr so `--json` output stays parseable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = cli.year.rate_configuration();
    debug!(year = %cli.year, "loaded rate table");

    match cli.command {
        Command::Net { gross, earner } => {
            let assessment = TaxModel::new(&config)
                .assess(gross, earner)
                .with_context(|| format!("Failed to assess gross income {gross}"))?;

            if cli.json {
                print_json(&assessment)?;
            } else {
                println!("{}", report::net_sentence(cli.year, &assessment));
            }
        }
        Command::Gross { target, earner } => {
            let solution = IncomeSolver::new(&config)
                .solve(target, earner)
                .with_context(|| format!("Failed to find gross income for net income {target}"))?;

            if cli.json {
                print_json(&solution)?;
            } else {
                println!("{}", report::gross_sentence(cli.year, &solution));
            }
        }
        Command::Compare { ctc } => {
            let model = TaxModel::new(&config);
            let comparison = Comparison {
                year: cli.year,
                ctc,
                employee: model
                    .assess(ctc, EarnerKind::Employee)
                    .with_context(|| format!("Failed to assess CTC {ctc} for an employee"))?,
                consultant: model
                    .assess(ctc, EarnerKind::Consultant)
                    .with_context(|| format!("Failed to assess CTC {ctc} for a consultant"))?,
            };

            if cli.json {
                print_json(&comparison)?;
            } else {
                println!("{}", report::comparison_sentence(&comparison));
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn year_defaults_to_fy2018_19() {
        let cli = Cli::try_parse_from(["takehome", "net", "--gross", "1200"]).unwrap();

        assert_eq!(cli.year, FiscalYearVariant::Fy2018_19);
        assert!(!cli.json);
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "takehome",
            "gross",
            "--target",
            "160664",
            "--year",
            "fy2021-22-marginal",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.year, FiscalYearVariant::Fy2021_22Marginal);
        assert!(cli.json);
        match cli.command {
            Command::Gross { target, earner } => {
                assert_eq!(target, dec!(160664));
                assert_eq!(earner, EarnerKind::Consultant);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn earner_is_parsed_case_insensitively() {
        let cli =
            Cli::try_parse_from(["takehome", "net", "--gross", "1200", "--earner", "Consultant"])
                .unwrap();

        match cli.command {
            Command::Net { earner, .. } => assert_eq!(earner, EarnerKind::Consultant),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn unknown_year_is_rejected() {
        let result = Cli::try_parse_from(["takehome", "--year", "fy2030-31", "compare", "--ctc", "1"]);

        assert!(result.is_err());
    }

    #[test]
    fn parse_year_lists_known_variants() {
        assert_eq!(
            parse_year("fy2019-20"),
            Err("unknown fiscal year 'fy2019-20', expected one of: fy2018-19, fy2018-19-gst, fy2021-22-marginal".to_string())
        );
    }
}
