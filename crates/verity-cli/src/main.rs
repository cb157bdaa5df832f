use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;
use verity_core::{logging, VerityConfig};
use verity_report::{list_reports, ReportDocument};

mod summary;

use summary::Summary;

fn cli() -> Command {
    Command::new("verity")
        .version(verity_core::VERSION)
        .about("Inspect persisted model-card reports")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Configuration document (JSON or YAML)"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
        .subcommand(
            Command::new("summary")
                .about("Count passed and failed results per label")
                .arg(
                    Arg::new("report")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Path to report.json or its directory"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("List persisted reports, newest first")
                .arg(
                    Arg::new("root")
                        .long("root")
                        .value_parser(value_parser!(PathBuf))
                        .help("Report root (defaults to the configured one)"),
                ),
        )
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<VerityConfig> {
    let config = match path {
        Some(path) => VerityConfig::load(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => VerityConfig::default(),
    };
    Ok(config.with_env_overrides()?)
}

fn init_logging(json: bool) -> bool {
    match logging::init(json) {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(%err, "subscriber already installed");
            false
        }
    }
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();

    init_logging(matches.get_flag("log-json"));
    let config = load_config(matches.get_one::<PathBuf>("config"))?;

    match matches.subcommand() {
        Some(("summary", args)) => {
            let path = args
                .get_one::<PathBuf>("report")
                .context("missing report path")?;
            let doc = ReportDocument::load(path)
                .with_context(|| format!("reading report {}", path.display()))?;
            let summary = Summary::of(&doc);

            if args.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", summary.render());
            }

            if summary.overall.failed > 0 {
                std::process::exit(1);
            }
        }
        Some(("list", args)) => {
            let root = args
                .get_one::<PathBuf>("root")
                .cloned()
                .unwrap_or(config.report_root);
            tracing::debug!(root = %root.display(), "listing reports");

            let reports = list_reports(&root)?;
            if reports.is_empty() {
                println!("No reports under {}", root.display());
            }
            for dir in reports.iter().rev() {
                println!("{}", dir.display());
            }
        }
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn summary_requires_report() {
        assert!(cli().try_get_matches_from(["verity", "summary"]).is_err());
        let matches = cli()
            .try_get_matches_from(["verity", "summary", "out/report.json", "--json"])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        assert!(args.get_flag("json"));
    }

    #[test]
    fn second_logging_init_is_reported() {
        init_logging(false);
        assert!(!init_logging(true));
    }

    #[test]
    fn list_root_is_optional() {
        let matches = cli().try_get_matches_from(["verity", "list"]).unwrap();
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "list");
        assert!(args.get_one::<PathBuf>("root").is_none());
    }
}
