use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use intake_cli::{all_valid, load_config, replay, validate, write_replay, write_steps, write_validation, Scenario};
use intake_schema::steps_for_id;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn scenario_arg() -> Arg {
    Arg::new("scenario")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Scenario file (.json, .yaml or .yml)")
}

fn cli() -> Command {
    Command::new("intake")
        .version(intake_cli::VERSION)
        .about("Insurance intake wizard scenario runner")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Wizard configuration (TOML)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log navigation and validation at debug level"),
        )
        .subcommand(
            Command::new("steps")
                .about("List the steps of a category")
                .arg(Arg::new("category").required(true).help("Category id, e.g. vehicle"))
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about("Apply a scenario's edits and validate every step")
                .arg(scenario_arg()),
        )
        .subcommand(
            Command::new("run")
                .about("Replay a scenario and print the submission record")
                .arg(scenario_arg()),
        )
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_scenario(args: &ArgMatches) -> Result<Scenario> {
    let path = args.get_one::<PathBuf>("scenario").context("missing scenario path")?;
    Scenario::from_file(path).with_context(|| format!("loading {}", path.display()))
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));
    let config = load_config(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    let mut out = std::io::stdout().lock();

    match matches.subcommand() {
        Some(("steps", args)) => {
            let category = args.get_one::<String>("category").context("missing category")?;
            let steps = steps_for_id(category)?;
            if args.get_flag("json") {
                writeln!(out, "{}", serde_json::to_string_pretty(&steps)?)?;
            } else {
                write_steps(&mut out, &steps)?;
            }
        }
        Some(("validate", args)) => {
            let scenario = load_scenario(args)?;
            let report = validate(&scenario.controller(config), &scenario)?;
            write_validation(&mut out, &report)?;
            out.flush()?;
            std::process::exit(if all_valid(&report) { 0 } else { 1 });
        }
        Some(("run", args)) => {
            let scenario = load_scenario(args)?;
            let replayed = replay(&scenario.controller(config), &scenario)?;
            write_replay(&mut out, &replayed)?;
            if let Some(record) = &replayed.submission {
                writeln!(out)?;
                writeln!(out, "{}", serde_json::to_string_pretty(&record.to_json()?)?)?;
            }
            out.flush()?;
            std::process::exit(if replayed.is_submitted() { 0 } else { 1 });
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn global_flags_reach_subcommands() {
        let matches = cli()
            .try_get_matches_from(["intake", "run", "s.yaml", "--config", "wizard.toml", "-v"])
            .unwrap();
        assert!(matches.get_flag("verbose"));
        assert_eq!(
            matches.get_one::<PathBuf>("config"),
            Some(&PathBuf::from("wizard.toml"))
        );
    }
}
