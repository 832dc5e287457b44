use anyhow::Result;
use clap::{Arg, Command};
use std::path::PathBuf;

use progress_table::commands;

fn build_cli() -> Command {
    Command::new("ptable")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Live multi-row progress table for concurrent jobs")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .short_alias('V')
                .long("version")
                .help("Print version information")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("PATH")
                .help("Write log output to a file instead of stderr")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true),
        )
        .subcommand(Command::new("version").about("Shows version information"))
        .subcommand(
            Command::new("demo")
                .about("Render simulated concurrent downloads on the progress table")
                .arg(
                    Arg::new("lines")
                        .short('l')
                        .long("lines")
                        .help("Number of concurrent downloads (one row each)")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("3"),
                )
                .arg(
                    Arg::new("items")
                        .short('i')
                        .long("items")
                        .help("Items fetched per download")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("20"),
                )
                .arg(
                    Arg::new("delay-ms")
                        .long("delay-ms")
                        .help("Base time to fetch one item, in milliseconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("50"),
                )
                .arg(
                    Arg::new("interval-ms")
                        .long("interval-ms")
                        .help("Redraw interval in milliseconds (overrides config)")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("fill")
                        .long("fill")
                        .help("Progress bar fill symbol (overrides config)")
                        .value_parser(clap::value_parser!(char)),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Show or change display settings (use 'ptable config --help' for subcommands)")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(Command::new("show").about("Show current settings"))
                .subcommand(
                    Command::new("set")
                        .about("Change settings")
                        .arg(
                            Arg::new("interval-ms")
                                .long("interval-ms")
                                .help("Redraw interval in milliseconds")
                                .value_parser(clap::value_parser!(u64)),
                        )
                        .arg(
                            Arg::new("fill")
                                .long("fill")
                                .help("Progress bar fill symbol")
                                .value_parser(clap::value_parser!(char)),
                        ),
                )
                .subcommand(Command::new("reset").about("Restore default settings")),
        )
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    progress_table::init_logging(matches.get_one::<PathBuf>("log-file").map(PathBuf::as_path))?;

    if matches.get_flag("version") {
        return commands::version();
    }

    match matches.subcommand() {
        Some(("version", _)) => commands::version()?,
        Some(("demo", sub_matches)) => commands::demo(sub_matches)?,
        Some(("config", sub_matches)) => match sub_matches.subcommand() {
            Some(("show", _)) => commands::config::handle_show()?,
            Some(("set", set_matches)) => commands::config::handle_set(set_matches)?,
            Some(("reset", _)) => commands::config::handle_reset()?,
            _ => println!("Use 'ptable config --help' for more information."),
        },
        _ => {
            println!("Welcome to ptable!");
            println!("Use 'ptable --help' for more information.");
        }
    }

    Ok(())
}
