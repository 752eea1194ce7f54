//! `winsperg` uses the [Extended Window Manager Hints (EWMH) specification](https://specifications.freedesktop.org/wm-spec/latest/)
//! to find every window your window manager is managing and then moves and resizes them to random
//! places and sizes on the screen, over and over, until it is killed.
//!
//! ## Command line examples
//!
//! ### Shuffle every window
//! ```bash
//! winsperg
//! ```
//!
//! ### List the windows first and report anything that fails
//! ```bash
//! winsperg -v
//! ```
//!
//! ### Shuffle everything ten times with a slower pace
//! ```bash
//! winsperg --rounds 10 --delay 250
//! ```
use std::{io, process::ExitCode, time::Duration};

use clap::{crate_description, crate_version, value_parser, Arg, ArgAction, ArgMatches, Command};
use libewmh::prelude::*;
use tracing::{info, Level};

fn cli() -> Command {
    Command::new("winsperg")
        .about(crate_description!())
        .version(crate_version!())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Give more verbose output"),
        )
        .arg(
            Arg::new("ewmh")
                .long("ewmh")
                .action(ArgAction::SetTrue)
                .help("Ask the window manager with _NET_MOVERESIZE_WINDOW instead of configuring windows directly"),
        )
        .arg(
            Arg::new("no-filter")
                .long("no-filter")
                .action(ArgAction::SetTrue)
                .help("Also shuffle windows at or beyond the top/left screen edge or without a size"),
        )
        .arg(
            Arg::new("delay")
                .long("delay")
                .value_name("MS")
                .value_parser(value_parser!(u64))
                .help("Pause in milliseconds after each window [default: ~17]"),
        )
        .arg(
            Arg::new("rounds")
                .long("rounds")
                .value_name("N")
                .value_parser(value_parser!(u64))
                .help("Stop after shuffling every window N times instead of running forever"),
        )
}

fn config(matches: &ArgMatches) -> Config {
    let mut config = Config::new()
        .verbose(matches.get_flag("verbose"))
        .rounds(matches.get_one::<u64>("rounds").copied());
    if let Some(ms) = matches.get_one::<u64>("delay") {
        config = config.delay(Duration::from_millis(*ms));
    }
    if matches.get_flag("ewmh") {
        config = config.method(MoveResizeMethod::ClientMessage);
    }
    if matches.get_flag("no-filter") {
        config = config.filter(GeometryFilter::none());
    }
    config
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    let config = config(&matches);

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if config.is_verbose() { Level::INFO } else { Level::ERROR })
        .init();

    let wm = match WindowManager::connect(config) {
        Ok(wm) => wm,
        Err(err) => {
            eprintln!("Cannot open display: {}", err);
            return ExitCode::FAILURE;
        },
    };
    info!("connected to screen {}", wm.server().screen());

    match libewmh::run(&wm, &mut rand::thread_rng(), &mut io::stdout(), &StopHandle::new()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        },
    }
}
