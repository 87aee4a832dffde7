// src/cli.rs
// Command line definition

use crate::config::CliOverrides;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;

pub const USAGE_HINT: &str = "pass some files or directory to serve!";

/// Long flags that are also accepted with a single dash (`-port 9000`).
const SINGLE_DASH_FLAGS: &[&str] = &["port", "noend"];

pub fn build_cli() -> Command {
    Command::new("serve")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Serve local files and directories over HTTP")
        .long_about("Serve local files and directories over HTTP.\n\nFor every item you are asked which URL path it should be served under; press enter to accept the suggested one. Requesting /end stops the server unless --noend is given.")
        .arg(
            Arg::new("items")
                .value_name("ITEM")
                .num_args(1..)
                .action(ArgAction::Append)
                .help("Files or directories to serve"),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .value_parser(value_parser!(u16))
                .help("Port number to serve on [default: 8000]"),
        )
        .arg(
            Arg::new("noend")
                .long("noend")
                .action(ArgAction::SetTrue)
                .help("Don't register the /end path that stops the server"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Path to configuration file (defaults to ./serve.json when present)"),
        )
        .arg(
            Arg::new("no-request-logging")
                .short('L')
                .long("no-request-logging")
                .action(ArgAction::SetTrue)
                .help("Disable HTTP request logging to keep console output clean"),
        )
        .arg(
            Arg::new("no-timestamps")
                .short('T')
                .long("no-timestamps")
                .action(ArgAction::SetTrue)
                .help("Disable timestamps in log messages"),
        )
}

/// Rewrite `-port`, `-port=N` and `-noend` to their double dash forms.
pub fn normalize_single_dash_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut seen_separator = false;

    args.into_iter()
        .map(|arg| {
            if seen_separator {
                return arg;
            }

            let rewritten = arg.to_str().and_then(|s| {
                if s == "--" {
                    seen_separator = true;
                    return None;
                }

                let name = s.strip_prefix('-')?;
                if name.starts_with('-') {
                    return None;
                }
                let flag = name.split('=').next().unwrap_or(name);
                SINGLE_DASH_FLAGS
                    .contains(&flag)
                    .then(|| OsString::from(format!("-{}", s)))
            });

            rewritten.unwrap_or(arg)
        })
        .collect()
}

pub fn overrides_from_matches(matches: &ArgMatches) -> (CliOverrides, Option<String>) {
    let items = matches
        .get_many::<String>("items")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    let overrides = CliOverrides {
        items,
        port: matches.get_one::<u16>("port").copied(),
        no_end: matches.get_flag("noend"),
        no_request_logging: matches.get_flag("no-request-logging"),
        no_timestamps: matches.get_flag("no-timestamps"),
    };
    let config = matches.get_one::<String>("config").cloned();

    (overrides, config)
}
