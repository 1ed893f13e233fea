use anyhow::Result;
use clap::Arg;
use clap::Command;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

pub fn build() -> Command {
    return Command::new("runpad")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Terminal code editor that runs programs on a remote runner")
        .arg(
            Arg::new("config-file")
                .long("config-file")
                .help(format!(
                    "Path to the configuration file [default: {}]",
                    Config::default(ConfigKey::ConfigFile)
                ))
                .num_args(1),
        )
        .arg(
            Arg::new("runner-url")
                .long("runner-url")
                .help(format!(
                    "HTTP URL of the execution runner [default: {}]",
                    Config::default(ConfigKey::RunnerUrl)
                ))
                .num_args(1),
        )
        .arg(
            Arg::new("runner-timeout")
                .long("runner-timeout")
                .help(format!(
                    "Milliseconds before an execution request is abandoned [default: {}]",
                    Config::default(ConfigKey::RunnerTimeout)
                ))
                .num_args(1),
        )
        .arg(
            Arg::new("theme")
                .long("theme")
                .help(format!(
                    "Color theme used when no preference has been persisted yet [default: {}]",
                    Config::default(ConfigKey::Theme)
                ))
                .value_parser(["light", "dark"])
                .num_args(1),
        )
        .subcommand(Command::new("config").about("Print the default configuration file to stdout"));
}

/// Parses the command line and loads configuration. Returns `false` when an
/// informational subcommand already handled the invocation.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    if let Some(("config", _)) = matches.subcommand() {
        println!("{}", Config::serialize_default(build()));
        return Ok(false);
    }

    Config::load(build(), vec![&matches]).await?;

    return Ok(true);
}
