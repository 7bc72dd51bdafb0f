use anyhow::Result;
use clap::{Arg, ArgAction, Command};

use mcu_metrics::commands;

fn platform_arg() -> Arg {
    Arg::new("platform")
        .short('p')
        .long("platform")
        .value_name("PLATFORM")
        .help("Platform to sample (host or simulated); overrides the config file")
}

fn metric_arg() -> Arg {
    Arg::new("metric")
        .short('m')
        .long("metric")
        .value_name("METRIC")
        .help("Metric to report (repeatable, e.g. cpu_usage, wifi-signal)")
        .action(ArgAction::Append)
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Print reports as JSON")
        .action(ArgAction::SetTrue)
}

fn build_cli() -> Command {
    Command::new("mcu-metrics")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Device health telemetry sampler")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .short_alias('V')
                .long("version")
                .help("Print version information")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("sample")
                .about("Take a single metrics report")
                .arg(metric_arg())
                .arg(json_arg())
                .arg(platform_arg())
                .arg(
                    Arg::new("window")
                        .short('w')
                        .long("window")
                        .value_name("MS")
                        .help("Milliseconds between the CPU baseline and the reported sample")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("watch")
                .about("Report metrics periodically until Ctrl+C")
                .arg(metric_arg())
                .arg(json_arg())
                .arg(platform_arg())
                .arg(
                    Arg::new("interval")
                        .short('i')
                        .long("interval")
                        .value_name("MS")
                        .help("Sampling interval in milliseconds (defaults to the configured value)")
                        .value_parser(clap::value_parser!(u64).range(1..)),
                )
                .arg(
                    Arg::new("count")
                        .short('n')
                        .long("count")
                        .value_name("N")
                        .help("Stop after N reports")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
        .subcommand(Command::new("reasons").about("List the known reset causes"))
        .subcommand(
            Command::new("config")
                .about("Manage configuration (use 'mcu-metrics config --help' for subcommands)")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(Command::new("show").about("Print the current configuration"))
                .subcommand(
                    Command::new("set")
                        .about("Set a configuration value")
                        .arg(
                            Arg::new("key")
                                .help("platform, sample_interval_ms, metrics, idle_task_name, sensor_range, wireless_interface or reset_code")
                                .required(true)
                                .index(1),
                        )
                        .arg(
                            Arg::new("value")
                                .help("New value")
                                .required(true)
                                .index(2),
                        ),
                )
                .subcommand(Command::new("reset").about("Restore the default configuration"))
                .subcommand(Command::new("path").about("Print the configuration file path")),
        )
        .subcommand(Command::new("version").about("Shows version information"))
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .help("Target shell (bash, zsh, fish, powershell, elvish)")
                        .required(true)
                        .index(1),
                ),
        )
}

fn main() -> Result<()> {
    mcu_metrics::init_logging();

    let matches = build_cli().get_matches();

    if matches.get_flag("version") {
        return commands::version();
    }

    match matches.subcommand() {
        Some(("sample", sub_matches)) => commands::sample(sub_matches)?,
        Some(("watch", sub_matches)) => commands::watch(sub_matches)?,
        Some(("reasons", _)) => commands::reasons()?,
        Some(("config", sub_matches)) => commands::config::execute(sub_matches)?,
        Some(("version", _)) => commands::version()?,
        Some(("completions", sub_matches)) => {
            commands::completions::execute(sub_matches, &mut build_cli())?
        }
        _ => {
            println!("Use 'mcu-metrics --help' for more information.");
        }
    }

    Ok(())
}
