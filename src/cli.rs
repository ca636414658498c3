use anyhow::{Result, anyhow};
use log::info;
use pico_args::Arguments;
use std::{env, path::PathBuf};

use gesturectl::actions::EventSink;
use gesturectl::config::ConfigState;
use gesturectl::{input, pipeline};

pub fn run() -> Result<()> {
    let mut pargs = Arguments::from_env();

    // No args -> general help
    if env::args().len() == 1 {
        print_help();
        return Ok(());
    }

    if pargs.contains("-h") || pargs.contains("--help") {
        print_help();
        return Ok(());
    }

    // First free arg is the subcommand
    let subcmd: Option<String> = pargs.free_from_str().ok();

    match subcmd.as_deref() {
        Some("help") => {
            let topic: Option<String> = pargs.free_from_str().ok();
            if let Some(t) = topic {
                print_subcmd_help(&t);
            } else {
                print_help();
            }
            Ok(())
        }

        Some("run") => {
            let input_path: Option<PathBuf> = pargs.opt_value_from_str("--input")?;
            let profile_name: Option<String> = pargs.opt_value_from_str("--profile")?;

            let mut cfg = ConfigState::load_or_install_default()?;
            if let Some(name) = profile_name {
                cfg.select(&name)?;
            }
            info!("using profile '{}'", cfg.active_name);

            let source = input::open_source(input_path.as_deref())?;
            let mut sink = EventSink::stdout(cfg.profile.meta.allow_commands);
            let stop = pipeline::install_stop_handler()?;
            pipeline::run_pipeline(&cfg.profile, source, &mut sink, stop)?;
            Ok(())
        }

        Some("use") => {
            let name: String = pargs
                .free_from_str()
                .map_err(|_| anyhow!("usage: gesturectl use <profile_name>"))?;
            let mut cfg = ConfigState::load_or_install_default()?;
            cfg.set_active(&name)?;
            println!("ok: active profile is now '{}'", cfg.active_name);
            Ok(())
        }

        Some("list") => {
            let cfg = ConfigState::load_or_install_default()?;
            for p in cfg.list_profiles() {
                let mark = if p == cfg.active_name { '*' } else { ' ' };
                println!("{mark} {p}");
            }
            Ok(())
        }

        Some("show") => {
            let cfg = ConfigState::load_or_install_default()?;
            println!("{}", serde_json::to_string_pretty(&cfg.report())?);
            Ok(())
        }

        Some(other) => {
            eprintln!("unknown subcommand: {other}\n");
            print_help();
            Ok(())
        }

        None => {
            print_help();
            Ok(())
        }
    }
}

fn print_help() {
    println!(
        r#"gesturectl - hand gesture recognizer (clap, thumbs_up, wave)

USAGE:
  gesturectl help [command]                        Show general or command-specific help
  gesturectl run [--input PATH] [--profile NAME]   Classify a JSON-lines landmark stream
  gesturectl use <name>                            Switch active profile
  gesturectl list                                  List profiles
  gesturectl show                                  Print the active profile's settings

TIPS:
  - Profiles: ~/.config/gesturectl/profiles (override with GESTURECTL_CONFIG_DIR)
  - Events go to stdout as JSON lines, logs to stderr (RUST_LOG=debug for detail)
"#
    );
}

fn print_subcmd_help(cmd: &str) {
    match cmd {
        "run" => println!(
            "usage: gesturectl run [--input PATH] [--profile NAME]\n\
             Reads one frame per line (stdin when PATH is omitted or '-'):\n  \
             {{\"t\":0.0,\"width\":640,\"height\":480,\"hands\":[[{{\"x\":0.5,\"y\":0.5}}, ... 21 points]]}}\n\
             Writes one line per gesture: {{\"t\":0.0,\"gesture\":\"wave\",\"token\":\"square\"}}"
        ),
        "use" => {
            println!("usage: gesturectl use <name>\nSwitches the active profile to <name>.")
        }
        "list" => {
            println!("usage: gesturectl list\nLists available profiles; marks active with '*'.")
        }
        "show" => println!(
            "usage: gesturectl show\nPrints thresholds and bindings of the active profile."
        ),
        _ => {
            eprintln!("unknown command: {cmd}\n");
            print_help();
        }
    }
}
