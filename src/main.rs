use anyhow::Result;
use clap::Parser;
use colored::control as color_control;
use colored::Colorize;
use propdiff::cli::commands::diff::{DiffCommand, DiffCommandHandler};
use propdiff::cli::{logging, Cli};
use propdiff::core::config::ConfigOverrides;
use std::env;
use std::process;

fn main() {
    // CLIをパースして実行
    let cli = Cli::parse();

    // --no-color フラグの処理
    if cli.no_color {
        color_control::set_override(false);
    }

    logging::init(cli.verbose);

    match run_command(cli) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

/// コマンドを実行する
fn run_command(cli: Cli) -> Result<String> {
    // 相対パスの基準ディレクトリ
    let project_path = env::current_dir()?;

    let command = DiffCommand {
        project_path,
        config_path: cli.config,
        overrides: ConfigOverrides {
            attributes_path: cli.attributes,
            entities_path: cli.entities,
            interface_a: cli.interface_a,
            interface_b: cli.interface_b,
            base_entity: cli.base_entity,
            derived_entity: cli.derived_entity,
            detail: cli.detail,
        },
        compact: cli.compact,
    };

    DiffCommandHandler::new().execute(&command)
}
