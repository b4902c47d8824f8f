mod cli;
mod cmd;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands, ConfigAction};
use std::process;

use calorievita::core::logging::FoodInput;
use calorievita::health::BridgeError;
use calorievita::output;

#[tokio::main]
async fn main() {
    calorievita::telemetry::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { skip } => cmd::init::run(skip),
        Commands::Log {
            name,
            calories,
            meal,
            carbs,
            protein,
            fat,
            fiber,
            sugar,
            serving,
            note,
            source,
            quick,
            batch,
        } => {
            let input = FoodInput {
                name: name.unwrap_or_default(),
                calories: calories.unwrap_or_default(),
                meal,
                carbs,
                protein,
                fat,
                fiber,
                sugar,
                serving,
                note,
                source,
                date: cli.date,
            };
            if let Some(batch_json) = batch {
                cmd::log::run_batch(&batch_json, cli.human)
            } else if let Some(text) = quick {
                cmd::log::run_quick(&text, input, cli.human)
            } else {
                cmd::log::run(input, cli.human)
            }
        }
        Commands::Delete { id } => cmd::log::run_delete(&id, cli.human),
        Commands::Water { glasses } => cmd::water::run(glasses, cli.date, cli.human),
        Commands::Activity { kind, value } => {
            cmd::activity::run(&kind, value, cli.date, cli.human)
        }
        Commands::Show { from, to } => cmd::show::run(from, to, cli.date, cli.human),
        Commands::Summary { period, days } => {
            cmd::summary::run(&period, days, cli.date, cli.human).await
        }
        Commands::Streaks => cmd::streaks::run_show(cli.date, cli.human),
        Commands::Check => cmd::streaks::run_check(cli.date, cli.human),
        Commands::Rewards => cmd::rewards::run(cli.human),
        Commands::Status => cmd::status::run(cli.date, cli.human),
        Commands::Insights { period } => cmd::insights::run(&period, cli.date, cli.human).await,
        Commands::Health { method, args } => {
            cmd::health::run(&method, args.as_deref(), cli.date, cli.human).await
        }
        Commands::Rebuild { from, to } => cmd::rebuild::run(from, to, cli.date, cli.human),
        Commands::Config { action } => match action {
            ConfigAction::Show => cmd::config::run_show(cli.human),
            ConfigAction::Set { key, value } => cmd::config::run_set(&key, &value),
        },
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "calorievita", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        let code = e
            .downcast_ref::<BridgeError>()
            .map(|b| b.code.to_string())
            .unwrap_or_else(|| "general_error".to_string());
        let err = output::error("", &code, &e.to_string());
        match serde_json::to_string(&err) {
            Ok(s) => eprintln!("{}", s),
            Err(_) => eprintln!("{}", e),
        }
        process::exit(1);
    }
}
