use clap::Parser;
use std::process;

use taskpad::cli;
use taskpad::cli::commands::{Cli, Commands};

fn main() {
    let cli_args = Cli::parse();
    let json_output = cli_args.json;
    let user_flag = cli_args.user.clone();

    let exit_code = match cli_args.command {
        Commands::Init => cli::init::run(json_output),
        Commands::User(cmd) => cli::user::run(cmd, json_output, user_flag.as_deref()),
        Commands::Task(cmd) => cli::task::run(cmd, json_output, user_flag.as_deref()),
        Commands::Past(cmd) => cli::past::run(cmd, json_output, user_flag.as_deref()),
    };

    process::exit(exit_code);
}
