use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use chatgpt_agent::{
    logging,
    provider::constants::openai::{API_KEY_ENV_VAR, ENV_FILE},
    setup::{self, SetupOptions, SetupOutcome},
};
use clap::Parser;

/// Store an API key for chatgpt-agent in a dotenv file.
///
/// The key is typed without echo when stdin is a terminal. Piped input is read as-is.
#[derive(Parser, Debug)]
#[command(name = "setup", version, about, long_about)]
struct Args {
    /// File to write
    #[arg(long, default_value = ENV_FILE)]
    env_file: PathBuf,

    /// Variable name to store the key under
    #[arg(long, default_value = API_KEY_ENV_VAR)]
    var: String,

    /// Overwrite an existing file without asking
    #[arg(long)]
    force: bool,
}

fn main() -> ExitCode {
    logging::init("warn");
    let args = Args::parse();

    let options = SetupOptions {
        env_file: args.env_file,
        var_name: args.var,
        force: args.force,
        hide_input: true,
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    match setup::run(&mut input, &mut output, &options) {
        Ok(SetupOutcome::Written(_)) | Ok(SetupOutcome::Declined) => ExitCode::SUCCESS,
        Ok(SetupOutcome::NoCredential) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
