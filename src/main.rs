use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use chatgpt_agent::{
    ApiKey, CompletionClient, LlmError, TextCompletion, logging,
    provider::constants::openai::API_KEY_ENV_VAR,
};
use clap::Parser;

/// Send one prompt to the completion API and print the reply.
#[derive(Parser, Debug)]
#[command(name = "chatgpt-agent", version, about)]
struct Args {
    /// Prompt to complete
    #[arg(default_value = "Hello, world!")]
    prompt: String,

    /// Model identifier (defaults to the provider's completion model)
    #[arg(long)]
    model: Option<String>,

    /// Maximum number of tokens to generate
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Give up after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Read the API key from this dotenv file instead of the environment
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Name of the variable holding the API key
    #[arg(long, default_value = API_KEY_ENV_VAR)]
    var: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init("warn");
    let args = Args::parse();

    match run(args).await {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(LlmError::Configuration(message)) => {
            eprintln!("Error: {message}");
            eprintln!("Run `setup` to store an API key.");
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<String, LlmError> {
    let api_key = match args.env_file {
        Some(path) => ApiKey::EnvFile {
            path,
            var: args.var,
        },
        None => ApiKey::Env(args.var),
    };

    let mut client = CompletionClient::new(api_key)?;
    if let Some(model) = args.model {
        client = client.with_model(model)?;
    }
    if let Some(max_tokens) = args.max_tokens {
        client = client.with_max_tokens(max_tokens)?;
    }
    if let Some(secs) = args.timeout_secs {
        client = client.with_timeout(Duration::from_secs(secs))?;
    }

    ask(&client, &args.prompt).await
}

async fn ask(agent: &dyn TextCompletion, prompt: &str) -> Result<String, LlmError> {
    agent.complete(prompt).await
}
