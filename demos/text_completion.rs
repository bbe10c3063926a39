use chatgpt_agent::{ApiKey, CompletionClient};
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let client = CompletionClient::new(ApiKey::Default)?;
    let text = client.complete("Share a fun fact about Rust programming.").await?;

    println!("Completion:\n{text}");

    Ok(())
}
