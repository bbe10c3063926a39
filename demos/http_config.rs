use std::sync::Arc;
use std::time::Duration;

use chatgpt_agent::{ApiKey, CompletionClient, HttpClientConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    chatgpt_agent::logging::init("info");

    // A strict default deadline. If the model takes > 5 seconds the call
    // fails with LlmError::Transport.
    let client = CompletionClient::new(ApiKey::Default)?.with_timeout(Duration::from_secs(5))?;

    match client.complete("Tell me a random fact about space.").await {
        Ok(text) => println!("Success (Simple): {text}"),
        Err(e) => println!("Error (Simple): {e}"),
    }

    // Retries are off unless asked for.
    let resilient_config = HttpClientConfig {
        timeout: Duration::from_secs(10),
        // How many extra attempts on 429 (Rate Limit), 5xx or connection failures
        max_retries: 3,
        initial_retry_delay: Duration::from_secs(1),
        max_retry_delay: Duration::from_secs(8),
    };

    let client = Arc::new(
        CompletionClient::new(ApiKey::Default)?
            .with_http_config(resilient_config)?
            .with_max_tokens(60)?,
    );

    // One client, concurrent calls.
    let handles: Vec<_> = ["the Moon", "Mars"]
        .into_iter()
        .map(|topic| {
            let client = Arc::clone(&client);
            tokio::spawn(async move {
                client
                    .complete_with_timeout(
                        &format!("One sentence about {topic}."),
                        Duration::from_secs(20),
                    )
                    .await
            })
        })
        .collect();

    for handle in handles {
        match handle.await? {
            Ok(text) => println!("Success (Advanced): {text}"),
            Err(e) => println!("Error (Advanced): {e}"),
        }
    }

    Ok(())
}
