use std::fs;
use std::io::Cursor;

use chatgpt_agent::{
    ApiKey, CompletionClient, LlmError,
    setup::{self, SetupOptions, SetupOutcome},
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

fn run_setup(answers: &str, options: &SetupOptions) -> SetupOutcome {
    let mut input = Cursor::new(answers.as_bytes().to_vec());
    let mut output = Vec::new();
    setup::run(&mut input, &mut output, options).expect("setup")
}

#[tokio::test]
async fn key_written_by_setup_authenticates_the_client() {
    let dir = tempfile::tempdir().unwrap();
    let options = SetupOptions {
        env_file: dir.path().join(".env"),
        ..Default::default()
    };

    assert_eq!(
        run_setup("sk-from-setup\n", &options),
        SetupOutcome::Written(options.env_file.clone())
    );

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/completions"))
        .and(header("authorization", "Bearer sk-from-setup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "text": " authenticated " }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = CompletionClient::new(ApiKey::EnvFile {
        path: options.env_file.clone(),
        var: options.var_name.clone(),
    })
    .unwrap()
    .with_base_url(format!("{}/v1", server.uri()))
    .unwrap();

    assert_eq!(client.complete("ping").await.unwrap(), "authenticated");
}

#[test]
fn client_cannot_be_built_when_setup_stored_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let options = SetupOptions {
        env_file: dir.path().join(".env"),
        ..Default::default()
    };

    assert_eq!(run_setup("   \n", &options), SetupOutcome::NoCredential);
    assert!(!options.env_file.exists());

    let err = CompletionClient::new(ApiKey::EnvFile {
        path: options.env_file.clone(),
        var: options.var_name.clone(),
    })
    .expect_err("no env file");
    assert!(matches!(err, LlmError::Configuration(_)));
}

#[test]
fn empty_value_in_env_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let env_file = dir.path().join(".env");
    fs::write(&env_file, "OPENAI_API_KEY=\n").unwrap();

    let err = CompletionClient::new(ApiKey::EnvFile {
        path: env_file,
        var: "OPENAI_API_KEY".to_string(),
    })
    .expect_err("empty key");
    assert!(matches!(err, LlmError::Configuration(_)));
}

#[tokio::test]
async fn awkward_key_survives_setup_and_is_sent_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let options = SetupOptions {
        env_file: dir.path().join(".env"),
        ..Default::default()
    };
    let key = r#"sk-a b #c$HOME\d'e"f"#;

    assert_eq!(
        run_setup(&format!("{key}\n"), &options),
        SetupOutcome::Written(options.env_file.clone())
    );

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/completions"))
        .and(header("authorization", format!("Bearer {key}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "text": "exact" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = CompletionClient::new(ApiKey::EnvFile {
        path: options.env_file.clone(),
        var: options.var_name.clone(),
    })
    .unwrap()
    .with_base_url(format!("{}/v1", server.uri()))
    .unwrap();

    assert_eq!(client.complete("ping").await.unwrap(), "exact");
}
