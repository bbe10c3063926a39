use serde::{Deserialize, Serialize};

use super::error::LlmError;

/// Parameters of one completion call. Built per call and sent as the JSON body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestConfig<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompletionResponse {
    #[serde(default)]
    choices: Option<Vec<Choice>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    text: Option<String>,
}

impl CompletionResponse {
    /// Text of the first choice with surrounding whitespace removed.
    pub(crate) fn into_text(self) -> Result<String, LlmError> {
        let choices = self
            .choices
            .ok_or_else(|| LlmError::malformed("Response has no `choices` list"))?;

        let first = choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::malformed("Response contains zero choices"))?;

        let text = first
            .text
            .ok_or_else(|| LlmError::malformed("First choice has no `text` field"))?;

        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> CompletionResponse {
        serde_json::from_value(value).expect("valid response json")
    }

    #[test]
    fn request_serializes_the_three_fields() {
        let request = RequestConfig {
            model: "davinci-002",
            prompt: "",
            max_tokens: 150,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "model": "davinci-002", "prompt": "", "max_tokens": 150 })
        );
    }

    #[test]
    fn first_choice_is_trimmed() {
        let response = parse(json!({
            "id": "cmpl-1",
            "choices": [{ "text": "\n  Hello!  \n", "index": 0 }, { "text": "ignored" }]
        }));
        assert_eq!(response.into_text().unwrap(), "Hello!");
    }

    #[test]
    fn whitespace_only_text_is_an_empty_completion() {
        let response = parse(json!({ "choices": [{ "text": "   " }] }));
        assert_eq!(response.into_text().unwrap(), "");
    }

    #[test]
    fn structural_problems_are_malformed() {
        for body in [
            json!({}),
            json!({ "choices": null }),
            json!({ "choices": [] }),
            json!({ "choices": [{ "index": 0 }] }),
        ] {
            let err = parse(body.clone()).into_text().expect_err("malformed");
            assert!(
                matches!(err, LlmError::MalformedResponse { .. }),
                "{body} should be malformed, got {err:?}"
            );
        }
    }
}
