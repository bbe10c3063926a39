pub mod openai {
    pub const DEFAULT_MODEL: &str = "davinci-002";
    pub const DEFAULT_MAX_TOKENS: u32 = 150;
    pub const API_BASE: &str = "https://api.openai.com/v1";
    pub const COMPLETIONS_ENDPOINT: &str = "/completions";
    pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
    pub const ENV_FILE: &str = ".env";
}
