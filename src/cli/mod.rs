use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Reply Strategy Args ---
    /// How replies are produced: upstream (hosted completion API, streamed) or canned (keyword matched)
    #[arg(long, env = "CHAT_MODE", default_value = "upstream")]
    pub chat_mode: String,

    /// API key for the upstream completion API. Empty means not configured.
    #[arg(long, env = "OPENAI_API_KEY", default_value = "", hide_env_values = true)]
    pub chat_api_key: String,

    /// Base URL for the upstream API (e.g., https://api.openai.com/v1)
    #[arg(long, env = "CHAT_BASE_URL")] // No default, the client falls back to OpenAI
    pub chat_base_url: Option<String>,

    /// Model name used for every upstream request.
    #[arg(long, env = "CHAT_MODEL", default_value = "gpt-4o-mini")]
    pub chat_model: String,

    /// Sampling temperature used for every upstream request.
    #[arg(long, env = "CHAT_TEMPERATURE", default_value = "0.7")]
    pub chat_temperature: f32,

    /// Maximum reply length in tokens.
    #[arg(long, env = "CHAT_MAX_TOKENS", default_value = "500")]
    pub chat_max_tokens: u32,

    /// Optional file replacing the built-in persona preamble.
    #[arg(long, env = "PERSONA_PATH")]
    pub persona_path: Option<String>,

    // --- General App Args ---
    /// Host address and port for the server to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "127.0.0.1:3000")]
    pub server_addr: String,

    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,

    /// Optional path to the TLS certificate file (PEM format). Requires --tls-key-path.
    #[arg(long, env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<String>,

    /// Optional path to the TLS private key file (PEM format). Requires --tls-cert-path.
    #[arg(long, env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<String>,

    #[arg(long, env = "ENABLE_TLS", default_value = "false")]
    pub enable_tls: bool,
}
