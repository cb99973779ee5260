//! Environment-based configuration.
//!
//! ブローカーと認証サービスの接続先は、元のデプロイ契約どおり環境変数から
//! 読み込む。ホスト・ポートはバイナリ側の clap フラグで指定する。

use std::env;

use crate::infrastructure::broker::BrokerConfig;

/// Durable queue carrying chat messages.
pub const DEFAULT_QUEUE_NAME: &str = "chat.messages";

/// Server-wide configuration resolved at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Broker connection settings
    pub broker: BrokerConfig,
    /// Base URL of the external auth service
    pub auth_base_url: String,
}

impl ServerConfig {
    /// Read configuration from the environment.
    ///
    /// Recognized variables: `RABBITMQ_USER`, `RABBITMQ_PASSWORD`,
    /// `RABBITMQ_ADDR` (default `localhost:5672`), `RABBITMQ_PREFETCH`
    /// (default 1) and `AUTH_SERVICE_URL` (default `http://localhost:8081`).
    pub fn from_env() -> Self {
        let user = env::var("RABBITMQ_USER").unwrap_or_else(|_| "guest".to_string());
        let password = env::var("RABBITMQ_PASSWORD").unwrap_or_else(|_| "guest".to_string());
        let addr = env::var("RABBITMQ_ADDR").unwrap_or_else(|_| "localhost:5672".to_string());
        let prefetch = prefetch_from(env::var("RABBITMQ_PREFETCH").ok());
        let auth_base_url =
            env::var("AUTH_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8081".to_string());

        Self {
            broker: BrokerConfig {
                url: format!("amqp://{user}:{password}@{addr}/"),
                queue_name: DEFAULT_QUEUE_NAME.to_string(),
                prefetch,
            },
            auth_base_url,
        }
    }
}

/// Parse the prefetch setting, falling back to 1 for missing or unusable
/// values.
fn prefetch_from(raw: Option<String>) -> u16 {
    raw.and_then(|value| value.parse::<u16>().ok())
        .filter(|prefetch| *prefetch > 0)
        .unwrap_or(1)
}
