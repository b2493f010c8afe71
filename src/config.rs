use std::{env, net::SocketAddr};

use url::Url;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    pub web_base_url: String,
    pub api_base_url: String,
    pub smtp_url: Option<String>,
    pub mail_from_name: String,
    pub mail_from_address: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://planner.db?mode=rwc".to_string());
        let listen_addr: SocketAddr = env::var("APP_LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3333".to_string())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid APP_LISTEN_ADDR: {err}")))?;

        let web_base_url = base_url(
            "WEB_BASE_URL",
            &env::var("WEB_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
        )?;
        let api_base_url = base_url(
            "API_BASE_URL",
            &env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:3333".to_string()),
        )?;

        let smtp_url = env::var("SMTP_URL")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let mail_from_name =
            env::var("MAIL_FROM_NAME").unwrap_or_else(|_| "Trip Planner".to_string());
        let mail_from_address =
            env::var("MAIL_FROM_ADDRESS").unwrap_or_else(|_| "contato@planner.com.br".to_string());

        Ok(Self {
            database_url,
            listen_addr,
            web_base_url,
            api_base_url,
            smtp_url,
            mail_from_name,
            mail_from_address,
        })
    }
}

/// Validates an absolute http(s) base URL and strips the trailing slash so
/// paths can be appended with `format!`.
pub fn base_url(name: &str, raw: &str) -> Result<String, AppError> {
    let parsed =
        Url::parse(raw.trim()).map_err(|err| AppError::Config(format!("invalid {name}: {err}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AppError::Config(format!(
            "invalid {name}: unsupported scheme {}",
            parsed.scheme()
        )));
    }
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_drops_trailing_slash() {
        let url = base_url("WEB_BASE_URL", "http://localhost:3000/").unwrap();
        assert_eq!(url, "http://localhost:3000");

        let nested = base_url("API_BASE_URL", "https://api.example.com/v1/").unwrap();
        assert_eq!(nested, "https://api.example.com/v1");
    }

    #[test]
    fn base_url_rejects_garbage() {
        assert!(matches!(
            base_url("WEB_BASE_URL", "not a url"),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            base_url("WEB_BASE_URL", "ftp://files.example.com"),
            Err(AppError::Config(_))
        ));
    }
}
