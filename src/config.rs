use anyhow::{Context, Result};

pub const CHECKOUT_URL: &str = "https://api.payclip.com/v2/checkout";

const DEFAULT_PORT: u16 = 3000;

/// Process configuration, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub secret_key: String,
    pub port: u16,
    pub checkout_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = match std::env::var("PORT").ok() {
            Some(p) => p.parse().context("PORT is not a valid port number")?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            api_key: get_var("CLIP_API_KEY")?,
            secret_key: get_var("CLIP_SECRET_KEY")?,
            port,
            checkout_url: CHECKOUT_URL.to_string(),
        })
    }
}

fn get_var(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("Environment variable not set: {name}"))
}
