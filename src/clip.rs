use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{Client, StatusCode, header};

use crate::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("clip returned {status}")]
    Status { status: StatusCode, body: String },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

pub fn basic_auth(api_key: &str, secret_key: &str) -> String {
    let credentials = format!("{api_key}:{secret_key}");

    format!("Basic {}", STANDARD.encode(credentials))
}

/// `"10"` -> `"10.00"`, the fixed two-decimal form Clip expects.
pub fn format_amount(amount: &str) -> Option<String> {
    let value: f64 = amount.trim().parse().ok()?;

    Some(format!("{value:.2}"))
}

#[derive(Debug, serde::Serialize)]
pub struct CheckoutRequest {
    pub amount: String,
    pub currency: String,
    pub purchase_description: String,
    pub redirection_url: RedirectionUrl,
    pub metadata: Metadata,
}

#[derive(Debug, serde::Serialize)]
pub struct RedirectionUrl {
    pub success: String,
    pub error: String,
}

#[derive(Debug, serde::Serialize)]
pub struct Metadata {
    pub external_reference: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct CheckoutResponse {
    pub payment_request_url: String,
    pub qr_image_url: String,
}

#[tracing::instrument(skip_all)]
pub async fn create_link(
    client: &Client,
    config: &Config,
    request: &CheckoutRequest,
) -> Result<CheckoutResponse, Error> {
    let auth = basic_auth(&config.api_key, &config.secret_key);

    tracing::debug!(authorization = %auth, "clip_auth");
    tracing::debug!(body = %serde_json::to_string(request).unwrap_or_default(), "clip_request");

    let res = client
        .post(&config.checkout_url)
        .header(header::AUTHORIZATION, auth)
        .json(request)
        .send()
        .await?;

    let status = res.status();

    tracing::debug!(clip_status = ?status);

    match status {
        StatusCode::OK => Ok(res.json().await?),
        _ => {
            let body = res.text().await?;

            tracing::warn!(%status, body, "clip_checkout_err");

            Err(Error::Status { status, body })
        }
    }
}
