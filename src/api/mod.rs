pub mod payment;

use std::{net::Ipv4Addr, sync::Arc, time::Duration};

use anyhow::Result;
use axum::{Router, http::Request, routing};
use tokio::net::TcpListener;

use crate::config::Config;

pub type Data = Arc<InnerData>;

pub struct InnerData {
    pub config: Config,
    pub client: reqwest::Client,
}

pub fn router(state: Data) -> Router {
    let layer = tower_http::trace::TraceLayer::new_for_http()
        .on_request(|request: &Request<_>, _: &tracing::Span| {
            tracing::debug!(method = ?request.method(), url = ?request.uri(), "req");
        })
        .on_response(
            |response: &axum::http::Response<_>, latency: Duration, _: &tracing::Span| {
                tracing::debug!(status = ?response.status(), ?latency, "res");
            },
        );

    Router::new()
        .route("/sbpay/validate-payment", routing::post(payment::create))
        .route("/api/validate-payment", routing::post(payment::redirect))
        .layer(layer)
        .with_state(state)
}

pub async fn serve(config: Config) -> Result<()> {
    tracing::info!("starting API");

    let port = config.port;

    let state = Arc::new(InnerData {
        config,
        client: reqwest::Client::new(),
    });

    let socket = TcpListener::bind((Ipv4Addr::UNSPECIFIED, port)).await?;
    tracing::info!("binding to network socket on {port}");

    axum::serve(socket, router(state)).await?;

    Ok(())
}
