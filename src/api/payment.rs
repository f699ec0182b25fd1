use axum::{
    Json,
    extract::{Form, FromRequest, State},
    http::{StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};

use crate::{api::Data, clip};

const MISSING_FIELDS_MSG: &str =
    "Missing required fields for Clip payment: amount, currency, description, success_url, error_url";
const CREATED_MSG: &str = "Payment request validated and Clip payment link created successfully.";
const STATUS_ERR_MSG: &str = "Error creating Clip payment link";
const RELAY_ERR_MSG: &str = "Error validating SBPay request or creating Clip payment link";

#[derive(Debug, serde::Deserialize)]
pub struct Request {
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub return_url: String,
    #[serde(default)]
    pub cancel_url: String,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkCreated {
    pub message: &'static str,
    pub payment_link: String,
    pub qr_code_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("missing required checkout fields")]
    MissingFields,
    #[error(transparent)]
    Upstream(#[from] clip::Error),
}

pub async fn create(State(data): State<Data>, req: Request) -> Result<Json<LinkCreated>, PaymentError> {
    let res = process(&data, req).await?;

    Ok(Json(LinkCreated {
        message: CREATED_MSG,
        payment_link: res.payment_request_url,
        qr_code_url: res.qr_image_url,
    }))
}

pub async fn redirect(State(data): State<Data>, req: Request) -> Result<Redirect, PaymentError> {
    let res = process(&data, req).await?;

    Ok(Redirect::to(&res.payment_request_url))
}

#[tracing::instrument(skip_all)]
async fn process(data: &super::InnerData, req: Request) -> Result<clip::CheckoutResponse, PaymentError> {
    tracing::debug!(?req, "incoming");

    let checkout = build_checkout(&req)?;

    let res = clip::create_link(&data.client, &data.config, &checkout).await?;

    Ok(res)
}

fn build_checkout(req: &Request) -> Result<clip::CheckoutRequest, PaymentError> {
    let missing = [
        &req.amount,
        &req.currency,
        &req.order_id,
        &req.return_url,
        &req.cancel_url,
    ]
    .iter()
    .any(|f| f.is_empty());

    if missing {
        return Err(PaymentError::MissingFields);
    }

    let amount = clip::format_amount(&req.amount).ok_or(PaymentError::MissingFields)?;

    Ok(clip::CheckoutRequest {
        amount,
        currency: req.currency.clone(),
        purchase_description: format!("Order #{}", req.order_id),
        redirection_url: clip::RedirectionUrl {
            success: req.return_url.clone(),
            error: req.cancel_url.clone(),
        },
        metadata: clip::Metadata {
            external_reference: req.order_id.clone(),
        },
    })
}

// Forms come from the SBPay storefront, JSON from everything else.
impl<S> FromRequest<S> for Request
where
    S: Send + Sync,
{
    type Rejection = PaymentError;

    async fn from_request(req: axum::extract::Request, state: &S) -> Result<Self, Self::Rejection> {
        let form_encoded = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"));

        if form_encoded {
            let Form(body) = Form::<Request>::from_request(req, state)
                .await
                .map_err(|_| PaymentError::MissingFields)?;

            Ok(body)
        } else {
            let Json(body) = Json::<Request>::from_request(req, state)
                .await
                .map_err(|_| PaymentError::MissingFields)?;

            Ok(body)
        }
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            PaymentError::MissingFields => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "message": MISSING_FIELDS_MSG }),
            ),
            PaymentError::Upstream(clip::Error::Status { body, .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "message": STATUS_ERR_MSG, "details": body }),
            ),
            PaymentError::Upstream(clip::Error::Transport(err)) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "message": RELAY_ERR_MSG, "error": err.to_string() }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
