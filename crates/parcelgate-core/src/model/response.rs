// ── Operation responses ──
//
// Every operation returns the common `Response` envelope plus its own
// payload. A protocol-level failure is carried in `success` / `message`;
// the raw reply and request text are kept for diagnostics.

use serde::{Deserialize, Serialize};

use super::event::ShipmentEvent;
use super::location::Location;
use super::rate::RateEstimate;

/// Fields shared by every operation response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    /// `"<severity> - <code>: <text>"`, also populated on success.
    pub message: String,
    /// The reply converted to JSON.
    pub params: serde_json::Value,
    /// Raw reply text.
    pub xml: String,
    /// Request document that produced this reply.
    pub request: String,
    /// Whether the beta gateway was used.
    pub test: bool,
}

/// Access to the common envelope of any operation response.
pub trait CarrierResponse {
    fn response(&self) -> &Response;

    fn is_success(&self) -> bool {
        self.response().success
    }

    fn message(&self) -> &str {
        &self.response().message
    }
}

impl CarrierResponse for Response {
    fn response(&self) -> &Response {
        self
    }
}

/// Schema revision echoed by the registration service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub service_id: String,
    pub major: String,
    pub intermediate: String,
    pub minor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationResponse {
    #[serde(flatten)]
    pub response: Response,
    pub user_key: Option<String>,
    #[serde(skip_serializing)]
    pub user_password: Option<String>,
    pub version: Option<VersionInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionResponse {
    #[serde(flatten)]
    pub response: Response,
    pub meter_number: Option<String>,
    pub version: Option<VersionInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionCaptureResponse {
    #[serde(flatten)]
    pub response: Response,
    pub customer_transaction_id: Option<String>,
    pub version: Option<VersionInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateResponse {
    #[serde(flatten)]
    pub response: Response,
    pub rates: Vec<RateEstimate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingResponse {
    #[serde(flatten)]
    pub response: Response,
    pub tracking_number: Option<String>,
    pub destination: Option<Location>,
    pub shipment_events: Vec<ShipmentEvent>,
}

macro_rules! impl_carrier_response {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CarrierResponse for $ty {
                fn response(&self) -> &Response {
                    &self.response
                }
            }
        )*
    };
}

impl_carrier_response!(
    RegistrationResponse,
    SubscriptionResponse,
    VersionCaptureResponse,
    RateResponse,
    TrackingResponse,
);
