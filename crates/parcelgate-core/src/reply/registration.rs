// Registration-service replies: user registration, subscription and
// version capture. All three echo the service `Version` on success.

use super::{Exchange, Reply, text, version_info};
use crate::error::CoreError;
use crate::model::{RegistrationResponse, SubscriptionResponse, VersionCaptureResponse};

pub fn parse_registration(exchange: &Exchange<'_>) -> Result<RegistrationResponse, CoreError> {
    let reply = Reply::open(exchange, "RegisterWebCspUserReply")?;
    let root = reply.root();

    let (user_key, user_password, version) = if reply.status.success {
        (
            text(root, "Credential/Key"),
            text(root, "Credential/Password"),
            version_info(root),
        )
    } else {
        (None, None, None)
    };

    Ok(RegistrationResponse {
        response: reply.envelope(exchange),
        user_key,
        user_password,
        version,
    })
}

pub fn parse_subscription(exchange: &Exchange<'_>) -> Result<SubscriptionResponse, CoreError> {
    let reply = Reply::open(exchange, "SubscriptionReply")?;
    let root = reply.root();

    let (meter_number, version) = if reply.status.success {
        (text(root, "MeterNumber"), version_info(root))
    } else {
        (None, None)
    };

    Ok(SubscriptionResponse {
        response: reply.envelope(exchange),
        meter_number,
        version,
    })
}

pub fn parse_version_capture(
    exchange: &Exchange<'_>,
) -> Result<VersionCaptureResponse, CoreError> {
    let reply = Reply::open(exchange, "VersionCaptureReply")?;
    let root = reply.root();

    let (customer_transaction_id, version) = if reply.status.success {
        (
            text(root, "TransactionDetail/CustomerTransactionId"),
            version_info(root),
        )
    } else {
        (None, None)
    };

    Ok(VersionCaptureResponse {
        response: reply.envelope(exchange),
        customer_transaction_id,
        version,
    })
}
