// `RateReply` parsing: one `RateEstimate` per `RateReplyDetails`. Lines
// whose net charge cannot be read are left out rather than priced at zero.

use tracing::warn;

use super::{Exchange, Reply, text};
use crate::codes::{CARRIER_NAME, service_name_for_code};
use crate::currency::normalize_currency;
use crate::error::CoreError;
use crate::model::rate::minor_units;
use crate::model::{Location, Package, RateEstimate, RateResponse};

const NET_CHARGE: &str = "RatedShipmentDetails/ShipmentRateDetail/TotalNetCharge";
const SATURDAY_DELIVERY: &str = "SATURDAY_DELIVERY";

/// The shipment a rate request was built for.
#[derive(Debug, Clone, Copy)]
pub struct Shipment<'a> {
    pub origin: &'a Location,
    pub destination: &'a Location,
    pub packages: &'a [Package],
}

/// Parse a rate reply. A reply without any rate line is a failure even
/// when the notification reports success.
pub fn parse_rates(
    exchange: &Exchange<'_>,
    shipment: &Shipment<'_>,
) -> Result<RateResponse, CoreError> {
    let reply = Reply::open(exchange, "RateReply")?;

    let rates: Vec<RateEstimate> = reply
        .root()
        .children_named("RateReplyDetails")
        .filter_map(|details| {
            let service_code = details.text_at("ServiceType").to_owned();
            let service_type = if details.text_at("AppliedOptions") == SATURDAY_DELIVERY {
                format!("{service_code}_{SATURDAY_DELIVERY}")
            } else {
                service_code.clone()
            };

            let amount_text = details.text_at(&format!("{NET_CHARGE}/Amount"));
            let Some(amount) = amount_text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|amount| amount.is_finite())
            else {
                warn!(
                    service = %service_code,
                    amount = amount_text,
                    "skipping rate with unreadable net charge"
                );
                return None;
            };

            Some(RateEstimate {
                origin: shipment.origin.clone(),
                destination: shipment.destination.clone(),
                carrier: CARRIER_NAME.to_owned(),
                service_name: service_name_for_code(&service_type),
                service_code,
                total_price: minor_units(amount),
                currency: normalize_currency(details.text_at(&format!("{NET_CHARGE}/Currency"))),
                packages: shipment.packages.to_vec(),
                delivery_date: text(details, "DeliveryTimestamp"),
            })
        })
        .collect();

    let mut response = reply.envelope(exchange);
    if rates.is_empty() {
        response.success = false;
        response.message = format!(
            "no shipping rates could be found for the destination address: {}",
            response.message
        );
    }

    Ok(RateResponse { response, rates })
}
