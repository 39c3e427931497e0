// ── Rate quote domain type ──

use serde::{Deserialize, Serialize};

use super::location::Location;
use super::package::Package;

/// One quoted price line from a rate reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateEstimate {
    pub origin: Location,
    pub destination: Location,
    pub carrier: String,
    /// Human-readable service name ("FedEx Ground").
    pub service_name: String,
    /// Service code as returned by the gateway ("FEDEX_GROUND").
    pub service_code: String,
    /// Total net charge in minor currency units.
    pub total_price: i64,
    pub currency: String,
    pub packages: Vec<Package>,
    /// Delivery timestamp text, when the gateway committed to one.
    pub delivery_date: Option<String>,
}

impl RateEstimate {
    /// Alias for `total_price`.
    pub fn price(&self) -> i64 {
        self.total_price
    }
}

/// Convert a decimal amount to minor units, rounding half away from zero.
#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
pub(crate) fn minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}
