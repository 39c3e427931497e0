// ── Tracking scan domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::location::Location;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentEvent {
    /// Scan description as reported by the carrier.
    pub name: String,
    /// `None` when the carrier's timestamp could not be read.
    pub time: Option<DateTime<Utc>>,
    /// Absent for scans without a meaningful place, such as the
    /// origin-created scan.
    pub location: Option<Location>,
}
