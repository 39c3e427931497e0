// ── Domain model ──
//
// Canonical types exchanged with callers. Request builders read them,
// reply parsers produce them; none of them know about XML.

pub mod event;
pub mod location;
pub mod package;
pub mod rate;
pub mod response;

pub use event::ShipmentEvent;
pub use location::{AddressType, CountryCode, Location};
pub use package::{Axis, Package, PackageOptions, UnitSystem};
pub use rate::RateEstimate;
pub use response::{
    CarrierResponse, RateResponse, RegistrationResponse, Response, SubscriptionResponse,
    TrackingResponse, VersionCaptureResponse, VersionInfo,
};
