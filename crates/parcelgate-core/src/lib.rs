//! Protocol translation layer between a shipping domain model and the FedEx
//! XML web services.
//!
//! - **[`FedEx`]**: Facade over a [`Transport`](parcelgate_api::Transport):
//!   [`register`](FedEx::register), [`subscribe`](FedEx::subscribe),
//!   [`capture_version`](FedEx::capture_version),
//!   [`find_rates`](FedEx::find_rates) and
//!   [`find_tracking_info`](FedEx::find_tracking_info). Holds the credential
//!   state and records what registration and subscription issue.
//!
//! - **[`request`]**: One builder per operation producing the request
//!   document, with unit conversion ([`units`]) and code tables ([`codes`]).
//!
//! - **[`reply`]**: One parser per operation, the notification
//!   [`classify`](reply::classify)er, and the currency rule in [`currency`].
//!
//! - **Domain model** ([`model`]): `Location`, `Package`, `RateEstimate`,
//!   `ShipmentEvent` and the response envelope family.
//!
//! A reply that parses but reports an error severity is returned as a
//! response with `success == false`; only transport failures, invalid
//! input and non-XML replies are [`CoreError`]s.

pub mod carrier;
pub mod codes;
pub mod config;
pub mod currency;
pub mod error;
pub mod model;
pub mod options;
pub mod reply;
pub mod request;
pub mod units;

// ── Primary re-exports ──────────────────────────────────────────────
pub use carrier::FedEx;
pub use codes::{
    Accessibility, CARRIER_NAME, CarrierCode, CodCollectionType, DropoffType,
    HomeDeliveryPremiumType, PackageIdentifierType, PackagingType, PaymentType, SignatureOption,
    service_name_for_code,
};
pub use config::{CarrierConfig, ClientDetail, Credentials, DEFAULT_TRANSACTION_ID};
pub use error::CoreError;
pub use options::{
    CashOnDelivery, Contact, DangerousGoods, HomeDeliveryPremium, RateOptions,
    RegistrationOptions, ShipmentDryIce, ShippingCharges, SubscriptionOptions, TrackingOptions,
    VersionCaptureOptions, WeightUnits,
};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    AddressType, CarrierResponse, CountryCode, Location, Package, RateEstimate, RateResponse,
    RegistrationResponse, Response, ShipmentEvent, SubscriptionResponse, TrackingResponse,
    UnitSystem, VersionCaptureResponse, VersionInfo,
};
