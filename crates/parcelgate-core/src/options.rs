// ── Per-operation options ──
//
// One struct per facade operation. Every field is optional or has the
// gateway's default, so `Default::default()` is always a valid request.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::codes::{
    Accessibility, CarrierCode, CodCollectionType, DropoffType, HomeDeliveryPremiumType,
    PackageIdentifierType, PackagingType, PaymentType, SignatureOption,
};
use crate::model::{CountryCode, Location};

/// Default `RateRequestTypes` value.
pub const DEFAULT_RATE_REQUEST_TYPE: &str = "ACCOUNT";

/// A person registering or subscribing with the carrier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub email: Option<String>,
}

impl Contact {
    /// First and last name joined by a space, if either is set.
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    }
}

// ── Registration / subscription / version capture ────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationOptions {
    /// Service categories requested for the user (`SHIPPING`, `TRACKING`, ...).
    #[serde(default)]
    pub categories: Vec<String>,
    pub billing_address: Location,
    pub contact: Contact,
    pub address: Location,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionOptions {
    pub csp_solution_id: Option<String>,
    pub contact: Contact,
    pub address: Location,
    /// Sent as the account shipping address.
    pub billing_address: Location,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionCaptureOptions {
    pub origin_location_id: Option<String>,
    pub vendor_product_platform: Option<String>,
}

// ── Rates ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingCharges {
    pub payment_type: PaymentType,
    pub payor_account_number: Option<String>,
    pub payor_country: Option<CountryCode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashOnDelivery {
    #[serde(default)]
    pub collection_type: CodCollectionType,
    pub currency: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnits {
    Lb,
    #[default]
    Kg,
}

impl WeightUnits {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Lb => "LB",
            Self::Kg => "KG",
        }
    }
}

/// Shipment-level dry ice declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentDryIce {
    pub package_count: Option<u32>,
    #[serde(default)]
    pub weight_units: WeightUnits,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeDeliveryPremium {
    pub premium_type: HomeDeliveryPremiumType,
    pub date: NaiveDate,
    pub phone: Option<String>,
}

/// Hazardous material declaration applied to every package.
///
/// The certificate fields are always sent, empty when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DangerousGoods {
    pub accessibility: Option<Accessibility>,
    pub cargo_aircraft_only: Option<bool>,
    pub dot_proper_shipping_name: Option<String>,
    pub dot_hazard_class_or_division: Option<String>,
    pub dot_id_number: Option<String>,
    pub dot_label_type: Option<String>,
    pub packing_group: Option<String>,
    pub quantity: Option<String>,
    pub units: Option<String>,
    pub emergency_contact_number: Option<String>,
    pub emergency_contact_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateOptions {
    /// Defaults to the current local time.
    pub ship_timestamp: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub dropoff_type: DropoffType,
    /// Restrict the quote to one service code (`FEDEX_GROUND`).
    pub service_type: Option<String>,
    #[serde(default)]
    pub packaging_type: PackagingType,
    pub carrier_code: Option<CarrierCode>,
    /// Shipper address when it differs from the pickup origin.
    pub shipper: Option<Location>,
    pub shipping_charges: Option<ShippingCharges>,
    #[serde(default)]
    pub saturday_pickup: bool,
    #[serde(default)]
    pub saturday_delivery: bool,
    pub cod: Option<CashOnDelivery>,
    pub dry_ice: Option<ShipmentDryIce>,
    pub hold_at_location: Option<Location>,
    pub home_delivery_premium: Option<HomeDeliveryPremium>,
    /// Declared customs value; only the integer part is sent.
    pub customs_value: Option<f64>,
    /// Defaults to [`DEFAULT_RATE_REQUEST_TYPE`].
    pub rate_request_types: Option<String>,
    pub dangerous_goods: Option<DangerousGoods>,
    pub signature_option: Option<SignatureOption>,
    #[serde(default)]
    pub non_standard_container: bool,
}

impl RateOptions {
    /// Whether the shipment-level special services block is needed.
    pub fn has_shipment_special_services(&self) -> bool {
        self.saturday_pickup
            || self.saturday_delivery
            || self.cod.is_some()
            || self.dry_ice.is_some()
            || self.hold_at_location.is_some()
            || self.home_delivery_premium.is_some()
    }
}

// ── Tracking ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingOptions {
    #[serde(default)]
    pub identifier_type: PackageIdentifierType,
}
