// ── Protocol code tables ──
//
// Domain-level option keys (snake_case, as accepted from callers and
// config files) mapped to the enumeration strings the gateway expects.
// The tables are fixed by the schema revisions this crate speaks.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Carrier display name used on rate estimates and derived service names.
pub const CARRIER_NAME: &str = "FedEx";

// ── Packaging ────────────────────────────────────────────────────────

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PackagingType {
    FedexEnvelope,
    FedexPak,
    FedexBox,
    FedexTube,
    #[strum(serialize = "fedex_10_kg_box")]
    #[serde(rename = "fedex_10_kg_box")]
    Fedex10KgBox,
    #[strum(serialize = "fedex_25_kg_box")]
    #[serde(rename = "fedex_25_kg_box")]
    Fedex25KgBox,
    #[default]
    YourPackaging,
}

impl PackagingType {
    pub const fn code(self) -> &'static str {
        match self {
            Self::FedexEnvelope => "FEDEX_ENVELOPE",
            Self::FedexPak => "FEDEX_PAK",
            Self::FedexBox => "FEDEX_BOX",
            Self::FedexTube => "FEDEX_TUBE",
            Self::Fedex10KgBox => "FEDEX_10KG_BOX",
            Self::Fedex25KgBox => "FEDEX_25KG_BOX",
            Self::YourPackaging => "YOUR_PACKAGING",
        }
    }
}

// ── Dropoff ──────────────────────────────────────────────────────────

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DropoffType {
    #[default]
    RegularPickup,
    RequestCourier,
    Dropbox,
    BusinessServiceCenter,
    Station,
}

impl DropoffType {
    pub const fn code(self) -> &'static str {
        match self {
            Self::RegularPickup => "REGULAR_PICKUP",
            Self::RequestCourier => "REQUEST_COURIER",
            Self::Dropbox => "DROP_BOX",
            Self::BusinessServiceCenter => "BUSINESS_SERVICE_CENTER",
            Self::Station => "STATION",
        }
    }
}

// ── Payment ──────────────────────────────────────────────────────────

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Sender,
    Recipient,
    ThirdParty,
    Collect,
}

impl PaymentType {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Sender => "SENDER",
            Self::Recipient => "RECIPIENT",
            Self::ThirdParty => "THIRDPARTY",
            Self::Collect => "COLLECT",
        }
    }
}

// ── Package identifiers (tracking) ───────────────────────────────────

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PackageIdentifierType {
    #[default]
    TrackingNumber,
    DoorTag,
    Rma,
    GroundShipmentId,
    GroundInvoiceNumber,
    GroundCustomerReference,
    GroundPo,
    ExpressReference,
    ExpressMpsMaster,
}

impl PackageIdentifierType {
    pub const fn code(self) -> &'static str {
        match self {
            Self::TrackingNumber | Self::DoorTag => "TRACKING_NUMBER_OR_DOORTAG",
            Self::Rma => "RMA",
            Self::GroundShipmentId => "GROUND_SHIPMENT_ID",
            Self::GroundInvoiceNumber => "GROUND_INVOICE_NUMBER",
            Self::GroundCustomerReference => "GROUND_CUSTOMER_REFERENCE",
            Self::GroundPo => "GROUND_PO",
            Self::ExpressReference => "EXPRESS_REFERENCE",
            Self::ExpressMpsMaster => "EXPRESS_MPS_MASTER",
        }
    }
}

// ── Operating companies ──────────────────────────────────────────────

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CarrierCode {
    FedexGround,
    FedexExpress,
}

impl CarrierCode {
    pub const fn code(self) -> &'static str {
        match self {
            Self::FedexGround => "FDXG",
            Self::FedexExpress => "FDXE",
        }
    }
}

// ── Special-service enumerations ─────────────────────────────────────

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SignatureOption {
    Adult,
    Direct,
    Indirect,
    NoSignatureRequired,
    ServiceDefault,
}

impl SignatureOption {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Adult => "ADULT",
            Self::Direct => "DIRECT",
            Self::Indirect => "INDIRECT",
            Self::NoSignatureRequired => "NO_SIGNATURE_REQUIRED",
            Self::ServiceDefault => "SERVICE_DEFAULT",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum HomeDeliveryPremiumType {
    Appointment,
    DateCertain,
    Evening,
}

impl HomeDeliveryPremiumType {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Appointment => "APPOINTMENT",
            Self::DateCertain => "DATE_CERTAIN",
            Self::Evening => "EVENING",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CodCollectionType {
    #[default]
    Any,
    Cash,
    GuaranteedFunds,
}

impl CodCollectionType {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Any => "ANY",
            Self::Cash => "CASH",
            Self::GuaranteedFunds => "GUARANTEED_FUNDS",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    Accessible,
    Inaccessible,
}

impl Accessibility {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Accessible => "ACCESSIBLE",
            Self::Inaccessible => "INACCESSIBLE",
        }
    }
}

// ── Service names ────────────────────────────────────────────────────

/// Known service codes and their display names.
pub const SERVICE_TYPES: &[(&str, &str)] = &[
    ("PRIORITY_OVERNIGHT", "FedEx Priority Overnight"),
    (
        "PRIORITY_OVERNIGHT_SATURDAY_DELIVERY",
        "FedEx Priority Overnight Saturday Delivery",
    ),
    ("FEDEX_2_DAY", "FedEx 2 Day"),
    ("FEDEX_2_DAY_SATURDAY_DELIVERY", "FedEx 2 Day Saturday Delivery"),
    ("STANDARD_OVERNIGHT", "FedEx Standard Overnight"),
    ("FIRST_OVERNIGHT", "FedEx First Overnight"),
    ("FEDEX_EXPRESS_SAVER", "FedEx Express Saver"),
    ("FEDEX_1_DAY_FREIGHT", "FedEx 1 Day Freight"),
    (
        "FEDEX_1_DAY_FREIGHT_SATURDAY_DELIVERY",
        "FedEx 1 Day Freight Saturday Delivery",
    ),
    ("FEDEX_2_DAY_FREIGHT", "FedEx 2 Day Freight"),
    (
        "FEDEX_2_DAY_FREIGHT_SATURDAY_DELIVERY",
        "FedEx 2 Day Freight Saturday Delivery",
    ),
    ("FEDEX_3_DAY_FREIGHT", "FedEx 3 Day Freight"),
    (
        "FEDEX_3_DAY_FREIGHT_SATURDAY_DELIVERY",
        "FedEx 3 Day Freight Saturday Delivery",
    ),
    ("INTERNATIONAL_PRIORITY", "FedEx International Priority"),
    (
        "INTERNATIONAL_PRIORITY_SATURDAY_DELIVERY",
        "FedEx International Priority Saturday Delivery",
    ),
    ("INTERNATIONAL_ECONOMY", "FedEx International Economy"),
    ("INTERNATIONAL_FIRST", "FedEx International First"),
    (
        "INTERNATIONAL_PRIORITY_FREIGHT",
        "FedEx International Priority Freight",
    ),
    (
        "INTERNATIONAL_ECONOMY_FREIGHT",
        "FedEx International Economy Freight",
    ),
    ("GROUND_HOME_DELIVERY", "FedEx Ground Home Delivery"),
    ("FEDEX_GROUND", "FedEx Ground"),
    ("INTERNATIONAL_GROUND", "FedEx International Ground"),
];

static SERVICE_NAMES: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| SERVICE_TYPES.iter().copied().collect());

/// Display name for a service code.
///
/// Unknown codes get a name derived from the code itself:
/// `SOME_WEIRD_RATE` becomes `FedEx Some Weird Rate`, and a leading
/// `FEDEX_` is not repeated after the carrier prefix.
pub fn service_name_for_code(code: &str) -> String {
    if let Some(name) = SERVICE_NAMES.get(code) {
        return (*name).to_owned();
    }

    let title = code
        .split('_')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");
    let title = title.strip_prefix("Fedex ").unwrap_or(&title);
    format!("{CARRIER_NAME} {title}")
}

/// First character uppercase, the rest lowercase.
fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
