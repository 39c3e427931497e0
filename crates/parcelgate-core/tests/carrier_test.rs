#![allow(clippy::unwrap_used)]
// Integration tests for the `FedEx` facade over a recording transport.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;

use chrono::DateTime;
use pretty_assertions::assert_eq;

use parcelgate_api::{Error, Transport};
use parcelgate_core::{
    AddressType, CarrierConfig, CarrierResponse, ClientDetail, Contact, CoreError, CountryCode,
    Credentials, FedEx, Location, Package, RateOptions, RegistrationOptions, SubscriptionOptions,
    TrackingOptions, UnitSystem, VersionCaptureOptions,
};

// ── Helpers ─────────────────────────────────────────────────────────

/// Replays canned replies and records every submitted request.
#[derive(Default)]
struct RecordingTransport {
    replies: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<(String, bool)>>,
}

impl RecordingTransport {
    fn replying(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(ToString::to_string).collect()),
            requests: Mutex::default(),
        }
    }

    fn requests(&self) -> Vec<(String, bool)> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for RecordingTransport {
    async fn submit(&self, request: &str, test: bool) -> Result<String, Error> {
        self.requests
            .lock()
            .unwrap()
            .push((request.to_owned(), test));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::HttpStatus {
                status: 500,
                body: "no reply queued".into(),
            })
    }
}

fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(path).unwrap()
}

/// Indented fixture collapsed to the single-line form the builders emit.
fn compact(xml: &str) -> String {
    xml.lines().map(str::trim).collect()
}

fn config() -> CarrierConfig {
    let credentials = Credentials::new("CSP_KEY", "CSP_PASS")
        .with_account_number("510087000")
        .with_meter_number("118")
        .with_user("USER_KEY", "USER_PASS");
    CarrierConfig::new(credentials).with_client(ClientDetail {
        product_id: Some("PGTE".into()),
        product_version: Some("1000".into()),
        region: Some("US".into()),
    })
}

fn carrier(replies: &[&str]) -> FedEx<RecordingTransport> {
    FedEx::new(config(), RecordingTransport::replying(replies)).unwrap()
}

fn ottawa() -> Location {
    Location {
        street_lines: vec!["110 Laurier Avenue West".into()],
        city: Some("Ottawa".into()),
        province: Some("ON".into()),
        postal_code: Some("K1P 1J1".into()),
        country: Some(CountryCode::new("CA").unwrap()),
        phone: Some("613-555-0100".into()),
        name: Some("Bob Bobsen".into()),
        ..Location::default()
    }
}

fn beverly_hills() -> Location {
    Location {
        street_lines: vec!["455 N. Rexford Dr.".into(), "3rd Floor".into()],
        city: Some("Beverly Hills".into()),
        province: Some("CA".into()),
        postal_code: Some("90210".into()),
        country: Some(CountryCode::new("US").unwrap()),
        address_type: Some(AddressType::Residential),
        ..Location::default()
    }
}

fn packages() -> Vec<Package> {
    vec![
        Package::new(100.0, [93.0, 10.0, 0.0], UnitSystem::Imperial).unwrap(),
        Package::new(7.5, [0.0; 3], UnitSystem::Imperial).unwrap(),
    ]
}

fn rate_options() -> RateOptions {
    RateOptions {
        ship_timestamp: Some(DateTime::parse_from_rfc3339("2024-05-01T10:00:00-04:00").unwrap()),
        ..RateOptions::default()
    }
}

// ── Construction ────────────────────────────────────────────────────

#[test]
fn test_new_rejects_missing_csp_credentials() {
    let config = CarrierConfig::new(Credentials::new("", "secret"));
    let result = FedEx::new(config, RecordingTransport::default());
    assert!(
        matches!(result, Err(CoreError::Config { .. })),
        "expected Config error"
    );
}

// ── Rates ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_rate_request_matches_golden_document() {
    let fedex = carrier(&[&fixture("rate_reply.xml")]);

    fedex
        .find_rates(&ottawa(), &beverly_hills(), &packages(), &rate_options())
        .await
        .unwrap();

    let requests = fedex.transport().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, compact(&fixture("rate_request.xml")));
    assert!(!requests[0].1, "live gateway expected outside test mode");
}

#[tokio::test]
async fn test_rates_are_parsed_from_reply() {
    let fedex = carrier(&[&fixture("rate_reply.xml")]);

    let response = fedex
        .find_rates(&ottawa(), &beverly_hills(), &packages(), &rate_options())
        .await
        .unwrap();

    // A WARNING notification still counts as success.
    assert!(response.is_success());
    assert_eq!(
        response.message(),
        "WARNING - 556: There are no valid services available."
    );
    assert_eq!(response.rates.len(), 2);

    let ground = &response.rates[0];
    assert_eq!(ground.service_code, "FEDEX_GROUND");
    assert_eq!(ground.service_name, "FedEx Ground");
    assert_eq!(ground.total_price, 3836);
    assert_eq!(ground.currency, "CAD");
    assert_eq!(ground.carrier, "FedEx");
    assert_eq!(ground.delivery_date.as_deref(), Some("2024-05-07T23:59:00"));
    assert_eq!(ground.origin, ottawa());
    assert_eq!(ground.packages, packages());

    let overnight = &response.rates[1];
    assert_eq!(overnight.service_code, "PRIORITY_OVERNIGHT");
    assert_eq!(
        overnight.service_name,
        "FedEx Priority Overnight Saturday Delivery"
    );
    assert_eq!(overnight.total_price, 11250);
    assert_eq!(overnight.currency, "GBP");

    assert_eq!(response.response.params["RateReply"]["HighestSeverity"], "WARNING");
    assert!(response.response.request.starts_with("<RateRequest"));
}

#[tokio::test]
async fn test_reply_without_rates_is_a_failure() {
    let fedex = carrier(&[&fixture("rate_reply_empty.xml")]);

    let response = fedex
        .find_rates(&ottawa(), &beverly_hills(), &packages(), &rate_options())
        .await
        .unwrap();

    assert!(!response.is_success());
    assert!(response.rates.is_empty());
    assert_eq!(
        response.message(),
        "no shipping rates could be found for the destination address: \
         SUCCESS - 0: Request was successfully processed."
    );
}

#[tokio::test]
async fn test_error_notification_is_returned_not_raised() {
    let fedex = carrier(&[&fixture("error_reply.xml")]);

    let response = fedex
        .find_rates(&ottawa(), &beverly_hills(), &packages(), &rate_options())
        .await
        .unwrap();

    assert!(!response.is_success());
    assert!(response.message().ends_with("ERROR - 1000: Authentication Failed"));
}

#[tokio::test]
async fn test_empty_package_list_is_rejected_before_submitting() {
    let fedex = carrier(&[]);

    let result = fedex
        .find_rates(&ottawa(), &beverly_hills(), &[], &rate_options())
        .await;

    assert!(
        matches!(&result, Err(CoreError::Validation { field, .. }) if field == "packages"),
        "expected Validation error, got {result:?}"
    );
    assert!(fedex.transport().requests().is_empty());
}

#[tokio::test]
async fn test_non_xml_reply_is_malformed() {
    let fedex = carrier(&["<html><body>Service Unavailable"]);

    let result = fedex
        .find_rates(&ottawa(), &beverly_hills(), &packages(), &rate_options())
        .await;

    let err = result.unwrap_err();
    assert!(
        matches!(err, CoreError::MalformedReply { .. }),
        "expected MalformedReply, got {err:?}"
    );
    assert_eq!(err.raw_body(), Some("<html><body>Service Unavailable"));
}

#[tokio::test]
async fn test_transport_failure_is_a_transport_error() {
    let fedex = carrier(&[]);

    let result = fedex
        .find_rates(&ottawa(), &beverly_hills(), &packages(), &rate_options())
        .await;

    assert!(
        matches!(
            result,
            Err(CoreError::Transport {
                status: Some(500),
                transient: true,
                ..
            })
        ),
        "expected transient Transport error"
    );
}

// ── Test mode ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_test_mode_is_passed_to_transport_and_response() {
    let transport = RecordingTransport::replying(&[&fixture("tracking_reply.xml")]);
    let fedex = FedEx::new(config().with_test_mode(true), transport).unwrap();

    let response = fedex
        .find_tracking_info("077973360403984", &TrackingOptions::default())
        .await
        .unwrap();

    assert!(fedex.is_test_mode());
    assert!(response.response.test);
    assert!(fedex.transport().requests()[0].1);
}

// ── Tracking ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_tracking_events_are_filtered_and_sorted() {
    let fedex = carrier(&[&fixture("tracking_reply.xml")]);

    let response = fedex
        .find_tracking_info("077973360403984", &TrackingOptions::default())
        .await
        .unwrap();

    assert!(response.is_success());
    assert_eq!(response.tracking_number.as_deref(), Some("077973360403984"));

    let names: Vec<_> = response
        .shipment_events
        .iter()
        .map(|event| event.name.as_str())
        .collect();
    assert_eq!(
        names,
        [
            "Shipment information sent to FedEx",
            "Arrived at FedEx location",
            "Delivered"
        ]
    );
    assert!(
        response
            .shipment_events
            .windows(2)
            .all(|pair| pair[0].time <= pair[1].time)
    );
    assert_eq!(response.shipment_events[0].location, None);

    let delivered = response.shipment_events[2].location.as_ref().unwrap();
    assert_eq!(delivered.city.as_deref(), Some("SAULT STE MARIE"));
    assert_eq!(delivered.postal_code.as_deref(), Some("P6A5K8"));

    let request = &fedex.transport().requests()[0].0;
    assert!(request.contains("<PackageIdentifier><Value>077973360403984</Value>"));
    assert!(request.contains("<IncludeDetailedScans>true</IncludeDetailedScans>"));
}

// ── Registration and subscription ───────────────────────────────────

#[tokio::test]
async fn test_registration_stores_issued_user_credentials() {
    let config = CarrierConfig::new(
        Credentials::new("CSP_KEY", "CSP_PASS").with_account_number("510087000"),
    );
    let transport = RecordingTransport::replying(&[
        &fixture("registration_reply.xml"),
        &fixture("tracking_reply.xml"),
    ]);
    let fedex = FedEx::new(config, transport).unwrap();

    let options = RegistrationOptions {
        categories: vec!["SHIPPING".into()],
        contact: Contact {
            first_name: Some("Bob".into()),
            last_name: Some("Bobsen".into()),
            ..Contact::default()
        },
        address: ottawa(),
        billing_address: ottawa(),
    };
    let response = fedex.register(&options).await.unwrap();

    assert!(response.is_success());
    assert_eq!(response.user_key.as_deref(), Some("ISSUED_USER_KEY"));
    assert_eq!(response.version.as_ref().unwrap().service_id, "fcas");
    assert_eq!(
        fedex.credentials().user_key.as_deref(),
        Some("ISSUED_USER_KEY")
    );

    let registration = &fedex.transport().requests()[0].0;
    assert!(registration.starts_with("<RegisterWebCspUserRequest"));
    assert!(!registration.contains("<UserCredential>"));

    fedex
        .find_tracking_info("077973360403984", &TrackingOptions::default())
        .await
        .unwrap();
    let tracking = &fedex.transport().requests()[1].0;
    assert!(tracking.contains(
        "<UserCredential><Key>ISSUED_USER_KEY</Key><Password>ISSUED_USER_PASS</Password>\
         </UserCredential>"
    ));
}

#[tokio::test]
async fn test_subscription_meter_number_is_used_by_later_requests() {
    let config = CarrierConfig::new(
        Credentials::new("CSP_KEY", "CSP_PASS")
            .with_account_number("510087000")
            .with_user("USER_KEY", "USER_PASS"),
    );
    let transport = RecordingTransport::replying(&[
        &fixture("subscription_reply.xml"),
        &fixture("rate_reply.xml"),
    ]);
    let fedex = FedEx::new(config, transport).unwrap();

    let response = fedex
        .subscribe(&SubscriptionOptions::default())
        .await
        .unwrap();
    assert!(response.is_success());
    assert_eq!(response.meter_number.as_deref(), Some("100012345"));

    let subscription = &fedex.transport().requests()[0].0;
    assert!(subscription.contains("<MeterNumber/>"));

    fedex
        .find_rates(&ottawa(), &beverly_hills(), &packages(), &rate_options())
        .await
        .unwrap();
    let rate = &fedex.transport().requests()[1].0;
    assert!(rate.contains("<MeterNumber>100012345</MeterNumber>"));
}

#[tokio::test]
async fn test_subscription_without_user_credentials_is_rejected() {
    let config = CarrierConfig::new(Credentials::new("CSP_KEY", "CSP_PASS"));
    let fedex = FedEx::new(config, RecordingTransport::default()).unwrap();

    let result = fedex.subscribe(&SubscriptionOptions::default()).await;

    assert!(
        matches!(result, Err(CoreError::Validation { .. })),
        "expected Validation error"
    );
    assert!(fedex.transport().requests().is_empty());
}

#[tokio::test]
async fn test_failed_registration_keeps_existing_credentials() {
    let body = fixture("error_reply.xml")
        .replace("v7:RateReply", "v2:RegisterWebCspUserReply");
    let fedex = carrier(&[&body]);

    let response = fedex
        .register(&RegistrationOptions::default())
        .await
        .unwrap();

    assert!(!response.is_success());
    assert_eq!(fedex.credentials().user_key.as_deref(), Some("USER_KEY"));
}

// ── Version capture ─────────────────────────────────────────────────

#[tokio::test]
async fn test_version_capture_echoes_transaction_id() {
    let fedex = carrier(&[&fixture("version_capture_reply.xml")]);

    let options = VersionCaptureOptions {
        origin_location_id: Some("VXYZ".into()),
        vendor_product_platform: Some("Windows OS".into()),
    };
    let response = fedex
        .capture_version("Version Capture Request", &options)
        .await
        .unwrap();

    assert!(response.is_success());
    assert_eq!(
        response.customer_transaction_id.as_deref(),
        Some("Version Capture Request")
    );

    let request = &fedex.transport().requests()[0].0;
    assert!(request.starts_with("<VersionCaptureRequest"));
    assert!(request.contains("<MeterNumber>118</MeterNumber>"));
    assert!(request.contains("<Region>US</Region>"));
    assert!(request.contains("<OriginLocationId>VXYZ</OriginLocationId>"));
}
