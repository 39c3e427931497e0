// ── Request document builders ──
//
// One builder per operation. Each returns the root `XmlNode`; the facade
// serialises it. Header blocks (`WebAuthenticationDetail`, `ClientDetail`,
// `TransactionDetail`, `Version`) are schema-mandated and always written,
// with empty elements for missing credentials. Payload elements are only
// written when their input is present.

pub mod rate;
pub mod registration;
pub mod subscription;
pub mod tracking;
pub mod version_capture;

use secrecy::ExposeSecret;

use parcelgate_api::XmlNode;

use crate::config::{ClientDetail, Credentials};
use crate::model::Location;

/// Schema revision and namespace of one gateway service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceVersion {
    pub service_id: &'static str,
    pub major: u8,
    pub intermediate: u8,
    pub minor: u8,
    pub namespace: &'static str,
}

const REGISTRATION_NAMESPACE: &str = "http://fedex.com/ws/registration/v2";

pub const REGISTRATION_VERSION: ServiceVersion = ServiceVersion {
    service_id: "fcas",
    major: 2,
    intermediate: 1,
    minor: 0,
    namespace: REGISTRATION_NAMESPACE,
};

pub const SUBSCRIPTION_VERSION: ServiceVersion = REGISTRATION_VERSION;

pub const VERSION_CAPTURE_VERSION: ServiceVersion = REGISTRATION_VERSION;

pub const RATE_VERSION: ServiceVersion = ServiceVersion {
    service_id: "crs",
    major: 7,
    intermediate: 0,
    minor: 0,
    namespace: "http://fedex.com/ws/rate/v7",
};

pub const TRACKING_VERSION: ServiceVersion = ServiceVersion {
    service_id: "trck",
    major: 4,
    intermediate: 0,
    minor: 0,
    namespace: "http://fedex.com/ws/track/v4",
};

/// Caller identity shared by every builder.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    pub credentials: &'a Credentials,
    pub client: &'a ClientDetail,
    /// `CustomerTransactionId` for operations that use the configured id.
    pub transaction_id: &'a str,
}

/// How `ClientDetail/MeterNumber` is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MeterField {
    /// Not written (registration: no meter exists yet).
    Omit,
    /// Written empty (subscription: the meter is being requested).
    Empty,
    /// Written from the credentials.
    Current,
}

fn root(name: &str, version: ServiceVersion) -> XmlNode {
    XmlNode::new(name).with_attribute("xmlns", version.namespace)
}

fn web_authentication_detail(credentials: &Credentials, with_user: bool) -> XmlNode {
    let csp = XmlNode::new("CspCredential")
        .with_child(XmlNode::leaf("Key", &credentials.csp_key))
        .with_child(XmlNode::leaf(
            "Password",
            credentials.csp_password.expose_secret(),
        ));

    XmlNode::new("WebAuthenticationDetail")
        .with_child(csp)
        .append_if(with_user, || {
            XmlNode::new("UserCredential")
                .with_child(XmlNode::leaf_or_empty(
                    "Key",
                    credentials.user_key.as_deref(),
                ))
                .with_child(XmlNode::leaf_or_empty(
                    "Password",
                    credentials
                        .user_password
                        .as_ref()
                        .map(ExposeSecret::expose_secret),
                ))
        })
}

fn client_detail(
    credentials: &Credentials,
    client: &ClientDetail,
    meter: MeterField,
    with_region: bool,
) -> XmlNode {
    let meter_node = match meter {
        MeterField::Omit => None,
        MeterField::Empty => Some(XmlNode::new("MeterNumber")),
        MeterField::Current => Some(XmlNode::leaf_or_empty(
            "MeterNumber",
            credentials.meter_number.as_deref(),
        )),
    };

    XmlNode::new("ClientDetail")
        .with_child(XmlNode::leaf_or_empty(
            "AccountNumber",
            credentials.account_number.as_deref(),
        ))
        .append_if_present(meter_node)
        .with_child(XmlNode::leaf_or_empty(
            "ClientProductId",
            client.product_id.as_deref(),
        ))
        .with_child(XmlNode::leaf_or_empty(
            "ClientProductVersion",
            client.product_version.as_deref(),
        ))
        .append_if_present(
            client
                .region
                .as_deref()
                .filter(|_| with_region)
                .map(|region| XmlNode::leaf("Region", region)),
        )
}

fn transaction_detail(transaction_id: &str) -> XmlNode {
    XmlNode::new("TransactionDetail")
        .with_child(XmlNode::leaf("CustomerTransactionId", transaction_id))
}

fn version_node(version: ServiceVersion) -> XmlNode {
    XmlNode::new("Version")
        .with_child(XmlNode::leaf("ServiceId", version.service_id))
        .with_child(XmlNode::leaf("Major", version.major))
        .with_child(XmlNode::leaf("Intermediate", version.intermediate))
        .with_child(XmlNode::leaf("Minor", version.minor))
}

/// Header shared by rate and tracking requests.
fn standard_header(ctx: &RequestContext<'_>) -> [XmlNode; 3] {
    [
        web_authentication_detail(ctx.credentials, true),
        client_detail(ctx.credentials, ctx.client, MeterField::Current, false),
        transaction_detail(ctx.transaction_id),
    ]
}

/// `<name><StreetLines/>...<CountryCode/><Residential/>?</name>`; absent
/// fields are left out.
fn address_node(name: &str, location: &Location) -> XmlNode {
    XmlNode::new(name)
        .with_children(
            location
                .street_lines
                .iter()
                .map(|line| XmlNode::leaf("StreetLines", line)),
        )
        .leaf_if_present("City", location.city.as_deref())
        .leaf_if_present("StateOrProvinceCode", location.province.as_deref())
        .leaf_if_present("PostalCode", location.postal_code.as_deref())
        .leaf_if_present("UrbanizationCode", location.urbanization_code.as_deref())
        .leaf_if_present("CountryCode", location.country.as_ref())
        .append_if(location.is_residential(), || {
            XmlNode::leaf("Residential", true)
        })
}

/// A party block (`Shipper`, `Recipient`, `Origin`): contact plus address.
fn party_node(name: &str, location: &Location) -> XmlNode {
    let contact = XmlNode::new("Contact")
        .leaf_if_present("PersonName", location.name.as_deref())
        .leaf_if_present("CompanyName", location.company.as_deref())
        .leaf_if_present("PhoneNumber", location.phone.as_deref());

    XmlNode::new(name)
        .append_if(!contact.is_empty(), || contact)
        .with_child(address_node("Address", location))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::model::{AddressType, CountryCode};

    fn xml(node: &XmlNode) -> String {
        node.to_xml_string().unwrap()
    }

    #[test]
    fn registration_header_has_no_user_credential_or_meter() {
        let creds = Credentials::new("csp", "secret").with_account_number("510087000");
        let client = ClientDetail {
            product_id: Some("PGTE".into()),
            product_version: Some("1000".into()),
            region: Some("US".into()),
        };

        assert_eq!(
            xml(&web_authentication_detail(&creds, false)),
            "<WebAuthenticationDetail><CspCredential><Key>csp</Key>\
             <Password>secret</Password></CspCredential></WebAuthenticationDetail>"
        );
        assert_eq!(
            xml(&client_detail(&creds, &client, MeterField::Omit, true)),
            "<ClientDetail><AccountNumber>510087000</AccountNumber>\
             <ClientProductId>PGTE</ClientProductId><ClientProductVersion>1000</ClientProductVersion>\
             <Region>US</Region></ClientDetail>"
        );
    }

    #[test]
    fn missing_user_credentials_are_written_empty() {
        let creds = Credentials::new("csp", "secret");
        assert_eq!(
            xml(&web_authentication_detail(&creds, true)),
            "<WebAuthenticationDetail><CspCredential><Key>csp</Key>\
             <Password>secret</Password></CspCredential>\
             <UserCredential><Key/><Password/></UserCredential></WebAuthenticationDetail>"
        );
    }

    #[test]
    fn region_is_dropped_when_not_requested() {
        let creds = Credentials::new("csp", "secret").with_meter_number("118");
        let client = ClientDetail {
            region: Some("US".into()),
            ..ClientDetail::default()
        };
        let node = client_detail(&creds, &client, MeterField::Current, false);
        assert_eq!(
            xml(&node),
            "<ClientDetail><AccountNumber/><MeterNumber>118</MeterNumber>\
             <ClientProductId/><ClientProductVersion/></ClientDetail>"
        );
    }

    #[test]
    fn party_without_contact_details_has_only_an_address() {
        let location = Location {
            street_lines: vec!["110 Laurier Avenue West".into()],
            city: Some("Ottawa".into()),
            province: Some("ON".into()),
            postal_code: Some("K1P 1J1".into()),
            country: Some(CountryCode::new("CA").unwrap()),
            address_type: Some(AddressType::Residential),
            ..Location::default()
        };

        assert_eq!(
            xml(&party_node("Recipient", &location)),
            "<Recipient><Address><StreetLines>110 Laurier Avenue West</StreetLines>\
             <City>Ottawa</City><StateOrProvinceCode>ON</StateOrProvinceCode>\
             <PostalCode>K1P 1J1</PostalCode><CountryCode>CA</CountryCode>\
             <Residential>true</Residential></Address></Recipient>"
        );
    }

    #[test]
    fn party_contact_lists_only_present_fields() {
        let location = Location {
            company: Some("Acme".into()),
            phone: Some("555-0100".into()),
            ..Location::default()
        };
        assert_eq!(
            xml(&party_node("Shipper", &location)),
            "<Shipper><Contact><CompanyName>Acme</CompanyName>\
             <PhoneNumber>555-0100</PhoneNumber></Contact><Address/></Shipper>"
        );
    }
}
