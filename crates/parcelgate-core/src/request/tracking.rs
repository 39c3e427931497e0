// `TrackRequest`: look up scan history for one package identifier.

use parcelgate_api::XmlNode;

use super::{RequestContext, TRACKING_VERSION, root, standard_header, version_node};
use crate::options::TrackingOptions;

pub fn build(ctx: &RequestContext<'_>, tracking_number: &str, options: &TrackingOptions) -> XmlNode {
    root("TrackRequest", TRACKING_VERSION)
        .with_children(standard_header(ctx))
        .with_child(version_node(TRACKING_VERSION))
        .with_child(
            XmlNode::new("PackageIdentifier")
                .with_child(XmlNode::leaf("Value", tracking_number))
                .with_child(XmlNode::leaf("Type", options.identifier_type.code())),
        )
        .with_child(XmlNode::leaf("IncludeDetailedScans", true))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::codes::PackageIdentifierType;
    use crate::config::{ClientDetail, Credentials};

    #[test]
    fn tracking_request_layout() {
        let credentials = Credentials::new("csp", "secret")
            .with_account_number("510087000")
            .with_meter_number("118")
            .with_user("user", "pass");
        let client = ClientDetail::default();
        let ctx = RequestContext {
            credentials: &credentials,
            client: &client,
            transaction_id: "Parcelgate",
        };

        let xml = build(&ctx, "077973360403984", &TrackingOptions::default())
            .to_xml_string()
            .unwrap();

        assert_eq!(
            xml,
            "<TrackRequest xmlns=\"http://fedex.com/ws/track/v4\">\
             <WebAuthenticationDetail><CspCredential><Key>csp</Key><Password>secret</Password>\
             </CspCredential><UserCredential><Key>user</Key><Password>pass</Password>\
             </UserCredential></WebAuthenticationDetail>\
             <ClientDetail><AccountNumber>510087000</AccountNumber><MeterNumber>118</MeterNumber>\
             <ClientProductId/><ClientProductVersion/></ClientDetail>\
             <TransactionDetail><CustomerTransactionId>Parcelgate</CustomerTransactionId>\
             </TransactionDetail>\
             <Version><ServiceId>trck</ServiceId><Major>4</Major><Intermediate>0</Intermediate>\
             <Minor>0</Minor></Version>\
             <PackageIdentifier><Value>077973360403984</Value>\
             <Type>TRACKING_NUMBER_OR_DOORTAG</Type></PackageIdentifier>\
             <IncludeDetailedScans>true</IncludeDetailedScans></TrackRequest>"
        );
    }

    #[test]
    fn identifier_type_is_configurable() {
        let credentials = Credentials::new("csp", "secret");
        let client = ClientDetail::default();
        let ctx = RequestContext {
            credentials: &credentials,
            client: &client,
            transaction_id: "Parcelgate",
        };
        let options = TrackingOptions {
            identifier_type: PackageIdentifierType::GroundPo,
        };

        let xml = build(&ctx, "PO-1", &options).to_xml_string().unwrap();
        assert!(xml.contains("<Type>GROUND_PO</Type>"));
    }
}
