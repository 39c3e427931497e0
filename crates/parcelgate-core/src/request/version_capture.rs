// `VersionCaptureRequest`: report the client platform to the gateway.

use parcelgate_api::XmlNode;

use super::{
    MeterField, RequestContext, VERSION_CAPTURE_VERSION, client_detail, root, transaction_detail,
    version_node, web_authentication_detail,
};
use crate::options::VersionCaptureOptions;

/// The caller's `transaction_id` is echoed back in the reply.
pub fn build(
    ctx: &RequestContext<'_>,
    transaction_id: &str,
    options: &VersionCaptureOptions,
) -> XmlNode {
    root("VersionCaptureRequest", VERSION_CAPTURE_VERSION)
        .with_child(web_authentication_detail(ctx.credentials, true))
        .with_child(client_detail(
            ctx.credentials,
            ctx.client,
            MeterField::Current,
            true,
        ))
        .with_child(transaction_detail(transaction_id))
        .with_child(version_node(VERSION_CAPTURE_VERSION))
        .leaf_if_present("OriginLocationId", options.origin_location_id.as_deref())
        .leaf_if_present(
            "VendorProductPlatform",
            options.vendor_product_platform.as_deref(),
        )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::config::{ClientDetail, Credentials};

    #[test]
    fn echoes_transaction_id_and_platform() {
        let credentials = Credentials::new("csp", "secret").with_meter_number("118");
        let client = ClientDetail {
            region: Some("CA".into()),
            ..ClientDetail::default()
        };
        let ctx = RequestContext {
            credentials: &credentials,
            client: &client,
            transaction_id: "configured",
        };
        let options = VersionCaptureOptions {
            origin_location_id: Some("VXYZ".into()),
            vendor_product_platform: Some("Windows OS".into()),
        };

        let xml = build(&ctx, "Version Capture Request", &options)
            .to_xml_string()
            .unwrap();

        assert!(xml.contains("<MeterNumber>118</MeterNumber>"));
        assert!(xml.contains("<Region>CA</Region>"));
        assert!(xml.contains(
            "<CustomerTransactionId>Version Capture Request</CustomerTransactionId>"
        ));
        assert!(xml.ends_with(
            "<OriginLocationId>VXYZ</OriginLocationId>\
             <VendorProductPlatform>Windows OS</VendorProductPlatform></VersionCaptureRequest>"
        ));
    }
}
