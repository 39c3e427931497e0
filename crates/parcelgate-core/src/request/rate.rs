// `RateRequest`: quote every available service for a set of packages.
//
// Element order follows the v7 schema sequence; the gateway rejects
// documents whose children are out of order.

use chrono::{DateTime, FixedOffset, SecondsFormat};

use parcelgate_api::XmlNode;

use super::{
    RATE_VERSION, RequestContext, address_node, party_node, root, standard_header, version_node,
};
use crate::codes::{Accessibility, CarrierCode};
use crate::error::CoreError;
use crate::model::{Location, Package};
use crate::options::{DEFAULT_RATE_REQUEST_TYPE, DangerousGoods, RateOptions};
use crate::units::{dimension_values, format_decimal, weight_value};

/// Build a rate request.
///
/// The unit system of the first package is used for every line item.
/// `ship_timestamp` is written with second precision.
pub fn build(
    ctx: &RequestContext<'_>,
    origin: &Location,
    destination: &Location,
    packages: &[Package],
    options: &RateOptions,
    ship_timestamp: DateTime<FixedOffset>,
) -> Result<XmlNode, CoreError> {
    let Some(first) = packages.first() else {
        return Err(CoreError::validation(
            "packages",
            "at least one package is required",
        ));
    };
    let imperial = first.is_imperial();

    let customs = options
        .customs_value
        .map(|value| customs_detail(value, first.currency.as_deref()))
        .transpose()?;

    let shipper = options.shipper.as_ref().unwrap_or(origin);
    let separate_origin = options.shipper.as_ref().is_some_and(|s| s != origin);

    let shipment = XmlNode::new("RequestedShipment")
        .with_child(XmlNode::leaf(
            "ShipTimestamp",
            ship_timestamp.to_rfc3339_opts(SecondsFormat::Secs, false),
        ))
        .with_child(XmlNode::leaf("DropoffType", options.dropoff_type.code()))
        .leaf_if_present("ServiceType", options.service_type.as_deref())
        .with_child(XmlNode::leaf("PackagingType", options.packaging_type.code()))
        .with_child(party_node("Shipper", shipper))
        .with_child(party_node("Recipient", destination))
        .append_if(separate_origin, || party_node("Origin", origin))
        .append_if_present(options.shipping_charges.as_ref().map(|charges| {
            XmlNode::new("ShippingChargesPayment")
                .with_child(XmlNode::leaf("PaymentType", charges.payment_type.code()))
                .with_child(
                    XmlNode::new("Payor")
                        .leaf_if_present("AccountNumber", charges.payor_account_number.as_deref())
                        .leaf_if_present("CountryCode", charges.payor_country.as_ref()),
                )
        }))
        .append_if(options.has_shipment_special_services(), || {
            shipment_special_services(options)
        })
        .append_if_present(customs)
        .with_child(XmlNode::leaf(
            "RateRequestTypes",
            options
                .rate_request_types
                .as_deref()
                .unwrap_or(DEFAULT_RATE_REQUEST_TYPE),
        ))
        .with_child(XmlNode::leaf("PackageCount", packages.len()))
        .with_child(XmlNode::leaf("PackageDetail", "INDIVIDUAL_PACKAGES"))
        .with_children(
            packages
                .iter()
                .enumerate()
                .map(|(index, package)| line_item(index + 1, package, imperial, options)),
        );

    Ok(root("RateRequest", RATE_VERSION)
        .with_children(standard_header(ctx))
        .with_child(version_node(RATE_VERSION))
        .with_child(XmlNode::leaf("ReturnTransitAndCommit", true))
        .leaf_if_present("CarrierCodes", options.carrier_code.map(CarrierCode::code))
        .with_child(shipment))
}

/// `InternationalDetail/CustomsValue`. Only the integer part of the
/// value is declared.
fn customs_detail(value: f64, currency: Option<&str>) -> Result<XmlNode, CoreError> {
    if !value.is_finite() {
        return Err(CoreError::validation(
            "customs_value",
            format!("must be a finite number, got {value}"),
        ));
    }

    Ok(XmlNode::new("InternationalDetail").with_child(
        XmlNode::new("CustomsValue")
            .with_child(XmlNode::leaf_or_empty("Currency", currency))
            .with_child(XmlNode::leaf("Amount", format!("{:.2}", value.trunc()))),
    ))
}

fn shipment_special_services(options: &RateOptions) -> XmlNode {
    let service_types = [
        (options.saturday_pickup, "SATURDAY_PICKUP"),
        (options.saturday_delivery, "SATURDAY_DELIVERY"),
        (options.dry_ice.is_some(), "DRY_ICE"),
        (options.hold_at_location.is_some(), "HOLD_AT_LOCATION"),
        (options.home_delivery_premium.is_some(), "HOME_DELIVERY_PREMIUM"),
    ];

    let mut node = XmlNode::new("SpecialServicesRequested").with_children(
        service_types
            .into_iter()
            .filter(|(requested, _)| *requested)
            .map(|(_, code)| XmlNode::leaf("SpecialServiceTypes", code)),
    );

    if let Some(cod) = &options.cod {
        node.push(
            XmlNode::new("CodDetail")
                .with_child(XmlNode::leaf("CollectionType", cod.collection_type.code())),
        );
        node.push(
            XmlNode::new("CodCollectionAmount")
                .with_child(XmlNode::leaf("Currency", &cod.currency))
                .with_child(XmlNode::leaf("Amount", format_decimal(cod.amount))),
        );
    }

    if let Some(location) = &options.hold_at_location {
        node.push(
            XmlNode::new("HoldAtLocationDetail")
                .leaf_if_present("PhoneNumber", location.phone.as_deref())
                .with_child(address_node("Address", location)),
        );
    }

    if let Some(dry_ice) = &options.dry_ice {
        node.push(
            XmlNode::new("ShipmentDryIceDetail")
                .leaf_if_present("PackageCount", dry_ice.package_count)
                .with_child(
                    XmlNode::new("TotalWeight")
                        .with_child(XmlNode::leaf("Units", dry_ice.weight_units.code()))
                        .with_child(XmlNode::leaf("Value", format_decimal(dry_ice.weight))),
                ),
        );
    }

    if let Some(premium) = &options.home_delivery_premium {
        node.push(
            XmlNode::new("HomeDeliveryPremiumDetail")
                .with_child(XmlNode::leaf(
                    "HomeDeliveryPremiumType",
                    premium.premium_type.code(),
                ))
                .with_child(XmlNode::leaf("Date", premium.date.format("%Y-%m-%d")))
                .leaf_if_present("PhoneNumber", premium.phone.as_deref()),
        );
    }

    node
}

fn line_item(sequence: usize, package: &Package, imperial: bool, options: &RateOptions) -> XmlNode {
    let (weight_units, length_units) = if imperial { ("LB", "IN") } else { ("KG", "CM") };

    let dimensions = dimension_values(package, imperial).map(|[length, width, height]| {
        XmlNode::new("Dimensions")
            .with_child(XmlNode::leaf("Length", length))
            .with_child(XmlNode::leaf("Width", width))
            .with_child(XmlNode::leaf("Height", height))
            .with_child(XmlNode::leaf("Units", length_units))
    });

    let dry_ice = package.dry_ice_kilograms();
    let needs_services = options.dangerous_goods.is_some()
        || options.signature_option.is_some()
        || options.non_standard_container
        || dry_ice.is_some();

    XmlNode::new("RequestedPackageLineItems")
        .with_child(XmlNode::leaf("SequenceNumber", format!("{sequence:03}")))
        .with_child(
            XmlNode::new("Weight")
                .with_child(XmlNode::leaf("Units", weight_units))
                .with_child(XmlNode::leaf(
                    "Value",
                    format_decimal(weight_value(package, imperial)),
                )),
        )
        .append_if_present(dimensions)
        .append_if(needs_services, || package_special_services(options, dry_ice))
}

fn package_special_services(options: &RateOptions, dry_ice_kilograms: Option<f64>) -> XmlNode {
    let service_types = [
        (options.dangerous_goods.is_some(), "DANGEROUS_GOODS"),
        (options.signature_option.is_some(), "SIGNATURE_OPTION"),
        (options.non_standard_container, "NON_STANDARD_CONTAINER"),
        (dry_ice_kilograms.is_some(), "DRY_ICE"),
    ];

    XmlNode::new("SpecialServicesRequested")
        .with_children(
            service_types
                .into_iter()
                .filter(|(requested, _)| *requested)
                .map(|(_, code)| XmlNode::leaf("SpecialServiceTypes", code)),
        )
        .append_if_present(options.dangerous_goods.as_ref().map(dangerous_goods_detail))
        .append_if_present(dry_ice_kilograms.map(|kilograms| {
            XmlNode::new("DryIceWeight")
                .with_child(XmlNode::leaf("Units", "KG"))
                .with_child(XmlNode::leaf("Value", format_decimal(kilograms)))
        }))
        .append_if_present(options.signature_option.map(|option| {
            XmlNode::new("SignatureOptionDetail")
                .with_child(XmlNode::leaf("OptionType", option.code()))
        }))
}

/// Certificate fields are written even when unset.
fn dangerous_goods_detail(goods: &DangerousGoods) -> XmlNode {
    let certificate = [
        ("DotProperShippingName", &goods.dot_proper_shipping_name),
        ("DotHazardClassOrDivision", &goods.dot_hazard_class_or_division),
        ("DotIdNumber", &goods.dot_id_number),
        ("DotLabelType", &goods.dot_label_type),
        ("PackingGroup", &goods.packing_group),
        ("Quantity", &goods.quantity),
        ("Units", &goods.units),
        (
            "TwentyFourHourEmergencyResponseContactNumber",
            &goods.emergency_contact_number,
        ),
        (
            "TwentyFourHourEmergencyResponseContactName",
            &goods.emergency_contact_name,
        ),
    ];

    XmlNode::new("DangerousGoodsDetail")
        .leaf_if_present("Accessibility", goods.accessibility.map(Accessibility::code))
        .with_child(XmlNode::leaf_or_empty(
            "CargoAircraftOnly",
            goods.cargo_aircraft_only,
        ))
        .with_child(
            XmlNode::new("HazMatCertificateData").with_children(
                certificate
                    .into_iter()
                    .map(|(name, value)| XmlNode::leaf_or_empty(name, value.as_deref())),
            ),
        )
}
