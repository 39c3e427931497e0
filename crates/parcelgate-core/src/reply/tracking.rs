// `TrackReply` parsing.
//
// Scans without a country are placeholders and are dropped. The
// origin-created scan (`OC`) carries no usable place. Scans are returned
// oldest first whatever order the gateway used; scans whose timestamp
// cannot be read keep their document order after the dated ones.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use parcelgate_api::Element;
use tracing::warn;

use super::{Exchange, Reply, text};
use crate::error::CoreError;
use crate::model::{CountryCode, Location, ShipmentEvent, TrackingResponse};

const ORIGIN_CREATED: &str = "OC";

pub fn parse_tracking(exchange: &Exchange<'_>) -> Result<TrackingResponse, CoreError> {
    let reply = Reply::open(exchange, "TrackReply")?;
    let response = reply.envelope(exchange);

    let details = reply
        .root()
        .child("TrackDetails")
        .filter(|_| reply.status.success);

    let Some(details) = details else {
        return Ok(TrackingResponse {
            response,
            tracking_number: None,
            destination: None,
            shipment_events: Vec::new(),
        });
    };

    let destination = details.child("DestinationAddress").map(|address| Location {
        city: text(address, "City"),
        province: text(address, "StateOrProvinceCode"),
        country: country(address.text_at("CountryCode")),
        ..Location::default()
    });

    let mut shipment_events: Vec<ShipmentEvent> =
        details.children_named("Events").filter_map(event).collect();
    shipment_events.sort_by_key(|event| (event.time.is_none(), event.time));

    Ok(TrackingResponse {
        response,
        tracking_number: text(details, "TrackingNumber"),
        destination,
        shipment_events,
    })
}

fn event(node: &Element) -> Option<ShipmentEvent> {
    let country_code = node.non_blank_text_at("Address/CountryCode")?;

    let timestamp = node.text_at("Timestamp");
    let time = parse_timestamp(timestamp);
    if time.is_none() {
        warn!(timestamp, "scan has an unreadable timestamp");
    }

    let location = (node.text_at("EventType") != ORIGIN_CREATED).then(|| Location {
        city: text(node, "Address/City"),
        province: text(node, "Address/StateOrProvinceCode"),
        postal_code: text(node, "Address/PostalCode"),
        country: country(country_code),
        ..Location::default()
    });

    Some(ShipmentEvent {
        name: node.text_at("EventDescription").to_owned(),
        time,
        location,
    })
}

fn country(code: &str) -> Option<CountryCode> {
    CountryCode::new(code).ok()
}

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];
const LOCAL_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// RFC 3339 or one of its common relatives. Timestamps without an offset
/// are read as UTC and a bare date as midnight UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return Some(time.with_timezone(&Utc));
    }
    if let Some(time) = OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(raw, format).ok())
    {
        return Some(time.with_timezone(&Utc));
    }
    if let Some(time) = LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
    {
        return Some(time.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use chrono::TimeZone;

    use super::*;
    use crate::model::CarrierResponse;

    fn scan(kind: &str, description: &str, timestamp: &str, country: &str) -> String {
        format!(
            "<Events><Timestamp>{timestamp}</Timestamp><EventType>{kind}</EventType>\
             <EventDescription>{description}</EventDescription>\
             <Address><City>MEMPHIS</City><StateOrProvinceCode>TN</StateOrProvinceCode>\
             <PostalCode>38118</PostalCode><CountryCode>{country}</CountryCode></Address></Events>"
        )
    }

    fn reply(severity: &str, events: &str) -> String {
        format!(
            "<TrackReply><Notifications><Severity>{severity}</Severity><Code>0</Code>\
             <Message>Request was successfully processed.</Message></Notifications>\
             <TrackDetails><TrackingNumber>077973360403984</TrackingNumber>\
             <DestinationAddress><City>SAULT STE MARIE</City>\
             <StateOrProvinceCode>ON</StateOrProvinceCode><CountryCode>CA</CountryCode>\
             </DestinationAddress>{events}</TrackDetails></TrackReply>"
        )
    }

    fn parse(body: &str) -> TrackingResponse {
        let exchange = Exchange {
            request: "",
            reply: body,
            test: false,
        };
        parse_tracking(&exchange).unwrap()
    }

    #[test]
    fn events_are_sorted_and_placeholders_dropped() {
        let events = [
            scan("DL", "Delivered", "2024-05-03T14:05:00-04:00", "US"),
            scan("AR", "Arrived", "2024-05-02T08:00:00-04:00", "US"),
            scan("PX", "Placeholder", "2024-05-01T00:00:00-04:00", ""),
            scan("OC", "Shipment information sent", "2024-05-01T09:30:00-04:00", "US"),
        ]
        .concat();
        let response = parse(&reply("SUCCESS", &events));

        assert!(response.is_success());
        let names: Vec<_> = response.shipment_events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Shipment information sent", "Arrived", "Delivered"]);
        assert_eq!(
            response.shipment_events[0].time,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 13, 30, 0).unwrap())
        );
    }

    #[test]
    fn origin_created_scan_has_no_location() {
        let events = [
            scan("OC", "Shipment information sent", "2024-05-01T09:30:00-04:00", "US"),
            scan("AR", "Arrived", "2024-05-02T08:00:00-04:00", "US"),
        ]
        .concat();
        let response = parse(&reply("SUCCESS", &events));

        assert_eq!(response.shipment_events[0].location, None);
        let arrived = response.shipment_events[1].location.as_ref().unwrap();
        assert_eq!(arrived.city.as_deref(), Some("MEMPHIS"));
        assert_eq!(arrived.postal_code.as_deref(), Some("38118"));
        assert_eq!(arrived.country.as_ref().unwrap().as_str(), "US");
    }

    #[test]
    fn tracking_number_and_destination_are_read() {
        let response = parse(&reply("SUCCESS", ""));
        assert_eq!(response.tracking_number.as_deref(), Some("077973360403984"));
        let destination = response.destination.unwrap();
        assert_eq!(destination.city.as_deref(), Some("SAULT STE MARIE"));
        assert_eq!(destination.province.as_deref(), Some("ON"));
        assert_eq!(destination.country.unwrap().as_str(), "CA");
    }

    #[test]
    fn failed_reply_has_no_details() {
        let response = parse(&reply(
            "ERROR",
            &scan("AR", "Arrived", "2024-05-02T08:00:00-04:00", "US"),
        ));
        assert!(!response.is_success());
        assert_eq!(response.tracking_number, None);
        assert!(response.shipment_events.is_empty());
    }

    #[test]
    fn timestamp_variants_are_all_read() {
        let events = [
            scan("AR", "Offset", "2024-05-02T08:00:00-04:00", "US"),
            scan("AR", "Zulu", "2024-05-02T11:00:00Z", "US"),
            scan("AR", "Spaced", "2024-05-02 08:00:00", "US"),
            scan("AR", "Compact offset", "2024-05-02T08:00:00-0400", "US"),
            scan("AR", "Date only", "2024-05-02", "US"),
        ]
        .concat();
        let response = parse(&reply("SUCCESS", &events));

        let times: Vec<_> = response
            .shipment_events
            .iter()
            .map(|e| (e.name.as_str(), e.time))
            .collect();
        let at = |h| Some(Utc.with_ymd_and_hms(2024, 5, 2, h, 0, 0).unwrap());
        assert_eq!(
            times,
            [
                ("Date only", at(0)),
                ("Spaced", at(8)),
                ("Zulu", at(11)),
                ("Offset", at(12)),
                ("Compact offset", at(12)),
            ]
        );
    }

    #[test]
    fn unreadable_timestamp_keeps_the_scan_last() {
        let events = [
            scan("AR", "Broken", "yesterday", "US"),
            scan("AR", "Arrived", "2024-05-02T08:00:00", "US"),
            scan("PX", "Placeholder", "2024-05-01T00:00:00", ""),
        ]
        .concat();
        let response = parse(&reply("SUCCESS", &events));

        let names: Vec<_> = response.shipment_events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Arrived", "Broken"]);
        assert_eq!(
            response.shipment_events[0].time,
            Some(Utc.with_ymd_and_hms(2024, 5, 2, 8, 0, 0).unwrap())
        );
        assert_eq!(response.shipment_events[1].time, None);
    }
}
