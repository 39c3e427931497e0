//! Tracking handler.

use tabled::Tabled;

use parcelgate_core::{CountryCode, FedEx, Location, ShipmentEvent, TrackingOptions};

use crate::cli::{GlobalOpts, OutputFormat, TrackArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "Time (UTC)")]
    time: String,
    #[tabled(rename = "Event")]
    name: String,
    #[tabled(rename = "Location")]
    location: String,
}

impl From<&ShipmentEvent> for EventRow {
    fn from(e: &ShipmentEvent) -> Self {
        Self {
            time: e
                .time
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".into()),
            name: e.name.clone(),
            location: e.location.as_ref().map(place).unwrap_or_default(),
        }
    }
}

/// `CITY, PROVINCE, COUNTRY` with absent parts skipped.
fn place(location: &Location) -> String {
    [
        location.city.as_deref(),
        location.province.as_deref(),
        location.country.as_ref().map(CountryCode::as_str),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(", ")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(carrier: &FedEx, args: TrackArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut options = TrackingOptions::default();
    if let Some(ref raw) = args.id_type {
        options.identifier_type = util::parse_code("id-type", raw)?;
    }

    let response = carrier.find_tracking_info(&args.number, &options).await?;
    util::ensure_success("tracking", &response)?;

    if matches!(global.output, OutputFormat::Table) && !global.quiet {
        let destination = response
            .destination
            .as_ref()
            .map(place)
            .unwrap_or_default();
        eprintln!(
            "{} -> {destination}",
            response.tracking_number.as_deref().unwrap_or(&args.number)
        );
    }

    let out = output::render_list(
        &global.output,
        &response.shipment_events,
        |e| EventRow::from(e),
        |e| {
            let time = e.time.map(|t| t.to_rfc3339()).unwrap_or_default();
            format!("{time}\t{}", e.name)
        },
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
