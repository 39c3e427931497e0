//! Rate quote handler.

use chrono::DateTime;
use tabled::Tabled;

use parcelgate_core::{FedEx, RateEstimate, RateOptions, UnitSystem};

use crate::cli::{GlobalOpts, RatesArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct RateRow {
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Currency")]
    currency: String,
    #[tabled(rename = "Delivery")]
    delivery: String,
}

impl From<&RateEstimate> for RateRow {
    fn from(r: &RateEstimate) -> Self {
        Self {
            service: r.service_name.clone(),
            code: r.service_code.clone(),
            price: util::format_price(r.total_price),
            currency: r.currency.clone(),
            delivery: r.delivery_date.clone().unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

fn rate_options(args: &RatesArgs) -> Result<RateOptions, CliError> {
    let ship_timestamp = args
        .ship_at
        .as_deref()
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw).map_err(|e| CliError::Validation {
                field: "ship-at".into(),
                reason: e.to_string(),
            })
        })
        .transpose()?;

    let mut options = RateOptions {
        ship_timestamp,
        service_type: args.service.clone(),
        saturday_pickup: args.saturday_pickup,
        saturday_delivery: args.saturday_delivery,
        ..RateOptions::default()
    };
    if let Some(ref raw) = args.dropoff {
        options.dropoff_type = util::parse_code("dropoff", raw)?;
    }
    if let Some(ref raw) = args.packaging {
        options.packaging_type = util::parse_code("packaging", raw)?;
    }
    Ok(options)
}

pub async fn handle(carrier: &FedEx, args: RatesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let units = if args.metric {
        UnitSystem::Metric
    } else {
        UnitSystem::Imperial
    };
    let packages = args
        .packages
        .iter()
        .map(|raw| util::parse_package(raw, units))
        .collect::<Result<Vec<_>, _>>()?;

    let origin = util::location(
        "from-country",
        args.from_city.as_deref(),
        args.from_province.as_deref(),
        args.from_postal_code.as_deref(),
        &args.from_country,
    )?;
    let mut destination = util::location(
        "to-country",
        args.to_city.as_deref(),
        args.to_province.as_deref(),
        args.to_postal_code.as_deref(),
        &args.to_country,
    )?;
    if args.residential {
        destination = util::residential(destination);
    }

    let options = rate_options(&args)?;
    let response = carrier
        .find_rates(&origin, &destination, &packages, &options)
        .await?;
    util::ensure_success("rate", &response)?;

    let out = output::render_list(
        &global.output,
        &response.rates,
        |r| RateRow::from(r),
        |r| r.service_code.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
