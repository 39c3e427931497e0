//! Shared helpers for command handlers: argument parsing into domain types.

use std::str::FromStr;

use parcelgate_core::{
    AddressType, CarrierResponse, Contact, CountryCode, Location, Package, UnitSystem,
};

use crate::cli::{AddressArgs, ContactArgs};
use crate::error::CliError;

/// Parse a strum code (`regular_pickup`, `fedex_box`, ...) named by `field`.
pub fn parse_code<T>(field: &str, raw: &str) -> Result<T, CliError>
where
    T: FromStr,
{
    T::from_str(&raw.trim().to_ascii_lowercase()).map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("unknown value '{raw}'"),
    })
}

pub fn parse_country(field: &str, raw: &str) -> Result<CountryCode, CliError> {
    CountryCode::new(raw).map_err(|e| CliError::Validation {
        field: field.into(),
        reason: e.to_string(),
    })
}

/// Parse `"weight[,length,width,height]"`. Missing dimensions are zero.
pub fn parse_package(raw: &str, units: UnitSystem) -> Result<Package, CliError> {
    let invalid = |reason: String| CliError::Validation {
        field: "package".into(),
        reason,
    };

    let numbers = raw
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| invalid(format!("'{part}' is not a number in '{raw}'")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let (weight, dimensions) = match numbers.as_slice() {
        [weight] => (*weight, [0.0; 3]),
        [weight, length, width, height] => (*weight, [*length, *width, *height]),
        _ => {
            return Err(invalid(format!(
                "expected \"weight\" or \"weight,length,width,height\", got '{raw}'"
            )));
        }
    };

    Ok(Package::new(weight, dimensions, units)?)
}

pub fn contact(args: &ContactArgs) -> Contact {
    Contact {
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        company: args.company.clone(),
        phone: args.phone.clone(),
        fax: args.fax.clone(),
        email: args.email.clone(),
    }
}

pub fn address(args: &AddressArgs) -> Result<Location, CliError> {
    Ok(Location {
        street_lines: args.street.clone(),
        city: args.city.clone(),
        province: args.province.clone(),
        postal_code: args.postal_code.clone(),
        country: args
            .country
            .as_deref()
            .map(|raw| parse_country("country", raw))
            .transpose()?,
        ..Location::default()
    })
}

/// Location from the loose `--from-*` / `--to-*` flags.
pub fn location(
    field: &str,
    city: Option<&str>,
    province: Option<&str>,
    postal_code: Option<&str>,
    country: &str,
) -> Result<Location, CliError> {
    Ok(Location {
        city: city.map(str::to_owned),
        province: province.map(str::to_owned),
        postal_code: postal_code.map(str::to_owned),
        country: Some(parse_country(field, country)?),
        ..Location::default()
    })
}

pub fn residential(mut location: Location) -> Location {
    location.address_type = Some(AddressType::Residential);
    location
}

/// Turn a protocol-level failure into an error so the process exits
/// non-zero.
pub fn ensure_success<R: CarrierResponse>(operation: &str, response: &R) -> Result<(), CliError> {
    if response.is_success() {
        Ok(())
    } else {
        Err(CliError::Rejected {
            operation: operation.into(),
            message: response.message().into(),
        })
    }
}

/// Minor currency units as a decimal amount (`3836` -> `38.36`).
pub fn format_price(minor: i64) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let minor = minor.unsigned_abs();
    format!("{sign}{}.{:02}", minor / 100, minor % 100)
}
