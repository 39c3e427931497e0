//! Registration, subscription and version capture handlers.
//!
//! Register and subscribe save what the gateway issues into the active
//! profile so later runs send it.

use serde::Serialize;

use parcelgate_config::{IssuedCredentials, SecretStore};
use parcelgate_core::{
    FedEx, RegistrationOptions, SubscriptionOptions, VersionCaptureOptions, VersionInfo,
};

use crate::cli::{GlobalOpts, RegisterArgs, SubscribeArgs, VersionCaptureArgs};
use crate::config::{self, ActiveProfile};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Summaries ───────────────────────────────────────────────────────

#[derive(Serialize)]
struct RegistrationSummary {
    profile: String,
    user_key: Option<String>,
    password_stored_in: Option<&'static str>,
    version: Option<String>,
}

#[derive(Serialize)]
struct SubscriptionSummary {
    profile: String,
    meter_number: Option<String>,
    version: Option<String>,
}

#[derive(Serialize)]
struct VersionCaptureSummary {
    customer_transaction_id: Option<String>,
    version: Option<String>,
}

fn version_label(version: Option<&VersionInfo>) -> Option<String> {
    version.map(|v| {
        format!(
            "{} {}.{}.{}",
            v.service_id, v.major, v.intermediate, v.minor
        )
    })
}

fn store_label(store: SecretStore) -> &'static str {
    match store {
        SecretStore::Keyring => "keyring",
        SecretStore::Plaintext => "config file",
    }
}

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_owned()
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn register(
    carrier: &FedEx,
    profile: &ActiveProfile,
    args: RegisterArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let address = util::address(&args.address)?;
    let options = RegistrationOptions {
        categories: args.categories,
        billing_address: address.clone(),
        contact: util::contact(&args.contact),
        address,
    };

    let response = carrier.register(&options).await?;
    util::ensure_success("registration", &response)?;

    let stored = config::persist_issued(&profile.name, &IssuedCredentials::from(&response))?;
    let summary = RegistrationSummary {
        profile: profile.name.clone(),
        user_key: response.user_key.clone(),
        password_stored_in: stored.map(store_label),
        version: version_label(response.version.as_ref()),
    };

    let out = output::render_single(
        &global.output,
        &summary,
        |s| {
            output::detail_lines(&[
                ("Profile", s.profile.clone()),
                ("User key", or_dash(s.user_key.as_deref())),
                ("Password", or_dash(s.password_stored_in)),
                ("Version", or_dash(s.version.as_deref())),
            ])
        },
        |s| s.user_key.clone().unwrap_or_default(),
    )?;
    if !global.quiet {
        eprintln!(
            "{}",
            output::success_line(
                &format!("registered; credentials saved to profile '{}'", profile.name),
                output::should_color(&global.color),
            )
        );
    }
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn subscribe(
    carrier: &FedEx,
    profile: &ActiveProfile,
    args: SubscribeArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let address = util::address(&args.address)?;
    let options = SubscriptionOptions {
        csp_solution_id: args.csp_solution_id,
        contact: util::contact(&args.contact),
        billing_address: address.clone(),
        address,
    };

    let response = carrier.subscribe(&options).await?;
    util::ensure_success("subscription", &response)?;

    config::persist_issued(&profile.name, &IssuedCredentials::from(&response))?;
    let summary = SubscriptionSummary {
        profile: profile.name.clone(),
        meter_number: response.meter_number.clone(),
        version: version_label(response.version.as_ref()),
    };

    let out = output::render_single(
        &global.output,
        &summary,
        |s| {
            output::detail_lines(&[
                ("Profile", s.profile.clone()),
                ("Meter number", or_dash(s.meter_number.as_deref())),
                ("Version", or_dash(s.version.as_deref())),
            ])
        },
        |s| s.meter_number.clone().unwrap_or_default(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn capture_version(
    carrier: &FedEx,
    args: VersionCaptureArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let options = VersionCaptureOptions {
        origin_location_id: args.origin_location_id,
        vendor_product_platform: args.platform,
    };

    let response = carrier
        .capture_version(&args.transaction_id, &options)
        .await?;
    util::ensure_success("version capture", &response)?;

    let summary = VersionCaptureSummary {
        customer_transaction_id: response.customer_transaction_id.clone(),
        version: version_label(response.version.as_ref()),
    };
    let out = output::render_single(
        &global.output,
        &summary,
        |s| {
            output::detail_lines(&[
                (
                    "Transaction",
                    or_dash(s.customer_transaction_id.as_deref()),
                ),
                ("Version", or_dash(s.version.as_deref())),
            ])
        },
        |s| s.customer_transaction_id.clone().unwrap_or_default(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
