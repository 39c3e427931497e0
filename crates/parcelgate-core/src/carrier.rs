// ── Carrier facade ──
//
// The public entry point. Each operation snapshots the credentials,
// builds the request document, submits it through the transport and
// parses the reply. Successful registration and subscription replies
// write the issued credentials back so later requests carry them.

use std::sync::{PoisonError, RwLock};

use chrono::Local;
use secrecy::SecretString;
use tracing::{debug, info, trace};

use parcelgate_api::{HttpTransport, Transport, XmlNode};

use crate::config::{CarrierConfig, ClientDetail, Credentials};
use crate::error::CoreError;
use crate::model::{
    CarrierResponse, Location, Package, RateResponse, RegistrationResponse, SubscriptionResponse,
    TrackingResponse, VersionCaptureResponse,
};
use crate::options::{
    RateOptions, RegistrationOptions, SubscriptionOptions, TrackingOptions, VersionCaptureOptions,
};
use crate::reply::rate::Shipment;
use crate::reply::{self, Exchange};
use crate::request::{self, RequestContext};

/// FedEx web-services client.
///
/// Credentials are held behind a lock so that registration and
/// subscription can record what the gateway issued. The lock is never held
/// across an await, but a request built while another task registers may
/// still carry the old values: use one facade per credential set from one
/// task at a time.
pub struct FedEx<T: Transport = HttpTransport> {
    credentials: RwLock<Credentials>,
    client: ClientDetail,
    transaction_id: String,
    test_mode: bool,
    transport: T,
}

impl FedEx<HttpTransport> {
    /// Facade over the HTTPS transport described by `config.transport`.
    pub fn http(config: CarrierConfig) -> Result<Self, CoreError> {
        let transport = HttpTransport::new(&config.transport)?;
        Self::new(config, transport)
    }
}

impl<T: Transport> FedEx<T> {
    /// Fails when the CSP key or password is missing.
    pub fn new(config: CarrierConfig, transport: T) -> Result<Self, CoreError> {
        config.credentials.validate()?;

        Ok(Self {
            credentials: RwLock::new(config.credentials),
            client: config.client,
            transaction_id: config.customer_transaction_id,
            test_mode: config.test_mode,
            transport,
        })
    }

    /// Snapshot of the current credentials.
    pub fn credentials(&self) -> Credentials {
        self.credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_test_mode(&self) -> bool {
        self.test_mode
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Register an end user. On success the issued user key and password
    /// replace the stored ones.
    pub async fn register(
        &self,
        options: &RegistrationOptions,
    ) -> Result<RegistrationResponse, CoreError> {
        let credentials = self.credentials();
        let document = serialise(&request::registration::build(
            &self.context(&credentials),
            options,
        ))?;
        let body = self.submit("register", &document).await?;

        let response =
            reply::registration::parse_registration(&self.exchange(&document, &body))?;
        if let (true, Some(key), Some(password)) = (
            response.is_success(),
            &response.user_key,
            &response.user_password,
        ) {
            self.update_credentials(|creds| {
                creds.user_key = Some(key.clone());
                creds.user_password = Some(SecretString::from(password.clone()));
            });
            info!("stored user credentials issued by registration");
        }
        Ok(response)
    }

    /// Subscribe the registered user. On success the issued meter number
    /// replaces the stored one.
    pub async fn subscribe(
        &self,
        options: &SubscriptionOptions,
    ) -> Result<SubscriptionResponse, CoreError> {
        let credentials = self.credentials();
        let document = serialise(&request::subscription::build(
            &self.context(&credentials),
            options,
        )?)?;
        let body = self.submit("subscribe", &document).await?;

        let response =
            reply::registration::parse_subscription(&self.exchange(&document, &body))?;
        if let (true, Some(meter)) = (response.is_success(), &response.meter_number) {
            self.update_credentials(|creds| creds.meter_number = Some(meter.clone()));
            info!(meter_number = %meter, "stored meter number issued by subscription");
        }
        Ok(response)
    }

    pub async fn capture_version(
        &self,
        transaction_id: &str,
        options: &VersionCaptureOptions,
    ) -> Result<VersionCaptureResponse, CoreError> {
        let credentials = self.credentials();
        let document = serialise(&request::version_capture::build(
            &self.context(&credentials),
            transaction_id,
            options,
        ))?;
        let body = self.submit("version_capture", &document).await?;

        reply::registration::parse_version_capture(&self.exchange(&document, &body))
    }

    /// Quote rates for `packages` from `origin` to `destination`.
    pub async fn find_rates(
        &self,
        origin: &Location,
        destination: &Location,
        packages: &[Package],
        options: &RateOptions,
    ) -> Result<RateResponse, CoreError> {
        let ship_timestamp = options
            .ship_timestamp
            .unwrap_or_else(|| Local::now().fixed_offset());

        let credentials = self.credentials();
        let document = serialise(&request::rate::build(
            &self.context(&credentials),
            origin,
            destination,
            packages,
            options,
            ship_timestamp,
        )?)?;
        let body = self.submit("rate", &document).await?;

        let shipment = Shipment {
            origin,
            destination,
            packages,
        };
        let response = reply::rate::parse_rates(&self.exchange(&document, &body), &shipment)?;
        debug!(rates = response.rates.len(), "rate reply parsed");
        Ok(response)
    }

    pub async fn find_tracking_info(
        &self,
        tracking_number: &str,
        options: &TrackingOptions,
    ) -> Result<TrackingResponse, CoreError> {
        let credentials = self.credentials();
        let document = serialise(&request::tracking::build(
            &self.context(&credentials),
            tracking_number,
            options,
        ))?;
        let body = self.submit("track", &document).await?;

        let response = reply::tracking::parse_tracking(&self.exchange(&document, &body))?;
        debug!(
            events = response.shipment_events.len(),
            "tracking reply parsed"
        );
        Ok(response)
    }

    // ── Internals ────────────────────────────────────────────────────

    fn context<'a>(&'a self, credentials: &'a Credentials) -> RequestContext<'a> {
        RequestContext {
            credentials,
            client: &self.client,
            transaction_id: &self.transaction_id,
        }
    }

    fn exchange<'a>(&self, request: &'a str, reply: &'a str) -> Exchange<'a> {
        Exchange {
            request,
            reply,
            test: self.test_mode,
        }
    }

    async fn submit(&self, operation: &'static str, request: &str) -> Result<String, CoreError> {
        debug!(
            operation,
            test = self.test_mode,
            bytes = request.len(),
            "submitting request"
        );
        let reply = self.transport.submit(request, self.test_mode).await?;
        // Registration replies carry the issued password.
        if operation != "register" {
            trace!(operation, reply = %reply, "reply body");
        }
        Ok(reply)
    }

    fn update_credentials(&self, update: impl FnOnce(&mut Credentials)) {
        let mut guard = self
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        update(&mut *guard);
    }
}

fn serialise(node: &XmlNode) -> Result<String, CoreError> {
    Ok(node.to_xml_string()?)
}
