// ── Runtime carrier configuration ──
//
// These types describe *who* talks to the gateway and *how*. They carry
// credential data and client identity, but never touch disk. The CLI
// builds a `CarrierConfig` from its profile and hands it in.

use secrecy::{ExposeSecret, SecretString};

use parcelgate_api::TransportConfig;

use crate::error::CoreError;

/// Default `CustomerTransactionId` for rate and tracking requests.
pub const DEFAULT_TRANSACTION_ID: &str = "Parcelgate";

/// Provider and user credentials.
///
/// The CSP key/password identify the integrating software and are always
/// required. The remaining fields are issued to an end user over time:
/// registration yields `user_key` / `user_password`, subscription yields
/// `meter_number`.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub csp_key: String,
    pub csp_password: SecretString,
    pub account_number: Option<String>,
    pub meter_number: Option<String>,
    pub user_key: Option<String>,
    pub user_password: Option<SecretString>,
}

impl Credentials {
    pub fn new(csp_key: impl Into<String>, csp_password: impl Into<String>) -> Self {
        Self {
            csp_key: csp_key.into(),
            csp_password: SecretString::from(csp_password.into()),
            account_number: None,
            meter_number: None,
            user_key: None,
            user_password: None,
        }
    }

    pub fn with_account_number(mut self, account: impl Into<String>) -> Self {
        self.account_number = Some(account.into());
        self
    }

    pub fn with_meter_number(mut self, meter: impl Into<String>) -> Self {
        self.meter_number = Some(meter.into());
        self
    }

    pub fn with_user(mut self, key: impl Into<String>, password: impl Into<String>) -> Self {
        self.user_key = Some(key.into());
        self.user_password = Some(SecretString::from(password.into()));
        self
    }

    /// Ensure the provider credentials are present.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.csp_key.trim().is_empty() {
            return Err(CoreError::Config {
                message: "csp_key is required".into(),
            });
        }
        if self.csp_password.expose_secret().trim().is_empty() {
            return Err(CoreError::Config {
                message: "csp_password is required".into(),
            });
        }
        Ok(())
    }
}

/// Identity of the integrating software, sent in every `ClientDetail`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientDetail {
    pub product_id: Option<String>,
    pub product_version: Option<String>,
    /// Region code (registration and version capture only).
    pub region: Option<String>,
}

/// Configuration for one carrier facade.
///
/// Built by the CLI, passed to `FedEx`; core never reads config files.
#[derive(Debug, Clone)]
pub struct CarrierConfig {
    pub credentials: Credentials,
    pub client: ClientDetail,
    /// Transaction id for rate and tracking requests.
    pub customer_transaction_id: String,
    /// Send requests to the beta gateway.
    pub test_mode: bool,
    pub transport: TransportConfig,
}

impl CarrierConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            client: ClientDetail::default(),
            customer_transaction_id: DEFAULT_TRANSACTION_ID.into(),
            test_mode: false,
            transport: TransportConfig::default(),
        }
    }

    pub fn with_client(mut self, client: ClientDetail) -> Self {
        self.client = client;
        self
    }

    pub fn with_test_mode(mut self, test: bool) -> Self {
        self.test_mode = test;
        self
    }

    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_credentials_are_required() {
        assert!(Credentials::new("key", "secret").validate().is_ok());
        assert!(matches!(
            Credentials::new("", "secret").validate(),
            Err(CoreError::Config { .. })
        ));
        assert!(matches!(
            Credentials::new("key", "  ").validate(),
            Err(CoreError::Config { .. })
        ));
    }

    #[test]
    fn debug_output_redacts_passwords() {
        let creds = Credentials::new("key", "hunter2").with_user("user", "swordfish");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("swordfish"));
    }

    #[test]
    fn defaults_to_live_gateway_and_default_transaction_id() {
        let config = CarrierConfig::new(Credentials::new("key", "secret"));
        assert!(!config.test_mode);
        assert_eq!(config.customer_transaction_id, DEFAULT_TRANSACTION_ID);
    }
}
