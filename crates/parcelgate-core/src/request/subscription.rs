// `SubscriptionRequest`: obtain a meter number for a registered user.

use secrecy::ExposeSecret;

use parcelgate_api::XmlNode;

use super::{
    MeterField, RequestContext, SUBSCRIPTION_VERSION, address_node, client_detail, root,
    transaction_detail, version_node, web_authentication_detail,
};
use crate::error::CoreError;
use crate::options::SubscriptionOptions;

pub const TRANSACTION_ID: &str = "Subscription Request";

const CSP_TYPE: &str = "CERTIFIED_SOLUTION_PROVIDER";

/// Requires the user key and password issued by registration.
pub fn build(
    ctx: &RequestContext<'_>,
    options: &SubscriptionOptions,
) -> Result<XmlNode, CoreError> {
    let credentials = ctx.credentials;
    if credentials.user_key.as_deref().is_none_or(str::is_empty) {
        return Err(CoreError::validation(
            "user_key",
            "subscription requires a registered user key",
        ));
    }
    if credentials
        .user_password
        .as_ref()
        .is_none_or(|password| password.expose_secret().is_empty())
    {
        return Err(CoreError::validation(
            "user_password",
            "subscription requires a registered user password",
        ));
    }

    let contact = &options.contact;
    let contact_node = XmlNode::new("Contact")
        .leaf_if_present("PersonName", contact.full_name())
        .leaf_if_present("CompanyName", contact.company.as_deref())
        .leaf_if_present("PhoneNumber", contact.phone.as_deref())
        .leaf_if_present("FaxNumber", contact.fax.as_deref())
        .leaf_if_present("EMailAddress", contact.email.as_deref());

    let subscriber = XmlNode::new("Subscriber")
        .with_child(XmlNode::leaf_or_empty(
            "AccountNumber",
            credentials.account_number.as_deref(),
        ))
        .with_child(contact_node)
        .with_child(address_node("Address", &options.address));

    Ok(root("SubscriptionRequest", SUBSCRIPTION_VERSION)
        .with_child(web_authentication_detail(credentials, true))
        .with_child(client_detail(
            credentials,
            ctx.client,
            MeterField::Empty,
            false,
        ))
        .with_child(transaction_detail(TRANSACTION_ID))
        .with_child(version_node(SUBSCRIPTION_VERSION))
        .leaf_if_present("CspSolutionId", options.csp_solution_id.as_deref())
        .with_child(XmlNode::leaf("CspType", CSP_TYPE))
        .with_child(subscriber)
        .with_child(address_node(
            "AccountShippingAddress",
            &options.billing_address,
        )))
}
