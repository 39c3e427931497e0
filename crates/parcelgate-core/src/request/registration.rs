// `RegisterWebCspUserRequest`: enrol an end user under the provider's CSP
// credentials. No user credential or meter exists yet.

use parcelgate_api::XmlNode;

use super::{
    MeterField, REGISTRATION_VERSION, RequestContext, address_node, client_detail, root,
    transaction_detail, version_node, web_authentication_detail,
};
use crate::options::RegistrationOptions;

pub const TRANSACTION_ID: &str = "Registration Request";

pub fn build(ctx: &RequestContext<'_>, options: &RegistrationOptions) -> XmlNode {
    let contact = &options.contact;

    let person_name = XmlNode::new("PersonName")
        .leaf_if_present("FirstName", contact.first_name.as_deref())
        .leaf_if_present("LastName", contact.last_name.as_deref());

    let contact_node = XmlNode::new("Contact")
        .append_if(!person_name.is_empty(), || person_name)
        .leaf_if_present("CompanyName", contact.company.as_deref())
        .leaf_if_present("PhoneNumber", contact.phone.as_deref())
        .leaf_if_present("EMailAddress", contact.email.as_deref());

    root("RegisterWebCspUserRequest", REGISTRATION_VERSION)
        .with_child(web_authentication_detail(ctx.credentials, false))
        .with_child(client_detail(
            ctx.credentials,
            ctx.client,
            MeterField::Omit,
            true,
        ))
        .with_child(transaction_detail(TRANSACTION_ID))
        .with_child(version_node(REGISTRATION_VERSION))
        .with_children(
            options
                .categories
                .iter()
                .map(|category| XmlNode::leaf("Categories", category)),
        )
        .with_child(address_node("BillingAddress", &options.billing_address))
        .with_child(
            XmlNode::new("UserContactAndAddress")
                .with_child(contact_node)
                .with_child(address_node("Address", &options.address)),
        )
}
