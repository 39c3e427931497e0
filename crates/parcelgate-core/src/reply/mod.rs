// ── Reply parsers ──
//
// Replies are classified by their first `Notifications` element and then
// mined for operation-specific fields. Only a body that is not XML at all
// is an error; every other failure is reported through `success` and
// `message` on the returned response.

pub mod rate;
pub mod registration;
pub mod tracking;

use parcelgate_api::{Document, Element};
use tracing::debug;

use crate::error::CoreError;
use crate::model::{Response, VersionInfo};

const SUCCESS_SEVERITIES: [&str; 3] = ["SUCCESS", "WARNING", "NOTE"];

/// One request/reply round trip, as handed to a parser.
#[derive(Debug, Clone, Copy)]
pub struct Exchange<'a> {
    pub request: &'a str,
    pub reply: &'a str,
    /// Whether the beta gateway answered.
    pub test: bool,
}

/// Outcome of a reply's notification block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub success: bool,
    /// `"<severity> - <code>: <message>"`.
    pub message: String,
}

/// Classify a reply root by its first `Notifications` child.
///
/// `SUCCESS`, `WARNING` and `NOTE` count as success; anything else,
/// including a missing notification, is a failure.
pub fn classify(root: &Element) -> Status {
    let (severity, code, text) = root.child("Notifications").map_or(("", "", ""), |n| {
        (n.text_at("Severity"), n.text_at("Code"), n.text_at("Message"))
    });

    Status {
        success: SUCCESS_SEVERITIES.contains(&severity),
        message: format!("{severity} - {code}: {text}"),
    }
}

/// A parsed reply plus its classification.
pub(crate) struct Reply {
    pub document: Document,
    pub status: Status,
}

impl Reply {
    /// Parse `exchange.reply` and classify it, expecting `root_name` as
    /// the root element. A different root is reported as a failure.
    pub(crate) fn open(exchange: &Exchange<'_>, root_name: &str) -> Result<Self, CoreError> {
        let document = Document::parse(exchange.reply)?;
        let mut status = classify(document.root());

        let found = &document.root().name;
        if found != root_name {
            status = Status {
                success: false,
                message: format!(
                    "unexpected reply element `{found}` (expected `{root_name}`): {}",
                    status.message
                ),
            };
        }

        debug!(root = %found, success = status.success, message = %status.message, "reply classified");
        Ok(Self { document, status })
    }

    pub(crate) fn root(&self) -> &Element {
        self.document.root()
    }

    /// Common envelope for the operation response.
    pub(crate) fn envelope(&self, exchange: &Exchange<'_>) -> Response {
        Response {
            success: self.status.success,
            message: self.status.message.clone(),
            params: self.document.to_json(),
            xml: exchange.reply.to_owned(),
            request: exchange.request.to_owned(),
            test: exchange.test,
        }
    }
}

/// Read a `Version` block, if the element has one.
pub(crate) fn version_info(parent: &Element) -> Option<VersionInfo> {
    parent.child("Version").map(|version| VersionInfo {
        service_id: version.text_at("ServiceId").to_owned(),
        major: version.text_at("Major").to_owned(),
        intermediate: version.text_at("Intermediate").to_owned(),
        minor: version.text_at("Minor").to_owned(),
    })
}

/// Owned text of a non-blank element.
pub(crate) fn text(parent: &Element, path: &str) -> Option<String> {
    parent.non_blank_text_at(path).map(str::to_owned)
}
