// parcelgate-api: XML wire plumbing and HTTP transport for the FedEx gateway

pub mod error;
pub mod transport;
pub mod xml;

pub use error::Error;
pub use transport::{HttpTransport, LIVE_URL, TEST_URL, TlsMode, Transport, TransportConfig};
pub use xml::{Document, Element, XmlNode};
