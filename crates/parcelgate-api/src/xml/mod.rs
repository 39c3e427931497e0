// XML plumbing shared by every operation: a builder for request documents
// and a read-only tree for replies.

pub mod document;
pub mod node;

pub use document::{Document, Element};
pub use node::XmlNode;
