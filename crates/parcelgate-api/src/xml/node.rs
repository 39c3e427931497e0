// Request document builder.
//
// An ordered element tree: children serialise in insertion order, which
// the gateway's schema validation depends on. Conditional children are
// added through `append_if` / `append_if_present` so builders read as a
// straight list of elements.

use std::fmt::Display;

use indexmap::IndexMap;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::Error;

/// One element of a request document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    name: String,
    attributes: IndexMap<String, String>,
    text: Option<String>,
    children: Vec<XmlNode>,
}

impl XmlNode {
    /// An element with no text (children are added with the builder methods).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// A text-only element: `<Name>value</Name>`.
    pub fn leaf(name: impl Into<String>, value: impl Display) -> Self {
        let mut node = Self::new(name);
        node.text = Some(value.to_string());
        node
    }

    /// A text-only element that is still written (as `<Name/>`) when the
    /// value is missing. Only for elements the schema requires.
    pub fn leaf_or_empty<T: Display>(name: impl Into<String>, value: Option<T>) -> Self {
        let mut node = Self::new(name);
        node.text = value.map(|v| v.to_string());
        node
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = XmlNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Append the node built by `build` only when `condition` holds.
    pub fn append_if(mut self, condition: bool, build: impl FnOnce() -> XmlNode) -> Self {
        if condition {
            self.children.push(build());
        }
        self
    }

    /// Append `child` when it is `Some`.
    pub fn append_if_present(mut self, child: Option<XmlNode>) -> Self {
        if let Some(child) = child {
            self.children.push(child);
        }
        self
    }

    /// Append a text leaf when `value` is `Some`.
    pub fn leaf_if_present<T: Display>(self, name: &str, value: Option<T>) -> Self {
        self.append_if_present(value.map(|v| XmlNode::leaf(name, v)))
    }

    pub fn push(&mut self, child: XmlNode) {
        self.children.push(child);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// First direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// No text and no children.
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.children.is_empty()
    }

    /// Serialise without declaration or indentation.
    pub fn to_xml_string(&self) -> Result<String, Error> {
        let mut writer = Writer::new(Vec::new());
        self.write_into(&mut writer)?;
        String::from_utf8(writer.into_inner()).map_err(|e| Error::Serialization(e.to_string()))
    }

    fn write_into(&self, writer: &mut Writer<Vec<u8>>) -> Result<(), Error> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.is_empty() {
            return emit(writer, Event::Empty(start));
        }

        emit(writer, Event::Start(start))?;
        if let Some(text) = &self.text {
            emit(writer, Event::Text(BytesText::new(text)))?;
        }
        for child in &self.children {
            child.write_into(writer)?;
        }
        emit(writer, Event::End(BytesEnd::new(self.name.as_str())))
    }
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), Error> {
    writer
        .write_event(event)
        .map_err(|e| Error::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn serialises_children_in_insertion_order() {
        let node = XmlNode::new("Version")
            .with_attribute("xmlns", "http://fedex.com/ws/track/v4")
            .with_child(XmlNode::leaf("ServiceId", "trck"))
            .with_child(XmlNode::leaf("Major", 4))
            .with_child(XmlNode::leaf("Intermediate", 0))
            .with_child(XmlNode::leaf("Minor", 0));

        assert_eq!(
            node.to_xml_string().unwrap(),
            "<Version xmlns=\"http://fedex.com/ws/track/v4\"><ServiceId>trck</ServiceId>\
             <Major>4</Major><Intermediate>0</Intermediate><Minor>0</Minor></Version>"
        );
    }

    #[test]
    fn missing_optional_leaf_is_omitted_but_required_leaf_is_empty() {
        let node = XmlNode::new("ClientDetail")
            .leaf_if_present("AccountNumber", None::<&str>)
            .with_child(XmlNode::leaf_or_empty("MeterNumber", None::<&str>))
            .append_if(false, || XmlNode::leaf("Region", "US"));

        assert_eq!(
            node.to_xml_string().unwrap(),
            "<ClientDetail><MeterNumber/></ClientDetail>"
        );
    }

    #[test]
    fn escapes_markup_in_text() {
        let node = XmlNode::leaf("CompanyName", "Smith & Sons <Ltd>");
        assert_eq!(
            node.to_xml_string().unwrap(),
            "<CompanyName>Smith &amp; Sons &lt;Ltd&gt;</CompanyName>"
        );
    }

    #[test]
    fn booleans_render_as_lowercase_words() {
        let node = XmlNode::leaf("ReturnTransitAndCommit", true);
        assert_eq!(
            node.to_xml_string().unwrap(),
            "<ReturnTransitAndCommit>true</ReturnTransitAndCommit>"
        );
    }
}
