// Reply document tree.
//
// Replies are small, so they are read once into an owned element tree and
// queried by path. Element names are stored by local name: a `v7:RateReply`
// root is looked up as `RateReply`.

use indexmap::IndexMap;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde_json::{Map, Value};

use crate::error::Error;

/// One element of a parsed reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    /// First direct child with the given local name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children with the given local name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// First element reachable through a `/`-separated path of child names.
    ///
    /// Every branch is searched in document order, so `A/B` finds the
    /// first `B` under *any* `A`, not just under the first `A`.
    pub fn find(&self, path: &str) -> Option<&Element> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        self.find_segments(&segments)
    }

    fn find_segments(&self, segments: &[&str]) -> Option<&Element> {
        let Some((first, rest)) = segments.split_first() else {
            return Some(self);
        };
        self.children
            .iter()
            .filter(|child| child.name == *first)
            .find_map(|child| child.find_segments(rest))
    }

    /// Text of the element at `path`, or `""` when the path is missing.
    pub fn text_at(&self, path: &str) -> &str {
        self.find(path).map_or("", |e| e.text.as_str())
    }

    /// Text of the element at `path`, `None` when missing or blank.
    pub fn non_blank_text_at(&self, path: &str) -> Option<&str> {
        let text = self.text_at(path);
        (!text.trim().is_empty()).then_some(text)
    }

    /// Convert to loosely-typed JSON. Text-only elements become strings
    /// (`null` when empty), repeated children become arrays, attributes
    /// are dropped.
    pub fn to_json(&self) -> Value {
        if self.children.is_empty() {
            return if self.text.is_empty() {
                Value::Null
            } else {
                Value::String(self.text.clone())
            };
        }

        let mut map = Map::new();
        for child in &self.children {
            let value = child.to_json();
            match map.get_mut(&child.name) {
                Some(Value::Array(items)) => items.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
                None => {
                    map.insert(child.name.clone(), value);
                }
            }
        }
        Value::Object(map)
    }
}

/// A parsed reply document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Parse a reply body.
    ///
    /// Any syntax error, mismatched or unclosed tag, or a body without a
    /// root element yields `Error::MalformedDocument` carrying the body.
    pub fn parse(xml: &str) -> Result<Self, Error> {
        let malformed = |message: String| Error::MalformedDocument {
            message,
            body: xml.to_owned(),
        };

        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(start)) => stack.push(open_element(&start).map_err(malformed)?),
                Ok(Event::Empty(start)) => {
                    let element = open_element(&start).map_err(malformed)?;
                    close_element(element, &mut stack, &mut root).map_err(malformed)?;
                }
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| malformed("unexpected closing tag".into()))?;
                    close_element(element, &mut stack, &mut root).map_err(malformed)?;
                }
                Ok(Event::Text(text)) => {
                    let value = text.unescape().map_err(|e| malformed(e.to_string()))?;
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&value);
                    }
                }
                Ok(Event::CData(data)) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(&data));
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(malformed(format!(
                        "{e} (at byte {})",
                        reader.buffer_position()
                    )));
                }
            }
        }

        if let Some(open) = stack.last() {
            return Err(malformed(format!("unclosed element <{}>", open.name)));
        }

        root.map(|root| Self { root })
            .ok_or_else(|| malformed("document has no root element".into()))
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// The whole document as JSON, keyed by the root element name.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert(self.root.name.clone(), self.root.to_json());
        Value::Object(map)
    }
}

fn open_element(start: &BytesStart<'_>) -> Result<Element, String> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let mut attributes = IndexMap::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| e.to_string())?
            .into_owned();
        attributes.insert(key, value);
    }
    Ok(Element {
        name,
        attributes,
        ..Element::default()
    })
}

fn close_element(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), String> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        Ok(())
    } else if root.is_none() {
        *root = Some(element);
        Ok(())
    } else {
        Err(format!("second root element <{}>", element.name))
    }
}
