// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Owned XML tree built on top of quick-xml.

use paapi_core::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{PrefixDeclaration, ResolveResult};
use quick_xml::NsReader;

/// A namespace declared somewhere in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    /// Declared prefix, `None` for a default namespace.
    pub prefix: Option<String>,
    /// Namespace uri.
    pub uri: String,
}

/// A parsed XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    root: XmlElement,
    namespaces: Vec<Namespace>,
}

/// Child of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    /// Nested element.
    Element(XmlElement),
    /// Text content, unescaped. CDATA sections are text as well.
    Text(String),
}

/// An element with its resolved namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    namespace: Option<String>,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlDocument {
    /// Parse an XML document.
    ///
    /// Whitespace only text is dropped. Any content outside a single root
    /// element other than whitespace, comments, declarations and processing
    /// instructions is an error.
    pub fn parse(input: &str) -> Result<Self> {
        let mut reader = NsReader::from_str(input);

        let mut namespaces = Vec::new();
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let result = reader
                .read_resolved_event()
                .map(|(ns, event)| (resolve(ns), event));
            let (ns, event) = match result {
                Ok(v) => v,
                Err(e) => {
                    return Err(Error::parse(format!(
                        "invalid xml at position {}: {e}",
                        reader.buffer_position()
                    ))
                    .with_source(e))
                }
            };

            match event {
                Event::Start(e) => {
                    let element = start_element(&e, ns, &mut namespaces)?;
                    if stack.is_empty() && root.is_some() {
                        return Err(multiple_roots(&element));
                    }
                    stack.push(element);
                }
                Event::Empty(e) => {
                    let element = start_element(&e, ns, &mut namespaces)?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(XmlNode::Element(element)),
                        None if root.is_some() => return Err(multiple_roots(&element)),
                        None => root = Some(element),
                    }
                }
                Event::End(_) => {
                    // End names are matched by the reader itself.
                    let Some(element) = stack.pop() else {
                        return Err(Error::parse("unexpected end tag outside root element"));
                    };
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(XmlNode::Element(element)),
                        None => root = Some(element),
                    }
                }
                Event::Text(e) => {
                    let text = e.unescape().map_err(|err| {
                        Error::parse(format!("invalid text content: {err}")).with_source(err)
                    })?;
                    push_text(&mut stack, &text)?;
                }
                Event::CData(e) => {
                    let text = String::from_utf8(e.into_inner().into_owned()).map_err(|err| {
                        Error::parse("cdata section is not valid utf-8").with_source(err)
                    })?;
                    push_text(&mut stack, &text)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(Error::parse(format!(
                "unexpected end of input, element <{}> is not closed",
                open.name
            )));
        }
        let root = root.ok_or_else(|| Error::parse("document has no root element"))?;

        Ok(Self { root, namespaces })
    }

    /// The root element.
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// Namespaces in the order they are declared.
    pub fn namespaces(&self) -> &[Namespace] {
        &self.namespaces
    }

    /// Uri of the first declared namespace.
    pub fn first_namespace(&self) -> Option<&str> {
        self.namespaces.first().map(|ns| ns.uri.as_str())
    }
}

impl XmlElement {
    /// Local name of the element.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved namespace uri.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Attributes in document order, namespace declarations excluded.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Get an attribute value by its qualified name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// All child nodes.
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Child elements only.
    pub fn elements(&self) -> impl DoubleEndedIterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    /// First child element with the given local name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.name == name)
    }

    /// Text directly inside this element.
    pub fn direct_text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(t) => Some(t.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }

    /// All text inside this element, nested elements included.
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// This element and every element below it, in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Check local name and namespace at once.
    pub fn is(&self, name: &str, namespace: Option<&str>) -> bool {
        self.name == name && self.namespace.as_deref() == namespace
    }
}

/// Pre-order iterator returned by [`XmlElement::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.elements().rev());
        Some(next)
    }
}

fn collect_text(element: &XmlElement, out: &mut String) {
    for node in &element.children {
        match node {
            XmlNode::Text(t) => out.push_str(t),
            XmlNode::Element(e) => collect_text(e, out),
        }
    }
}

fn resolve(ns: ResolveResult) -> std::result::Result<Option<String>, String> {
    match ns {
        ResolveResult::Bound(ns) => Ok(Some(String::from_utf8_lossy(ns.as_ref()).into_owned())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(String::from_utf8_lossy(&prefix).into_owned()),
    }
}

fn start_element(
    e: &BytesStart,
    ns: std::result::Result<Option<String>, String>,
    namespaces: &mut Vec<Namespace>,
) -> Result<XmlElement> {
    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
    let namespace =
        ns.map_err(|prefix| Error::parse(format!("unknown namespace prefix '{prefix}' on <{name}>")))?;

    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| {
            Error::parse(format!("invalid attribute on <{name}>: {err}")).with_source(err)
        })?;
        let value = attr
            .unescape_value()
            .map_err(|err| {
                Error::parse(format!("invalid attribute value on <{name}>: {err}")).with_source(err)
            })?
            .into_owned();

        match attr.key.as_namespace_binding() {
            Some(PrefixDeclaration::Default) => namespaces.push(Namespace {
                prefix: None,
                uri: value,
            }),
            Some(PrefixDeclaration::Named(prefix)) => namespaces.push(Namespace {
                prefix: Some(String::from_utf8_lossy(prefix).into_owned()),
                uri: value,
            }),
            None => {
                let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
                attributes.push((key, value));
            }
        }
    }

    Ok(XmlElement {
        name,
        namespace,
        attributes,
        children: Vec::new(),
    })
}

fn push_text(stack: &mut [XmlElement], text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Ok(());
    }
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(XmlNode::Text(text.to_string()));
            Ok(())
        }
        None => Err(Error::parse("text content outside root element")),
    }
}

fn multiple_roots(element: &XmlElement) -> Error {
    Error::parse(format!(
        "document has more than one root element, found <{}>",
        element.name
    ))
}
