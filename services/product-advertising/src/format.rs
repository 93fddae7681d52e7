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

use serde_json::{Map, Value};

use crate::config::ResponseFormat;
use crate::response::Payload;
use crate::xml::{XmlDocument, XmlElement};

/// Prefix of keys holding attributes in the map form.
pub const ATTRIBUTE_PREFIX: &str = "@";
/// Key holding the text of an element that also has attributes or children.
pub const TEXT_KEY: &str = "#text";

/// A successful response in the configured representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Body as received.
    Raw(String),
    /// Parsed tree.
    Tree(XmlDocument),
    /// Ordered map built from the tree.
    Map(Value),
}

impl Response {
    /// Convert a payload into `format`.
    pub fn adapt(payload: Payload, format: ResponseFormat) -> Self {
        match format {
            ResponseFormat::Raw => Response::Raw(payload.body),
            ResponseFormat::Tree => Response::Tree(payload.document),
            ResponseFormat::Map => Response::Map(to_map(&payload.document)),
        }
    }

    /// Get the raw body if this is a raw response.
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Response::Raw(v) => Some(v),
            _ => None,
        }
    }

    /// Get the tree if this is a tree response.
    pub fn as_tree(&self) -> Option<&XmlDocument> {
        match self {
            Response::Tree(v) => Some(v),
            _ => None,
        }
    }

    /// Get the map if this is a map response.
    pub fn as_map(&self) -> Option<&Value> {
        match self {
            Response::Map(v) => Some(v),
            _ => None,
        }
    }
}

/// Convert a document into an ordered JSON value.
///
/// The root element name is not part of the output:
///
/// - an element without attributes and child elements becomes its text.
/// - otherwise it becomes an object: `@name` keys for attributes, then child
///   elements by local name. A repeated name collects all its elements into
///   an array at the position of the first one. Text sits under `#text`.
pub fn to_map(document: &XmlDocument) -> Value {
    element_to_value(document.root())
}

fn element_to_value(element: &XmlElement) -> Value {
    if element.attributes().is_empty() && element.elements().next().is_none() {
        return Value::String(element.direct_text());
    }

    let mut map = Map::new();
    for (k, v) in element.attributes() {
        map.insert(format!("{ATTRIBUTE_PREFIX}{k}"), Value::String(v.clone()));
    }

    for child in element.elements() {
        let value = element_to_value(child);
        match map.get_mut(child.name()) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                map.insert(child.name().to_string(), value);
            }
        }
    }

    let text = element.direct_text();
    if !text.is_empty() {
        map.insert(TEXT_KEY.to_string(), Value::String(text));
    }

    Value::Object(map)
}
