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

use log::{debug, warn};
use paapi_core::{Error, Result};

use crate::xml::XmlDocument;

/// A successfully parsed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    /// Body exactly as received.
    pub body: String,
    /// The parsed body.
    pub document: XmlDocument,
}

/// Result of one executed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The response parsed and carries no API error.
    Success(Payload),
    /// The request never produced a response.
    TransportError(String),
    /// The response body is not XML.
    ParseError(String),
    /// The service answered with one or more `Error/Message` entries.
    ApiError(Vec<String>),
}

impl RequestOutcome {
    /// Classify the result of a transport call.
    ///
    /// Transport failure wins over a parse failure, which wins over API
    /// errors. Any response the transport hands back counts as delivered,
    /// whatever its HTTP status.
    pub fn classify(sent: Result<http::Response<String>>) -> Self {
        let resp = match sent {
            Ok(resp) => resp,
            Err(err) => return RequestOutcome::TransportError(err.to_string()),
        };
        debug!("response received with status {}", resp.status());

        let body = resp.into_body();
        let document = match XmlDocument::parse(&body) {
            Ok(document) => document,
            Err(err) => return RequestOutcome::ParseError(err.to_string()),
        };

        let messages = api_error_messages(&document);
        if !messages.is_empty() {
            warn!("service returned errors: {}", messages.join("; "));
            return RequestOutcome::ApiError(messages);
        }

        RequestOutcome::Success(Payload { body, document })
    }

    /// Check if the outcome is a success.
    pub fn is_success(&self) -> bool {
        matches!(self, RequestOutcome::Success(_))
    }

    /// Turn a failed outcome into the matching [`Error`].
    pub fn into_result(self) -> Result<Payload> {
        match self {
            RequestOutcome::Success(payload) => Ok(payload),
            RequestOutcome::TransportError(msg) => Err(Error::transport(msg)),
            RequestOutcome::ParseError(msg) => Err(Error::parse(msg)),
            RequestOutcome::ApiError(messages) => Err(Error::api(&messages)),
        }
    }
}

/// Text of every `Error/Message` element in document order.
///
/// Only elements in the first declared namespace are considered, or
/// unqualified elements when the document declares none.
pub fn api_error_messages(document: &XmlDocument) -> Vec<String> {
    let ns = document.first_namespace();
    document
        .root()
        .descendants()
        .filter(|e| e.is("Error", ns))
        .flat_map(|e| e.elements().filter(|m| m.is("Message", ns)))
        .map(|m| m.text())
        .collect()
}
