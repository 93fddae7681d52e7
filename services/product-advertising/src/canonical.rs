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

use std::collections::BTreeMap;

use log::debug;
use percent_encoding::utf8_percent_encode;
use paapi_core::time::{format_iso8601, DateTime};

use crate::constants::{QUERY_ENCODE_SET, SERVICE, SERVICE_NAME, TIMESTAMP};

/// Percent encode `input`, leaving only unreserved characters as is.
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, &QUERY_ENCODE_SET).to_string()
}

/// Build the canonical query string for the given parameters.
///
/// `Service` and `Timestamp` are injected (replacing any caller value), every
/// key and value is percent encoded, and pairs are sorted by the raw bytes of
/// the encoded key. Uppercase ASCII therefore sorts before lowercase.
pub fn canonical_query_string(
    params: impl IntoIterator<Item = (String, String)>,
    now: DateTime,
) -> String {
    let mut params: BTreeMap<String, String> = params.into_iter().collect();
    params.insert(SERVICE.to_string(), SERVICE_NAME.to_string());
    params.insert(TIMESTAMP.to_string(), format_iso8601(now));

    let mut pairs: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    // Sort by encoded bytes, which may differ from the raw key order.
    pairs.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

    let query = pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    debug!("canonical query string: {query}");
    query
}
