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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Endpoint of the service.
pub const SERVICE_NAME: &str = "AWSECommerceService";
pub const HOST_PREFIX: &str = "webservices.amazon";
pub const PATH: &str = "/onca/xml";

/// API version used when none is given.
pub const DEFAULT_VERSION: &str = "2011-08-01";
/// CA bundle path used when none is given.
pub const DEFAULT_CA_BUNDLE: &str = "cacert.pem";

// Query keys, case sensitive.
pub const AWS_ACCESS_KEY_ID: &str = "AWSAccessKeyId";
pub const ASSOCIATE_TAG: &str = "AssociateTag";
pub const VERSION: &str = "Version";
pub const SERVICE: &str = "Service";
pub const TIMESTAMP: &str = "Timestamp";
pub const OPERATION: &str = "Operation";
pub const SIGNATURE: &str = "Signature";
pub const BROWSE_NODE_ID: &str = "BrowseNodeId";
pub const ITEM_ID: &str = "ItemId";
pub const KEYWORDS: &str = "Keywords";
pub const AVAILABILITY: &str = "Availability";
pub const AUTHOR: &str = "Author";
pub const BRAND: &str = "Brand";
pub const BROWSE_NODE: &str = "BrowseNode";
pub const CONDITION: &str = "Condition";
pub const ID_TYPE: &str = "IdType";
pub const ITEM_PAGE: &str = "ItemPage";
pub const MAXIMUM_PRICE: &str = "MaximumPrice";
pub const MINIMUM_PRICE: &str = "MinimumPrice";
pub const MERCHANT_ID: &str = "MerchantId";
pub const PUBLISHER: &str = "Publisher";
pub const RELATED_ITEM_PAGE: &str = "RelatedItemPage";
pub const RELATIONSHIP_TYPE: &str = "RelationshipType";
pub const RESPONSE_GROUP: &str = "ResponseGroup";
pub const SEARCH_INDEX: &str = "SearchIndex";
pub const SORT: &str = "Sort";
pub const TITLE: &str = "Title";
pub const POWER: &str = "Power";

/// Value sent as `Availability` to only return available items.
pub const AVAILABLE: &str = "Available";

/// Env name of the access key id.
pub const PAAPI_ACCESS_KEY_ID: &str = "PAAPI_ACCESS_KEY_ID";
/// Env name of the secret access key.
pub const PAAPI_SECRET_ACCESS_KEY: &str = "PAAPI_SECRET_ACCESS_KEY";
/// Env name of the associate tag.
pub const PAAPI_ASSOCIATE_TAG: &str = "PAAPI_ASSOCIATE_TAG";
/// Env name of the API version.
pub const PAAPI_VERSION: &str = "PAAPI_VERSION";
/// Env name of the marketplace code.
pub const PAAPI_LOCATION: &str = "PAAPI_LOCATION";
/// Env name of the CA bundle path.
pub const PAAPI_CA_BUNDLE: &str = "PAAPI_CA_BUNDLE";

/// AsciiSet for the query string.
///
/// - Encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
/// - Space becomes `%20`, never `+`.
pub static QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
