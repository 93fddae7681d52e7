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

use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use paapi_core::time::parse_date;
use paapi_core::utils::Redact;
use paapi_core::{Error, Result};

use crate::constants::*;
use crate::power::PowerExpressionSet;

/// Result page of an item search, between 1 and 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemPage(u8);

impl ItemPage {
    /// First page.
    pub const MIN: u8 = 1;
    /// Last page the service will return.
    pub const MAX: u8 = 10;

    /// Get the page number.
    pub fn get(self) -> u8 {
        self.0
    }

    fn invalid(input: impl Display) -> Error {
        Error::validation_failed(
            ITEM_PAGE,
            format!(
                "invalid {ITEM_PAGE} '{input}', must be a number between {} and {}",
                Self::MIN,
                Self::MAX
            ),
        )
    }
}

impl TryFrom<i64> for ItemPage {
    type Error = Error;

    fn try_from(page: i64) -> Result<Self> {
        u8::try_from(page)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(ItemPage)
            .ok_or_else(|| Self::invalid(page))
    }
}

impl FromStr for ItemPage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let page: i64 = s.parse().map_err(|_| Self::invalid(s))?;
        ItemPage::try_from(page)
    }
}

impl Display for ItemPage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Query parameters kept by a client between requests.
///
/// `AWSAccessKeyId`, `AssociateTag` and `Version` are always present. Every
/// other field is optional and only sent when set.
#[derive(Clone)]
pub struct Params {
    access_key_id: String,
    associate_tag: String,
    version: String,

    availability: bool,
    author: Option<String>,
    brand: Option<String>,
    browse_node: Option<String>,
    condition: Option<String>,
    id_type: Option<String>,
    item_page: Option<ItemPage>,
    maximum_price: Option<u64>,
    minimum_price: Option<u64>,
    merchant_id: Option<String>,
    publisher: Option<String>,
    related_item_page: Option<u64>,
    relationship_type: Option<String>,
    response_group: Option<String>,
    search_index: Option<String>,
    sort: Option<String>,
    title: Option<String>,

    power: PowerExpressionSet,
}

impl Debug for Params {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Params")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("associate_tag", &self.associate_tag)
            .field("version", &self.version)
            .field("optional", &self.optional_pairs())
            .field("power", &self.power)
            .finish()
    }
}

impl Params {
    /// Create params holding only the mandatory fields.
    pub fn new(
        access_key_id: impl Into<String>,
        associate_tag: impl Into<String>,
        version: &str,
    ) -> Result<Self> {
        let mut params = Self {
            access_key_id: String::new(),
            associate_tag: String::new(),
            version: String::new(),
            availability: false,
            author: None,
            brand: None,
            browse_node: None,
            condition: None,
            id_type: None,
            item_page: None,
            maximum_price: None,
            minimum_price: None,
            merchant_id: None,
            publisher: None,
            related_item_page: None,
            relationship_type: None,
            response_group: None,
            search_index: None,
            sort: None,
            title: None,
            power: PowerExpressionSet::default(),
        };
        params
            .set_access_key_id(access_key_id)?
            .set_associate_tag(associate_tag)?
            .set_version(version)?;
        Ok(params)
    }

    /// Drop everything except `AWSAccessKeyId`, `AssociateTag` and `Version`,
    /// including all power expressions.
    pub fn reset(&mut self) -> &mut Self {
        let access_key_id = std::mem::take(&mut self.access_key_id);
        let associate_tag = std::mem::take(&mut self.associate_tag);
        let version = std::mem::take(&mut self.version);

        *self = Self {
            access_key_id,
            associate_tag,
            version,
            availability: false,
            author: None,
            brand: None,
            browse_node: None,
            condition: None,
            id_type: None,
            item_page: None,
            maximum_price: None,
            minimum_price: None,
            merchant_id: None,
            publisher: None,
            related_item_page: None,
            relationship_type: None,
            response_group: None,
            search_index: None,
            sort: None,
            title: None,
            power: PowerExpressionSet::default(),
        };
        self
    }

    /// Set the access key id.
    pub fn set_access_key_id(&mut self, access_key_id: impl Into<String>) -> Result<&mut Self> {
        self.access_key_id = non_empty(AWS_ACCESS_KEY_ID, access_key_id.into())?;
        Ok(self)
    }

    /// Set the associate tag.
    pub fn set_associate_tag(&mut self, tag: impl Into<String>) -> Result<&mut Self> {
        self.associate_tag = non_empty(ASSOCIATE_TAG, tag.into())?;
        Ok(self)
    }

    /// Set the API version, a `YYYY-MM-DD` date such as `2011-08-01`.
    pub fn set_version(&mut self, version: &str) -> Result<&mut Self> {
        parse_date(version).map_err(|e| {
            Error::validation_failed(
                VERSION,
                format!("invalid {VERSION} '{version}', must be a YYYY-MM-DD date"),
            )
            .with_source(e)
        })?;
        self.version = version.to_string();
        Ok(self)
    }

    /// Only return items that are available.
    ///
    /// `false` removes the filter instead of sending a negative value.
    pub fn set_availability(&mut self, availability: bool) -> &mut Self {
        self.availability = availability;
        self
    }

    /// Set the author.
    pub fn set_author(&mut self, author: impl Into<String>) -> &mut Self {
        self.author = Some(author.into());
        self
    }

    /// Set the brand.
    pub fn set_brand(&mut self, brand: impl Into<String>) -> &mut Self {
        self.brand = Some(brand.into());
        self
    }

    /// Set the browse node to search in.
    pub fn set_browse_node(&mut self, browse_node: impl Into<String>) -> &mut Self {
        self.browse_node = Some(browse_node.into());
        self
    }

    /// Set the item condition, like `New` or `Used`.
    pub fn set_condition(&mut self, condition: impl Into<String>) -> &mut Self {
        self.condition = Some(condition.into());
        self
    }

    /// Set the id type used by item lookups, like `ASIN` or `SKU`.
    pub fn set_id_type(&mut self, id_type: impl Into<String>) -> &mut Self {
        self.id_type = Some(id_type.into());
        self
    }

    /// Set the result page, between 1 and 10.
    pub fn set_item_page(&mut self, page: i64) -> Result<&mut Self> {
        self.item_page = Some(ItemPage::try_from(page)?);
        Ok(self)
    }

    /// Set the maximum price in the smallest currency unit.
    pub fn set_max_price(&mut self, price: i64) -> Result<&mut Self> {
        self.maximum_price = Some(positive(MAXIMUM_PRICE, price)?);
        Ok(self)
    }

    /// Set the minimum price in the smallest currency unit.
    pub fn set_min_price(&mut self, price: i64) -> Result<&mut Self> {
        self.minimum_price = Some(positive(MINIMUM_PRICE, price)?);
        Ok(self)
    }

    /// Set the merchant id.
    pub fn set_merchant_id(&mut self, merchant_id: impl Into<String>) -> &mut Self {
        self.merchant_id = Some(merchant_id.into());
        self
    }

    /// Set the publisher.
    pub fn set_publisher(&mut self, publisher: impl Into<String>) -> &mut Self {
        self.publisher = Some(publisher.into());
        self
    }

    /// Set the page of related items.
    pub fn set_related_item_page(&mut self, page: i64) -> Result<&mut Self> {
        self.related_item_page = Some(positive(RELATED_ITEM_PAGE, page)?);
        Ok(self)
    }

    /// Set the relationship type.
    pub fn set_relationship_type(&mut self, relationship_type: impl Into<String>) -> &mut Self {
        self.relationship_type = Some(relationship_type.into());
        self
    }

    /// Set the response groups, comma separated like `Large,ItemAttributes`.
    pub fn set_response_group(&mut self, response_group: impl Into<String>) -> &mut Self {
        self.response_group = Some(response_group.into());
        self
    }

    /// Set the search index, like `Books` or `All`.
    pub fn set_search_index(&mut self, search_index: impl Into<String>) -> &mut Self {
        self.search_index = Some(search_index.into());
        self
    }

    /// Set the sort order.
    pub fn set_sort(&mut self, sort: impl Into<String>) -> &mut Self {
        self.sort = Some(sort.into());
        self
    }

    /// Set the title.
    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    /// Power search: books published after `year`.
    pub fn set_book_after_year(&mut self, year: i64) -> Result<&mut Self> {
        self.power.set_after_year(year)?;
        Ok(self)
    }

    /// Power search: books published before `year`.
    pub fn set_book_before_year(&mut self, year: i64) -> Result<&mut Self> {
        self.power.set_before_year(year)?;
        Ok(self)
    }

    /// Power search: books published during `year`.
    pub fn set_book_during_year(&mut self, year: i64) -> Result<&mut Self> {
        self.power.set_during_year(year)?;
        Ok(self)
    }

    /// Power search: books written in `language`.
    pub fn set_book_language(&mut self, language: impl Into<String>) -> Result<&mut Self> {
        self.power.set_language(language)?;
        Ok(self)
    }

    /// Power search: books about `subject`.
    pub fn set_book_subject(&mut self, subject: impl Into<String>) -> Result<&mut Self> {
        self.power.set_subject(subject)?;
        Ok(self)
    }

    /// Get the access key id.
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// Get the associate tag.
    pub fn associate_tag(&self) -> &str {
        &self.associate_tag
    }

    /// Get the version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Whether only available items are returned.
    pub fn availability(&self) -> bool {
        self.availability
    }

    /// Get the author.
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Get the brand.
    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    /// Get the browse node.
    pub fn browse_node(&self) -> Option<&str> {
        self.browse_node.as_deref()
    }

    /// Get the condition.
    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    /// Get the id type.
    pub fn id_type(&self) -> Option<&str> {
        self.id_type.as_deref()
    }

    /// Get the item page.
    pub fn item_page(&self) -> Option<ItemPage> {
        self.item_page
    }

    /// Get the maximum price.
    pub fn max_price(&self) -> Option<u64> {
        self.maximum_price
    }

    /// Get the minimum price.
    pub fn min_price(&self) -> Option<u64> {
        self.minimum_price
    }

    /// Get the merchant id.
    pub fn merchant_id(&self) -> Option<&str> {
        self.merchant_id.as_deref()
    }

    /// Get the publisher.
    pub fn publisher(&self) -> Option<&str> {
        self.publisher.as_deref()
    }

    /// Get the related item page.
    pub fn related_item_page(&self) -> Option<u64> {
        self.related_item_page
    }

    /// Get the relationship type.
    pub fn relationship_type(&self) -> Option<&str> {
        self.relationship_type.as_deref()
    }

    /// Get the response group.
    pub fn response_group(&self) -> Option<&str> {
        self.response_group.as_deref()
    }

    /// Get the search index.
    pub fn search_index(&self) -> Option<&str> {
        self.search_index.as_deref()
    }

    /// Get the sort order.
    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    /// Get the title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Get the power search expressions.
    pub fn power(&self) -> &PowerExpressionSet {
        &self.power
    }

    /// Get the power search after year.
    pub fn book_after_year(&self) -> Option<u32> {
        self.power.after_year()
    }

    /// Get the power search before year.
    pub fn book_before_year(&self) -> Option<u32> {
        self.power.before_year()
    }

    /// Get the power search during year.
    pub fn book_during_year(&self) -> Option<u32> {
        self.power.during_year()
    }

    /// Get the power search language.
    pub fn book_language(&self) -> Option<&str> {
        self.power.language()
    }

    /// Get the power search subject.
    pub fn book_subject(&self) -> Option<&str> {
        self.power.subject()
    }

    /// All stored fields as query pairs; the power expressions are not
    /// included since only item searches send them.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            (AWS_ACCESS_KEY_ID, self.access_key_id.clone()),
            (ASSOCIATE_TAG, self.associate_tag.clone()),
            (VERSION, self.version.clone()),
        ];
        pairs.extend(self.optional_pairs());
        pairs
    }

    fn optional_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if self.availability {
            pairs.push((AVAILABILITY, AVAILABLE.to_string()));
        }

        let fields: [(&'static str, Option<String>); 16] = [
            (AUTHOR, self.author.clone()),
            (BRAND, self.brand.clone()),
            (BROWSE_NODE, self.browse_node.clone()),
            (CONDITION, self.condition.clone()),
            (ID_TYPE, self.id_type.clone()),
            (ITEM_PAGE, self.item_page.map(|v| v.to_string())),
            (MAXIMUM_PRICE, self.maximum_price.map(|v| v.to_string())),
            (MINIMUM_PRICE, self.minimum_price.map(|v| v.to_string())),
            (MERCHANT_ID, self.merchant_id.clone()),
            (PUBLISHER, self.publisher.clone()),
            (RELATED_ITEM_PAGE, self.related_item_page.map(|v| v.to_string())),
            (RELATIONSHIP_TYPE, self.relationship_type.clone()),
            (RESPONSE_GROUP, self.response_group.clone()),
            (SEARCH_INDEX, self.search_index.clone()),
            (SORT, self.sort.clone()),
            (TITLE, self.title.clone()),
        ];
        pairs.extend(
            fields
                .into_iter()
                .filter_map(|(k, v)| v.map(|v| (k, v))),
        );
        pairs
    }
}

fn non_empty(field: &str, value: String) -> Result<String> {
    if value.is_empty() {
        return Err(Error::validation_failed(
            field,
            format!("invalid {field}, must not be empty"),
        ));
    }
    Ok(value)
}

fn positive(field: &str, value: i64) -> Result<u64> {
    u64::try_from(value)
        .ok()
        .filter(|v| *v >= 1)
        .ok_or_else(|| {
            Error::validation_failed(
                field,
                format!("invalid {field} '{value}', must be a positive integer"),
            )
        })
}
