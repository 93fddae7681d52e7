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

//! Book power search expressions.
//!
//! Power search is only honoured by the `Books` search index. Every slot
//! contributes `prefix + value` and populated slots are joined with
//! `" and "` in the order they were first set:
//!
//! ```
//! use paapi::PowerExpressionSet;
//!
//! let mut power = PowerExpressionSet::default();
//! power.set_after_year(1979)?.set_before_year(1991)?;
//! assert_eq!(
//!     power.build()?.as_deref(),
//!     Some("pubdate:after 1979 and pubdate:before 1991")
//! );
//! # Ok::<(), paapi_core::Error>(())
//! ```

use std::fmt::{Display, Formatter};

use paapi_core::{Error, Result};

use crate::constants::POWER;

const SEPARATOR: &str = " and ";

/// Named slot of a power search expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerSlot {
    /// Published after the given year.
    AfterYear,
    /// Published before the given year.
    BeforeYear,
    /// Published during the given year.
    DuringYear,
    /// Written in the given language.
    Language,
    /// About the given subject.
    Subject,
}

impl PowerSlot {
    /// The literal prefix this slot contributes.
    pub fn prefix(&self) -> &'static str {
        match self {
            PowerSlot::AfterYear => "pubdate:after ",
            PowerSlot::BeforeYear => "pubdate:before ",
            PowerSlot::DuringYear => "pubdate:during ",
            PowerSlot::Language => "language:",
            PowerSlot::Subject => "subject:",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            PowerSlot::AfterYear => "after year",
            PowerSlot::BeforeYear => "before year",
            PowerSlot::DuringYear => "during year",
            PowerSlot::Language => "language",
            PowerSlot::Subject => "subject",
        }
    }
}

/// Value stored in a power slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PowerValue {
    /// A publication year.
    Year(u32),
    /// A free text value.
    Text(String),
}

impl PowerValue {
    fn is_empty(&self) -> bool {
        match self {
            PowerValue::Year(_) => false,
            PowerValue::Text(v) => v.is_empty(),
        }
    }
}

impl Display for PowerValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PowerValue::Year(v) => write!(f, "{v}"),
            PowerValue::Text(v) => f.write_str(v),
        }
    }
}

/// One populated slot: its prefix and value are always set together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerExpression {
    slot: PowerSlot,
    prefix: &'static str,
    value: PowerValue,
}

impl PowerExpression {
    /// The slot this expression fills.
    pub fn slot(&self) -> PowerSlot {
        self.slot
    }

    /// The literal prefix.
    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// The stored value.
    pub fn value(&self) -> &PowerValue {
        &self.value
    }
}

/// Ordered set of power expressions, at most one per slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PowerExpressionSet {
    entries: Vec<PowerExpression>,
}

impl PowerExpressionSet {
    /// Books published after `year`.
    pub fn set_after_year(&mut self, year: i64) -> Result<&mut Self> {
        let year = validate_year(PowerSlot::AfterYear, year)?;
        Ok(self.insert(PowerSlot::AfterYear, PowerValue::Year(year)))
    }

    /// Books published before `year`.
    pub fn set_before_year(&mut self, year: i64) -> Result<&mut Self> {
        let year = validate_year(PowerSlot::BeforeYear, year)?;
        Ok(self.insert(PowerSlot::BeforeYear, PowerValue::Year(year)))
    }

    /// Books published during `year`.
    pub fn set_during_year(&mut self, year: i64) -> Result<&mut Self> {
        let year = validate_year(PowerSlot::DuringYear, year)?;
        Ok(self.insert(PowerSlot::DuringYear, PowerValue::Year(year)))
    }

    /// Books written in `language`.
    pub fn set_language(&mut self, language: impl Into<String>) -> Result<&mut Self> {
        let language = validate_text(PowerSlot::Language, language.into())?;
        Ok(self.insert(PowerSlot::Language, PowerValue::Text(language)))
    }

    /// Books about `subject`.
    pub fn set_subject(&mut self, subject: impl Into<String>) -> Result<&mut Self> {
        let subject = validate_text(PowerSlot::Subject, subject.into())?;
        Ok(self.insert(PowerSlot::Subject, PowerValue::Text(subject)))
    }

    // A slot that is set again keeps its original position.
    fn insert(&mut self, slot: PowerSlot, value: PowerValue) -> &mut Self {
        match self.entries.iter_mut().find(|e| e.slot == slot) {
            Some(entry) => entry.value = value,
            None => self.entries.push(PowerExpression {
                slot,
                prefix: slot.prefix(),
                value,
            }),
        }
        self
    }

    /// Get the value of a slot.
    pub fn get(&self, slot: PowerSlot) -> Option<&PowerValue> {
        self.entries
            .iter()
            .find(|e| e.slot == slot)
            .map(|e| &e.value)
    }

    fn year(&self, slot: PowerSlot) -> Option<u32> {
        match self.get(slot) {
            Some(PowerValue::Year(v)) => Some(*v),
            _ => None,
        }
    }

    fn text(&self, slot: PowerSlot) -> Option<&str> {
        match self.get(slot) {
            Some(PowerValue::Text(v)) => Some(v),
            _ => None,
        }
    }

    /// Get the after year.
    pub fn after_year(&self) -> Option<u32> {
        self.year(PowerSlot::AfterYear)
    }

    /// Get the before year.
    pub fn before_year(&self) -> Option<u32> {
        self.year(PowerSlot::BeforeYear)
    }

    /// Get the during year.
    pub fn during_year(&self) -> Option<u32> {
        self.year(PowerSlot::DuringYear)
    }

    /// Get the language.
    pub fn language(&self) -> Option<&str> {
        self.text(PowerSlot::Language)
    }

    /// Get the subject.
    pub fn subject(&self) -> Option<&str> {
        self.text(PowerSlot::Subject)
    }

    /// Populated expressions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PowerExpression> {
        self.entries.iter()
    }

    /// Check if no slot is populated.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of populated slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Drop every expression.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Build the `Power` query value.
    ///
    /// Returns `Ok(None)` when no slot is populated. An entry that lost its
    /// prefix or value is reported as an unexpected error instead of being
    /// skipped.
    pub fn build(&self) -> Result<Option<String>> {
        if self.entries.is_empty() {
            return Ok(None);
        }

        let mut parts = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            if entry.prefix.is_empty() || entry.value.is_empty() {
                return Err(Error::unexpected(format!(
                    "power expression for {} is incomplete",
                    entry.slot.label()
                ))
                .with_context(format!("field: {POWER}")));
            }
            parts.push(format!("{}{}", entry.prefix, entry.value));
        }

        Ok(Some(parts.join(SEPARATOR)))
    }
}

fn validate_year(slot: PowerSlot, year: i64) -> Result<u32> {
    u32::try_from(year)
        .ok()
        .filter(|v| *v >= 1)
        .ok_or_else(|| {
            Error::validation_failed(
                POWER,
                format!("invalid {} '{year}', must be a positive year", slot.label()),
            )
        })
}

fn validate_text(slot: PowerSlot, value: String) -> Result<String> {
    if value.is_empty() {
        return Err(Error::validation_failed(
            POWER,
            format!("invalid {}, must not be empty", slot.label()),
        ));
    }
    Ok(value)
}
