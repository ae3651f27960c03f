/*
 * Copyright 2019 The Starlark in Rust Authors.
 * Copyright (c) Facebook, Inc. and its affiliates.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     https://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! Raw scalar values: the non-enum payloads a declaration or a set can hold.

use std::cmp::Ordering;
use std::fmt;
use std::fmt::Display;

use serde::Serialize;

/// A raw integer or string value.
///
/// Scalars appear in three places: as declared member values (where anything
/// other than an integer is rejected at validation time), as the non-enum
/// items an [`EnumSet`](crate::EnumSet) may carry, and as the payload of the
/// field-comparison forms of `contains`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    /// An integer value.
    Int(i64),
    /// A string value.
    Str(String),
}

impl Scalar {
    /// The integer payload, if this is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Scalar::Int(i) => Some(*i),
            Scalar::Str(_) => None,
        }
    }

    /// The string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Int(_) => None,
            Scalar::Str(s) => Some(s),
        }
    }

    /// Total order used by enum-aware diffing: integers before strings,
    /// then by value within a kind. Mixed kinds are never equal.
    pub(crate) fn compare(&self, other: &Scalar) -> Ordering {
        match (self, other) {
            (Scalar::Int(a), Scalar::Int(b)) => a.cmp(b),
            (Scalar::Str(a), Scalar::Str(b)) => a.cmp(b),
            (Scalar::Int(_), Scalar::Str(_)) => Ordering::Less,
            (Scalar::Str(_), Scalar::Int(_)) => Ordering::Greater,
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(i) => Display::fmt(i, f),
            Scalar::Str(s) => Display::fmt(s, f),
        }
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(value as i64)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Str(value.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Str(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_orders_within_a_kind() {
        assert_eq!(Scalar::Int(1).compare(&Scalar::Int(1)), Ordering::Equal);
        assert_eq!(Scalar::Int(1).compare(&Scalar::Int(2)), Ordering::Less);
        assert_eq!(
            Scalar::from("b").compare(&Scalar::from("a")),
            Ordering::Greater
        );
    }

    #[test]
    fn mixed_kinds_are_never_equal() {
        assert_ne!(Scalar::Int(1).compare(&Scalar::from("1")), Ordering::Equal);
        assert_ne!(Scalar::Int(1), Scalar::from("1"));
    }
}
