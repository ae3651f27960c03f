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

//! An ordered collection with enum-aware membership and diff queries.

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::fmt::Display;
use std::hash::Hash;
use std::hash::Hasher;

use serde::Serialize;

use crate::scalar::Scalar;
use crate::value::EnumSource;
use crate::value::EnumValue;

/// One element of an [`EnumSet`]: an enum value or a raw scalar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetItem {
    /// An enum value.
    Enum(EnumValue),
    /// A raw non-enum value, stored as given.
    Raw(Scalar),
}

impl SetItem {
    /// True iff this item is an enum value.
    pub fn is_enum(&self) -> bool {
        matches!(self, SetItem::Enum(_))
    }

    /// The enum value, if this item is one.
    pub fn as_enum(&self) -> Option<&EnumValue> {
        match self {
            SetItem::Enum(v) => Some(v),
            SetItem::Raw(_) => None,
        }
    }

    /// Read a field off this item: enum items expose `id` and `name`, raw
    /// items have no fields.
    pub fn field(&self, field: Field) -> Option<Scalar> {
        match self {
            SetItem::Enum(v) => Some(match field {
                Field::Id => Scalar::Int(v.id()),
                Field::Name => Scalar::from(v.name()),
            }),
            SetItem::Raw(_) => None,
        }
    }
}

impl Display for SetItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetItem::Enum(v) => Display::fmt(v, f),
            SetItem::Raw(s) => Display::fmt(s, f),
        }
    }
}

/// Enum items render as their `{id, name}` map, raw items as bare scalars.
impl Serialize for SetItem {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            SetItem::Enum(v) => v.serialize(serializer),
            SetItem::Raw(s) => s.serialize(serializer),
        }
    }
}

impl From<EnumValue> for SetItem {
    fn from(value: EnumValue) -> Self {
        SetItem::Enum(value)
    }
}

impl From<&EnumValue> for SetItem {
    fn from(value: &EnumValue) -> Self {
        SetItem::Enum(*value)
    }
}

impl From<Scalar> for SetItem {
    fn from(value: Scalar) -> Self {
        SetItem::Raw(value)
    }
}

impl From<i64> for SetItem {
    fn from(value: i64) -> Self {
        SetItem::Raw(Scalar::Int(value))
    }
}

impl From<i32> for SetItem {
    fn from(value: i32) -> Self {
        SetItem::Raw(Scalar::Int(value as i64))
    }
}

impl From<&str> for SetItem {
    fn from(value: &str) -> Self {
        SetItem::Raw(Scalar::from(value))
    }
}

impl From<String> for SetItem {
    fn from(value: String) -> Self {
        SetItem::Raw(Scalar::Str(value))
    }
}

/// A field of an enum item, for the field-comparison membership forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The member id.
    Id,
    /// The member name.
    Name,
}

/// Comparison operator for [`EnumSet::contains_where`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Less than.
    Lt,
    /// Less than or equal.
    Le,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Ge,
}

impl CmpOp {
    /// Apply the operator. Scalars of different kinds are only ever
    /// not-equal; the ordering operators never match across kinds.
    fn eval(self, lhs: &Scalar, rhs: &Scalar) -> bool {
        match (lhs, rhs) {
            (Scalar::Int(_), Scalar::Str(_)) | (Scalar::Str(_), Scalar::Int(_)) => {
                self == CmpOp::Ne
            }
            _ => {
                let ordering = lhs.compare(rhs);
                match self {
                    CmpOp::Eq => ordering == Ordering::Equal,
                    CmpOp::Ne => ordering != Ordering::Equal,
                    CmpOp::Lt => ordering == Ordering::Less,
                    CmpOp::Le => ordering != Ordering::Greater,
                    CmpOp::Gt => ordering == Ordering::Greater,
                    CmpOp::Ge => ordering != Ordering::Less,
                }
            }
        }
    }
}

/// An ordered, non-deduplicating sequence of enum values and raw scalars,
/// with membership and diff queries that understand enum identity.
///
/// Order is insertion order throughout; no operation reorders elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumSet {
    items: Vec<SetItem>,
}

impl EnumSet {
    /// An empty set.
    pub fn new() -> EnumSet {
        EnumSet::default()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True iff the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append one element.
    pub fn push(&mut self, item: impl Into<SetItem>) {
        self.items.push(item.into());
    }

    /// Iterate the elements in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, SetItem> {
        self.items.iter()
    }

    /// Loose membership.
    ///
    /// An enum element matches an enum (or enumable) probe of the same
    /// subtype and id, a string probe equal to its name, or an integer probe
    /// equal to its id regardless of subtype (the documented cross-subtype
    /// quirk). A raw element matches an integer/string probe of the same
    /// kind and value, or an enum probe whose id/name equals it.
    pub fn contains<'a>(&self, probe: impl Into<EnumSource<'a>>) -> bool {
        let probe = Probe::resolve(probe.into());
        self.items.iter().any(|item| probe.matches(item))
    }

    /// Like [`EnumSet::contains`], but enum elements require an exact
    /// subtype+id match and raw elements require an exact scalar match.
    /// A name or id probe never matches an enum element here.
    pub fn contains_strict<'a>(&self, probe: impl Into<EnumSource<'a>>) -> bool {
        let probe = Probe::resolve(probe.into());
        self.items.iter().any(|item| probe.matches_strict(item))
    }

    /// Predicate membership: true iff any element satisfies `predicate`.
    pub fn contains_by(&self, predicate: impl Fn(&SetItem) -> bool) -> bool {
        self.first_by(predicate).is_some()
    }

    /// The first element satisfying `predicate`, if any.
    pub fn first_by(&self, predicate: impl Fn(&SetItem) -> bool) -> Option<&SetItem> {
        self.items.iter().find(|item| predicate(item))
    }

    /// Field-equality membership: any enum element whose `field` equals
    /// `value`. Raw elements have no fields and never match.
    pub fn contains_field(&self, field: Field, value: impl Into<Scalar>) -> bool {
        self.contains_where(field, CmpOp::Eq, value)
    }

    /// Field-operator-value membership: any enum element whose `field`
    /// satisfies `op` against `value`.
    pub fn contains_where(&self, field: Field, op: CmpOp, value: impl Into<Scalar>) -> bool {
        let value = value.into();
        self.items
            .iter()
            .any(|item| match item.field(field) {
                Some(lhs) => op.eval(&lhs, &value),
                None => false,
            })
    }

    /// Strict-equality form of [`EnumSet::contains_field`].
    pub fn contains_strict_field(&self, field: Field, value: impl Into<Scalar>) -> bool {
        let value = value.into();
        self.items
            .iter()
            .any(|item| item.field(field).as_ref() == Some(&value))
    }

    /// Elements of `self` with no equal counterpart in `other`, in their
    /// original order.
    ///
    /// Two enum values of the same subtype are counterparts iff their ids
    /// are equal. Across subtypes they are compared by a stable hash of the
    /// subtype name: deterministic within a process, but not semantically
    /// meaningful (a kept quirk of the design, not a guarantee). An enum
    /// value and a raw scalar are counterparts iff the scalar equals the
    /// value's id.
    ///
    /// A lone [`EnumValue`] can be diffed against via
    /// `EnumSet::from(value)`, which wraps it as a one-element set rather
    /// than flattening it into its field map.
    pub fn diff<I>(&self, other: I) -> EnumSet
    where
        I: IntoIterator,
        I::Item: Into<SetItem>,
    {
        let other: Vec<SetItem> = other.into_iter().map(Into::into).collect();
        self.items
            .iter()
            .filter(|item| {
                !other
                    .iter()
                    .any(|o| compare_items(item, o) == Ordering::Equal)
            })
            .cloned()
            .collect()
    }
}

/// Renders like a list, e.g. `[Zebra, Meerkat]`.
impl Display for EnumSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_container::fmt_container(f, "[", "]", self.items.iter())
    }
}

/// Serializes as a plain sequence; see [`SetItem`]'s serialization.
impl Serialize for EnumSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.items.iter())
    }
}

/// Wraps the value as a ONE-element set; an enum value put in place of a
/// collection is never flattened into its `{id, name}` map.
impl From<EnumValue> for EnumSet {
    fn from(value: EnumValue) -> Self {
        EnumSet {
            items: vec![SetItem::Enum(value)],
        }
    }
}

impl From<Vec<SetItem>> for EnumSet {
    fn from(items: Vec<SetItem>) -> Self {
        EnumSet { items }
    }
}

impl<T: Into<SetItem>> FromIterator<T> for EnumSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        EnumSet {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl IntoIterator for EnumSet {
    type Item = SetItem;
    type IntoIter = std::vec::IntoIter<SetItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a EnumSet {
    type Item = &'a SetItem;
    type IntoIter = std::slice::Iter<'a, SetItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A membership probe after enumable resolution. An enumable that fails to
/// convert resolves to `Unresolved`, which matches nothing.
enum Probe {
    Value(EnumValue),
    Id(i64),
    Name(String),
    Unresolved,
}

impl Probe {
    fn resolve(source: EnumSource) -> Probe {
        match source {
            EnumSource::Value(v) => Probe::Value(v),
            EnumSource::Enumable(e) => match e.to_enum_value() {
                Ok(v) => Probe::Value(v),
                Err(_) => Probe::Unresolved,
            },
            EnumSource::Id(id) => Probe::Id(id),
            EnumSource::Name(name) => Probe::Name(name.into_owned()),
        }
    }

    fn matches(&self, item: &SetItem) -> bool {
        match (item, self) {
            (_, Probe::Unresolved) => false,
            (SetItem::Enum(e), Probe::Value(v)) => e.equals_enum(v),
            // Raw id probes ignore the subtype, like `EnumValue::is`.
            (SetItem::Enum(e), Probe::Id(id)) => e.id() == *id,
            (SetItem::Enum(e), Probe::Name(name)) => e.name() == name,
            (SetItem::Raw(s), Probe::Value(v)) => match s {
                Scalar::Int(id) => v.id() == *id,
                Scalar::Str(name) => v.name() == name,
            },
            (SetItem::Raw(s), Probe::Id(id)) => *s == Scalar::Int(*id),
            (SetItem::Raw(s), Probe::Name(name)) => s.as_str() == Some(name.as_str()),
        }
    }

    fn matches_strict(&self, item: &SetItem) -> bool {
        match (item, self) {
            (SetItem::Enum(e), Probe::Value(v)) => e.equals_enum(v),
            (SetItem::Raw(s), Probe::Id(id)) => *s == Scalar::Int(*id),
            (SetItem::Raw(s), Probe::Name(name)) => s.as_str() == Some(name.as_str()),
            _ => false,
        }
    }
}

fn compare_items(a: &SetItem, b: &SetItem) -> Ordering {
    match (a, b) {
        (SetItem::Enum(a), SetItem::Enum(b)) => {
            if a.class() == b.class() {
                a.id().cmp(&b.id())
            } else {
                class_rank(a.class_name()).cmp(&class_rank(b.class_name()))
            }
        }
        _ => raw_key(a).compare(&raw_key(b)),
    }
}

/// The scalar an item compares as when not both sides are enums: an enum
/// value stands in for its id.
fn raw_key(item: &SetItem) -> Scalar {
    match item {
        SetItem::Enum(v) => Scalar::Int(v.id()),
        SetItem::Raw(s) => s.clone(),
    }
}

/// Stable within a process, which is all the diff contract asks of it.
fn class_rank(name: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::EnumClass;
    use crate::declaration::Declaration;

    struct Suit;

    impl EnumClass for Suit {
        const NAME: &'static str = "Suit";

        fn declare() -> Declaration {
            Declaration::new()
                .member("Clubs", 1)
                .member("Diamonds", 2)
                .member("Hearts", 3)
                .member("Spades", 4)
        }
    }

    struct Rank;

    impl EnumClass for Rank {
        const NAME: &'static str = "Rank";

        fn declare() -> Declaration {
            Declaration::new().member("Ace", 1).member("King", 13)
        }
    }

    #[test]
    fn push_keeps_insertion_order_without_dedup() {
        let mut set = Suit::collect([1, 2]).unwrap();
        set.push(Suit::make(1).unwrap());
        set.push("joker");

        assert_eq!(set.len(), 4);
        let names: Vec<String> = set.iter().map(|i| i.to_string()).collect();
        assert_eq!(names, vec!["Clubs", "Diamonds", "Clubs", "joker"]);
    }

    #[test]
    fn contains_by_predicate() {
        let set = Suit::all().unwrap();

        assert!(set.contains_by(|item| {
            item.as_enum().is_some_and(|v| v.name().starts_with("Dia"))
        }));
        assert!(!set.contains_by(|item| !item.is_enum()));

        let first = set.first_by(|item| item.field(Field::Id) == Some(Scalar::Int(3)));
        assert_eq!(first.unwrap().to_string(), "Hearts");
    }

    #[test]
    fn contains_strict_on_raw_items() {
        let mut set: EnumSet = [7].into_iter().collect();
        set.push("joker");

        assert!(set.contains_strict(7));
        assert!(set.contains_strict("joker"));
        assert!(!set.contains_strict(8));
        assert!(!set.contains_strict("JOKER"));

        // An enum probe never strictly matches a raw element, even when the
        // raw value equals its id; the loose form does.
        let clubs = Suit::make(1).unwrap();
        let raw: EnumSet = [1].into_iter().collect();
        assert!(raw.contains(clubs));
        assert!(!raw.contains_strict(clubs));
    }

    #[test]
    fn contains_where_operators() {
        let set = Suit::all().unwrap();

        assert!(set.contains_where(Field::Id, CmpOp::Gt, 3));
        assert!(!set.contains_where(Field::Id, CmpOp::Gt, 4));
        assert!(set.contains_where(Field::Id, CmpOp::Le, 1));
        assert!(!set.contains_where(Field::Id, CmpOp::Le, 0));
        assert!(set.contains_where(Field::Id, CmpOp::Ge, 4));
        assert!(!set.contains_where(Field::Id, CmpOp::Ge, 5));
        assert!(set.contains_where(Field::Name, CmpOp::Eq, "Spades"));
        assert!(set.contains_where(Field::Name, CmpOp::Ne, "Spades"));
    }

    #[test]
    fn contains_where_across_scalar_kinds() {
        let set = Suit::all().unwrap();

        // Mismatched kinds are only ever not-equal: `Ne` matches every enum
        // element, the other operators match none.
        assert!(set.contains_where(Field::Id, CmpOp::Ne, "Clubs"));
        assert!(set.contains_where(Field::Name, CmpOp::Ne, 1));
        assert!(!set.contains_where(Field::Id, CmpOp::Eq, "Clubs"));
        assert!(!set.contains_where(Field::Id, CmpOp::Lt, "Spades"));
        assert!(!set.contains_where(Field::Id, CmpOp::Le, "Spades"));
        assert!(!set.contains_where(Field::Id, CmpOp::Gt, "Clubs"));
        assert!(!set.contains_where(Field::Id, CmpOp::Ge, "Clubs"));
    }

    #[test]
    fn raw_items_have_no_fields() {
        let set: EnumSet = [1, 2, 3].into_iter().collect();

        assert!(!set.contains_field(Field::Id, 2));
        assert!(set.contains(2));
    }

    #[test]
    fn diff_against_raw_scalars_compares_ids() {
        let mut set = Suit::all().unwrap();
        set.push("joker");

        let left = set.diff([1, 4]);
        let names: Vec<String> = left.iter().map(|i| i.to_string()).collect();
        assert_eq!(names, vec!["Diamonds", "Hearts", "joker"]);

        let left = set.diff(["joker"]);
        assert_eq!(left.len(), 4);
    }

    #[test]
    fn diff_across_subtypes_removes_nothing() {
        let suits = Suit::all().unwrap();
        // Rank shares id 1 with Clubs, but diff compares distinct subtypes
        // by class identity, not id.
        let left = suits.diff(Rank::all().unwrap());
        assert_eq!(left, suits);
    }

    #[test]
    fn diff_against_a_lone_value_does_not_flatten_it() {
        let suits = Suit::all().unwrap();
        let left = suits.diff(EnumSet::from(Suit::make("Hearts").unwrap()));

        assert_eq!(left.len(), 3);
        assert!(!left.contains("Hearts"));
    }

    #[test]
    fn display_renders_like_a_list() {
        let mut set = Suit::collect(["Clubs"]).unwrap();
        set.push(7);
        assert_eq!(set.to_string(), "[Clubs, 7]");
    }
}
