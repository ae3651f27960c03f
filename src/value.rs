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

//! Enum values: one `(name, id)` pair from a subtype's closed member set.

use std::any::TypeId;
use std::borrow::Cow;
use std::fmt;
use std::fmt::Debug;
use std::fmt::Display;

use dupe::Dupe;
use serde::Serialize;

use crate::class::EnumClass;
use crate::declaration::Member;
use crate::error::EnumError;
use crate::registry;
use crate::scalar::Scalar;

/// Identity of a concrete enum subtype: its `TypeId` plus display name.
///
/// Two values belong to the same subtype iff their `ClassId`s are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassId {
    type_id: TypeId,
    name: &'static str,
}

impl Dupe for ClassId {}

impl ClassId {
    /// The identity of subtype `T`.
    pub fn of<T: EnumClass>() -> ClassId {
        ClassId {
            type_id: TypeId::of::<T>(),
            name: T::NAME,
        }
    }

    /// The subtype's display name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// One member of a subtype's closed set of named integer constants.
///
/// Values are immutable after construction; the derived equality (subtype,
/// name and id together) coincides with [`EnumValue::equals_enum`], since a
/// validated `(subtype, id)` pair determines its name.
#[derive(Debug, Clone, Copy, Dupe, PartialEq, Eq, Hash)]
pub struct EnumValue {
    class: ClassId,
    name: &'static str,
    id: i64,
}

impl EnumValue {
    pub(crate) fn from_member<T: EnumClass>(member: Member) -> EnumValue {
        EnumValue {
            class: ClassId::of::<T>(),
            name: member.name(),
            id: member.id(),
        }
    }

    /// The member name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The member id.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The identity of the subtype this value belongs to.
    pub fn class(&self) -> ClassId {
        self.class
    }

    /// The display name of the subtype this value belongs to.
    pub fn class_name(&self) -> &'static str {
        self.class.name
    }

    /// Strict equality: same concrete subtype AND same id.
    ///
    /// Never true across subtypes, even when the ids coincide.
    pub fn equals_enum(&self, other: &EnumValue) -> bool {
        self.class == other.class && self.id == other.id
    }

    /// Polymorphic equality against anything convertible to an
    /// [`EnumSource`].
    ///
    /// An [`EnumValue`] or [`Enumable`] matches via [`EnumValue::equals_enum`]
    /// (an enumable that fails to convert matches nothing); a string matches
    /// this value's name. A bare integer matches this value's id with NO
    /// subtype check: two unrelated subtypes sharing an id are `is` each
    /// other when compared by raw id. That is a deliberate quirk of the
    /// design, kept as-is; use [`EnumValue::equals_enum`] when subtype
    /// identity matters.
    pub fn is<'a>(&self, other: impl Into<EnumSource<'a>>) -> bool {
        match other.into() {
            EnumSource::Value(v) => self.equals_enum(&v),
            EnumSource::Enumable(e) => match e.to_enum_value() {
                Ok(v) => self.equals_enum(&v),
                Err(_) => false,
            },
            EnumSource::Id(id) => self.id == id,
            EnumSource::Name(name) => self.name == name,
        }
    }

    /// True iff any element of `list` satisfies [`EnumValue::is`].
    pub fn in_set<'a, I>(&self, list: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<EnumSource<'a>>,
    {
        list.into_iter().any(|item| self.is(item))
    }

    /// The plain `{id, name}` view of this value.
    pub fn to_key_value(&self) -> KeyValue {
        KeyValue {
            id: self.id,
            name: self.name,
        }
    }
}

/// Renders as the member name.
impl Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Serializes as the plain `{id, name}` map.
impl Serialize for EnumValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_key_value().serialize(serializer)
    }
}

/// External capability: a type convertible to an [`EnumValue`].
///
/// The single conversion operation is all the crate ever uses; conversion
/// failures (including [`EnumError::InvalidInput`] for values no conversion
/// exists for) propagate unchanged through construction, and read as "no
/// match" in comparisons.
pub trait Enumable {
    /// Produce the enum value this object stands for.
    fn to_enum_value(&self) -> Result<EnumValue, EnumError>;
}

/// Anything an enum value can be constructed from or compared against:
/// a member name, a member id, another [`EnumValue`], or an [`Enumable`].
pub enum EnumSource<'a> {
    /// A member name.
    Name(Cow<'a, str>),
    /// A member id.
    Id(i64),
    /// An already-constructed enum value.
    Value(EnumValue),
    /// An external object convertible to an enum value.
    Enumable(&'a dyn Enumable),
}

impl Debug for EnumSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumSource::Name(name) => f.debug_tuple("Name").field(name).finish(),
            EnumSource::Id(id) => f.debug_tuple("Id").field(id).finish(),
            EnumSource::Value(v) => f.debug_tuple("Value").field(v).finish(),
            EnumSource::Enumable(_) => f.write_str("Enumable(..)"),
        }
    }
}

impl From<i64> for EnumSource<'_> {
    fn from(id: i64) -> Self {
        EnumSource::Id(id)
    }
}

impl From<i32> for EnumSource<'_> {
    fn from(id: i32) -> Self {
        EnumSource::Id(id as i64)
    }
}

impl<'a> From<&'a str> for EnumSource<'a> {
    fn from(name: &'a str) -> Self {
        EnumSource::Name(Cow::Borrowed(name))
    }
}

impl From<String> for EnumSource<'_> {
    fn from(name: String) -> Self {
        EnumSource::Name(Cow::Owned(name))
    }
}

impl From<EnumValue> for EnumSource<'_> {
    fn from(value: EnumValue) -> Self {
        EnumSource::Value(value)
    }
}

impl From<&EnumValue> for EnumSource<'_> {
    fn from(value: &EnumValue) -> Self {
        EnumSource::Value(*value)
    }
}

impl<'a> From<&'a dyn Enumable> for EnumSource<'a> {
    fn from(enumable: &'a dyn Enumable) -> Self {
        EnumSource::Enumable(enumable)
    }
}

/// Read-only `{id, name}` representation of an [`EnumValue`].
///
/// This is the only serialized shape the crate produces; the field naming is
/// fixed to `id`/`name`. The view cannot be written through:
/// [`KeyValue::set`] and [`KeyValue::unset`] always fail with
/// [`EnumError::ReadOnlyViolation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyValue {
    id: i64,
    name: &'static str,
}

impl KeyValue {
    /// The `id` field.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The `name` field.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Read one field by key; `None` for keys other than `id` and `name`.
    pub fn get(&self, key: &str) -> Option<Scalar> {
        match key {
            "id" => Some(Scalar::Int(self.id)),
            "name" => Some(Scalar::from(self.name)),
            _ => None,
        }
    }

    /// True iff `key` names a field of the view.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Always fails: enum values are read only.
    pub fn set(&mut self, _key: &str, _value: impl Into<Scalar>) -> Result<(), EnumError> {
        Err(EnumError::ReadOnlyViolation)
    }

    /// Always fails: enum values are read only.
    pub fn unset(&mut self, _key: &str) -> Result<(), EnumError> {
        Err(EnumError::ReadOnlyViolation)
    }
}

pub(crate) fn construct<T: EnumClass>(source: EnumSource) -> Result<EnumValue, EnumError> {
    match source {
        EnumSource::Name(name) => {
            let members = registry::members_of::<T>()?;
            match members.by_name(&name) {
                Some(member) => Ok(EnumValue::from_member::<T>(member)),
                None => Err(EnumError::UnknownName {
                    class: T::NAME,
                    name: name.into_owned(),
                }),
            }
        }
        EnumSource::Id(id) => {
            let members = registry::members_of::<T>()?;
            match members.by_id(id) {
                Some(member) => Ok(EnumValue::from_member::<T>(member)),
                None => Err(EnumError::UnknownId { class: T::NAME, id }),
            }
        }
        EnumSource::Value(value) => {
            check_class::<T>(&value)?;
            Ok(value)
        }
        EnumSource::Enumable(enumable) => {
            let value = enumable.to_enum_value()?;
            check_class::<T>(&value)?;
            Ok(value)
        }
    }
}

pub(crate) fn can_make<T: EnumClass>(source: EnumSource) -> bool {
    match source {
        EnumSource::Name(name) => match registry::members_of::<T>() {
            Ok(members) => members.by_name(&name).is_some(),
            Err(_) => false,
        },
        EnumSource::Id(id) => match registry::members_of::<T>() {
            Ok(members) => members.by_id(id).is_some(),
            Err(_) => false,
        },
        EnumSource::Value(value) => value.class == ClassId::of::<T>(),
        EnumSource::Enumable(enumable) => match enumable.to_enum_value() {
            Ok(value) => value.class == ClassId::of::<T>(),
            Err(_) => false,
        },
    }
}

fn check_class<T: EnumClass>(value: &EnumValue) -> Result<(), EnumError> {
    if value.class == ClassId::of::<T>() {
        Ok(())
    } else {
        Err(EnumError::SubtypeMismatch {
            expected: T::NAME,
            actual: value.class.name,
        })
    }
}
