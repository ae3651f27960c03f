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

//! The subtype trait: declare a closed member set, get the enum API.

use std::sync::Arc;

use crate::declaration::Declaration;
use crate::declaration::Members;
use crate::error::EnumError;
use crate::registry;
use crate::scalar::Scalar;
use crate::set::CmpOp;
use crate::set::EnumSet;
use crate::set::Field;
use crate::set::SetItem;
use crate::value;
use crate::value::EnumSource;
use crate::value::EnumValue;

/// A concrete enum subtype: a marker type declaring a fixed, ordered set of
/// named integer constants.
///
/// Implementors supply only the subtype name and the declaration; everything
/// else is provided:
///
/// ```
/// use numerate::Declaration;
/// use numerate::EnumClass;
///
/// struct Animal;
///
/// impl EnumClass for Animal {
///     const NAME: &'static str = "Animal";
///
///     fn declare() -> Declaration {
///         Declaration::new()
///             .member("Zebra", 1)
///             .member("Giraffe", 2)
///             .member("Meerkat", 3)
///     }
/// }
///
/// let zebra = Animal::make("Zebra")?;
/// assert_eq!(zebra.id(), 1);
/// assert!(Animal::all()?.contains(3));
/// # Ok::<(), numerate::EnumError>(())
/// ```
///
/// The declaration is validated on first use and the validated set is cached
/// for the process lifetime.
pub trait EnumClass: 'static {
    /// The subtype's display name, used in errors and cross-subtype
    /// comparisons.
    const NAME: &'static str;

    /// The subtype's member list, in declaration order.
    fn declare() -> Declaration;

    /// The validated member set, computing and caching it on first use.
    fn members() -> Result<Arc<Members>, EnumError>
    where
        Self: Sized,
    {
        registry::members_of::<Self>()
    }

    /// Build a value of this subtype from a name, an id, another value of
    /// this subtype, or an [`Enumable`](crate::Enumable).
    fn construct<'a>(value: impl Into<EnumSource<'a>>) -> Result<EnumValue, EnumError>
    where
        Self: Sized,
    {
        value::construct::<Self>(value.into())
    }

    /// Idempotent constructor: a value of this subtype (or an enumable
    /// resolving to one) passes through unchanged after the subtype check;
    /// anything else goes through [`EnumClass::construct`]. In particular
    /// `make(make(x)) == make(x)` for any valid `x`.
    fn make<'a>(value: impl Into<EnumSource<'a>>) -> Result<EnumValue, EnumError>
    where
        Self: Sized,
    {
        value::construct::<Self>(value.into())
    }

    /// Non-raising predicate form of [`EnumClass::make`]: true iff `make`
    /// would succeed. A malformed declaration also reports `false`.
    fn can_make<'a>(value: impl Into<EnumSource<'a>>) -> bool
    where
        Self: Sized,
    {
        value::can_make::<Self>(value.into())
    }

    /// Every declared member, in declaration order.
    fn all() -> Result<EnumSet, EnumError>
    where
        Self: Sized,
    {
        Ok(Self::members()?
            .iter()
            .map(EnumValue::from_member::<Self>)
            .collect())
    }

    /// Build a set from explicit values, each passed through
    /// [`EnumClass::make`].
    fn collect<'a, I>(values: I) -> Result<EnumSet, EnumError>
    where
        Self: Sized,
        I: IntoIterator,
        I::Item: Into<EnumSource<'a>>,
    {
        let mut set = EnumSet::new();
        for value in values {
            set.push(Self::make(value)?);
        }
        Ok(set)
    }

    /// [`EnumSet::contains`] over [`EnumClass::all`].
    fn contains<'a>(value: impl Into<EnumSource<'a>>) -> Result<bool, EnumError>
    where
        Self: Sized,
    {
        Ok(Self::all()?.contains(value))
    }

    /// [`EnumSet::contains_strict`] over [`EnumClass::all`].
    fn contains_strict<'a>(value: impl Into<EnumSource<'a>>) -> Result<bool, EnumError>
    where
        Self: Sized,
    {
        Ok(Self::all()?.contains_strict(value))
    }

    /// [`EnumSet::contains_field`] over [`EnumClass::all`].
    fn contains_field(field: Field, value: impl Into<Scalar>) -> Result<bool, EnumError>
    where
        Self: Sized,
    {
        Ok(Self::all()?.contains_field(field, value))
    }

    /// [`EnumSet::contains_where`] over [`EnumClass::all`].
    fn contains_where(field: Field, op: CmpOp, value: impl Into<Scalar>) -> Result<bool, EnumError>
    where
        Self: Sized,
    {
        Ok(Self::all()?.contains_where(field, op, value))
    }

    /// [`EnumSet::contains_strict_field`] over [`EnumClass::all`].
    fn contains_strict_field(field: Field, value: impl Into<Scalar>) -> Result<bool, EnumError>
    where
        Self: Sized,
    {
        Ok(Self::all()?.contains_strict_field(field, value))
    }

    /// [`EnumSet::diff`] over [`EnumClass::all`].
    fn diff<I>(other: I) -> Result<EnumSet, EnumError>
    where
        Self: Sized,
        I: IntoIterator,
        I::Item: Into<SetItem>,
    {
        Ok(Self::all()?.diff(other))
    }
}
