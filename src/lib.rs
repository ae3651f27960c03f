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

//! Closed-set enumerations as value objects, with runtime checking of
//! validity and an enum-aware collection type.
//!
//! A subtype implements [`EnumClass`] by declaring its named integer
//! constants once; each [`EnumValue`] wraps one validated `(name, id)` pair
//! and can be built from a name, an id, another value of the same subtype,
//! or any external [`Enumable`] object. [`EnumSet`] is an ordered collection
//! of values (and, if you put them there, raw scalars) with membership and
//! diff queries that understand enum identity.
//!
//! ```
//! use numerate::Declaration;
//! use numerate::EnumClass;
//!
//! struct Animal;
//!
//! impl EnumClass for Animal {
//!     const NAME: &'static str = "Animal";
//!
//!     fn declare() -> Declaration {
//!         Declaration::new()
//!             .member("Zebra", 1)
//!             .member("Giraffe", 2)
//!             .member("Meerkat", 3)
//!     }
//! }
//!
//! let zebra = Animal::make("Zebra")?;
//! assert_eq!(zebra.id(), 1);
//! assert!(zebra.is(1));
//!
//! let some = Animal::collect([1, 3])?;
//! assert!(some.contains("Meerkat"));
//! assert_eq!(Animal::all()?.diff(some).to_string(), "[Giraffe]");
//! # Ok::<(), numerate::EnumError>(())
//! ```
//!
//! Everything is synchronous and immutable after construction; the only
//! shared state is the per-subtype validated-declaration cache, populated at
//! most once per subtype.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod class;
mod declaration;
mod error;
mod registry;
mod scalar;
mod set;
mod value;

pub use crate::class::EnumClass;
pub use crate::declaration::Declaration;
pub use crate::declaration::Member;
pub use crate::declaration::Members;
pub use crate::error::DeclarationProblem;
pub use crate::error::EnumError;
pub use crate::scalar::Scalar;
pub use crate::set::CmpOp;
pub use crate::set::EnumSet;
pub use crate::set::Field;
pub use crate::set::SetItem;
pub use crate::value::ClassId;
pub use crate::value::EnumSource;
pub use crate::value::EnumValue;
pub use crate::value::Enumable;
pub use crate::value::KeyValue;
