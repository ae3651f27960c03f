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

//! Errors raised by enum declaration, construction and the read-only view.

use std::fmt;
use std::fmt::Display;

use thiserror::Error;

use crate::scalar::Scalar;

/// Any failure this crate can produce.
///
/// Every failure is synchronous and terminal for the operation that raised
/// it; nothing is retried or downgraded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnumError {
    /// The member set declared for a subtype is malformed or empty.
    #[error("invalid declaration for enum `{class}`: {problem}")]
    InvalidDeclaration {
        /// The declaring subtype.
        class: &'static str,
        /// What exactly is wrong with the declaration.
        problem: DeclarationProblem,
    },
    /// Lookup miss when constructing from a name.
    #[error("unknown name `{name}` for enum `{class}`")]
    UnknownName {
        /// The target subtype.
        class: &'static str,
        /// The name that was not declared.
        name: String,
    },
    /// Lookup miss when constructing from an id.
    #[error("unknown id `{id}` for enum `{class}`")]
    UnknownId {
        /// The target subtype.
        class: &'static str,
        /// The id that was not declared.
        id: i64,
    },
    /// Construction from a value belonging to a different subtype.
    #[error("cannot instantiate `{expected}` with an instance of `{actual}`")]
    SubtypeMismatch {
        /// The subtype being constructed.
        expected: &'static str,
        /// The subtype the supplied value belongs to.
        actual: &'static str,
    },
    /// Construction from a value no conversion exists for. Raised by
    /// [`Enumable`](crate::Enumable) implementations that cannot produce an
    /// enum value for the target subtype.
    #[error("cannot instantiate `{class}` from an unsupported value")]
    InvalidInput {
        /// The target subtype.
        class: &'static str,
    },
    /// Attempted mutation of the plain key/value view of an enum value.
    #[error("enum values are read only")]
    ReadOnlyViolation,
}

/// The specific defect in a rejected member declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationProblem {
    /// A member was declared with a non-integer id.
    NonIntegerId {
        /// The member name.
        name: &'static str,
        /// The offending declared value.
        value: Scalar,
    },
    /// Two members share one id.
    DuplicateId {
        /// The second member declared with the id.
        name: &'static str,
        /// The repeated id.
        id: i64,
    },
    /// One name was declared twice.
    DuplicateName {
        /// The repeated name.
        name: &'static str,
    },
    /// The declaration has no members at all.
    Empty,
}

impl Display for DeclarationProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationProblem::NonIntegerId { name, value } => {
                write!(f, "member id must be an integer, but `{name}` is `{value}`")
            }
            DeclarationProblem::DuplicateId { name, id } => {
                write!(f, "member id must be unique, but `{name}` repeats `{id}`")
            }
            DeclarationProblem::DuplicateName { name } => {
                write!(f, "member name `{name}` is declared twice")
            }
            DeclarationProblem::Empty => {
                write!(f, "an enum must declare at least one member")
            }
        }
    }
}
