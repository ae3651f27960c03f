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

//! Member declarations: the closed, ordered `(name, id)` set of a subtype.

use dupe::Dupe;

use crate::error::DeclarationProblem;
use crate::error::EnumError;
use crate::scalar::Scalar;

/// The member list a subtype declares, before validation.
///
/// Built once per subtype inside
/// [`EnumClass::declare`](crate::EnumClass::declare):
///
/// ```
/// use numerate::Declaration;
///
/// let decl = Declaration::new()
///     .member("Zebra", 1)
///     .member("Giraffe", 2)
///     .member("Meerkat", 3);
/// # let _ = decl;
/// ```
///
/// Declared values are [`Scalar`]s rather than bare integers so that a
/// malformed declaration is representable; validation rejects anything that
/// is not an integer.
#[derive(Debug, Clone, Default)]
pub struct Declaration {
    entries: Vec<(&'static str, Scalar)>,
}

impl Declaration {
    /// An empty declaration. Validation rejects it unless members are added.
    pub fn new() -> Declaration {
        Declaration::default()
    }

    /// Append one named member, preserving declaration order.
    pub fn member(mut self, name: &'static str, value: impl Into<Scalar>) -> Declaration {
        self.entries.push((name, value.into()));
        self
    }

    /// Check the closed-set invariants and produce the validated member set.
    ///
    /// Rejected declarations: a non-integer id, a repeated id, a repeated
    /// name, or no members at all.
    pub(crate) fn validate(self, class: &'static str) -> Result<Members, EnumError> {
        let mut members: Vec<Member> = Vec::with_capacity(self.entries.len());

        for (name, value) in self.entries {
            let id = match value.as_int() {
                Some(id) => id,
                None => {
                    return Err(EnumError::InvalidDeclaration {
                        class,
                        problem: DeclarationProblem::NonIntegerId { name, value },
                    });
                }
            };

            if members.iter().any(|m| m.id == id) {
                return Err(EnumError::InvalidDeclaration {
                    class,
                    problem: DeclarationProblem::DuplicateId { name, id },
                });
            }

            if members.iter().any(|m| m.name == name) {
                return Err(EnumError::InvalidDeclaration {
                    class,
                    problem: DeclarationProblem::DuplicateName { name },
                });
            }

            members.push(Member { name, id });
        }

        if members.is_empty() {
            return Err(EnumError::InvalidDeclaration {
                class,
                problem: DeclarationProblem::Empty,
            });
        }

        Ok(Members { class, members })
    }
}

/// One validated `(name, id)` pair.
#[derive(Debug, Clone, Copy, Dupe, PartialEq, Eq, Hash)]
pub struct Member {
    pub(crate) name: &'static str,
    pub(crate) id: i64,
}

impl Member {
    /// The member name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The member id.
    pub fn id(&self) -> i64 {
        self.id
    }
}

/// The validated member set of one subtype, in declaration order.
///
/// Obtained from [`EnumClass::members`](crate::EnumClass::members); computed
/// once per subtype and cached for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Members {
    class: &'static str,
    members: Vec<Member>,
}

impl Members {
    /// The declaring subtype's name.
    pub fn class(&self) -> &'static str {
        self.class
    }

    /// Number of declared members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True iff no members are declared. Never true for a validated set.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterate the members in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Member> + '_ {
        self.members.iter().copied()
    }

    /// Look a member up by name.
    pub fn by_name(&self, name: &str) -> Option<Member> {
        self.members.iter().find(|m| m.name == name).copied()
    }

    /// Look a member up by id.
    pub fn by_id(&self, id: i64) -> Option<Member> {
        self.members.iter().find(|m| m.id == id).copied()
    }
}
