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

//! Per-subtype cache of validated member sets.
//!
//! A subtype's declaration is validated on first use and the result is kept
//! for the process lifetime. Failed validations are not cached, so every
//! attempt to use a malformed subtype reports the same error.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::RwLock;

use dupe::Dupe;
use once_cell::sync::Lazy;

use crate::class::EnumClass;
use crate::declaration::Members;
use crate::error::EnumError;

static MEMBERS: Lazy<RwLock<HashMap<TypeId, Arc<Members>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// The validated member set for `T`, validating and caching on first use.
pub(crate) fn members_of<T: EnumClass>() -> Result<Arc<Members>, EnumError> {
    let key = TypeId::of::<T>();

    if let Some(members) = MEMBERS.read().unwrap().get(&key) {
        return Ok(members.dupe());
    }

    // Validate under the write lock so two first-users cannot interleave.
    let mut cache = MEMBERS.write().unwrap();
    if let Some(members) = cache.get(&key) {
        return Ok(members.dupe());
    }

    let members = Arc::new(T::declare().validate(T::NAME)?);
    cache.insert(key, members.dupe());
    Ok(members)
}
