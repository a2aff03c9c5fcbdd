// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::sql::physical_table::PhysicalTable;

use super::{modifier::Modifier, options::UpdateOptions, selector::Selector};

/// Abstract representation of an update statement: which rows (`selector`), what changes
/// (`modifier`), and how (`options`). Compiled into a single `UPDATE` by the update transformer.
#[derive(Debug, Clone)]
pub struct AbstractUpdate {
    /// The table to update
    pub table: PhysicalTable,
    /// The rows to update
    pub selector: Selector,
    /// The changes to apply to each row
    pub modifier: Modifier,
    pub options: UpdateOptions,
}
