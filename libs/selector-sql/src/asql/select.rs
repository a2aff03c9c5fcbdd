// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::sql::physical_table::PhysicalTable;

use super::{options::SelectOptions, selector::Selector};

/// Abstract representation of a select statement.
#[derive(Debug, Clone)]
pub struct AbstractSelect {
    /// The table to select from
    pub table: PhysicalTable,
    /// The rows to select
    pub selector: Selector,
    pub options: SelectOptions,
}
