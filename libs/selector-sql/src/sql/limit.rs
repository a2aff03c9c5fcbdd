// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{ExpressionBuilder, SQLBuilder, SQLParamContainer};

/// A `LIMIT` clause. The row count is bound as a parameter like any other caller-supplied value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limit(pub i64);

impl ExpressionBuilder for Limit {
    fn build(&self, builder: &mut SQLBuilder) {
        builder.push_str("LIMIT ");
        builder.push_param(SQLParamContainer::new(self.0));
    }
}
