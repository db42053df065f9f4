// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod test_bidi;
mod test_layout;
mod test_shrink;
pub(crate) mod utils;
