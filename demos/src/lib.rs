// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runnable examples for the Bracken crates; see the `examples/` directory.
