// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Module containing tests for datasets, counting and the entropy layer.
mod cache_tests;
mod entropy_tests;
