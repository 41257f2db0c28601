// SPDX-FileCopyrightText: 2026 Fixroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for the fixroute workspace.
//!
//! Provides [`MockProvider`], a scripted [`ProviderAdapter`] that needs no
//! model or network.
//!
//! [`ProviderAdapter`]: fixroute_core::ProviderAdapter

pub mod mock_provider;

pub use mock_provider::MockProvider;
