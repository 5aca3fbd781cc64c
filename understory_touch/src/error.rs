// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use crate::types::DeviceId;

/// Failure to change the device registry.
///
/// The event path never surfaces these: the router logs them and carries on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A device with this id is already registered.
    #[error("{0} is already registered")]
    DuplicateDevice(DeviceId),
    /// No device with this id is registered.
    #[error("{0} is not registered")]
    UnknownDevice(DeviceId),
}
