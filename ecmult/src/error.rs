// SPDX-License-Identifier: Apache-2.0

//! Error type definitions.

use crate::utils_common::alloc::TryNewError;
use core::convert;

/// Common error returned by the curve arithmetic primitives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EcError {
    /// Memory allocation failure.
    MemoryAllocationFailure,
    /// A mandatory input was empty.
    NotEnoughData,
    /// An input value is outside the expected domain.
    InvalidValue,
    /// A point is not on the curve.
    InvalidPoint,
    /// Points associated with different curve contexts were mixed.
    CurveMismatch,
    /// Internal logic error.
    Internal,
}

impl convert::From<TryNewError> for EcError {
    fn from(value: TryNewError) -> Self {
        match value {
            TryNewError::MemoryAllocationFailure => EcError::MemoryAllocationFailure,
        }
    }
}
