// SPDX-License-Identifier: Apache-2.0

//! Helpers related to `alloc`.

extern crate alloc;
use alloc::vec::Vec;

use crate::zeroize;

/// Memory allocation error.
#[derive(Clone, Copy, Debug)]
pub enum TryNewError {
    /// Memory allocation failure.
    MemoryAllocationFailure,
}

/// Convenience helper to allocate a default-initialized `Vec` of a given
/// length, handling memory allocation failure gracefully.
///
/// # Arguments:
///
/// * `len` - The length to resize the `Vec` to.
///
/// # Errors:
///
/// * [`TryNewError::MemoryAllocationFailure`] - The memory allocation has
///   failed.
pub fn try_alloc_vec<T: Default + Clone>(len: usize) -> Result<Vec<T>, TryNewError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| TryNewError::MemoryAllocationFailure)?;
    v.resize(len, T::default());
    Ok(v)
}

/// Convenience helper to allocate a default-initialized and
/// [`Zeroizing`](zeroize::Zeroizing) wrapped `Vec` of a given length,
/// handling memory allocation failure gracefully.
///
/// # Arguments:
///
/// * `len` - The length to resize the `Vec` to.
///
/// # Errors:
///
/// * [`TryNewError::MemoryAllocationFailure`] - The memory allocation has
///   failed.
pub fn try_alloc_zeroizing_vec<T: zeroize::Zeroize + Default + Clone>(
    len: usize,
) -> Result<zeroize::Zeroizing<Vec<T>>, TryNewError> {
    Ok(try_alloc_vec(len)?.into())
}
