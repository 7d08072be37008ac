// SPDX-License-Identifier: Apache-2.0

//! Constant-time scalar multiplication for short Weierstrass curves
//! *y² = x³ − 3x + b* over a prime field.
//!
//! The arithmetic operates on projective points in Montgomery form
//! throughout and uses the complete addition formulas of Renes, Costello
//! and Batina specialized for *a = −3*, so the hot path contains no
//! point-at-infinity dispatch. Scalar multiplication runs a fixed 4-bit
//! windowed ladder whose table lookups go through a scatter/gather layer
//! with an index-independent memory access pattern, and can additionally
//! blind both the base point (projectively) and the scalar (by a multiple
//! of the group order).
//!
//! For the NIST P-256 generator point a precomputed multi-table ladder is
//! taken instead, needing one mixed addition per scalar nibble and no
//! doublings. The table asset is gated by the `p256_gen_tables` Cargo
//! feature (enabled by default).
//!
//! Entry points are [`EcContext`] for binding a curve and [`EcPoint`] for
//! the point operations.

#![no_std]

use ecmult_utils_common as utils_common;

mod curve;
mod error;
mod field;
#[cfg(feature = "p256_gen_tables")]
mod p256_tables;
mod point;
mod protected;
mod scalar;
mod weierstrass;
mod window;

pub use curve::EcContext;
pub use error::EcError;
pub use point::EcPoint;
