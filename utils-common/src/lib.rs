// SPDX-License-Identifier: Apache-2.0

#![no_std]

pub mod alloc;
pub mod splitmix64;
pub mod zeroize;
