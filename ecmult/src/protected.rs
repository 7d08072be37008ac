// SPDX-License-Identifier: Apache-2.0

//! Lookup tables with an index-independent memory access pattern.

extern crate alloc;
use alloc::vec::Vec;

use crate::utils_common::{alloc::try_alloc_zeroizing_vec, splitmix64::SplitMix64, zeroize};
use crate::EcError;

/// A table of equally sized limb entries whose lookups do not reveal the
/// accessed index.
///
/// [`scatter()`](Self::scatter) stores the entries interleaved: the buffer
/// holds one row per limb position, each row carrying that limb of every
/// entry, with the entry order additionally permuted under a seed-derived
/// XOR mask. [`gather()`](Self::gather) reads every entry of every row and
/// selects the requested one with constant-time masks, so both the memory
/// access pattern and the control flow are independent of the index.
pub(crate) struct ProtectedTable {
    nr_entries: usize,
    entry_nlimbs: usize,
    index_mask: usize,
    limbs: zeroize::Zeroizing<Vec<cmpa::LimbType>>,
}

impl ProtectedTable {
    /// Build a protected table from a set of entries.
    ///
    /// # Arguments:
    ///
    /// * `entries` - The entries, all of the same limb count. The entry
    ///   count must be a power of two.
    /// * `seed` - Seed for the storage order permutation.
    ///
    /// # Errors:
    ///
    /// * [`EcError::MemoryAllocationFailure`] - The buffer allocation
    ///   failed.
    pub fn scatter(entries: &[&[cmpa::LimbType]], seed: u64) -> Result<Self, EcError> {
        let nr_entries = entries.len();
        debug_assert!(nr_entries.is_power_of_two());
        let entry_nlimbs = entries[0].len();
        let index_mask = SplitMix64::new(seed).next_u64() as usize & (nr_entries - 1);

        let mut limbs = try_alloc_zeroizing_vec::<cmpa::LimbType>(nr_entries * entry_nlimbs)?;
        for (i, entry) in entries.iter().enumerate() {
            debug_assert_eq!(entry.len(), entry_nlimbs);
            let pos = i ^ index_mask;
            for (l, limb) in entry.iter().enumerate() {
                limbs[l * nr_entries + pos] = *limb;
            }
        }

        Ok(Self {
            nr_entries,
            entry_nlimbs,
            index_mask,
            limbs,
        })
    }

    /// Read entry `index` into `dst`.
    ///
    /// Every limb of every entry is read, with the requested one selected
    /// under a constant-time mask.
    pub fn gather(&self, dst: &mut [cmpa::LimbType], index: usize) {
        debug_assert_eq!(dst.len(), self.entry_nlimbs);
        debug_assert!(index < self.nr_entries);
        let pos = (index ^ self.index_mask) as cmpa::LimbType;
        for (l, dst_limb) in dst.iter_mut().enumerate() {
            let row = &self.limbs[l * self.nr_entries..(l + 1) * self.nr_entries];
            let mut selected: cmpa::LimbType = 0;
            for (i, limb) in row.iter().enumerate() {
                let is_requested = cmpa::ct_eq_l_l(i as cmpa::LimbType, pos);
                selected = is_requested.select(selected, *limb);
            }
            *dst_limb = selected;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils_common::alloc::try_alloc_vec;

    #[test]
    fn test_protected_table_roundtrip() {
        const NR_ENTRIES: usize = 16;
        const ENTRY_NLIMBS: usize = 5;

        let mut backing = try_alloc_vec::<cmpa::LimbType>(NR_ENTRIES * ENTRY_NLIMBS).unwrap();
        for (i, limb) in backing.iter_mut().enumerate() {
            *limb = (0x0101 * i + 1) as cmpa::LimbType;
        }
        let entries: [&[cmpa::LimbType]; NR_ENTRIES] =
            core::array::from_fn(|i| &backing[i * ENTRY_NLIMBS..(i + 1) * ENTRY_NLIMBS]);

        // The gathered contents must be seed-independent.
        for seed in [0u64, 1, 0xfff, u64::MAX] {
            let table = ProtectedTable::scatter(&entries, seed).unwrap();
            let mut gathered = [0 as cmpa::LimbType; ENTRY_NLIMBS];
            for (i, entry) in entries.iter().enumerate() {
                table.gather(&mut gathered, i);
                assert_eq!(&gathered[..], *entry);
            }
        }
    }

    #[test]
    fn test_protected_table_seed_permutes_storage() {
        const NR_ENTRIES: usize = 4;
        let backing: [cmpa::LimbType; NR_ENTRIES] = [10, 20, 30, 40];
        let entries: [&[cmpa::LimbType]; NR_ENTRIES] =
            core::array::from_fn(|i| &backing[i..i + 1]);

        // Some seed pair must disagree on the raw storage order even though
        // gather() yields identical entries.
        let mut permuted = false;
        let reference = ProtectedTable::scatter(&entries, 0).unwrap();
        for seed in 1u64..16 {
            let table = ProtectedTable::scatter(&entries, seed).unwrap();
            permuted |= *table.limbs != *reference.limbs;
        }
        assert!(permuted);
    }
}
