// SPDX-License-Identifier: Apache-2.0

//! Precomputed multi-table for the NIST P-256 generator point.
//!
//! The asset holds [`P256_NR_TABLES`] tables of [`P256_POINTS_PER_TABLE`]
//! affine points each, with table *i* containing the multiples
//! *(j · 2<sup>i·w</sup>) · G* for *j = 0 .. 2<sup>w</sup> − 1* and
//! *w =* [`P256_WINDOW_NBITS`]. A right-to-left windowed ladder over these
//! tables needs one mixed addition per scalar window and no doublings.
//!
//! The blob stores plain big-endian coordinate pairs, the point at infinity
//! (j = 0) as (0, 0); conversion to Montgomery form and the seeded scatter
//! into protected tables happen at context construction. The asset is
//! regenerated with `tools/gen_p256_tables.py`.

/// Window width in bits consumed per table.
pub(crate) const P256_WINDOW_NBITS: u32 = 4;

/// Number of precomputed tables.
pub(crate) const P256_NR_TABLES: usize = 64;

/// Number of points per table, 2^[`P256_WINDOW_NBITS`].
pub(crate) const P256_POINTS_PER_TABLE: usize = 1 << P256_WINDOW_NBITS;

/// Byte length of one affine coordinate.
const P256_COORD_BYTES: usize = 32;

static P256_GEN_TABLES: &[u8; P256_NR_TABLES * P256_POINTS_PER_TABLE * 2 * P256_COORD_BYTES] =
    include_bytes!("p256_gen_tables.bin");

/// Get the plain big-endian affine (x, y) of table entry (`table`, `point`).
pub(crate) fn table_point(table: usize, point: usize) -> (&'static [u8], &'static [u8]) {
    debug_assert!(table < P256_NR_TABLES);
    debug_assert!(point < P256_POINTS_PER_TABLE);
    let offset = (table * P256_POINTS_PER_TABLE + point) * 2 * P256_COORD_BYTES;
    (
        &P256_GEN_TABLES[offset..offset + P256_COORD_BYTES],
        &P256_GEN_TABLES[offset + P256_COORD_BYTES..offset + 2 * P256_COORD_BYTES],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{NIST_P256_G_X, NIST_P256_G_Y};

    #[test]
    fn test_p256_tables_first_entries() {
        // Entry (0, 0) encodes the point at infinity, entry (0, 1) is the
        // generator itself.
        let (x, y) = table_point(0, 0);
        assert!(x.iter().all(|b| *b == 0));
        assert!(y.iter().all(|b| *b == 0));

        let (x, y) = table_point(0, 1);
        assert_eq!(x, &NIST_P256_G_X[..]);
        assert_eq!(y, &NIST_P256_G_Y[..]);
    }

    #[test]
    fn test_p256_tables_identity_rows() {
        // Every table's entry 0 is the point at infinity.
        for table in 0..P256_NR_TABLES {
            let (x, y) = table_point(table, 0);
            assert!(x.iter().all(|b| *b == 0));
            assert!(y.iter().all(|b| *b == 0));
        }
    }
}
