// SPDX-License-Identifier: Apache-2.0

//! Curve context definitions.

extern crate alloc;
use alloc::vec::Vec;

use crate::field::FieldOps;
use crate::utils_common::alloc::try_alloc_vec;
use crate::weierstrass::WeierstrassOps;
use crate::EcError;

#[cfg(feature = "p256_gen_tables")]
use crate::field::FieldElement;
#[cfg(feature = "p256_gen_tables")]
use crate::p256_tables;
#[cfg(feature = "p256_gen_tables")]
use crate::protected::ProtectedTable;

pub(crate) const NIST_P256_P: [u8; 32] =
    cmpa::hexstr::bytes_from_hexstr_cnst::<32>("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff");
#[cfg(test)]
pub(crate) const NIST_P256_N: [u8; 32] =
    cmpa::hexstr::bytes_from_hexstr_cnst::<32>("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551");
#[cfg(test)]
pub(crate) const NIST_P256_B: [u8; 32] =
    cmpa::hexstr::bytes_from_hexstr_cnst::<32>("5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b");
#[cfg(any(test, feature = "p256_gen_tables"))]
pub(crate) const NIST_P256_G_X: [u8; 32] =
    cmpa::hexstr::bytes_from_hexstr_cnst::<32>("6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296");
#[cfg(any(test, feature = "p256_gen_tables"))]
pub(crate) const NIST_P256_G_Y: [u8; 32] =
    cmpa::hexstr::bytes_from_hexstr_cnst::<32>("4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5");

/// Classification of the curve's prime modulus.
///
/// The dedicated class selects the precomputed generator ladder; everything
/// else runs the generic arbitrary-point ladder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ModulusClass {
    Generic,
    P256,
}

/// The scattered generator multi-table and the Montgomery form generator
/// coordinates used to recognize the generator point.
#[cfg(feature = "p256_gen_tables")]
pub(crate) struct GeneratorTables {
    pub mg_g_x: FieldElement,
    pub mg_g_y: FieldElement,
    pub tables: Vec<ProtectedTable>,
}

/// Context for one short Weierstrass curve y² = x³ − 3x + b.
///
/// Immutable after creation; may be shared across threads and outlives
/// every [`EcPoint`](crate::EcPoint) created on it.
pub struct EcContext {
    field_ops: FieldOps,
    ops: WeierstrassOps,
    /// The curve group's order, big-endian.
    order: Vec<u8>,
    modulus_class: ModulusClass,
    /// The SCA seed the protected tables were scrambled with.
    seed: u64,
    #[cfg(feature = "p256_gen_tables")]
    gen_tables: Option<GeneratorTables>,
}

impl EcContext {
    /// Create a curve context.
    ///
    /// # Arguments:
    ///
    /// * `modulus` - The curve field's prime modulus, big-endian.
    /// * `b` - The curve equation's constant term, big-endian. Must be a
    ///   field residue.
    /// * `order` - The curve group's order, big-endian. Must be of the same
    ///   length as the modulus.
    /// * `seed` - Scrambling seed for the protected generator tables.
    ///
    /// # Errors:
    ///
    /// * [`EcError::NotEnoughData`] - One of the inputs is empty.
    /// * [`EcError::InvalidValue`] - The input lengths differ, the modulus
    ///   is even, or `b` is not a field residue.
    /// * [`EcError::MemoryAllocationFailure`] - Some buffer allocation
    ///   failed.
    pub fn new(modulus: &[u8], b: &[u8], order: &[u8], seed: u64) -> Result<Self, EcError> {
        if modulus.is_empty() || b.is_empty() || order.is_empty() {
            return Err(EcError::NotEnoughData);
        }
        if b.len() != modulus.len() || order.len() != modulus.len() {
            return Err(EcError::InvalidValue);
        }

        let field_ops = FieldOps::try_new(modulus)?;
        let mg_b = field_ops.element_from_plain_bytes(b)?;
        let ops = WeierstrassOps::new(mg_b);

        let mut order_buf = try_alloc_vec::<u8>(order.len())?;
        order_buf.copy_from_slice(order);

        let modulus_class = if modulus == NIST_P256_P.as_slice() {
            ModulusClass::P256
        } else {
            ModulusClass::Generic
        };

        #[cfg(feature = "p256_gen_tables")]
        let gen_tables = match modulus_class {
            ModulusClass::P256 => Some(Self::scramble_gen_tables_p256(&field_ops, seed)?),
            ModulusClass::Generic => None,
        };

        Ok(Self {
            field_ops,
            ops,
            order: order_buf,
            modulus_class,
            seed,
            #[cfg(feature = "p256_gen_tables")]
            gen_tables,
        })
    }

    /// Convert the compile-time generator multi-table into Montgomery form
    /// and install it into seed-scrambled protected tables.
    #[cfg(feature = "p256_gen_tables")]
    fn scramble_gen_tables_p256(
        field_ops: &FieldOps,
        seed: u64,
    ) -> Result<GeneratorTables, EcError> {
        let nlimbs = field_ops.nlimbs();

        let mut tables = Vec::new();
        tables
            .try_reserve_exact(p256_tables::P256_NR_TABLES)
            .map_err(|_| EcError::MemoryAllocationFailure)?;

        let mut entries = try_alloc_vec::<cmpa::LimbType>(
            p256_tables::P256_POINTS_PER_TABLE * 2 * nlimbs,
        )?;
        let mut mg_coord = field_ops.try_new_element()?;
        for table in 0..p256_tables::P256_NR_TABLES {
            for point in 0..p256_tables::P256_POINTS_PER_TABLE {
                let (x, y) = p256_tables::table_point(table, point);
                let entry = &mut entries[point * 2 * nlimbs..(point + 1) * 2 * nlimbs];
                field_ops.to_mg_form(&mut mg_coord, &cmpa::MpBigEndianUIntByteSlice::from_bytes(x));
                entry[..nlimbs].copy_from_slice(mg_coord.raw_limbs());
                field_ops.to_mg_form(&mut mg_coord, &cmpa::MpBigEndianUIntByteSlice::from_bytes(y));
                entry[nlimbs..].copy_from_slice(mg_coord.raw_limbs());
            }

            let mut entry_refs: [&[cmpa::LimbType]; p256_tables::P256_POINTS_PER_TABLE] =
                [&[]; p256_tables::P256_POINTS_PER_TABLE];
            for (point, entry) in entries.chunks_exact(2 * nlimbs).enumerate() {
                entry_refs[point] = entry;
            }
            tables.push(ProtectedTable::scatter(&entry_refs, seed)?);
        }

        let mut mg_g_x = field_ops.try_new_element()?;
        field_ops.to_mg_form(
            &mut mg_g_x,
            &cmpa::MpBigEndianUIntByteSlice::from_bytes(&NIST_P256_G_X),
        );
        let mut mg_g_y = field_ops.try_new_element()?;
        field_ops.to_mg_form(
            &mut mg_g_y,
            &cmpa::MpBigEndianUIntByteSlice::from_bytes(&NIST_P256_G_Y),
        );

        Ok(GeneratorTables {
            mg_g_x,
            mg_g_y,
            tables,
        })
    }

    /// Get the length of the curve field's modulus in units of bytes.
    ///
    /// Affine coordinate buffers passed to
    /// [`EcPoint::get_xy()`](crate::EcPoint::get_xy) must be exactly this
    /// long.
    pub fn field_len(&self) -> usize {
        self.field_ops.p_len()
    }

    /// Test whether the curve's modulus is the NIST P-256 prime.
    pub fn is_p256(&self) -> bool {
        self.modulus_class == ModulusClass::P256
    }

    /// Get the SCA seed used to scramble the context's protected tables.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub(crate) fn field_ops(&self) -> &FieldOps {
        &self.field_ops
    }

    pub(crate) fn weierstrass_ops(&self) -> &WeierstrassOps {
        &self.ops
    }

    pub(crate) fn order(&self) -> &[u8] {
        &self.order
    }

    #[cfg(feature = "p256_gen_tables")]
    pub(crate) fn generator_tables(&self) -> Option<&GeneratorTables> {
        self.gen_tables.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_input_validation() {
        assert_eq!(
            EcContext::new(&[], &NIST_P256_B, &NIST_P256_N, 0).err(),
            Some(EcError::NotEnoughData)
        );
        assert_eq!(
            EcContext::new(&NIST_P256_P, &NIST_P256_B[..31], &NIST_P256_N, 0).err(),
            Some(EcError::InvalidValue)
        );
        // Even modulus.
        let mut modulus = NIST_P256_P;
        modulus[31] &= !1;
        assert_eq!(
            EcContext::new(&modulus, &NIST_P256_B, &NIST_P256_N, 0).err(),
            Some(EcError::InvalidValue)
        );
        // b not a field residue.
        assert_eq!(
            EcContext::new(&NIST_P256_P, &NIST_P256_P, &NIST_P256_N, 0).err(),
            Some(EcError::InvalidValue)
        );
    }

    #[test]
    fn test_context_modulus_classification() {
        let ctx = EcContext::new(&NIST_P256_P, &NIST_P256_B, &NIST_P256_N, 1).unwrap();
        assert!(ctx.is_p256());
        assert_eq!(ctx.seed(), 1);

        // Any other modulus falls into the generic class; reuse the P-256
        // order bytes as a convenient odd dummy modulus.
        let ctx = EcContext::new(&NIST_P256_N, &NIST_P256_B, &NIST_P256_N, 1).unwrap();
        assert!(!ctx.is_p256());
    }
}
