// SPDX-License-Identifier: Apache-2.0

//! Public curve point operations.

use core::mem;
use core::ptr;

use crate::curve::EcContext;
use crate::scalar;
use crate::weierstrass::{OpsScratch, PointCoords};
use crate::EcError;

/// Point on a short Weierstrass curve, in projective coordinates.
///
/// The point keeps a reference to the [`EcContext`] it was created on;
/// operations combining two points reject operands from different
/// contexts. Mutating operations require exclusive access, the context
/// itself may be shared.
pub struct EcPoint<'a> {
    ctx: &'a EcContext,
    coords: PointCoords,
}

impl<'a> EcPoint<'a> {
    /// Create a point from affine big-endian coordinates.
    ///
    /// The pair (0, 0) encodes the point at infinity and is re-encoded into
    /// its projective representation. Any other input pair must satisfy the
    /// curve equation.
    ///
    /// # Arguments:
    ///
    /// * `ctx` - The curve context.
    /// * `x` - The affine x coordinate, big-endian, at most
    ///   [`field_len()`](EcContext::field_len) bytes.
    /// * `y` - The affine y coordinate, likewise.
    ///
    /// # Errors:
    ///
    /// * [`EcError::NotEnoughData`] - One of the coordinate buffers is
    ///   empty.
    /// * [`EcError::InvalidValue`] - A coordinate is longer than the field
    ///   width or not a field residue.
    /// * [`EcError::InvalidPoint`] - The coordinates do not satisfy the
    ///   curve equation.
    /// * [`EcError::MemoryAllocationFailure`] - Some buffer allocation
    ///   failed.
    pub fn new(ctx: &'a EcContext, x: &[u8], y: &[u8]) -> Result<Self, EcError> {
        if x.is_empty() || y.is_empty() {
            return Err(EcError::NotEnoughData);
        }
        if x.len() > ctx.field_len() || y.len() > ctx.field_len() {
            return Err(EcError::InvalidValue);
        }

        let fops = ctx.field_ops();
        let mut coords = PointCoords {
            x: fops.element_from_plain_bytes(x)?,
            y: fops.element_from_plain_bytes(y)?,
            z: fops.try_new_element()?,
        };
        fops.set_one(&mut coords.z);

        if fops.is_zero(&coords.x) && fops.is_zero(&coords.y) {
            coords.set_identity(fops);
        } else {
            let mut scratch = OpsScratch::try_new(fops)?;
            if !ctx
                .weierstrass_ops()
                .is_on_curve_affine(fops, &coords.x, &coords.y, &mut scratch)
            {
                return Err(EcError::InvalidPoint);
            }
        }

        Ok(Self { ctx, coords })
    }

    /// Get the curve context the point lives on.
    pub fn context(&self) -> &'a EcContext {
        self.ctx
    }

    /// Test whether the point is the point at infinity.
    pub fn is_pai(&self) -> bool {
        self.ctx.field_ops().is_zero(&self.coords.z)
    }

    /// Double the point in place.
    pub fn double(&mut self) -> Result<(), EcError> {
        let fops = self.ctx.field_ops();
        let mut scratch = OpsScratch::try_new(fops)?;
        self.ctx
            .weierstrass_ops()
            .double(fops, &mut self.coords, &mut scratch);
        Ok(())
    }

    /// Add another point into this one.
    ///
    /// # Errors:
    ///
    /// * [`EcError::CurveMismatch`] - The points belong to different curve
    ///   contexts.
    /// * [`EcError::MemoryAllocationFailure`] - The scratch allocation
    ///   failed.
    pub fn add(&mut self, other: &EcPoint) -> Result<(), EcError> {
        if !ptr::eq(self.ctx, other.ctx) {
            return Err(EcError::CurveMismatch);
        }
        let fops = self.ctx.field_ops();
        let mut scratch = OpsScratch::try_new(fops)?;
        self.ctx
            .weierstrass_ops()
            .full_add(fops, &mut self.coords, &other.coords, &mut scratch);
        Ok(())
    }

    /// Multiply the point by a scalar, in place.
    ///
    /// With a non-zero `seed`, the point's projective representation and
    /// the scalar's encoding are randomized before the ladder runs; the
    /// result is unaffected. A zero seed disables the blinding for
    /// deterministic operation, e.g. under test.
    ///
    /// # Arguments:
    ///
    /// * `scalar` - The scalar, big-endian. Interpreted as is; no reduction
    ///   modulo the group order takes place.
    /// * `seed` - Seed for the side channel countermeasures.
    ///
    /// # Errors:
    ///
    /// * [`EcError::NotEnoughData`] - The scalar is empty.
    /// * [`EcError::InvalidValue`] - The scalar has more windows than the
    ///   precomputed generator tables (generator path only).
    /// * [`EcError::MemoryAllocationFailure`] - Some buffer allocation
    ///   failed.
    pub fn scalar_mul(&mut self, scalar: &[u8], seed: u64) -> Result<(), EcError> {
        scalar::scalar_mul(self.ctx, &mut self.coords, scalar, seed)
    }

    /// Normalize the projective representation so that Z is one, or zero
    /// for the point at infinity.
    pub fn normalize(&mut self) -> Result<(), EcError> {
        let fops = self.ctx.field_ops();
        if fops.is_zero(&self.coords.z) {
            return Ok(());
        }
        let mut scratch = OpsScratch::try_new(fops)?;
        self.ctx
            .weierstrass_ops()
            .point_into_affine(fops, &mut self.coords, &mut scratch);
        fops.set_one(&mut self.coords.z);
        Ok(())
    }

    /// Negate the point in place.
    pub fn neg(&mut self) -> Result<(), EcError> {
        let fops = self.ctx.field_ops();
        let mut neg_y = fops.try_new_element()?;
        fops.set_zero(&mut neg_y);
        fops.sub_assign(&mut neg_y, &self.coords.y);
        mem::swap(&mut self.coords.y, &mut neg_y);
        Ok(())
    }

    /// Create an independent copy of the point.
    pub fn try_clone(&self) -> Result<EcPoint<'a>, EcError> {
        let fops = self.ctx.field_ops();
        let mut coords = PointCoords::try_new(fops)?;
        coords.copy_from(fops, &self.coords);
        Ok(EcPoint {
            ctx: self.ctx,
            coords,
        })
    }

    /// Overwrite this point with another one.
    ///
    /// # Errors:
    ///
    /// * [`EcError::CurveMismatch`] - The points belong to different curve
    ///   contexts.
    pub fn copy_from(&mut self, other: &EcPoint) -> Result<(), EcError> {
        if !ptr::eq(self.ctx, other.ctx) {
            return Err(EcError::CurveMismatch);
        }
        self.coords.copy_from(self.ctx.field_ops(), &other.coords);
        Ok(())
    }

    /// Test whether two points denote the same curve point.
    ///
    /// The comparison cross-multiplies the projective representations,
    /// X₁Z₂ = X₂Z₁ and Y₁Z₂ = Y₂Z₁, so differently scaled representations
    /// of the same point compare equal.
    ///
    /// # Errors:
    ///
    /// * [`EcError::CurveMismatch`] - The points belong to different curve
    ///   contexts.
    /// * [`EcError::MemoryAllocationFailure`] - The scratch allocation
    ///   failed.
    pub fn eq_point(&self, other: &EcPoint) -> Result<bool, EcError> {
        if !ptr::eq(self.ctx, other.ctx) {
            return Err(EcError::CurveMismatch);
        }
        let fops = self.ctx.field_ops();

        let p0_is_pai = fops.is_zero(&self.coords.z);
        let p1_is_pai = fops.is_zero(&other.coords.z);
        if p0_is_pai || p1_is_pai {
            return Ok(p0_is_pai && p1_is_pai);
        }

        let mut scratch = OpsScratch::try_new(fops)?;
        fops.mul(&mut scratch.t0, &self.coords.x, &other.coords.z);
        fops.mul(&mut scratch.t1, &other.coords.x, &self.coords.z);
        fops.mul(&mut scratch.t2, &self.coords.y, &other.coords.z);
        fops.mul(&mut scratch.t3, &other.coords.y, &self.coords.z);
        Ok(fops.is_equal(&scratch.t0, &scratch.t1) & fops.is_equal(&scratch.t2, &scratch.t3))
    }

    /// Encode the point's affine coordinates, big-endian.
    ///
    /// The point at infinity encodes as (0, 0).
    ///
    /// # Arguments:
    ///
    /// * `x_out` - Receives the affine x coordinate. Must be exactly
    ///   [`field_len()`](EcContext::field_len) bytes long.
    /// * `y_out` - Receives the affine y coordinate, likewise.
    ///
    /// # Errors:
    ///
    /// * [`EcError::InvalidValue`] - An output buffer length does not match
    ///   the field width.
    /// * [`EcError::MemoryAllocationFailure`] - Some buffer allocation
    ///   failed.
    pub fn get_xy(&self, x_out: &mut [u8], y_out: &mut [u8]) -> Result<(), EcError> {
        let fops = self.ctx.field_ops();
        if x_out.len() != fops.p_len() || y_out.len() != fops.p_len() {
            return Err(EcError::InvalidValue);
        }

        let mut scratch = OpsScratch::try_new(fops)?;
        let mut affine = PointCoords::try_new(fops)?;
        affine.copy_from(fops, &self.coords);
        self.ctx
            .weierstrass_ops()
            .point_into_affine(fops, &mut affine, &mut scratch);
        fops.element_into_plain_bytes(x_out, &mut affine.x);
        fops.element_into_plain_bytes(y_out, &mut affine.y);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{
        NIST_P256_B, NIST_P256_G_X, NIST_P256_G_Y, NIST_P256_N, NIST_P256_P,
    };

    const P256_2G_X: [u8; 32] = cmpa::hexstr::bytes_from_hexstr_cnst::<32>(
        "7cf27b188d034f7e8a52380304b51ac3c08969e277f21b35a60b48fc47669978",
    );
    const P256_2G_Y: [u8; 32] = cmpa::hexstr::bytes_from_hexstr_cnst::<32>(
        "07775510db8ed040293d9ac69f7430dbba7dade63ce982299e04b79d227873d1",
    );
    const P256_3G_X: [u8; 32] = cmpa::hexstr::bytes_from_hexstr_cnst::<32>(
        "5ecbe4d1a6330a44c8f7ef951d4bf165e6c6b721efada985fb41661bc6e7fd6c",
    );
    const P256_3G_Y: [u8; 32] = cmpa::hexstr::bytes_from_hexstr_cnst::<32>(
        "8734640c4998ff7e374b06ce1a64a2ecd82ab036384fb83d9a79b127a27d5032",
    );

    // exp[i] = 0xff - i, the benchmark's almost-worst-case scalar.
    fn worst_case_scalar() -> [u8; 32] {
        let mut scalar = [0u8; 32];
        for (i, b) in scalar.iter_mut().enumerate() {
            *b = 0xff - i as u8;
        }
        scalar
    }

    // worst_case_scalar() * G
    const P256_WORST_CASE_G_X: [u8; 32] = cmpa::hexstr::bytes_from_hexstr_cnst::<32>(
        "e6929396fd79b1189ff6f4bfd33fe09b52c2f943435dc30fcc30e3a321f26fca",
    );
    const P256_WORST_CASE_G_Y: [u8; 32] = cmpa::hexstr::bytes_from_hexstr_cnst::<32>(
        "154bcae03a930048d18915aa92a686a98d47c49e86bf7636165df6334349e6d8",
    );
    // worst_case_scalar() * 2G
    const P256_WORST_CASE_2G_X: [u8; 32] = cmpa::hexstr::bytes_from_hexstr_cnst::<32>(
        "95d350a44b3237a12de742d7a61dc53727a49399af62ade6f42aa149723b9551",
    );
    const P256_WORST_CASE_2G_Y: [u8; 32] = cmpa::hexstr::bytes_from_hexstr_cnst::<32>(
        "1dcf00771e5c9e0644924d04e6f8434aaa45f2dcafbd991c2e87ac9d75848569",
    );

    fn p256_ctx() -> EcContext {
        EcContext::new(&NIST_P256_P, &NIST_P256_B, &NIST_P256_N, 4).unwrap()
    }

    fn p256_generator(ctx: &EcContext) -> EcPoint<'_> {
        EcPoint::new(ctx, &NIST_P256_G_X, &NIST_P256_G_Y).unwrap()
    }

    fn assert_affine_eq(p: &EcPoint, expected_x: &[u8], expected_y: &[u8]) {
        let mut x = [0u8; 32];
        let mut y = [0u8; 32];
        p.get_xy(&mut x, &mut y).unwrap();
        assert_eq!(&x[..], expected_x);
        assert_eq!(&y[..], expected_y);
    }

    #[test]
    fn test_new_point_validation() {
        let ctx = p256_ctx();

        assert_eq!(
            EcPoint::new(&ctx, &[], &NIST_P256_G_Y).err(),
            Some(EcError::NotEnoughData)
        );
        let oversized = [0u8; 33];
        assert_eq!(
            EcPoint::new(&ctx, &oversized, &NIST_P256_G_Y).err(),
            Some(EcError::InvalidValue)
        );
        // Coordinates must be field residues.
        assert_eq!(
            EcPoint::new(&ctx, &NIST_P256_P, &NIST_P256_G_Y).err(),
            Some(EcError::InvalidValue)
        );
        // Mess with y to move the point off the curve.
        let mut bad_y = NIST_P256_G_Y;
        bad_y[31] ^= 1;
        assert_eq!(
            EcPoint::new(&ctx, &NIST_P256_G_X, &bad_y).err(),
            Some(EcError::InvalidPoint)
        );
        // (0, 0) is the encoded point at infinity, not an on-curve pair.
        let pai = EcPoint::new(&ctx, &[0], &[0]).unwrap();
        assert!(pai.is_pai());
    }

    #[test]
    fn test_point_get_xy_roundtrip() {
        let ctx = p256_ctx();
        let g = p256_generator(&ctx);
        assert!(!g.is_pai());
        assert_affine_eq(&g, &NIST_P256_G_X, &NIST_P256_G_Y);

        let mut short = [0u8; 31];
        let mut y = [0u8; 32];
        assert_eq!(
            g.get_xy(&mut short, &mut y).err(),
            Some(EcError::InvalidValue)
        );

        // The point at infinity extracts as (0, 0).
        let pai = EcPoint::new(&ctx, &[0], &[0]).unwrap();
        let mut x = [0u8; 32];
        pai.get_xy(&mut x, &mut y).unwrap();
        assert!(x.iter().all(|b| *b == 0));
        assert!(y.iter().all(|b| *b == 0));
    }

    #[test]
    fn test_scalar_mul_zero_and_one() {
        let ctx = p256_ctx();

        let mut p = p256_generator(&ctx);
        assert_eq!(p.scalar_mul(&[], 0).err(), Some(EcError::NotEnoughData));

        p.scalar_mul(&[1], 0).unwrap();
        assert_affine_eq(&p, &NIST_P256_G_X, &NIST_P256_G_Y);

        let mut p = p256_generator(&ctx);
        p.scalar_mul(&[0u8; 32], 0).unwrap();
        assert!(p.is_pai());
    }

    #[test]
    fn test_scalar_mul_order_annihilates() {
        let ctx = p256_ctx();

        // n·G is the point at infinity.
        let mut p = p256_generator(&ctx);
        p.scalar_mul(&NIST_P256_N, 0).unwrap();
        assert!(p.is_pai());
        p.normalize().unwrap();
        assert!(p.is_pai());
        let mut x = [0u8; 32];
        let mut y = [0u8; 32];
        p.get_xy(&mut x, &mut y).unwrap();
        assert!(x.iter().all(|b| *b == 0));
        assert!(y.iter().all(|b| *b == 0));

        // Same through the arbitrary point path.
        let mut p = EcPoint::new(&ctx, &P256_2G_X, &P256_2G_Y).unwrap();
        p.scalar_mul(&NIST_P256_N, 0xfff).unwrap();
        assert!(p.is_pai());
    }

    #[test]
    fn test_scalar_mul_worst_case_generator() {
        let ctx = p256_ctx();
        let scalar = worst_case_scalar();

        let mut p = p256_generator(&ctx);
        p.scalar_mul(&scalar, 0xfff).unwrap();
        assert_affine_eq(&p, &P256_WORST_CASE_G_X, &P256_WORST_CASE_G_Y);

        // Deterministic mode agrees.
        let mut p = p256_generator(&ctx);
        p.scalar_mul(&scalar, 0).unwrap();
        assert_affine_eq(&p, &P256_WORST_CASE_G_X, &P256_WORST_CASE_G_Y);

        // The result is on the curve; constructing a point from the
        // extracted coordinates re-runs the curve equation check.
        let mut x = [0u8; 32];
        let mut y = [0u8; 32];
        p.get_xy(&mut x, &mut y).unwrap();
        assert!(EcPoint::new(&ctx, &x, &y).is_ok());
    }

    #[test]
    fn test_scalar_mul_worst_case_arbitrary_point() {
        let ctx = p256_ctx();
        let scalar = worst_case_scalar();

        let mut p = EcPoint::new(&ctx, &P256_2G_X, &P256_2G_Y).unwrap();
        p.scalar_mul(&scalar, 0xfff).unwrap();
        assert_affine_eq(&p, &P256_WORST_CASE_2G_X, &P256_WORST_CASE_2G_Y);

        let mut p = EcPoint::new(&ctx, &P256_2G_X, &P256_2G_Y).unwrap();
        p.scalar_mul(&scalar, 0).unwrap();
        assert_affine_eq(&p, &P256_WORST_CASE_2G_X, &P256_WORST_CASE_2G_Y);
    }

    #[test]
    fn test_scalar_mul_blinding_seed_invariance() {
        // Different non-zero seeds take different intermediate
        // representations to the same result.
        let ctx = p256_ctx();
        let scalar = worst_case_scalar();

        let mut reference = EcPoint::new(&ctx, &P256_2G_X, &P256_2G_Y).unwrap();
        reference.scalar_mul(&scalar, 0).unwrap();
        for seed in [1u64, 0xfff, 0xdeadbeef, u64::MAX] {
            let mut p = EcPoint::new(&ctx, &P256_2G_X, &P256_2G_Y).unwrap();
            p.scalar_mul(&scalar, seed).unwrap();
            assert!(p.eq_point(&reference).unwrap());
        }
    }

    #[test]
    fn test_scalar_mul_projective_representation_invariance() {
        // Scaling (X, Y, Z) by a non-zero factor yields an equivalent
        // representation and must not change the ladder's output.
        let ctx = p256_ctx();
        let fops = ctx.field_ops();
        let scalar = worst_case_scalar();

        let mut scaled = EcPoint::new(&ctx, &P256_2G_X, &P256_2G_Y).unwrap();
        let factor = fops.element_from_plain_bytes(&[0x2b]).unwrap();
        let mut tmp = fops.try_new_element().unwrap();
        fops.mul(&mut tmp, &scaled.coords.x, &factor);
        mem::swap(&mut scaled.coords.x, &mut tmp);
        fops.mul(&mut tmp, &scaled.coords.y, &factor);
        mem::swap(&mut scaled.coords.y, &mut tmp);
        fops.mul(&mut tmp, &scaled.coords.z, &factor);
        mem::swap(&mut scaled.coords.z, &mut tmp);

        scaled.scalar_mul(&scalar, 0).unwrap();
        assert_affine_eq(&scaled, &P256_WORST_CASE_2G_X, &P256_WORST_CASE_2G_Y);
    }

    #[test]
    fn test_scalar_mul_n_minus_one_negates() {
        let ctx = p256_ctx();
        let mut n_minus_1 = NIST_P256_N;
        n_minus_1[31] -= 1;

        let mut p = EcPoint::new(&ctx, &P256_2G_X, &P256_2G_Y).unwrap();
        p.scalar_mul(&n_minus_1, 0x1234).unwrap();
        let mut expected = EcPoint::new(&ctx, &P256_2G_X, &P256_2G_Y).unwrap();
        expected.neg().unwrap();
        assert!(p.eq_point(&expected).unwrap());

        // And through the generator path.
        let mut p = p256_generator(&ctx);
        p.scalar_mul(&n_minus_1, 0x1234).unwrap();
        let mut expected = p256_generator(&ctx);
        expected.neg().unwrap();
        assert!(p.eq_point(&expected).unwrap());
    }

    #[test]
    fn test_double_matches_scalar_by_two() {
        let ctx = p256_ctx();

        let mut doubled = p256_generator(&ctx);
        doubled.double().unwrap();
        assert_affine_eq(&doubled, &P256_2G_X, &P256_2G_Y);

        let mut multiplied = p256_generator(&ctx);
        multiplied.scalar_mul(&[2], 0).unwrap();
        assert!(doubled.eq_point(&multiplied).unwrap());
    }

    #[test]
    fn test_add_homomorphism() {
        // (1 + 2)·G computed as G + 2G matches 3·G.
        let ctx = p256_ctx();

        let mut sum = p256_generator(&ctx);
        let two_g = EcPoint::new(&ctx, &P256_2G_X, &P256_2G_Y).unwrap();
        sum.add(&two_g).unwrap();
        assert_affine_eq(&sum, &P256_3G_X, &P256_3G_Y);

        let mut multiplied = p256_generator(&ctx);
        multiplied.scalar_mul(&[3], 0).unwrap();
        assert!(sum.eq_point(&multiplied).unwrap());
    }

    #[test]
    fn test_eq_point_semantics() {
        let ctx = p256_ctx();

        let g = p256_generator(&ctx);
        let clone = g.try_clone().unwrap();
        assert!(g.eq_point(&clone).unwrap());
        assert!(clone.eq_point(&g).unwrap());

        // Same point under differently scaled projective representations.
        let mut doubled = g.try_clone().unwrap();
        doubled.double().unwrap();
        let affine_2g = EcPoint::new(&ctx, &P256_2G_X, &P256_2G_Y).unwrap();
        assert!(doubled.eq_point(&affine_2g).unwrap());
        assert!(!doubled.eq_point(&g).unwrap());

        let pai_a = EcPoint::new(&ctx, &[0], &[0]).unwrap();
        let pai_b = EcPoint::new(&ctx, &[0], &[0]).unwrap();
        assert!(pai_a.eq_point(&pai_b).unwrap());
        assert!(!pai_a.eq_point(&g).unwrap());
        assert!(!g.eq_point(&pai_a).unwrap());
    }

    #[test]
    fn test_context_mixing_rejected() {
        let ctx_a = p256_ctx();
        let ctx_b = p256_ctx();

        let mut p_a = p256_generator(&ctx_a);
        let p_b = p256_generator(&ctx_b);
        assert_eq!(p_a.add(&p_b).err(), Some(EcError::CurveMismatch));
        assert_eq!(p_a.copy_from(&p_b).err(), Some(EcError::CurveMismatch));
        assert_eq!(p_a.eq_point(&p_b).err(), Some(EcError::CurveMismatch));

        // Same context works.
        let p_c = p256_generator(&ctx_a);
        p_a.copy_from(&p_c).unwrap();
        p_a.add(&p_c).unwrap();
    }

    #[cfg(feature = "p256_gen_tables")]
    #[test]
    fn test_scalar_mul_generator_rejects_overlong_scalar() {
        // The generator multi-table covers 64 windows; a longer scalar must
        // be refused on that path.
        let ctx = p256_ctx();
        let mut p = p256_generator(&ctx);
        let overlong = [1u8; 33];
        assert_eq!(
            p.scalar_mul(&overlong, 0).err(),
            Some(EcError::InvalidValue)
        );
    }

    mod p384 {
        use super::*;

        pub(super) const NIST_P384_P: [u8; 48] = cmpa::hexstr::bytes_from_hexstr_cnst::<48>(
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffe\
             ffffffff0000000000000000ffffffff",
        );
        pub(super) const NIST_P384_N: [u8; 48] = cmpa::hexstr::bytes_from_hexstr_cnst::<48>(
            "ffffffffffffffffffffffffffffffffffffffffffffffffc7634d81f4372ddf\
             581a0db248b0a77aecec196accc52973",
        );
        pub(super) const NIST_P384_B: [u8; 48] = cmpa::hexstr::bytes_from_hexstr_cnst::<48>(
            "b3312fa7e23ee7e4988e056be3f82d19181d9c6efe8141120314088f5013875a\
             c656398d8a2ed19d2a85c8edd3ec2aef",
        );
        pub(super) const NIST_P384_G_X: [u8; 48] = cmpa::hexstr::bytes_from_hexstr_cnst::<48>(
            "aa87ca22be8b05378eb1c71ef320ad746e1d3b628ba79b9859f741e082542a38\
             5502f25dbf55296c3a545e3872760ab7",
        );
        pub(super) const NIST_P384_G_Y: [u8; 48] = cmpa::hexstr::bytes_from_hexstr_cnst::<48>(
            "3617de4a96262c6f5d9e98bf9292dc29f8f41dbd289a147ce9da3113b5f0b8c0\
             0a60b1ce1d7e819d7a431d7c90ea0e5f",
        );
        // scalar with bytes 0x01, 0x02, .., 0x30
        pub(super) const P384_TEST_PRODUCT_X: [u8; 48] = cmpa::hexstr::bytes_from_hexstr_cnst::<48>(
            "c76f2283dda95cd49b0ed9e733d2904474e37216f124e13d2c9ab4cf01021c49\
             ad9cabb3d0b97499aef2f0ab313fa028",
        );
        pub(super) const P384_TEST_PRODUCT_Y: [u8; 48] = cmpa::hexstr::bytes_from_hexstr_cnst::<48>(
            "26bc1f83451b5c8962a75caff73588d4400a6296436154fb343c393e91048a6c\
             7bcbadc83cd8a5f26feae883156f92a1",
        );
    }

    #[test]
    fn test_scalar_mul_p384_generic_class() {
        // A wider field exercising the generic modulus class end to end.
        let ctx = EcContext::new(&p384::NIST_P384_P, &p384::NIST_P384_B, &p384::NIST_P384_N, 11)
            .unwrap();
        assert!(!ctx.is_p256());

        let mut scalar = [0u8; 48];
        for (i, b) in scalar.iter_mut().enumerate() {
            *b = i as u8 + 1;
        }

        for seed in [0u64, 0xfff] {
            let mut p = EcPoint::new(&ctx, &p384::NIST_P384_G_X, &p384::NIST_P384_G_Y).unwrap();
            p.scalar_mul(&scalar, seed).unwrap();
            let mut x = [0u8; 48];
            let mut y = [0u8; 48];
            p.get_xy(&mut x, &mut y).unwrap();
            assert_eq!(&x[..], &p384::P384_TEST_PRODUCT_X[..]);
            assert_eq!(&y[..], &p384::P384_TEST_PRODUCT_Y[..]);
        }
    }
}
