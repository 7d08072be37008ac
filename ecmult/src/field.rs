// SPDX-License-Identifier: Apache-2.0

//! Binding of the `cmpa` Montgomery arithmetic to the curve's prime field.

extern crate alloc;
use alloc::vec::Vec;

use crate::utils_common::{
    alloc::{try_alloc_vec, try_alloc_zeroizing_vec},
    zeroize,
};
use crate::EcError;
use cmpa::{self, MpMutUInt as _, MpUIntCommon as _};

/// Element of the curve's prime field, kept in Montgomery form.
///
/// Owns its limb buffer exclusively; all arithmetic on elements goes through
/// the owning field's [`FieldOps`].
pub(crate) struct FieldElement {
    limbs: zeroize::Zeroizing<Vec<cmpa::LimbType>>,
}

impl FieldElement {
    pub fn limbs(&self) -> cmpa::MpNativeEndianUIntLimbsSlice {
        cmpa::MpNativeEndianUIntLimbsSlice::from_limbs(&self.limbs)
    }

    pub fn limbs_mut(&mut self) -> cmpa::MpMutNativeEndianUIntLimbsSlice {
        cmpa::MpMutNativeEndianUIntLimbsSlice::from_limbs(&mut self.limbs)
    }

    pub fn raw_limbs(&self) -> &[cmpa::LimbType] {
        &self.limbs
    }

    pub fn raw_limbs_mut(&mut self) -> &mut [cmpa::LimbType] {
        &mut self.limbs
    }
}

impl zeroize::ZeroizeOnDrop for FieldElement {}

/// Montgomery arithmetic for one fixed prime modulus.
///
/// Precomputes the Montgomery constants for the modulus at construction;
/// all element widths derive from the modulus' byte length and do not
/// change afterwards.
pub(crate) struct FieldOps {
    /// The modulus, big-endian.
    p: Vec<u8>,
    p_nlimbs: usize,
    mg_neg_p0_inv_mod_l: cmpa::LimbType,
    mg_radix2_mod_p: Vec<cmpa::LimbType>,
    /// The field's multiplicative identity in Montgomery form.
    mg_one: Vec<cmpa::LimbType>,
}

impl FieldOps {
    /// Bind the field arithmetic to a modulus.
    ///
    /// # Arguments:
    ///
    /// * `modulus` - The prime modulus, big-endian.
    ///
    /// # Errors:
    ///
    /// * [`EcError::InvalidValue`] - The modulus is unsuitable for Montgomery
    ///   arithmetic, i.e. even.
    /// * [`EcError::MemoryAllocationFailure`] - Some buffer allocation failed.
    pub fn try_new(modulus: &[u8]) -> Result<Self, EcError> {
        let mut p = try_alloc_vec::<u8>(modulus.len())?;
        p.copy_from_slice(modulus);
        let p_view = cmpa::MpBigEndianUIntByteSlice::from_bytes(&p);
        let p_nlimbs = cmpa::MpMutNativeEndianUIntLimbsSlice::nlimbs_for_len(p.len());

        let mg_neg_p0_inv_mod_l =
            cmpa::ct_montgomery_neg_n0_inv_mod_l_mp(&p_view).map_err(|_| EcError::InvalidValue)?;

        let mut mg_radix2_mod_p = try_alloc_vec::<cmpa::LimbType>(p_nlimbs)?;
        cmpa::ct_montgomery_radix2_mod_n_mp(
            &mut cmpa::MpMutNativeEndianUIntLimbsSlice::from_limbs(&mut mg_radix2_mod_p),
            &p_view,
        )
        .map_err(|_| EcError::InvalidValue)?;

        let mut mg_one = try_alloc_vec::<cmpa::LimbType>(p_nlimbs)?;
        let mut mg_one_dst = cmpa::MpMutNativeEndianUIntLimbsSlice::from_limbs(&mut mg_one);
        mg_one_dst.copy_from(&cmpa::MpNativeEndianUIntLimbsSlice::from_limbs(
            &mg_radix2_mod_p,
        ));
        cmpa::ct_montgomery_redc_mp(&mut mg_one_dst, &p_view, mg_neg_p0_inv_mod_l)
            .map_err(|_| EcError::Internal)?;

        Ok(Self {
            p,
            p_nlimbs,
            mg_neg_p0_inv_mod_l,
            mg_radix2_mod_p,
            mg_one,
        })
    }

    /// Get the length of the modulus in units of bytes.
    pub fn p_len(&self) -> usize {
        self.p.len()
    }

    /// Get the number of limbs making up a field element.
    pub fn nlimbs(&self) -> usize {
        self.p_nlimbs
    }

    fn p(&self) -> cmpa::MpBigEndianUIntByteSlice {
        cmpa::MpBigEndianUIntByteSlice::from_bytes(&self.p)
    }

    fn mg_one(&self) -> cmpa::MpNativeEndianUIntLimbsSlice {
        cmpa::MpNativeEndianUIntLimbsSlice::from_limbs(&self.mg_one)
    }

    /// Allocate a field element initialized to zero.
    pub fn try_new_element(&self) -> Result<FieldElement, EcError> {
        Ok(FieldElement {
            limbs: try_alloc_zeroizing_vec::<cmpa::LimbType>(self.p_nlimbs)?,
        })
    }

    pub fn set_zero(&self, e: &mut FieldElement) {
        e.limbs_mut().set_to_u8(0);
    }

    /// Set an element to the multiplicative identity, in Montgomery form.
    pub fn set_one(&self, e: &mut FieldElement) {
        e.limbs_mut().copy_from(&self.mg_one());
    }

    pub fn copy(&self, dst: &mut FieldElement, src: &FieldElement) {
        dst.limbs_mut().copy_from(&src.limbs());
    }

    pub fn is_zero(&self, e: &FieldElement) -> bool {
        cmpa::ct_is_zero_mp(&e.limbs()).unwrap() != 0
    }

    /// Test whether an element equals the Montgomery form of one.
    pub fn is_one(&self, e: &FieldElement) -> bool {
        cmpa::ct_eq_mp_mp(&e.limbs(), &self.mg_one()).unwrap() != 0
    }

    pub fn is_equal(&self, op0: &FieldElement, op1: &FieldElement) -> bool {
        cmpa::ct_eq_mp_mp(&op0.limbs(), &op1.limbs()).unwrap() != 0
    }

    /// *op0 += op1* mod p.
    pub fn add_assign(&self, op0: &mut FieldElement, op1: &FieldElement) {
        cmpa::ct_add_mod_mp_mp(&mut op0.limbs_mut(), &op1.limbs(), &self.p()).unwrap();
    }

    /// *op0 -= op1* mod p.
    pub fn sub_assign(&self, op0: &mut FieldElement, op1: &FieldElement) {
        cmpa::ct_sub_mod_mp_mp(&mut op0.limbs_mut(), &op1.limbs(), &self.p()).unwrap();
    }

    /// *result = op0 + op1* mod p. The result must not overlap the operands.
    pub fn add(&self, result: &mut FieldElement, op0: &FieldElement, op1: &FieldElement) {
        self.copy(result, op0);
        self.add_assign(result, op1);
    }

    /// *result = op0 - op1* mod p. The result must not overlap the operands.
    pub fn sub(&self, result: &mut FieldElement, op0: &FieldElement, op1: &FieldElement) {
        self.copy(result, op0);
        self.sub_assign(result, op1);
    }

    /// Montgomery multiplication, *result = op0 · op1 · R⁻¹* mod p.
    ///
    /// The result must not overlap the operands, which the borrow rules
    /// enforce.
    pub fn mul(&self, result: &mut FieldElement, op0: &FieldElement, op1: &FieldElement) {
        cmpa::ct_montgomery_mul_mod_mp_mp(
            &mut result.limbs_mut(),
            &op0.limbs(),
            &op1.limbs(),
            &self.p(),
            self.mg_neg_p0_inv_mod_l,
        )
        .unwrap();
    }

    /// Convert a plain value into Montgomery form.
    ///
    /// The value must be a field residue, i.e. less than the modulus.
    pub fn to_mg_form<ET: cmpa::MpUIntCommon>(&self, result: &mut FieldElement, element: &ET) {
        debug_assert_ne!(cmpa::ct_lt_mp_mp(element, &self.p()).unwrap(), 0);
        debug_assert!(self.p().len_is_compatible_with(result.limbs().len()));
        cmpa::ct_to_montgomery_form_mp(
            &mut result.limbs_mut(),
            element,
            &self.p(),
            self.mg_neg_p0_inv_mod_l,
            &cmpa::MpNativeEndianUIntLimbsSlice::from_limbs(&self.mg_radix2_mod_p),
        )
        .unwrap();
    }

    /// Convert an element back from Montgomery form, in place.
    pub fn from_mg_form(&self, element: &mut FieldElement) {
        cmpa::ct_montgomery_redc_mp(
            &mut element.limbs_mut(),
            &self.p(),
            self.mg_neg_p0_inv_mod_l,
        )
        .unwrap();
    }

    /// Invert an element, *result = op⁻¹* in Montgomery form.
    ///
    /// The inversion is total: a zero operand yields a zero result, so the
    /// control flow does not depend on the operand's value beyond the final
    /// fixup.
    pub fn invert(
        &self,
        result: &mut FieldElement,
        op: &FieldElement,
        tmp: &mut FieldElement,
        scratch0: &mut zeroize::Zeroizing<Vec<cmpa::LimbType>>,
        scratch1: &mut zeroize::Zeroizing<Vec<cmpa::LimbType>>,
    ) {
        // The inversion consumes its operand and works on the plain
        // representation, so redc a copy first.
        self.copy(tmp, op);
        self.from_mg_form(tmp);
        let inverted = cmpa::ct_inv_mod_odd_mp_mp(
            &mut result.limbs_mut(),
            &mut tmp.limbs_mut(),
            &self.p(),
            [scratch0, scratch1],
        );
        match inverted {
            Ok(()) => (),
            Err(e) => match e {
                cmpa::CtInvModOddMpMpError::OperandsNotCoprime => {
                    // Zero is the only residue not coprime to the prime
                    // modulus.
                    result.limbs_mut().set_to_u8(0);
                    return;
                }
                _ => unreachable!(),
            },
        };
        // The result holds the plain inverse, bring it into Montgomery form.
        self.copy(tmp, result);
        self.to_mg_form(result, &tmp.limbs());
    }

    /// Decode a big-endian value into a Montgomery form element.
    ///
    /// # Errors:
    ///
    /// * [`EcError::InvalidValue`] - The value is not a field residue, i.e.
    ///   not less than the modulus.
    /// * [`EcError::MemoryAllocationFailure`] - The element allocation
    ///   failed.
    pub fn element_from_plain_bytes(&self, bytes: &[u8]) -> Result<FieldElement, EcError> {
        let value = cmpa::MpBigEndianUIntByteSlice::from_bytes(bytes);
        if cmpa::ct_geq_mp_mp(&value, &self.p()).unwrap() != 0 {
            return Err(EcError::InvalidValue);
        }
        let mut e = self.try_new_element()?;
        self.to_mg_form(&mut e, &value);
        Ok(e)
    }

    /// Encode an element as plain big-endian bytes.
    ///
    /// The element is taken out of Montgomery form in the course.
    pub fn element_into_plain_bytes(&self, out: &mut [u8], e: &mut FieldElement) {
        debug_assert_eq!(out.len(), self.p.len());
        self.from_mg_form(e);
        cmpa::MpMutBigEndianUIntByteSlice::from_bytes(out).copy_from(&e.limbs());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 65521, the largest 16 bit prime.
    const TEST_P: [u8; 2] = cmpa::hexstr::bytes_from_hexstr_cnst::<2>("fff1");

    fn test_fops() -> FieldOps {
        FieldOps::try_new(&TEST_P).unwrap()
    }

    fn from_u16(fops: &FieldOps, v: u16) -> FieldElement {
        fops.element_from_plain_bytes(&v.to_be_bytes()).unwrap()
    }

    fn to_u16(fops: &FieldOps, e: &FieldElement) -> u16 {
        let mut tmp = fops.try_new_element().unwrap();
        fops.copy(&mut tmp, e);
        let mut out = [0u8; 2];
        fops.element_into_plain_bytes(&mut out, &mut tmp);
        u16::from_be_bytes(out)
    }

    #[test]
    fn test_field_even_modulus_rejected() {
        assert_eq!(
            FieldOps::try_new(&[0xff, 0xf0]).err(),
            Some(EcError::InvalidValue)
        );
    }

    #[test]
    fn test_field_decode_rejects_out_of_range() {
        let fops = test_fops();
        assert!(fops.element_from_plain_bytes(&[0xff, 0xf1]).is_err());
        assert!(fops.element_from_plain_bytes(&[0xff, 0xf0]).is_ok());
    }

    #[test]
    fn test_field_mg_roundtrip_and_arithmetic() {
        let fops = test_fops();
        let a = from_u16(&fops, 1234);
        let b = from_u16(&fops, 56789 % 65521);
        assert_eq!(to_u16(&fops, &a), 1234);

        let mut r = fops.try_new_element().unwrap();
        fops.add(&mut r, &a, &b);
        assert_eq!(to_u16(&fops, &r) as u32, (1234 + 56789 % 65521) % 65521);

        fops.sub(&mut r, &a, &b);
        assert_eq!(
            to_u16(&fops, &r) as u32,
            (1234 + 65521 - 56789 % 65521) % 65521
        );

        fops.mul(&mut r, &a, &b);
        assert_eq!(to_u16(&fops, &r) as u64, 1234u64 * 56789 % 65521);
    }

    #[test]
    fn test_field_identity_and_predicates() {
        let fops = test_fops();
        let mut one = fops.try_new_element().unwrap();
        fops.set_one(&mut one);
        assert!(fops.is_one(&one));
        assert!(!fops.is_zero(&one));
        assert_eq!(to_u16(&fops, &one), 1);

        let mut zero = fops.try_new_element().unwrap();
        fops.set_zero(&mut zero);
        assert!(fops.is_zero(&zero));
        assert!(!fops.is_one(&zero));
    }

    #[test]
    fn test_field_inversion_total() {
        let fops = test_fops();
        let a = from_u16(&fops, 40000);
        let mut a_inv = fops.try_new_element().unwrap();
        let mut tmp = fops.try_new_element().unwrap();
        let mut scratch0 = crate::utils_common::alloc::try_alloc_zeroizing_vec::<cmpa::LimbType>(
            fops.nlimbs(),
        )
        .unwrap();
        let mut scratch1 = crate::utils_common::alloc::try_alloc_zeroizing_vec::<cmpa::LimbType>(
            fops.nlimbs(),
        )
        .unwrap();
        fops.invert(&mut a_inv, &a, &mut tmp, &mut scratch0, &mut scratch1);
        let mut r = fops.try_new_element().unwrap();
        fops.mul(&mut r, &a, &a_inv);
        assert!(fops.is_one(&r));

        // 0 inverts to 0.
        let mut zero = fops.try_new_element().unwrap();
        fops.set_zero(&mut zero);
        fops.invert(&mut a_inv, &zero, &mut tmp, &mut scratch0, &mut scratch1);
        assert!(fops.is_zero(&a_inv));
    }
}
