// SPDX-License-Identifier: Apache-2.0

//! Windowed scalar multiplication ladders and the blinding dispatcher.

extern crate alloc;
use alloc::vec::Vec;

use core::mem;

use crate::curve::EcContext;
use crate::field::{FieldElement, FieldOps};
use crate::protected::ProtectedTable;
use crate::utils_common::{
    alloc::try_alloc_zeroizing_vec, splitmix64::SplitMix64, zeroize,
};
use crate::weierstrass::{OpsScratch, PointCoords, WeierstrassOps};
use crate::window::BitWindowLr;
use crate::EcError;
use cmpa::{self, MpMutUInt as _, MpUIntCommon as _};

#[cfg(feature = "p256_gen_tables")]
use crate::p256_tables;
#[cfg(feature = "p256_gen_tables")]
use crate::window::BitWindowRl;

const WINDOW_NBITS: u32 = 4;
const WINDOW_NR_ITEMS: usize = 1 << WINDOW_NBITS;

fn skip_leading_zeros(scalar: &[u8]) -> &[u8] {
    // The position of the scalar's first non-zero byte is treated as public
    // information, like the scalar's overall length.
    let first_nonzero = scalar
        .iter()
        .position(|b| *b != 0)
        .unwrap_or(scalar.len());
    &scalar[first_nonzero..]
}

/// Multiply an arbitrary projective point by a scalar.
///
/// Builds the window {O, P, 2P, .. 15P}, installs its coordinate arrays
/// into protected tables under `seed` and then consumes the scalar left to
/// right, with four doublings and one complete addition per nibble
/// regardless of the digit values.
fn scalar_mul_points(
    p: &mut PointCoords,
    wops: &WeierstrassOps,
    fops: &FieldOps,
    scalar: &[u8],
    seed: u64,
    scratch: &mut OpsScratch,
) -> Result<(), EcError> {
    let z_is_one = fops.is_one(&p.z);

    // The window O, P, 2P, .. 15P.
    let mut window = Vec::new();
    window
        .try_reserve_exact(WINDOW_NR_ITEMS)
        .map_err(|_| EcError::MemoryAllocationFailure)?;
    for _ in 0..WINDOW_NR_ITEMS {
        window.push(PointCoords::try_new(fops)?);
    }
    window[0].set_identity(fops);
    window[1].copy_from(fops, p);
    for i in 2..WINDOW_NR_ITEMS {
        let (prev, cur) = window.split_at_mut(i);
        cur[0].copy_from(fops, &prev[i - 1]);
        if z_is_one {
            wops.mix_add(fops, &mut cur[0], &p.x, &p.y, scratch);
        } else {
            wops.full_add(fops, &mut cur[0], &*p, scratch);
        }
    }

    let mut entry_refs: [&[cmpa::LimbType]; WINDOW_NR_ITEMS] = [&[]; WINDOW_NR_ITEMS];
    for (i, w) in window.iter().enumerate() {
        entry_refs[i] = w.x.raw_limbs();
    }
    let prot_x = ProtectedTable::scatter(&entry_refs, seed)?;
    for (i, w) in window.iter().enumerate() {
        entry_refs[i] = w.y.raw_limbs();
    }
    let prot_y = ProtectedTable::scatter(&entry_refs, seed)?;
    for (i, w) in window.iter().enumerate() {
        entry_refs[i] = w.z.raw_limbs();
    }
    let prot_z = ProtectedTable::scatter(&entry_refs, seed)?;
    drop(window);

    // Accumulate starting from the point at infinity.
    p.set_identity(fops);

    let mut gathered = PointCoords::try_new(fops)?;
    let scalar = skip_leading_zeros(scalar);
    let mut bw = BitWindowLr::new(WINDOW_NBITS, scalar);
    for _ in 0..bw.nr_windows() {
        let digit = bw.next_digit();
        prot_x.gather(gathered.x.raw_limbs_mut(), digit);
        prot_y.gather(gathered.y.raw_limbs_mut(), digit);
        prot_z.gather(gathered.z.raw_limbs_mut(), digit);
        for _ in 0..WINDOW_NBITS {
            wops.double(fops, p, scratch);
        }
        wops.full_add(fops, p, &gathered, scratch);
    }

    Ok(())
}

/// Multiply the P-256 generator point by a scalar over the context's
/// precomputed multi-table.
///
/// The scalar is consumed right to left; window i selects one entry of
/// table i, holding the affine points (j · 2^(i·w)) · G, so a single mixed
/// addition per window suffices and no doublings are needed.
#[cfg(feature = "p256_gen_tables")]
fn scalar_mul_gen_p256(
    p: &mut PointCoords,
    wops: &WeierstrassOps,
    fops: &FieldOps,
    tables: &[ProtectedTable],
    scalar: &[u8],
    scratch: &mut OpsScratch,
) -> Result<(), EcError> {
    p.set_identity(fops);

    let scalar = skip_leading_zeros(scalar);
    let mut bw = BitWindowRl::new(p256_tables::P256_WINDOW_NBITS, scalar);
    if bw.nr_windows() > tables.len() {
        return Err(EcError::InvalidValue);
    }

    let mut entry = try_alloc_zeroizing_vec::<cmpa::LimbType>(2 * fops.nlimbs())?;
    let mut affine_x = fops.try_new_element()?;
    let mut affine_y = fops.try_new_element()?;
    for table in tables.iter().take(bw.nr_windows()) {
        let digit = bw.next_digit();
        table.gather(&mut entry, digit);
        affine_x
            .raw_limbs_mut()
            .copy_from_slice(&entry[..fops.nlimbs()]);
        affine_y
            .raw_limbs_mut()
            .copy_from_slice(&entry[fops.nlimbs()..]);
        wops.mix_add(fops, p, &affine_x, &affine_y, scratch);
    }

    Ok(())
}

/// Derive the projective blinding factor from the SCA seed.
///
/// The factor is clamped into (0, p): the top byte is cleared, which keeps
/// the value below any prime of the field's width, and the low bit is set,
/// which makes it non-zero.
fn derive_blinding_factor(fops: &FieldOps, seed: u64) -> Result<FieldElement, EcError> {
    let mut bytes = try_alloc_zeroizing_vec::<u8>(fops.p_len())?;
    SplitMix64::new(seed).fill_bytes(&mut bytes);
    bytes[0] = 0;
    let last = bytes.len() - 1;
    bytes[last] |= 1;

    let mut factor = fops.try_new_element()?;
    fops.to_mg_form(
        &mut factor,
        &cmpa::MpBigEndianUIntByteSlice::from_bytes(&bytes),
    );
    Ok(factor)
}

/// Blind a scalar by adding a 32 bit multiple of the group order.
///
/// Computes k + R·n over a buffer widened by two limbs beyond
/// max(order, scalar), so k'·P = k·P while the bit pattern driving the
/// ladder differs per R.
fn blind_scalar(
    scalar: &[u8],
    order: &[u8],
    r: u32,
) -> Result<zeroize::Zeroizing<Vec<u8>>, EcError> {
    let order_nlimbs = cmpa::MpMutNativeEndianUIntLimbsSlice::nlimbs_for_len(order.len());
    let scalar_nlimbs = cmpa::MpMutNativeEndianUIntLimbsSlice::nlimbs_for_len(scalar.len());
    let blind_nlimbs = order_nlimbs.max(scalar_nlimbs) + 2;

    let mut blinded = try_alloc_zeroizing_vec::<cmpa::LimbType>(blind_nlimbs)?;
    let mut blinded_dst = cmpa::MpMutNativeEndianUIntLimbsSlice::from_limbs(&mut blinded);
    blinded_dst.copy_from(&cmpa::MpBigEndianUIntByteSlice::from_bytes(scalar));

    // R·n, computed in place from a widened copy of the order.
    let mut r_order = try_alloc_zeroizing_vec::<cmpa::LimbType>(blind_nlimbs)?;
    let mut r_order_dst = cmpa::MpMutNativeEndianUIntLimbsSlice::from_limbs(&mut r_order);
    r_order_dst.copy_from(&cmpa::MpBigEndianUIntByteSlice::from_bytes(order));
    let r_bytes = r.to_be_bytes();
    cmpa::ct_mul_trunc_mp_mp(
        &mut r_order_dst,
        order.len(),
        &cmpa::MpBigEndianUIntByteSlice::from_bytes(&r_bytes),
    );

    cmpa::ct_add_mp_mp(&mut blinded_dst, &r_order_dst);

    let mut out =
        try_alloc_zeroizing_vec::<u8>(blind_nlimbs * mem::size_of::<cmpa::LimbType>())?;
    cmpa::MpMutBigEndianUIntByteSlice::from_bytes(&mut out)
        .copy_from(&cmpa::MpNativeEndianUIntLimbsSlice::from_limbs(&blinded));
    Ok(out)
}

/// Multiply a point by a scalar, routing between the generator and the
/// arbitrary-point ladders and applying blinding.
///
/// With a non-zero seed the arbitrary-point path randomizes the projective
/// representation of the input and adds a seed-derived multiple of the
/// group order to the scalar; a zero seed disables both for deterministic
/// operation.
pub(crate) fn scalar_mul(
    ctx: &EcContext,
    p: &mut PointCoords,
    scalar: &[u8],
    seed: u64,
) -> Result<(), EcError> {
    if scalar.is_empty() {
        return Err(EcError::NotEnoughData);
    }

    let fops = ctx.field_ops();
    let wops = ctx.weierstrass_ops();
    let mut scratch = OpsScratch::try_new(fops)?;

    // Whether the input is the well-known generator is public information;
    // the comparison itself may branch.
    #[cfg(feature = "p256_gen_tables")]
    if let Some(gen_tables) = ctx.generator_tables() {
        if fops.is_equal(&p.x, &gen_tables.mg_g_x)
            && fops.is_equal(&p.y, &gen_tables.mg_g_y)
            && fops.is_one(&p.z)
        {
            return scalar_mul_gen_p256(p, wops, fops, &gen_tables.tables, scalar, &mut scratch);
        }
    }

    if seed != 0 {
        // Projective blinding: the representation (rX, rY, rZ) denotes the
        // same point for any non-zero r.
        let factor = derive_blinding_factor(fops, seed)?;
        fops.mul(&mut scratch.s, &p.x, &factor);
        mem::swap(&mut p.x, &mut scratch.s);
        fops.mul(&mut scratch.s, &p.y, &factor);
        mem::swap(&mut p.y, &mut scratch.s);
        fops.mul(&mut scratch.s, &p.z, &factor);
        mem::swap(&mut p.z, &mut scratch.s);

        let blinded = blind_scalar(scalar, ctx.order(), seed as u32)?;
        scalar_mul_points(p, wops, fops, &blinded, seed.wrapping_add(1), &mut scratch)
    } else {
        scalar_mul_points(p, wops, fops, scalar, seed.wrapping_add(1), &mut scratch)
    }
}
