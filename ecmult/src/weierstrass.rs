// SPDX-License-Identifier: Apache-2.0

//! Complete projective point arithmetic for short Weierstrass curves with
//! a = −3.
//!
//! All three addition primitives implement the complete formulas from
//! Renes, Costello and Batina, "Complete addition formulas for prime order
//! elliptic curves" (<https://eprint.iacr.org/2015/1060>), specialized for
//! a = −3: a single operation sequence is correct for every input
//! combination, including the point at infinity and equal or opposite
//! points, so the ladders built on top never branch on coordinate values.

extern crate alloc;
use alloc::vec::Vec;

use core::mem;

use crate::field::{FieldElement, FieldOps};
use crate::utils_common::{alloc::try_alloc_zeroizing_vec, zeroize};
use crate::EcError;

/// Projective point coordinates (X, Y, Z) in Montgomery form.
///
/// The point at infinity is represented as (0, 1, 0).
pub(crate) struct PointCoords {
    pub x: FieldElement,
    pub y: FieldElement,
    pub z: FieldElement,
}

impl PointCoords {
    pub fn try_new(fops: &FieldOps) -> Result<Self, EcError> {
        Ok(Self {
            x: fops.try_new_element()?,
            y: fops.try_new_element()?,
            z: fops.try_new_element()?,
        })
    }

    /// Set to the point at infinity, (0, 1, 0).
    pub fn set_identity(&mut self, fops: &FieldOps) {
        fops.set_zero(&mut self.x);
        fops.set_one(&mut self.y);
        fops.set_zero(&mut self.z);
    }

    pub fn copy_from(&mut self, fops: &FieldOps, src: &PointCoords) {
        fops.copy(&mut self.x, &src.x);
        fops.copy(&mut self.y, &src.y);
        fops.copy(&mut self.z, &src.z);
    }
}

/// Scratch space for the point arithmetic primitives.
///
/// Bundles the fixed set of field element temporaries the addition formulas
/// need -- five formula registers, a snapshot of the first operand and one
/// spare for the steps whose destination would otherwise alias a source --
/// together with the limb buffers of the modular inversion. Allocated once
/// at the entry of each public operation and released at scope exit.
pub(crate) struct OpsScratch {
    pub t0: FieldElement,
    pub t1: FieldElement,
    pub t2: FieldElement,
    pub t3: FieldElement,
    t4: FieldElement,
    u0: FieldElement,
    u1: FieldElement,
    u2: FieldElement,
    pub s: FieldElement,
    scratch0: zeroize::Zeroizing<Vec<cmpa::LimbType>>,
    scratch1: zeroize::Zeroizing<Vec<cmpa::LimbType>>,
}

impl OpsScratch {
    pub fn try_new(fops: &FieldOps) -> Result<Self, EcError> {
        Ok(Self {
            t0: fops.try_new_element()?,
            t1: fops.try_new_element()?,
            t2: fops.try_new_element()?,
            t3: fops.try_new_element()?,
            t4: fops.try_new_element()?,
            u0: fops.try_new_element()?,
            u1: fops.try_new_element()?,
            u2: fops.try_new_element()?,
            s: fops.try_new_element()?,
            scratch0: try_alloc_zeroizing_vec::<cmpa::LimbType>(fops.nlimbs())?,
            scratch1: try_alloc_zeroizing_vec::<cmpa::LimbType>(fops.nlimbs())?,
        })
    }
}

/// Point arithmetic on one a = −3 short Weierstrass curve.
pub(crate) struct WeierstrassOps {
    /// Curve parameter b in Montgomery form.
    mg_b: FieldElement,
}

impl WeierstrassOps {
    pub fn new(mg_b: FieldElement) -> Self {
        Self { mg_b }
    }

    /// Double a projective point in place, algorithm 6 of
    /// Renes-Costello-Batina.
    ///
    /// The input may be the point at infinity.
    pub fn double(&self, fops: &FieldOps, p: &mut PointCoords, scratch: &mut OpsScratch) {
        // Snapshot the input, the output coordinates double as working
        // registers below.
        fops.copy(&mut scratch.u0, &p.x);
        fops.copy(&mut scratch.u1, &p.y);
        fops.copy(&mut scratch.u2, &p.z);

        fops.mul(&mut scratch.t0, &scratch.u0, &scratch.u0);
        fops.mul(&mut scratch.t1, &scratch.u1, &scratch.u1);
        fops.mul(&mut scratch.t2, &scratch.u2, &scratch.u2);
        fops.mul(&mut scratch.t3, &scratch.u0, &scratch.u1);
        fops.add(&mut scratch.s, &scratch.t3, &scratch.t3);
        mem::swap(&mut scratch.t3, &mut scratch.s);
        fops.mul(&mut p.z, &scratch.u0, &scratch.u2);
        fops.add(&mut scratch.s, &p.z, &p.z);
        mem::swap(&mut p.z, &mut scratch.s);
        fops.mul(&mut p.y, &self.mg_b, &scratch.t2);
        fops.sub_assign(&mut p.y, &p.z);
        fops.add(&mut p.x, &p.y, &p.y);
        fops.add_assign(&mut p.y, &p.x);
        fops.sub(&mut p.x, &scratch.t1, &p.y);
        fops.add_assign(&mut p.y, &scratch.t1);
        fops.mul(&mut scratch.s, &p.x, &p.y);
        mem::swap(&mut p.y, &mut scratch.s);
        fops.mul(&mut scratch.s, &p.x, &scratch.t3);
        mem::swap(&mut p.x, &mut scratch.s);
        fops.add(&mut scratch.t3, &scratch.t2, &scratch.t2);
        fops.add_assign(&mut scratch.t2, &scratch.t3);
        fops.mul(&mut scratch.s, &self.mg_b, &p.z);
        mem::swap(&mut p.z, &mut scratch.s);
        fops.sub_assign(&mut p.z, &scratch.t2);
        fops.sub_assign(&mut p.z, &scratch.t0);
        fops.add(&mut scratch.t3, &p.z, &p.z);
        fops.add_assign(&mut p.z, &scratch.t3);
        fops.add(&mut scratch.t3, &scratch.t0, &scratch.t0);
        fops.add_assign(&mut scratch.t0, &scratch.t3);
        fops.sub_assign(&mut scratch.t0, &scratch.t2);
        fops.mul(&mut scratch.s, &scratch.t0, &p.z);
        mem::swap(&mut scratch.t0, &mut scratch.s);
        fops.add_assign(&mut p.y, &scratch.t0);
        fops.mul(&mut scratch.t0, &scratch.u1, &scratch.u2);
        fops.add(&mut scratch.s, &scratch.t0, &scratch.t0);
        mem::swap(&mut scratch.t0, &mut scratch.s);
        fops.mul(&mut scratch.s, &scratch.t0, &p.z);
        mem::swap(&mut p.z, &mut scratch.s);
        fops.sub_assign(&mut p.x, &p.z);
        fops.mul(&mut p.z, &scratch.t0, &scratch.t1);
        fops.add(&mut scratch.s, &p.z, &p.z);
        mem::swap(&mut p.z, &mut scratch.s);
        fops.add(&mut scratch.s, &p.z, &p.z);
        mem::swap(&mut p.z, &mut scratch.s);
    }

    /// Add an affine point into a projective one, algorithm 5 of
    /// Renes-Costello-Batina.
    ///
    /// The affine operand (0, 0), the encoded point at infinity, takes the
    /// early exit below -- the one data dependent branch in the point
    /// arithmetic. The ladders only ever feed genuine precomputed table
    /// entries through it, so the branch condition never depends on secret
    /// scalar bits.
    pub fn mix_add(
        &self,
        fops: &FieldOps,
        p: &mut PointCoords,
        x2: &FieldElement,
        y2: &FieldElement,
        scratch: &mut OpsScratch,
    ) {
        if fops.is_zero(x2) && fops.is_zero(y2) {
            return;
        }

        fops.copy(&mut scratch.u0, &p.x);
        fops.copy(&mut scratch.u1, &p.y);
        fops.copy(&mut scratch.u2, &p.z);

        fops.mul(&mut scratch.t0, &scratch.u0, x2);
        fops.mul(&mut scratch.t1, &scratch.u1, y2);
        fops.add(&mut scratch.t3, x2, y2);
        fops.add(&mut scratch.t4, &scratch.u0, &scratch.u1);
        fops.mul(&mut scratch.s, &scratch.t3, &scratch.t4);
        mem::swap(&mut scratch.t3, &mut scratch.s);
        fops.add(&mut scratch.t4, &scratch.t0, &scratch.t1);
        fops.sub_assign(&mut scratch.t3, &scratch.t4);
        fops.mul(&mut scratch.t4, y2, &scratch.u2);
        fops.add_assign(&mut scratch.t4, &scratch.u1);
        fops.mul(&mut p.y, x2, &scratch.u2);
        fops.add_assign(&mut p.y, &scratch.u0);
        fops.mul(&mut p.z, &self.mg_b, &scratch.u2);
        fops.sub(&mut p.x, &p.y, &p.z);
        fops.add(&mut p.z, &p.x, &p.x);
        fops.add_assign(&mut p.x, &p.z);
        fops.sub(&mut p.z, &scratch.t1, &p.x);
        fops.add_assign(&mut p.x, &scratch.t1);
        fops.mul(&mut scratch.s, &self.mg_b, &p.y);
        mem::swap(&mut p.y, &mut scratch.s);
        fops.add(&mut scratch.t1, &scratch.u2, &scratch.u2);
        fops.add(&mut scratch.t2, &scratch.t1, &scratch.u2);
        fops.sub_assign(&mut p.y, &scratch.t2);
        fops.sub_assign(&mut p.y, &scratch.t0);
        fops.add(&mut scratch.t1, &p.y, &p.y);
        fops.add_assign(&mut p.y, &scratch.t1);
        fops.add(&mut scratch.t1, &scratch.t0, &scratch.t0);
        fops.add_assign(&mut scratch.t0, &scratch.t1);
        fops.sub_assign(&mut scratch.t0, &scratch.t2);
        fops.mul(&mut scratch.t1, &scratch.t4, &p.y);
        fops.mul(&mut scratch.t2, &scratch.t0, &p.y);
        fops.mul(&mut p.y, &p.x, &p.z);
        fops.add_assign(&mut p.y, &scratch.t2);
        fops.mul(&mut scratch.s, &scratch.t3, &p.x);
        mem::swap(&mut p.x, &mut scratch.s);
        fops.sub_assign(&mut p.x, &scratch.t1);
        fops.mul(&mut scratch.s, &scratch.t4, &p.z);
        mem::swap(&mut p.z, &mut scratch.s);
        fops.mul(&mut scratch.t1, &scratch.t3, &scratch.t0);
        fops.add_assign(&mut p.z, &scratch.t1);
    }

    /// Add a projective point into another, algorithm 4 of
    /// Renes-Costello-Batina.
    ///
    /// Correct for all inputs, including either or both operands at
    /// infinity, with uniform control flow.
    pub fn full_add(
        &self,
        fops: &FieldOps,
        p: &mut PointCoords,
        q: &PointCoords,
        scratch: &mut OpsScratch,
    ) {
        fops.copy(&mut scratch.u0, &p.x);
        fops.copy(&mut scratch.u1, &p.y);
        fops.copy(&mut scratch.u2, &p.z);

        fops.mul(&mut scratch.t0, &scratch.u0, &q.x);
        fops.mul(&mut scratch.t1, &scratch.u1, &q.y);
        fops.mul(&mut scratch.t2, &scratch.u2, &q.z);
        fops.add(&mut scratch.t3, &scratch.u0, &scratch.u1);
        fops.add(&mut scratch.t4, &q.x, &q.y);
        fops.mul(&mut scratch.s, &scratch.t3, &scratch.t4);
        mem::swap(&mut scratch.t3, &mut scratch.s);
        fops.add(&mut scratch.t4, &scratch.t0, &scratch.t1);
        fops.sub_assign(&mut scratch.t3, &scratch.t4);
        fops.add(&mut scratch.t4, &scratch.u1, &scratch.u2);
        fops.add(&mut p.x, &q.y, &q.z);
        fops.mul(&mut scratch.s, &scratch.t4, &p.x);
        mem::swap(&mut scratch.t4, &mut scratch.s);
        fops.add(&mut p.x, &scratch.t1, &scratch.t2);
        fops.sub_assign(&mut scratch.t4, &p.x);
        fops.add(&mut p.x, &scratch.u0, &scratch.u2);
        fops.add(&mut p.y, &q.x, &q.z);
        fops.mul(&mut scratch.s, &p.x, &p.y);
        mem::swap(&mut p.x, &mut scratch.s);
        fops.add(&mut p.y, &scratch.t0, &scratch.t2);
        fops.sub(&mut scratch.s, &p.x, &p.y);
        mem::swap(&mut p.y, &mut scratch.s);
        fops.mul(&mut p.z, &self.mg_b, &scratch.t2);
        fops.sub(&mut p.x, &p.y, &p.z);
        fops.add(&mut p.z, &p.x, &p.x);
        fops.add_assign(&mut p.x, &p.z);
        fops.sub(&mut p.z, &scratch.t1, &p.x);
        fops.add_assign(&mut p.x, &scratch.t1);
        fops.mul(&mut scratch.s, &self.mg_b, &p.y);
        mem::swap(&mut p.y, &mut scratch.s);
        fops.add(&mut scratch.t1, &scratch.t2, &scratch.t2);
        fops.add_assign(&mut scratch.t2, &scratch.t1);
        fops.sub_assign(&mut p.y, &scratch.t2);
        fops.sub_assign(&mut p.y, &scratch.t0);
        fops.add(&mut scratch.t1, &p.y, &p.y);
        fops.add_assign(&mut p.y, &scratch.t1);
        fops.add(&mut scratch.t1, &scratch.t0, &scratch.t0);
        fops.add_assign(&mut scratch.t0, &scratch.t1);
        fops.sub_assign(&mut scratch.t0, &scratch.t2);
        fops.mul(&mut scratch.t1, &scratch.t4, &p.y);
        fops.mul(&mut scratch.t2, &scratch.t0, &p.y);
        fops.mul(&mut p.y, &p.x, &p.z);
        fops.add_assign(&mut p.y, &scratch.t2);
        fops.mul(&mut scratch.s, &scratch.t3, &p.x);
        mem::swap(&mut p.x, &mut scratch.s);
        fops.sub_assign(&mut p.x, &scratch.t1);
        fops.mul(&mut scratch.s, &scratch.t4, &p.z);
        mem::swap(&mut p.z, &mut scratch.s);
        fops.mul(&mut scratch.t1, &scratch.t3, &scratch.t0);
        fops.add_assign(&mut p.z, &scratch.t1);
    }

    /// Test whether affine Montgomery form coordinates satisfy
    /// y² = x³ − 3x + b.
    pub fn is_on_curve_affine(
        &self,
        fops: &FieldOps,
        x: &FieldElement,
        y: &FieldElement,
        scratch: &mut OpsScratch,
    ) -> bool {
        fops.mul(&mut scratch.t0, y, y);
        fops.mul(&mut scratch.s, x, x);
        fops.mul(&mut scratch.t1, &scratch.s, x);
        fops.sub_assign(&mut scratch.t1, x);
        fops.sub_assign(&mut scratch.t1, x);
        fops.sub_assign(&mut scratch.t1, x);
        fops.add_assign(&mut scratch.t1, &self.mg_b);
        fops.is_equal(&scratch.t0, &scratch.t1)
    }

    /// Convert projective coordinates to affine ones, in place.
    ///
    /// On return x and y hold X/Z and Y/Z in Montgomery form and z is left
    /// untouched; the point at infinity maps to (0, 0).
    pub fn point_into_affine(
        &self,
        fops: &FieldOps,
        p: &mut PointCoords,
        scratch: &mut OpsScratch,
    ) {
        if fops.is_zero(&p.z) {
            fops.set_zero(&mut p.x);
            fops.set_zero(&mut p.y);
            return;
        }

        fops.invert(
            &mut scratch.t0,
            &p.z,
            &mut scratch.t1,
            &mut scratch.scratch0,
            &mut scratch.scratch1,
        );
        fops.mul(&mut scratch.s, &p.x, &scratch.t0);
        mem::swap(&mut p.x, &mut scratch.s);
        fops.mul(&mut scratch.s, &p.y, &scratch.t0);
        mem::swap(&mut p.y, &mut scratch.s);
    }

}
