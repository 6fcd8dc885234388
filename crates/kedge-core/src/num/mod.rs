// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Numeric foundations of the solver.
//!
//! Variable values are generic over the signed primitive integers through the
//! [`SolverValue`] trait alias, while constraint errors and objective costs are
//! `f64` by contract: an error of zero means a constraint is satisfied, and
//! anything below [`COST_EPSILON`] is considered zero to absorb the rounding
//! noise that accumulates in incremental delta bookkeeping.

use num_traits::{FromPrimitive, PrimInt, Signed};

/// Absolute threshold below which a satisfaction cost counts as zero.
///
/// Incremental bookkeeping adds and subtracts constraint deltas thousands of
/// times per run; exact zero is not reachable through floating-point sums, so
/// the engine clamps anything smaller than this to zero.
pub const COST_EPSILON: f64 = 1.0e-10;

/// Returns `true` if the given satisfaction cost counts as zero.
#[inline(always)]
pub fn is_zero_cost(cost: f64) -> bool {
    cost.abs() < COST_EPSILON
}

/// Clamps a satisfaction cost to exactly zero when it is zero up to rounding.
#[inline(always)]
pub fn clamp_cost(cost: f64) -> f64 {
    if is_zero_cost(cost) { 0.0 } else { cost }
}

/// Converts a variable value into the `f64` cost domain.
///
/// Conversion from any [`SolverValue`] type is lossless for the magnitudes a
/// finite-domain model can express.
#[inline(always)]
pub fn to_cost<T>(value: T) -> f64
where
    T: SolverValue,
{
    value.to_f64().unwrap_or(f64::NAN)
}

/// A trait alias for the integer types a model's variables may take.
///
/// These are usually the signed integer types `i8`, `i16`, `i32`, `i64` and
/// `isize`. Values must be hashable because some global constraints maintain
/// value-multiplicity caches.
///
/// # Note
///
/// `i128` is intentionally excluded due to performance reasons, as it is
/// significantly slower on many platforms.
pub trait SolverValue:
    PrimInt
    + Signed
    + FromPrimitive
    + std::fmt::Debug
    + std::fmt::Display
    + std::hash::Hash
    + Send
    + Sync
    + 'static
{
}

impl<T> SolverValue for T where
    T: PrimInt
        + Signed
        + FromPrimitive
        + std::fmt::Debug
        + std::fmt::Display
        + std::hash::Hash
        + Send
        + Sync
        + 'static
{
}
