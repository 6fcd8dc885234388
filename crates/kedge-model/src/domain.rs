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

//! Finite integer domains.
//!
//! A domain is the ordered set of values a variable may take. It can be
//! declared as an explicit value list or as a contiguous half-open range
//! `[lo, hi)`; both forms materialize to a value vector so the move evaluator
//! can sweep candidates by position. Domains may be empty at construction —
//! the model builder rejects empty domains when the model is built.

use kedge_core::num::SolverValue;
use rand::{Rng, RngCore};

/// The finite, ordered set of values a variable can take.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Domain<T> {
    values: Vec<T>,
}

impl<T> Domain<T>
where
    T: SolverValue,
{
    /// Creates a domain from an explicit value list.
    ///
    /// The order of the list is preserved; positions into it are the domain
    /// indices used by the permutation-mode machinery.
    #[inline]
    pub fn new(values: Vec<T>) -> Self {
        Self { values }
    }

    /// Creates a contiguous domain over the half-open range `[lo, hi)`.
    ///
    /// An inverted range (`hi <= lo`) yields an empty domain, which the model
    /// builder rejects.
    pub fn range(lo: T, hi: T) -> Self {
        let mut values = Vec::new();
        let mut value = lo;
        while value < hi {
            values.push(value);
            value = value + T::one();
        }
        Self { values }
    }

    /// Returns the number of values in the domain.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the domain holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the domain values in declaration order.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Returns the value at the given domain index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> T {
        self.values[index]
    }

    /// Returns `true` if the given value belongs to the domain.
    #[inline]
    pub fn contains(&self, value: T) -> bool {
        self.values.contains(&value)
    }

    /// Returns the domain index of the given value, if it belongs to the domain.
    #[inline]
    pub fn position(&self, value: T) -> Option<usize> {
        self.values.iter().position(|&v| v == value)
    }

    /// Returns the smallest value in the domain, if any.
    #[inline]
    pub fn min_value(&self) -> Option<T> {
        self.values.iter().copied().min()
    }

    /// Returns the largest value in the domain, if any.
    #[inline]
    pub fn max_value(&self) -> Option<T> {
        self.values.iter().copied().max()
    }

    /// Draws a uniform-random domain index.
    ///
    /// # Panics
    ///
    /// Panics if the domain is empty.
    #[inline]
    pub fn pick_index(&self, rng: &mut dyn RngCore) -> usize {
        assert!(
            !self.values.is_empty(),
            "called `Domain::pick_index` on an empty domain"
        );
        rng.random_range(0..self.values.len())
    }
}
