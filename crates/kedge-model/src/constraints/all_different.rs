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

//! The soft all-different constraint.
//!
//! Error follows the soft-alldiff measure of Petit et al. (2001): for every
//! value taken by `c > 1` variables the error grows by `C(c, 2)`, the number
//! of variable pairs that would have to change for the violation to vanish.
//! A value-multiplicity cache keeps the error query proportional to the
//! number of distinct mirrored values and delta simulation proportional to
//! the number of changes.

use crate::constraint::{Constraint, ScopedValues, VariableChange};
use crate::index::VariableIndex;
use kedge_core::num::SolverValue;
use smallvec::SmallVec;
use std::collections::HashMap;

#[inline(always)]
fn binomial_with_2(count: u64) -> f64 {
    (count * count.saturating_sub(1)) as f64 / 2.0
}

/// Requires all scoped variables to take pairwise distinct values.
#[derive(Debug, Clone)]
pub struct AllDifferent<T> {
    values: ScopedValues<T>,
    counts: HashMap<T, u64>,
}

impl<T> AllDifferent<T>
where
    T: SolverValue,
{
    /// Creates an all-different constraint over the given scope.
    pub fn new(scope: Vec<VariableIndex>) -> Self {
        let values = ScopedValues::new(scope);
        let mut counts = HashMap::new();
        if !values.is_empty() {
            // The mirror starts all-zero.
            counts.insert(T::zero(), values.len() as u64);
        }
        Self { values, counts }
    }

    #[inline]
    fn count_of(&self, value: T) -> u64 {
        self.counts.get(&value).copied().unwrap_or(0)
    }
}

impl<T> Constraint<T> for AllDifferent<T>
where
    T: SolverValue,
{
    fn scope(&self) -> &[VariableIndex] {
        self.values.scope()
    }

    fn error(&self) -> f64 {
        self.counts
            .values()
            .filter(|&&count| count > 1)
            .map(|&count| binomial_with_2(count))
            .sum()
    }

    fn update_variable(&mut self, variable: VariableIndex, value: T) {
        let previous = self.values.set(variable, value);
        if previous == value {
            return;
        }

        match self.counts.get_mut(&previous) {
            Some(count) if *count > 1 => *count -= 1,
            Some(_) => {
                self.counts.remove(&previous);
            }
            None => {}
        }
        *self.counts.entry(value).or_insert(0) += 1;
    }

    fn simulate_changes(&mut self, changes: &[VariableChange<T>]) -> f64 {
        // Net multiplicity adjustment per affected value.
        let mut adjustments: SmallVec<[(T, i64); 4]> = SmallVec::new();
        let mut adjust = |value: T, diff: i64| {
            for entry in adjustments.iter_mut() {
                if entry.0 == value {
                    entry.1 += diff;
                    return;
                }
            }
            adjustments.push((value, diff));
        };

        for change in changes {
            adjust(change.current, -1);
            adjust(change.candidate, 1);
        }

        let mut delta = 0.0;
        for &(value, diff) in adjustments.iter() {
            if diff == 0 {
                continue;
            }
            let before = self.count_of(value);
            let after = (before as i64 + diff).max(0) as u64;
            delta += binomial_with_2(after) - binomial_with_2(before);
        }
        delta
    }
}
