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

//! Pins a variable to a constant value.
//!
//! The error is the absolute deviation from the target, giving the engine a
//! gradient toward the pinned value rather than a flat violation flag.

use crate::constraint::{Constraint, VariableChange};
use crate::index::VariableIndex;
use kedge_core::num::{to_cost, SolverValue};

/// Requires a single variable to equal a target value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixValue<T> {
    scope: [VariableIndex; 1],
    target: T,
    value: T,
}

impl<T> FixValue<T>
where
    T: SolverValue,
{
    /// Creates a constraint pinning `variable` to `target`.
    #[inline]
    pub fn new(variable: VariableIndex, target: T) -> Self {
        Self {
            scope: [variable],
            target,
            value: T::zero(),
        }
    }

    /// Returns the pinned target value.
    #[inline]
    pub fn target(&self) -> T {
        self.target
    }

    #[inline]
    fn deviation(&self, value: T) -> f64 {
        (to_cost(value) - to_cost(self.target)).abs()
    }
}

impl<T> Constraint<T> for FixValue<T>
where
    T: SolverValue,
{
    fn scope(&self) -> &[VariableIndex] {
        &self.scope
    }

    fn error(&self) -> f64 {
        self.deviation(self.value)
    }

    fn update_variable(&mut self, variable: VariableIndex, value: T) {
        debug_assert!(
            variable == self.scope[0],
            "called `FixValue::update_variable` with {} outside the scope",
            variable
        );
        self.value = value;
    }

    fn simulate_changes(&mut self, changes: &[VariableChange<T>]) -> f64 {
        debug_assert!(
            changes.len() == 1 && changes[0].variable == self.scope[0],
            "called `FixValue::simulate_changes` with changes outside the scope"
        );
        self.deviation(changes[0].candidate) - self.deviation(changes[0].current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vi(index: usize) -> VariableIndex {
        VariableIndex::new(index)
    }

    #[test]
    fn test_error_is_absolute_deviation() {
        let mut c = FixValue::new(vi(0), 10);
        c.update_variable(vi(0), 3);
        assert_eq!(c.error(), 7.0);

        c.update_variable(vi(0), 10);
        assert_eq!(c.error(), 0.0);

        c.update_variable(vi(0), 13);
        assert_eq!(c.error(), 3.0);
    }

    #[test]
    fn test_simulation_has_no_side_effect() {
        let mut c = FixValue::new(vi(4), -2);
        c.update_variable(vi(4), 1);
        assert_eq!(c.error(), 3.0);

        let delta = c.simulate_delta(VariableChange::new(vi(4), 1, -2));
        assert_eq!(delta, -3.0);
        assert_eq!(c.error(), 3.0);
    }

    #[test]
    fn test_scope_is_single_variable() {
        let c = FixValue::new(vi(7), 0);
        assert_eq!(c.scope(), &[vi(7)]);
        assert!(c.has_variable(vi(7)));
        assert!(!c.has_variable(vi(0)));
    }
}
