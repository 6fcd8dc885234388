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

//! The best assignment found by a solver run.

use crate::index::VariableIndex;
use kedge_core::num::SolverValue;

/// A variable assignment together with its cost.
///
/// Values are indexed directly by `VariableIndex`: `values[v]` is the value
/// of variable `v`. For satisfaction problems the cost is the satisfaction
/// error of the assignment (zero means every constraint is satisfied); for
/// optimization problems it is the objective cost of the best solution.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<T> {
    cost: f64,
    values: Vec<T>,
}

impl<T> Solution<T>
where
    T: SolverValue,
{
    /// Constructs a new `Solution`.
    #[inline]
    pub fn new(cost: f64, values: Vec<T>) -> Self {
        Self { cost, values }
    }

    /// Returns the cost of this assignment.
    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Returns the assigned values for all variables.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Returns the assigned value of a specific variable.
    ///
    /// # Panics
    ///
    /// Panics if `variable` is out of bounds.
    #[inline]
    pub fn value(&self, variable: VariableIndex) -> T {
        let index = variable.get();
        debug_assert!(
            index < self.values.len(),
            "called `Solution::value` with variable index out of bounds: the len is {} but the index is {}",
            self.values.len(),
            index
        );
        self.values[index]
    }

    /// Returns the number of variables in this solution.
    #[inline]
    pub fn num_variables(&self) -> usize {
        self.values.len()
    }
}

impl<T> std::fmt::Display for Solution<T>
where
    T: SolverValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cost {}:", self.cost)?;
        for value in &self.values {
            write!(f, " {}", value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let solution = Solution::new(7.0, vec![3_i32, 0, -2]);
        assert_eq!(solution.cost(), 7.0);
        assert_eq!(solution.num_variables(), 3);
        assert_eq!(solution.values(), &[3, 0, -2]);
        assert_eq!(solution.value(VariableIndex::new(2)), -2);
    }

    #[test]
    fn test_display_lists_values() {
        let solution = Solution::new(0.0, vec![30_i32, 0]);
        assert_eq!(format!("{}", solution), "cost 0: 30 0");
    }
}
