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

//! The constraint contract.
//!
//! A constraint observes the variables in its scope and reports how much the
//! current assignment violates it as a non-negative error — zero means
//! satisfied. Constraints follow the cache-inside discipline uniformly: they
//! mirror the values of their scoped variables, the engine notifies them of
//! every change through [`Constraint::update_variable`], and error queries
//! read only the mirror. The engine evaluates candidate moves through
//! [`Constraint::simulate_changes`], which must leave no net state change
//! behind; the provided implementation applies the changes, reads the error,
//! and rolls back, while constraints with incremental caches override it with
//! O(1) arithmetic.

use crate::index::VariableIndex;
use kedge_core::num::SolverValue;

/// A hypothetical single-variable move handed to delta simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariableChange<T> {
    /// The variable that would change.
    pub variable: VariableIndex,

    /// Its current value.
    pub current: T,

    /// The value it would take.
    pub candidate: T,
}

impl<T> VariableChange<T> {
    /// Creates a new change record.
    #[inline(always)]
    pub fn new(variable: VariableIndex, current: T, candidate: T) -> Self {
        Self {
            variable,
            current,
            candidate,
        }
    }
}

/// A constraint over a subset of a model's variables.
///
/// Implementations must uphold two contracts:
///
/// * `error` returns a value `>= 0`, where `0` means the constraint is
///   satisfied by the mirrored assignment. The closer an assignment is to
///   satisfying the constraint, the smaller the error should be — the engine
///   uses the gradient to steer moves.
/// * `simulate_changes` has no net side effect: calling it and then reading
///   `error` returns the same value as before the call.
pub trait Constraint<T>
where
    T: SolverValue,
{
    /// Returns the variable ids composing the constraint.
    fn scope(&self) -> &[VariableIndex];

    /// Returns the error of the mirrored assignment.
    fn error(&self) -> f64;

    /// Notifies the constraint that a scoped variable changed its value.
    ///
    /// Implementations update their value mirror and any incremental caches.
    /// The variable is guaranteed to be in the constraint's scope.
    fn update_variable(&mut self, variable: VariableIndex, value: T);

    /// Returns the error delta (`error_after - error_before`) of applying the
    /// given changes, without net state mutation.
    ///
    /// Every change refers to a distinct scoped variable. The engine passes a
    /// single change for standard moves and up to two for permutation swaps.
    fn simulate_changes(&mut self, changes: &[VariableChange<T>]) -> f64 {
        let before = self.error();
        for change in changes {
            self.update_variable(change.variable, change.candidate);
        }
        let after = self.error();
        for change in changes {
            self.update_variable(change.variable, change.current);
        }
        after - before
    }

    /// Returns the error delta of a single hypothetical move.
    fn simulate_delta(&mut self, change: VariableChange<T>) -> f64 {
        self.simulate_changes(std::slice::from_ref(&change))
    }

    /// Returns `true` if the given variable composes the constraint.
    fn has_variable(&self, variable: VariableIndex) -> bool {
        self.scope().iter().any(|&v| v == variable)
    }
}

impl<T> std::fmt::Debug for dyn Constraint<T>
where
    T: SolverValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Constraint {{ scope: {:?} }}", self.scope())
    }
}

/// A value mirror over a constraint's (or objective's) scope.
///
/// Keeps the scoped variable ids together with the last value the engine
/// broadcast for each of them. Lookup is a linear scan — scopes are typically
/// a handful of variables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopedValues<T> {
    scope: Vec<VariableIndex>,
    values: Vec<T>,
}

impl<T> ScopedValues<T>
where
    T: SolverValue,
{
    /// Creates a mirror over the given scope, with all values zeroed.
    ///
    /// The engine broadcasts the live assignment before reading any error,
    /// so the zero initialization is never observed.
    pub fn new(scope: Vec<VariableIndex>) -> Self {
        let values = vec![T::zero(); scope.len()];
        Self { scope, values }
    }

    /// Returns the scoped variable ids.
    #[inline]
    pub fn scope(&self) -> &[VariableIndex] {
        &self.scope
    }

    /// Returns the mirrored values, aligned with `scope()`.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Returns the scope-local position of the given variable.
    #[inline]
    pub fn position(&self, variable: VariableIndex) -> Option<usize> {
        self.scope.iter().position(|&v| v == variable)
    }

    /// Returns the mirrored value of the given variable.
    ///
    /// # Panics
    ///
    /// Panics if the variable is not in the scope.
    #[inline]
    pub fn get(&self, variable: VariableIndex) -> T {
        match self.position(variable) {
            Some(position) => self.values[position],
            None => panic!(
                "called `ScopedValues::get` with {} outside the scope",
                variable
            ),
        }
    }

    /// Records a new value for the given variable and returns the previous one.
    ///
    /// # Panics
    ///
    /// Panics if the variable is not in the scope.
    #[inline]
    pub fn set(&mut self, variable: VariableIndex, value: T) -> T {
        match self.position(variable) {
            Some(position) => std::mem::replace(&mut self.values[position], value),
            None => panic!(
                "called `ScopedValues::set` with {} outside the scope",
                variable
            ),
        }
    }

    /// Returns the number of scoped variables.
    #[inline]
    pub fn len(&self) -> usize {
        self.scope.len()
    }

    /// Returns `true` if the scope is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.scope.is_empty()
    }
}
