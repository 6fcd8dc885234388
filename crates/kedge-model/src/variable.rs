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

//! Model variables.
//!
//! A variable couples a finite [`Domain`] with a current value and the
//! domain index of that value. The index doubles as the shared-pool position
//! in permutation problems, where the engine exchanges the `(index, value)`
//! pairs of two variables instead of assigning fresh domain values.
//!
//! Variables are created by the model builder and mutated only by the engine;
//! the current value always belongs to the domain.

use crate::domain::Domain;
use crate::index::VariableIndex;
use kedge_core::num::SolverValue;
use rand::RngCore;

/// A finite-domain integer variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable<T> {
    id: VariableIndex,
    name: String,
    domain: Domain<T>,
    value: T,
    index: usize,
}

impl<T> Variable<T>
where
    T: SolverValue,
{
    /// Creates a variable starting at the given domain index.
    ///
    /// # Panics
    ///
    /// Panics if the domain is empty or `start_index` is out of bounds.
    /// The model builder performs these checks before materializing
    /// variables, so user code only hits them when constructing variables
    /// directly.
    pub fn new(
        id: VariableIndex,
        name: impl Into<String>,
        domain: Domain<T>,
        start_index: usize,
    ) -> Self {
        let name = name.into();
        assert!(
            start_index < domain.len(),
            "called `Variable::new` for variable `{}` with start index {} but the domain holds {} values",
            name,
            start_index,
            domain.len()
        );

        let value = domain.get(start_index);
        Self {
            id,
            name,
            domain,
            value,
            index: start_index,
        }
    }

    /// Returns the stable id of this variable within its model.
    #[inline]
    pub fn id(&self) -> VariableIndex {
        self.id
    }

    /// Returns the variable name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the variable's domain.
    #[inline]
    pub fn domain(&self) -> &Domain<T> {
        &self.domain
    }

    /// Returns the current value.
    #[inline]
    pub fn value(&self) -> T {
        self.value
    }

    /// Returns the domain index of the current value.
    ///
    /// In permutation problems this is the position within the shared value
    /// pool.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Sets the current value.
    ///
    /// # Panics
    ///
    /// Panics if the value does not belong to the domain.
    pub fn set_value(&mut self, value: T) {
        match self.domain.position(value) {
            Some(index) => {
                self.index = index;
                self.value = value;
            }
            None => panic!(
                "called `Variable::set_value` with value {} outside the domain of variable `{}`",
                value, self.name
            ),
        }
    }

    /// Assigns an `(index, value)` pair directly.
    ///
    /// This is the permutation-mode primitive: swapping two variables means
    /// exchanging their pairs without a domain lookup.
    #[inline]
    pub fn assign_pooled(&mut self, value: T, index: usize) {
        debug_assert!(
            self.domain.contains(value),
            "called `Variable::assign_pooled` with value {} outside the domain of variable `{}`",
            value,
            self.name
        );
        self.value = value;
        self.index = index;
    }

    /// Assigns a uniform-random value from the domain.
    #[inline]
    pub fn pick_random_value(&mut self, rng: &mut dyn RngCore) {
        let index = self.domain.pick_index(rng);
        self.index = index;
        self.value = self.domain.get(index);
    }
}

impl<T> std::fmt::Display for Variable<T>
where
    T: SolverValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {} ({})", self.name, self.value, self.id)
    }
}
