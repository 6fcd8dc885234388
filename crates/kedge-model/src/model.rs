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

//! The model and its builder.
//!
//! `ModelBuilder` is the mutable configuration surface: declare variables
//! (receiving their stable ids), add constraints over those ids, and
//! optionally set an objective. `build()` validates fail-fast — empty
//! domains, empty models, and constraint scopes referencing unknown variable
//! ids are construction-time errors — and produces the immutable `Model` the
//! engine consumes.
//!
//! When no objective is set, the model is a pure satisfaction problem and a
//! `NullObjective` is substituted.

use crate::constraint::Constraint;
use crate::domain::Domain;
use crate::err::{EmptyDomainError, EmptyModelError, ModelBuildError, UnknownVariableError};
use crate::index::{ConstraintIndex, VariableIndex};
use crate::objective::{NullObjective, Objective};
use crate::variable::Variable;
use kedge_core::num::SolverValue;

/// A validated problem instance: variables, constraints, and an objective.
///
/// Owned by the engine for the duration of a solve call. Constraints refer to
/// variables by id only; the engine is the sole writer of variable values.
pub struct Model<T>
where
    T: SolverValue,
{
    variables: Vec<Variable<T>>,
    constraints: Vec<Box<dyn Constraint<T>>>,
    objective: Box<dyn Objective<T>>,
    is_optimization: bool,
}

impl<T> Model<T>
where
    T: SolverValue,
{
    /// Returns the number of variables.
    #[inline]
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Returns the number of constraints.
    #[inline]
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Returns `true` if an objective was declared.
    #[inline]
    pub fn is_optimization(&self) -> bool {
        self.is_optimization
    }

    /// Returns the variables, indexed by `VariableIndex`.
    #[inline]
    pub fn variables(&self) -> &[Variable<T>] {
        &self.variables
    }

    /// Returns mutable access to the variables.
    #[inline]
    pub fn variables_mut(&mut self) -> &mut [Variable<T>] {
        &mut self.variables
    }

    /// Returns the constraints, indexed by `ConstraintIndex`.
    #[inline]
    pub fn constraints(&self) -> &[Box<dyn Constraint<T>>] {
        &self.constraints
    }

    /// Returns mutable access to the constraints.
    #[inline]
    pub fn constraints_mut(&mut self) -> &mut [Box<dyn Constraint<T>>] {
        &mut self.constraints
    }

    /// Returns the objective.
    #[inline]
    pub fn objective(&self) -> &dyn Objective<T> {
        self.objective.as_ref()
    }

    /// Returns mutable access to the objective.
    #[inline]
    pub fn objective_mut(&mut self) -> &mut dyn Objective<T> {
        self.objective.as_mut()
    }

    /// Splits the model into variables, constraints, and objective with
    /// independent borrows, for callers that need to read the assignment
    /// while updating constraint or objective mirrors.
    #[inline]
    pub fn parts_mut(
        &mut self,
    ) -> (
        &mut [Variable<T>],
        &mut [Box<dyn Constraint<T>>],
        &mut dyn Objective<T>,
    ) {
        (
            &mut self.variables,
            &mut self.constraints,
            self.objective.as_mut(),
        )
    }
}

impl<T> std::fmt::Debug for Model<T>
where
    T: SolverValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("num_variables", &self.num_variables())
            .field("num_constraints", &self.num_constraints())
            .field("is_optimization", &self.is_optimization)
            .finish()
    }
}

/// The mutable configuration surface producing a [`Model`].
pub struct ModelBuilder<T>
where
    T: SolverValue,
{
    variables: Vec<(String, Domain<T>, usize)>,
    constraints: Vec<Box<dyn Constraint<T>>>,
    objective: Option<Box<dyn Objective<T>>>,
}

impl<T> Default for ModelBuilder<T>
where
    T: SolverValue,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ModelBuilder<T>
where
    T: SolverValue,
{
    /// Creates an empty builder.
    #[inline]
    pub fn new() -> Self {
        Self {
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: None,
        }
    }

    /// Declares a variable starting at the first domain value and returns its
    /// id.
    #[inline]
    pub fn add_variable(&mut self, name: impl Into<String>, domain: Domain<T>) -> VariableIndex {
        self.add_variable_starting_at(name, domain, 0)
    }

    /// Declares a variable starting at the given domain index and returns its
    /// id.
    ///
    /// Permutation problems declare their initial value pool this way: give
    /// every variable the shared domain and a distinct start index.
    ///
    /// # Panics
    ///
    /// Panics if `start_index` is out of bounds for a non-empty domain.
    /// (Empty domains are reported by `build`, not here.)
    pub fn add_variable_starting_at(
        &mut self,
        name: impl Into<String>,
        domain: Domain<T>,
        start_index: usize,
    ) -> VariableIndex {
        let name = name.into();
        assert!(
            domain.is_empty() || start_index < domain.len(),
            "called `ModelBuilder::add_variable_starting_at` for variable `{}` with start index {} but the domain holds {} values",
            name,
            start_index,
            domain.len()
        );

        let id = VariableIndex::new(self.variables.len());
        self.variables.push((name, domain, start_index));
        id
    }

    /// Adds a constraint and returns its id.
    #[inline]
    pub fn add_constraint<C>(&mut self, constraint: C) -> ConstraintIndex
    where
        C: Constraint<T> + 'static,
    {
        let id = ConstraintIndex::new(self.constraints.len());
        self.constraints.push(Box::new(constraint));
        id
    }

    /// Sets the objective, turning the model into an optimization problem.
    #[inline]
    pub fn set_objective<O>(&mut self, objective: O)
    where
        O: Objective<T> + 'static,
    {
        self.objective = Some(Box::new(objective));
    }

    /// Validates the configuration and produces the model.
    ///
    /// # Errors
    ///
    /// * [`ModelBuildError::EmptyModel`] if no variable was declared.
    /// * [`ModelBuildError::EmptyDomain`] if a variable has an empty domain.
    /// * [`ModelBuildError::UnknownVariable`] if a constraint scope
    ///   references a variable id the model does not know.
    pub fn build(self) -> Result<Model<T>, ModelBuildError> {
        if self.variables.is_empty() {
            return Err(EmptyModelError.into());
        }

        let mut variables = Vec::with_capacity(self.variables.len());
        for (position, (name, domain, start_index)) in self.variables.into_iter().enumerate() {
            if domain.is_empty() {
                return Err(EmptyDomainError::new(name).into());
            }
            variables.push(Variable::new(
                VariableIndex::new(position),
                name,
                domain,
                start_index,
            ));
        }

        for (position, constraint) in self.constraints.iter().enumerate() {
            for &variable in constraint.scope() {
                if variable.get() >= variables.len() {
                    return Err(
                        UnknownVariableError::new(ConstraintIndex::new(position), variable).into(),
                    );
                }
            }
        }

        let is_optimization = self.objective.is_some();
        let objective = self
            .objective
            .unwrap_or_else(|| Box::new(NullObjective) as Box<dyn Objective<T>>);

        Ok(Model {
            variables,
            constraints: self.constraints,
            objective,
            is_optimization,
        })
    }
}

impl<T> std::fmt::Debug for ModelBuilder<T>
where
    T: SolverValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelBuilder")
            .field("num_variables", &self.variables.len())
            .field("num_constraints", &self.constraints.len())
            .field("has_objective", &self.objective.is_some())
            .finish()
    }
}
