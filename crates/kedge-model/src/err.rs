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

//! Model construction errors.
//!
//! Modeling misuse is detected eagerly when the model is built and surfaced
//! to the caller as a fatal error; the engine itself never sees an invalid
//! model.

use crate::index::{ConstraintIndex, VariableIndex};

/// A variable was declared with an empty domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyDomainError {
    name: String,
}

impl EmptyDomainError {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The name of the offending variable.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for EmptyDomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Variable `{}` has an empty domain", self.name)
    }
}

impl std::error::Error for EmptyDomainError {}

/// A constraint scope references a variable id the model does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownVariableError {
    constraint: ConstraintIndex,
    variable: VariableIndex,
}

impl UnknownVariableError {
    pub fn new(constraint: ConstraintIndex, variable: VariableIndex) -> Self {
        Self {
            constraint,
            variable,
        }
    }

    /// The constraint whose scope is invalid.
    pub fn constraint(&self) -> ConstraintIndex {
        self.constraint
    }

    /// The unknown variable id.
    pub fn variable(&self) -> VariableIndex {
        self.variable
    }
}

impl std::fmt::Display for UnknownVariableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "The scope of {} references {}, which is not declared in the model",
            self.constraint, self.variable
        )
    }
}

impl std::error::Error for UnknownVariableError {}

/// The model declares no variables at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyModelError;

impl std::fmt::Display for EmptyModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "The model declares no variables")
    }
}

impl std::error::Error for EmptyModelError {}

/// Errors surfaced by `ModelBuilder::build`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelBuildError {
    EmptyDomain(EmptyDomainError),
    UnknownVariable(UnknownVariableError),
    EmptyModel(EmptyModelError),
}

impl std::fmt::Display for ModelBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelBuildError::EmptyDomain(err) => write!(f, "{}", err),
            ModelBuildError::UnknownVariable(err) => write!(f, "{}", err),
            ModelBuildError::EmptyModel(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ModelBuildError {}

impl From<EmptyDomainError> for ModelBuildError {
    fn from(err: EmptyDomainError) -> Self {
        ModelBuildError::EmptyDomain(err)
    }
}

impl From<UnknownVariableError> for ModelBuildError {
    fn from(err: UnknownVariableError) -> Self {
        ModelBuildError::UnknownVariable(err)
    }
}

impl From<EmptyModelError> for ModelBuildError {
    fn from(err: EmptyModelError) -> Self {
        ModelBuildError::EmptyModel(err)
    }
}
