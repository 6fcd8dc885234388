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

//! # Kedge Model
//!
//! **The modeling layer of the Kedge metaheuristic solver.**
//!
//! This crate defines the structures a user combines to describe a constraint
//! satisfaction or constrained optimization problem over finite-domain integer
//! variables. It is the data interchange layer between problem definition
//! (user input) and the solving engine (`kedge-ls`).
//!
//! ## Architecture
//!
//! * **`index`**: Strongly-typed wrappers (`VariableIndex`, `ConstraintIndex`)
//!   to prevent logical indexing errors.
//! * **`domain`** / **`variable`**: Finite integer domains and the variables
//!   drawing values from them.
//! * **`constraint`**: The [`Constraint`](constraint::Constraint) trait — a
//!   constraint observes variable updates, reports a non-negative error (zero
//!   means satisfied), and can simulate the error delta of hypothetical moves.
//! * **`objective`**: The [`Objective`](objective::Objective) trait for
//!   optimization problems, including the value/variable tie-break heuristics
//!   the engine consults, plus [`NullObjective`](objective::NullObjective) for
//!   pure satisfaction problems.
//! * **`model`**: The immutable `Model` (consumed by the engine) and the
//!   mutable `ModelBuilder` (optimized for configuration).
//! * **`constraints`**: Ready-made global constraints (`AllDifferent`,
//!   `LinearSum`, `FixValue`) with incremental caches and O(1) delta
//!   simulation.
//! * **`solution`**: The output format: best assignment plus its cost.
//!
//! ## Design Philosophy
//!
//! 1.  **Type Safety**: Variable and constraint index spaces are distinct
//!     types.
//! 2.  **Cache Inside**: Constraints and objectives mirror the values of the
//!     variables in their scope and are notified of every change, so error
//!     and cost queries never need access to shared solver state.
//! 3.  **Fail-Fast**: `ModelBuilder::build` validates eagerly (empty domains,
//!     unknown variable ids in scopes) so the engine never encounters an
//!     invalid model.

pub mod constraint;
pub mod constraints;
pub mod domain;
pub mod err;
pub mod index;
pub mod model;
pub mod objective;
pub mod solution;
pub mod variable;
