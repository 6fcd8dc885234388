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

//! # Kedge LS
//!
//! **The local-search engine of the Kedge metaheuristic solver.**
//!
//! Kedge solves constraint satisfaction and constrained optimization
//! problems over finite-domain integer variables under a wall-clock budget,
//! typically microseconds to tens of milliseconds. The search is adaptive:
//! each iteration picks one of the variables contributing the most error,
//! evaluates candidate moves through incremental delta-cost simulation, and
//! applies the best one, escaping plateaus and local minima through weak
//! tabu tenures and stochastic restarts.
//!
//! ## Architecture
//!
//! * **`engine`**: The [`SearchEngine`] driving the satisfaction loop and
//!   the optimization handoff.
//! * **`memory`**: Per-constraint and per-variable error aggregates, best
//!   tracking, and the best-assignment snapshot.
//! * **`eval`**: The move evaluator — candidate values in standard mode,
//!   swap partners in permutation mode — with per-constraint delta
//!   memoization.
//! * **`tabu`**: The weak tabu list of decaying per-variable freezes.
//! * **`sampling`**: Initial-configuration sampling for restarts.
//! * **`monitor`** / **`stats`** / **`result`**: Run observability and the
//!   outcome transport object.
//! * **`params`**: Expert knobs; the defaults reproduce the reference
//!   behavior.
//!
//! ## Example
//!
//! ```rust
//! use kedge_ls::SearchEngine;
//! use kedge_model::constraints::linear_sum::LinearSum;
//! use kedge_model::domain::Domain;
//! use kedge_model::model::ModelBuilder;
//! use std::time::Duration;
//!
//! // A tiny knapsack: stay under capacity, reach a minimum value.
//! let mut builder: ModelBuilder<i32> = ModelBuilder::new();
//! let bottle = builder.add_variable("bottle", Domain::range(0, 51));
//! let sandwich = builder.add_variable("sandwich", Domain::range(0, 11));
//! builder.add_constraint(LinearSum::at_most(
//!     vec![bottle, sandwich],
//!     vec![1.0, 1.25],
//!     30.0,
//! ));
//! builder.add_constraint(LinearSum::at_least(
//!     vec![bottle, sandwich],
//!     vec![500.0, 650.0],
//!     15000.0,
//! ));
//! let model = builder.build().expect("valid model");
//!
//! let mut engine = SearchEngine::new(model, false).with_seed(42);
//! let outcome = engine.solve(Duration::from_millis(5));
//! assert!(outcome.found());
//! ```

pub mod engine;
pub mod eval;
pub mod memory;
pub mod monitor;
pub mod params;
pub mod result;
pub mod sampling;
pub mod stats;
pub mod tabu;

pub use engine::SearchEngine;
pub use monitor::{NoopMonitor, SearchMonitor};
pub use params::SearchParameters;
pub use result::{SolveOutcome, TerminationReason};
pub use stats::SearchStatistics;
