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

//! # Kedge Core
//!
//! **Shared primitives for the Kedge metaheuristic solver.**
//!
//! This crate carries the plumbing every other Kedge crate relies on:
//!
//! * **`num`**: The [`SolverValue`](num::SolverValue) trait alias bounding the
//!   integer types a model's variables may take, plus the `f64` cost helpers
//!   used by the search engine (satisfaction errors below a small epsilon are
//!   treated as zero to absorb floating-point rounding).
//! * **`utils`**: Strongly typed indices (`TypedIndex`) used to keep variable
//!   and constraint index spaces apart at compile time.

pub mod num;
pub mod utils;
