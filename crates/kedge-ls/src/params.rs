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

//! Search parameters for local-search experts.
//!
//! The defaults reproduce the engine's reference behavior; `None` for the
//! tabu tenures means "derive from the instance size" (`max(1, n/2)` for the
//! local-minimum tenure, half of that for the selected-variable tenure).

/// Tunable knobs of the local search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParameters {
    /// How many random configurations the restart sampler draws, keeping the
    /// best.
    pub samplings: u32,

    /// Probability to escape a plateau by restarting instead of walking it.
    pub plateau_restart_probability: f64,

    /// Iterations a variable stays frozen after a local-minimum move.
    /// `None` derives `max(1, n/2)` from the number of variables.
    pub tabu_time_local_min: Option<u32>,

    /// Iterations a variable stays frozen after an improving move.
    /// `None` derives half of the local-minimum tenure.
    pub tabu_time_selected: Option<u32>,
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self {
            samplings: 10,
            plateau_restart_probability: 0.1,
            tabu_time_local_min: None,
            tabu_time_selected: None,
        }
    }
}

impl SearchParameters {
    /// Resolves the local-minimum tenure for an instance with `num_variables`
    /// variables.
    #[inline]
    pub fn resolved_tabu_time_local_min(&self, num_variables: usize) -> u32 {
        self.tabu_time_local_min
            .unwrap_or_else(|| std::cmp::max(1, (num_variables / 2) as u32))
    }

    /// Resolves the selected-variable tenure for an instance with
    /// `num_variables` variables.
    #[inline]
    pub fn resolved_tabu_time_selected(&self, num_variables: usize) -> u32 {
        self.tabu_time_selected
            .unwrap_or_else(|| std::cmp::max(1, self.resolved_tabu_time_local_min(num_variables) / 2))
    }
}
