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

//! Statistics reporting for search runs.
//!
//! A lightweight container tracking aggregate metrics of a run: outer
//! iterations, restarts, applied moves (split into improving and plateau
//! walks), local minima encountered, and total elapsed time. Updates use
//! saturating arithmetic and inline methods so the accounting imposes no
//! measurable overhead on the inner loop. The resulting `SearchStatistics`
//! is consumed by monitors and the final outcome.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchStatistics {
    /// Number of outer-loop iterations performed.
    pub iterations: u64,

    /// Number of restarts, including the initial one.
    pub restarts: u64,

    /// Number of strictly improving moves applied.
    pub local_moves: u64,

    /// Number of plateau moves walked.
    pub plateau_moves: u64,

    /// Number of local minima that triggered a restart.
    pub local_minima: u64,

    /// Number of plateaus escaped by the stochastic restart.
    pub plateau_local_minima: u64,

    /// Total wall-clock time of the run.
    pub time_total: Duration,
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self {
            iterations: 0,
            restarts: 0,
            local_moves: 0,
            plateau_moves: 0,
            local_minima: 0,
            plateau_local_minima: 0,
            time_total: Duration::ZERO,
        }
    }
}

impl SearchStatistics {
    /// Called at each outer-loop iteration.
    #[inline]
    pub fn on_iteration(&mut self) {
        self.iterations = self.iterations.saturating_add(1);
    }

    /// Called on every restart.
    #[inline]
    pub fn on_restart(&mut self) {
        self.restarts = self.restarts.saturating_add(1);
    }

    /// Called when a strictly improving move is applied.
    #[inline]
    pub fn on_local_move(&mut self) {
        self.local_moves = self.local_moves.saturating_add(1);
    }

    /// Called when a plateau move is walked.
    #[inline]
    pub fn on_plateau_move(&mut self) {
        self.plateau_moves = self.plateau_moves.saturating_add(1);
    }

    /// Called when a local minimum triggers a restart.
    #[inline]
    pub fn on_local_minimum(&mut self) {
        self.local_minima = self.local_minima.saturating_add(1);
    }

    /// Called when a plateau is escaped by the stochastic restart.
    #[inline]
    pub fn on_plateau_local_minimum(&mut self) {
        self.plateau_local_minima = self.plateau_local_minima.saturating_add(1);
    }

    /// Sets the total wall-clock time of the run.
    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    /// Total number of applied moves, improving and plateau.
    #[inline]
    pub fn applied_moves(&self) -> u64 {
        self.local_moves.saturating_add(self.plateau_moves)
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Kedge-LS Statistics:")?;
        writeln!(f, "   Iterations:       {}", self.iterations)?;
        writeln!(f, "   Restarts:         {}", self.restarts)?;
        writeln!(f, "   Improving Moves:  {}", self.local_moves)?;
        writeln!(f, "   Plateau Moves:    {}", self.plateau_moves)?;
        writeln!(f, "   Local Minima:     {}", self.local_minima)?;
        writeln!(f, "   Plateau Restarts: {}", self.plateau_local_minima)?;
        writeln!(f, "   Total Time:       {:?}", self.time_total)?;
        Ok(())
    }
}
