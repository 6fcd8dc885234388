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

//! Initial-configuration sampling for restarts.
//!
//! A restart reseeds the search from a fresh configuration. In standard mode
//! each variable draws a uniform-random domain value; in permutation mode the
//! current assignment is shuffled by swapping every `(i, j)` pair with
//! probability one half, preserving the value pool. The sampler draws several
//! configurations, keeps the one with the lowest satisfaction error, and
//! short-circuits on the first error-free draw.

use kedge_core::num::is_zero_cost;
use kedge_core::num::SolverValue;
use kedge_model::constraint::Constraint;
use kedge_model::variable::Variable;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Assigns every variable a uniform-random value from its domain.
pub fn monte_carlo_sampling<T>(variables: &mut [Variable<T>], rng: &mut ChaCha8Rng)
where
    T: SolverValue,
{
    for variable in variables.iter_mut() {
        variable.pick_random_value(rng);
    }
}

/// Shuffles the assignment by swapping each `(i, j)` pair of variables with
/// probability one half, exchanging their `(index, value)` pairs.
pub fn random_permutations<T>(variables: &mut [Variable<T>], rng: &mut ChaCha8Rng)
where
    T: SolverValue,
{
    let n = variables.len();
    for i in 0..n.saturating_sub(1) {
        for j in (i + 1)..n {
            if rng.random_bool(0.5) {
                let (value_i, index_i) = (variables[i].value(), variables[i].index());
                let (value_j, index_j) = (variables[j].value(), variables[j].index());
                variables[i].assign_pooled(value_j, index_j);
                variables[j].assign_pooled(value_i, index_i);
            }
        }
    }
}

/// Broadcasts the live assignment to every constraint's value mirror.
pub fn broadcast_assignment<T>(
    variables: &[Variable<T>],
    constraints: &mut [Box<dyn Constraint<T>>],
) where
    T: SolverValue,
{
    for constraint in constraints.iter_mut() {
        for position in 0..constraint.scope().len() {
            let variable = constraint.scope()[position];
            constraint.update_variable(variable, variables[variable.get()].value());
        }
    }
}

/// Draws up to `samplings` random configurations and leaves the variables on
/// the one with the lowest satisfaction error, stopping early on an
/// error-free draw.
///
/// A single sampling in standard mode skips the best-of bookkeeping entirely.
/// Constraint mirrors are left on the *last drawn* configuration; the caller
/// re-broadcasts after restoring the winner.
pub fn set_initial_configuration<T>(
    variables: &mut [Variable<T>],
    constraints: &mut [Box<dyn Constraint<T>>],
    permutation_problem: bool,
    samplings: u32,
    rng: &mut ChaCha8Rng,
) where
    T: SolverValue,
{
    if !permutation_problem && samplings <= 1 {
        monte_carlo_sampling(variables, rng);
        return;
    }

    let samplings = if permutation_problem {
        samplings.max(1)
    } else {
        samplings.max(2)
    };

    let mut best_sat_error = f64::INFINITY;
    let mut best: Vec<(T, usize)> = Vec::with_capacity(variables.len());

    for _ in 0..samplings {
        if permutation_problem {
            random_permutations(variables, rng);
        } else {
            monte_carlo_sampling(variables, rng);
        }

        broadcast_assignment(variables, constraints);
        let sat_error: f64 = constraints.iter().map(|c| c.error()).sum();

        if sat_error < best_sat_error {
            best_sat_error = sat_error;
            best.clear();
            best.extend(variables.iter().map(|v| (v.value(), v.index())));
        }
        if is_zero_cost(sat_error) {
            break;
        }
    }

    for (variable, &(value, index)) in variables.iter_mut().zip(best.iter()) {
        variable.assign_pooled(value, index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kedge_model::constraints::linear_sum::LinearSum;
    use kedge_model::domain::Domain;
    use kedge_model::index::VariableIndex;
    use rand::SeedableRng;

    fn vi(index: usize) -> VariableIndex {
        VariableIndex::new(index)
    }

    fn pool_variables(n: usize) -> Vec<Variable<i32>> {
        (0..n)
            .map(|i| Variable::new(vi(i), format!("v{}", i), Domain::range(0, n as i32), i))
            .collect()
    }

    #[test]
    fn test_monte_carlo_respects_domains() {
        let mut variables = vec![
            Variable::new(vi(0), "a", Domain::range(0, 3), 0),
            Variable::new(vi(1), "b", Domain::new(vec![10, 20]), 0),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..50 {
            monte_carlo_sampling(&mut variables, &mut rng);
            assert!(variables[0].domain().contains(variables[0].value()));
            assert!(variables[1].domain().contains(variables[1].value()));
        }
    }

    #[test]
    fn test_random_permutations_preserve_the_pool() {
        let mut variables = pool_variables(5);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..20 {
            random_permutations(&mut variables, &mut rng);
            let mut values: Vec<i32> = variables.iter().map(|v| v.value()).collect();
            values.sort_unstable();
            assert_eq!(values, vec![0, 1, 2, 3, 4]);
        }
    }

    #[test]
    fn test_sampling_keeps_the_best_draw() {
        // x = 3 is the only error-free assignment; with enough samplings the
        // short-circuit lands on it.
        let mut variables = vec![Variable::new(vi(0), "x", Domain::range(0, 4), 0)];
        let mut fix = LinearSum::equal(vec![vi(0)], vec![1.0], 3.0);
        fix.update_variable(vi(0), 0);
        let mut constraints: Vec<Box<dyn Constraint<i32>>> = vec![Box::new(fix)];
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        set_initial_configuration(&mut variables, &mut constraints, false, 100, &mut rng);
        assert_eq!(variables[0].value(), 3);
    }

    #[test]
    fn test_sampling_is_deterministic_per_seed() {
        let draw = |seed: u64| {
            let mut variables = pool_variables(6);
            let mut constraints: Vec<Box<dyn Constraint<i32>>> = Vec::new();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            set_initial_configuration(&mut variables, &mut constraints, true, 10, &mut rng);
            variables.iter().map(|v| v.value()).collect::<Vec<i32>>()
        };
        assert_eq!(draw(42), draw(42));
    }

    #[test]
    fn test_single_sampling_is_one_monte_carlo_draw() {
        let mut variables = vec![Variable::new(vi(0), "x", Domain::range(0, 100), 0)];
        let mut constraints: Vec<Box<dyn Constraint<i32>>> = Vec::new();

        let mut rng_a = ChaCha8Rng::seed_from_u64(1);
        set_initial_configuration(&mut variables, &mut constraints, false, 1, &mut rng_a);
        let sampled = variables[0].value();

        let mut check = vec![Variable::new(vi(0), "x", Domain::range(0, 100), 0)];
        let mut rng_b = ChaCha8Rng::seed_from_u64(1);
        monte_carlo_sampling(&mut check, &mut rng_b);
        assert_eq!(sampled, check[0].value());
    }
}
