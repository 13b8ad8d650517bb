use crate::domain::model::{DrawProblem, Solution};
use crate::domain::ports::{ProgressObserver, SolutionSearch};
use crate::utils::error::{DrawError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const PROGRESS_INTERVAL: u64 = 1_000;

/// Outcome of building one random candidate.
#[derive(Debug, PartialEq, Eq)]
enum Candidate {
    /// `receivers[i]` is the receiver index of participant `i`.
    Complete(Vec<usize>),
    /// A giver was left with nobody but themselves.
    DeadEnd,
}

/// Draws random derangements until one satisfies every constraint.
///
/// Without `max_attempts` the search never gives up, so an impossible
/// configuration loops forever.
#[derive(Debug, Clone)]
pub struct RandomRetrySearch {
    rng: StdRng,
    max_attempts: Option<u64>,
}

impl RandomRetrySearch {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            max_attempts: None,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: Option<u64>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    fn try_generate_candidate(&mut self, size: usize) -> Candidate {
        let mut pool: Vec<usize> = (0..size).collect();
        let mut receivers = Vec::with_capacity(size);

        for giver in 0..size {
            let candidates: Vec<usize> = pool.iter().copied().filter(|&r| r != giver).collect();
            if candidates.is_empty() {
                return Candidate::DeadEnd;
            }
            let receiver = candidates[self.rng.gen_range(0..candidates.len())];
            pool.retain(|&r| r != receiver);
            receivers.push(receiver);
        }

        Candidate::Complete(receivers)
    }
}

impl SolutionSearch for RandomRetrySearch {
    fn name(&self) -> &'static str {
        "random-retry"
    }

    fn search(
        &mut self,
        problem: &DrawProblem,
        progress: &mut dyn ProgressObserver,
    ) -> Result<Solution> {
        progress.on_start(self.max_attempts);
        let mut attempts: u64 = 0;
        let mut dead_ends: u64 = 0;

        loop {
            if let Some(max) = self.max_attempts {
                if attempts >= max {
                    progress.on_finish(attempts, 0);
                    tracing::warn!(
                        "Random search gave up after {} attempts ({} dead ends)",
                        attempts,
                        dead_ends
                    );
                    return Err(DrawError::RetriesExhaustedError { attempts });
                }
            }

            attempts += 1;
            if attempts % PROGRESS_INTERVAL == 0 {
                progress.on_progress(attempts);
            }

            let receivers = match self.try_generate_candidate(problem.len()) {
                Candidate::Complete(receivers) => receivers,
                Candidate::DeadEnd => {
                    dead_ends += 1;
                    continue;
                }
            };

            let solution = problem.solution_from_indices(&receivers);
            if !problem.uses_forbidden_group(solution.transactions())
                && !problem.is_forbidden_transaction(solution.transactions())
            {
                progress.on_finish(attempts, 1);
                tracing::debug!(
                    "Random search found a valid draw after {} attempts ({} dead ends)",
                    attempts,
                    dead_ends
                );
                return Ok(solution);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Transaction;
    use crate::domain::ports::NoProgress;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_candidates_never_contain_fixed_points() {
        let mut search = RandomRetrySearch::new(7);
        for _ in 0..200 {
            if let Candidate::Complete(receivers) = search.try_generate_candidate(6) {
                let mut sorted = receivers.clone();
                sorted.sort_unstable();
                assert_eq!(sorted, (0..6).collect::<Vec<_>>());
                assert!(receivers.iter().enumerate().all(|(g, &r)| g != r));
            }
        }
    }

    #[test]
    fn test_single_participant_is_dead_end() {
        let mut search = RandomRetrySearch::new(1);
        assert_eq!(search.try_generate_candidate(1), Candidate::DeadEnd);
    }

    #[test]
    fn test_finds_unique_solution() {
        let problem = DrawProblem::new(
            names(&["A", "B", "C"]),
            vec![],
            vec![Transaction::new("A", "B")],
        );

        for seed in 0..20 {
            let solution = RandomRetrySearch::new(seed)
                .search(&problem, &mut NoProgress)
                .unwrap();
            assert_eq!(
                solution.transactions(),
                &[
                    Transaction::new("A", "C"),
                    Transaction::new("B", "A"),
                    Transaction::new("C", "B"),
                ]
            );
        }
    }

    #[test]
    fn test_impossible_group_exhausts_capped_retries() {
        // Every derangement of three has an A/B exchange.
        let problem = DrawProblem::new(names(&["A", "B", "C"]), vec![names(&["A", "B"])], vec![]);

        let result = RandomRetrySearch::new(0)
            .with_max_attempts(Some(200))
            .search(&problem, &mut NoProgress);

        assert!(matches!(
            result,
            Err(DrawError::RetriesExhaustedError { attempts: 200 })
        ));
    }

    #[test]
    fn test_same_seed_same_solution() {
        let problem = DrawProblem::new(
            names(&["Ann", "Ben", "Cat", "Dan", "Eve", "Fay", "Gus"]),
            vec![names(&["Ann", "Ben"]), names(&["Cat", "Dan", "Eve"])],
            vec![Transaction::new("Fay", "Gus")],
        );

        let first = RandomRetrySearch::new(42)
            .search(&problem, &mut NoProgress)
            .unwrap();
        let second = RandomRetrySearch::new(42)
            .search(&problem, &mut NoProgress)
            .unwrap();

        assert_eq!(first, second);
        assert!(first.satisfies(&problem));
    }

    #[test]
    fn test_attempt_cap_surfaces_error() {
        // A and B may not exchange and nobody else exists.
        let problem = DrawProblem::new(names(&["A", "B"]), vec![names(&["A", "B"])], vec![]);

        let result = RandomRetrySearch::new(3)
            .with_max_attempts(Some(50))
            .search(&problem, &mut NoProgress);

        assert!(matches!(
            result,
            Err(DrawError::RetriesExhaustedError { attempts: 50 })
        ));
    }
}
