use itertools::Itertools;
use std::sync::mpsc::channel;
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::Instant;
use tracing::{debug, info};

use super::{SearchOutcome, Trace, TraceSearch};

/// Number of crossover sets a worker takes from the shared enumerator at once.
const BATCH_SIZE: usize = 256;

enum Message {
    Found(usize, Trace),
    Done { worker: usize, evaluated: usize },
}

impl<'a> TraceSearch<'a> {
    /// Same result as [`TraceSearch::run`], computed by `thread_count` workers.
    /// The workers pull batches of candidates from one shared enumerator and
    /// report strong traces tagged with the candidate's position, which
    /// restores the sequential order at the end.
    pub fn run_parallel(&self, thread_count: usize) -> SearchOutcome {
        let thread_count = thread_count.max(1);
        info!(
            edges = self.map.edge_count(),
            candidates = ?self.candidate_count(),
            threads = thread_count,
            "searching strong traces in parallel"
        );

        let candidates = Mutex::new(self.candidates().enumerate());
        let (tx, rx) = channel();
        let started = Instant::now();

        thread::scope(|s| {
            for worker in 0..thread_count {
                let tx = tx.clone();
                let candidates = &candidates;

                s.spawn(move || {
                    let mut evaluated = 0usize;
                    loop {
                        let batch = {
                            let mut candidates = candidates.lock().unwrap_or_else(PoisonError::into_inner);
                            candidates.by_ref().take(BATCH_SIZE).collect_vec()
                        };
                        if batch.is_empty() {
                            break;
                        }

                        for (index, crossover) in batch {
                            evaluated += 1;
                            if let Some(trace) = self.evaluate(crossover) {
                                tx.send(Message::Found(index, trace))
                                    .expect("Multithreading did not work as expected");
                            }
                        }
                    }
                    tx.send(Message::Done { worker, evaluated })
                        .expect("Multithreading did not work as expected");
                });
            }
        });
        drop(tx);

        let mut evaluated = 0;
        let mut found = Vec::new();
        for message in rx {
            match message {
                Message::Found(index, trace) => found.push((index, trace)),
                Message::Done { worker, evaluated: n } => {
                    debug!(worker, evaluated = n, "worker finished");
                    evaluated += n;
                }
            }
        }

        let traces = found.into_iter().sorted_by_key(|(index, _)| *index).map(|(_, trace)| trace).collect_vec();

        info!(
            evaluated,
            found = traces.len(),
            millis = started.elapsed().as_millis() as u64,
            "search finished"
        );
        SearchOutcome { traces, evaluated }
    }
}

#[cfg(test)]
mod tests {
    use crate::map::Map;
    use crate::polyhedra::{cube, tetrahedron};
    use crate::trace::TraceSearch;

    #[test]
    fn test_parallel_equals_sequential() {
        for faces in vec![tetrahedron(), cube()] {
            let m = Map::from_faces(&faces).expect("valid map");
            let search = TraceSearch::new(&m);
            let sequential = search.run();
            for threads in 1..=4 {
                let parallel = search.run_parallel(threads);
                assert_eq!(parallel.evaluated, sequential.evaluated);
                assert_eq!(parallel.traces, sequential.traces);
            }
        }
    }

    #[test]
    fn test_zero_threads() {
        let m = Map::from_faces(&tetrahedron()).expect("valid map");
        let outcome = TraceSearch::new(&m).run_parallel(0);
        assert_eq!(outcome.evaluated, 64);
        assert_eq!(outcome.traces.len(), 28);
    }
}
