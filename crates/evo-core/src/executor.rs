//! Thread-pool abstraction backing parallel fitness evaluation and the
//! parallel crossover/mutation batches (§5).

/// How a batch of independent closures gets run. `Serial` runs them in
/// order on the calling thread — used by the sequential `Population` and by
/// `ParallelPopulation` when `ThreadCount == 1`, so the two variants agree
/// bit-for-bit on a deterministic fitness function (testable property 7).
#[derive(Clone, Debug, Default)]
pub enum Executor {
    #[default]
    Serial,
    /// Scoped `std::thread` pool of a fixed width, rebuilt per call.
    FixedSizedWorkerPool(usize),
    /// A shared `rayon` thread pool.
    #[cfg(feature = "rayon")]
    WorkerPool(std::sync::Arc<rayon::ThreadPool>),
}

impl Executor {
    /// Builds a `rayon`-backed executor with `threads` worker threads.
    #[cfg(feature = "rayon")]
    pub fn worker_pool(threads: usize) -> Self {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .expect("failed to build rayon thread pool");
        Executor::WorkerPool(std::sync::Arc::new(pool))
    }

    /// Runs `f` once per item in `items`, returning the results in the same
    /// order the inputs arrived in.
    pub fn map<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Send + Sync,
    {
        match self {
            Executor::Serial => items.into_iter().map(f).collect(),
            Executor::FixedSizedWorkerPool(width) => {
                let width = (*width).max(1);
                let chunk_size = items.len().div_ceil(width).max(1);
                let mut iter = items.into_iter();
                let mut chunks: Vec<Vec<T>> = Vec::new();
                loop {
                    let chunk: Vec<T> = (&mut iter).take(chunk_size).collect();
                    if chunk.is_empty() {
                        break;
                    }
                    chunks.push(chunk);
                }
                std::thread::scope(|scope| {
                    let handles: Vec<_> = chunks
                        .into_iter()
                        .map(|chunk| {
                            let f = &f;
                            scope.spawn(move || chunk.into_iter().map(f).collect::<Vec<R>>())
                        })
                        .collect();
                    handles
                        .into_iter()
                        .flat_map(|h| h.join().expect("worker thread panicked"))
                        .collect()
                })
            }
            #[cfg(feature = "rayon")]
            Executor::WorkerPool(pool) => {
                use rayon::prelude::*;
                pool.install(|| items.into_par_iter().map(f).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_and_fixed_pool_agree() {
        let items: Vec<i32> = (0..50).collect();
        let serial = Executor::Serial.map(items.clone(), |x| x * x);
        let pooled = Executor::FixedSizedWorkerPool(4).map(items, |x| x * x);
        assert_eq!(serial, pooled);
    }
}
