/// Worker-pool sizing for the parallel evaluators, read once from the
/// documented environment variables so a deployment can tune concurrency
/// without a rebuild. `from_env` is the constructor every evaluator entry
/// point uses; the explicit fields exist so tests can pin a size without
/// touching process environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    pub process_workers: usize,
    pub thread_workers: usize,
}

impl ParallelConfig {
    pub const DEFAULT_PROCESS_WORKERS: usize = 8;
    pub const DEFAULT_THREAD_WORKERS: usize = 4;

    pub fn from_env() -> Self {
        ParallelConfig {
            process_workers: read_usize_env("NUM_PROCESSES", Self::DEFAULT_PROCESS_WORKERS),
            thread_workers: read_usize_env("NUM_THREADS", Self::DEFAULT_THREAD_WORKERS),
        }
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        ParallelConfig {
            process_workers: Self::DEFAULT_PROCESS_WORKERS,
            thread_workers: Self::DEFAULT_THREAD_WORKERS,
        }
    }
}

fn read_usize_env(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .filter(|&value: &usize| value > 0)
        .unwrap_or(default)
}
