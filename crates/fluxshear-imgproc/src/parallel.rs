use rayon::prelude::*;
use thiserror::Error;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The chunk size must be valid.
    #[error("chunk size must be > 0")]
    InvalidChunkSize,
}

/// Controls how parallel operations are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool to process every chunk in parallel.
    #[default]
    Parallel,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

/// Trait to execute an operation over mutable chunks of a slice with a given strategy.
pub trait ChunkExecuteExt<T> {
    /// Split the slice into chunks of `chunk_size` elements (the last one may be
    /// shorter) and run `op(chunk_index, chunk)` on each of them.
    ///
    /// # Arguments
    ///
    /// * `strategy` - The execution strategy.
    /// * `chunk_size` - The number of elements per chunk.
    /// * `op` - The operation to perform on each chunk. Its return values are summed.
    ///
    /// # Returns
    ///
    /// The sum of the values returned by `op`.
    fn execute_chunks_with<F>(
        &mut self,
        strategy: ExecutionStrategy,
        chunk_size: usize,
        op: F,
    ) -> Result<usize, ParallelError>
    where
        F: Fn(usize, &mut [T]) -> usize + Sync + Send;
}

impl<T: Send> ChunkExecuteExt<T> for [T] {
    fn execute_chunks_with<F>(
        &mut self,
        strategy: ExecutionStrategy,
        chunk_size: usize,
        op: F,
    ) -> Result<usize, ParallelError>
    where
        F: Fn(usize, &mut [T]) -> usize + Sync + Send,
    {
        if chunk_size == 0 {
            return Err(ParallelError::InvalidChunkSize);
        }

        let total: usize = match strategy {
            ExecutionStrategy::Serial => self
                .chunks_mut(chunk_size)
                .enumerate()
                .map(|(i, chunk)| op(i, chunk))
                .sum::<usize>(),
            ExecutionStrategy::Parallel => self
                .par_chunks_mut(chunk_size)
                .enumerate()
                .map(|(i, chunk)| op(i, chunk))
                .sum::<usize>(),
            ExecutionStrategy::Fixed(n) => {
                if n == 0 {
                    return Err(ParallelError::InvalidThreadCount(n));
                }
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| ParallelError::BuildError(e.to_string()))?;

                pool.install(|| {
                    self.par_chunks_mut(chunk_size)
                        .enumerate()
                        .map(|(i, chunk)| op(i, chunk))
                        .sum::<usize>()
                })
            }
        };

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn double_with(strategy: ExecutionStrategy) -> Result<(Vec<i32>, usize), ParallelError> {
        let mut data = vec![1, 2, 3, 4, 5];
        let touched = data
            .as_mut_slice()
            .execute_chunks_with(strategy, 2, |_, chunk| {
                chunk.iter_mut().for_each(|v| *v *= 2);
                chunk.len()
            })?;
        Ok((data, touched))
    }

    #[test]
    fn test_execute_serial() -> Result<(), ParallelError> {
        assert_eq!(
            double_with(ExecutionStrategy::Serial)?,
            (vec![2, 4, 6, 8, 10], 5)
        );
        Ok(())
    }

    #[test]
    fn test_execute_parallel() -> Result<(), ParallelError> {
        assert_eq!(
            double_with(ExecutionStrategy::Parallel)?,
            (vec![2, 4, 6, 8, 10], 5)
        );
        Ok(())
    }

    #[test]
    fn test_execute_fixed_success() -> Result<(), ParallelError> {
        assert_eq!(
            double_with(ExecutionStrategy::Fixed(2))?,
            (vec![2, 4, 6, 8, 10], 5)
        );
        Ok(())
    }

    #[test]
    fn test_execute_fixed_error() {
        let res = double_with(ExecutionStrategy::Fixed(0));
        assert!(matches!(res, Err(ParallelError::InvalidThreadCount(0))));
    }

    #[test]
    fn test_execute_chunk_index() -> Result<(), ParallelError> {
        let mut data = vec![0usize; 7];
        data.as_mut_slice()
            .execute_chunks_with(ExecutionStrategy::Parallel, 3, |i, chunk| {
                chunk.iter_mut().for_each(|v| *v = i);
                0
            })?;
        assert_eq!(data, vec![0, 0, 0, 1, 1, 1, 2]);
        Ok(())
    }

    #[test]
    fn test_execute_invalid_chunk_size() {
        let mut data = vec![0u8; 4];
        let res = data
            .as_mut_slice()
            .execute_chunks_with(ExecutionStrategy::Serial, 0, |_, _| 0);
        assert_eq!(res, Err(ParallelError::InvalidChunkSize));
    }
}
