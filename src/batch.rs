/// Default number of references sent to the lookup tool per invocation.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Lazy, order-preserving split of references into batches of at most `size`.
/// An empty input yields no batches.
pub fn batches<T>(refs: &[T], size: usize) -> std::slice::Chunks<'_, T> {
    refs.chunks(size.max(1))
}

/// Number of batches `batches` will produce for `len` references.
pub fn batch_count(len: usize, size: usize) -> usize {
    len.div_ceil(size.max(1))
}
