use std::iter::FusedIterator;

use crate::JackknifeError;

/// Ensure `index` points to an actual observation of a sequence of length `len`.
fn check_index(index: usize, len: usize) -> Result<(), JackknifeError> {
    match index < len {
        true  => Ok(()),
        false => Err(JackknifeError::IndexOutOfRange{index, len}),
    }
}

/// Build the leave-one-out subsample of `data`, i.e. a copy of `data` with the observation found at
/// position `index` removed. The relative order of the remaining observations is preserved.
///
/// # Errors
/// - `IndexOutOfRange` if `index` does not lie within `[0, data.len())`.
pub fn leave_one_out<T: Clone>(data: &[T], index: usize) -> Result<Vec<T>, JackknifeError> {
    let mut subsample = Vec::with_capacity(data.len().saturating_sub(1));
    fill_leave_one_out(data, index, &mut subsample)?;
    Ok(subsample)
}

/// Write the leave-one-out subsample of `data` into a caller-owned `buffer`.
///
/// Any previous content of `buffer` is discarded. Allows callers to iterate over every
/// subsample while only ever keeping a single allocation alive.
///
/// # Errors
/// - `IndexOutOfRange` if `index` does not lie within `[0, data.len())`. `buffer` is left untouched.
pub fn fill_leave_one_out<T: Clone>(data: &[T], index: usize, buffer: &mut Vec<T>) -> Result<(), JackknifeError> {
    check_index(index, data.len())?;
    buffer.clear();
    buffer.extend_from_slice(&data[..index]);
    buffer.extend_from_slice(&data[index + 1..]);
    Ok(())
}

/// Materialize every leave-one-out subsample of `data`, in index order.
/// Subsample `k` excludes `data[k]`. Returns an empty vector when `data` is empty.
#[must_use]
pub fn leave_one_out_subsamples<T: Clone>(data: &[T]) -> Vec<Vec<T>> {
    LeaveOneOut::new(data).collect()
}

/// Lazy iterator over the leave-one-out subsamples of a sequence.
///
/// Subsamples are recomputed from the original sequence at each step, and are yielded in index order.
/// Only the subsample currently held by the caller lives in memory.
#[derive(Debug, Clone)]
pub struct LeaveOneOut<'a, T> {
    data : &'a [T],
    next : usize,
}

impl<'a, T: Clone> LeaveOneOut<'a, T> {
    #[must_use]
    pub fn new(data: &'a [T]) -> Self {
        Self{data, next: 0}
    }
}

impl<T: Clone> Iterator for LeaveOneOut<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let subsample = leave_one_out(self.data, self.next).ok()?;
        self.next += 1;
        Some(subsample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.data.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl<T: Clone> ExactSizeIterator for LeaveOneOut<'_, T> {}

impl<T: Clone> FusedIterator for LeaveOneOut<'_, T> {}
