//! The decision-strategy contract.
//!
//! Anything that needs a decision asks a [`Chooser`] for selections of
//! option indices. The engine never decides on its own and never knows who
//! is deciding:
//!
//! - [`EnumerateAll`] returns every valid selection. The play tree uses it
//!   to branch on all of them.
//! - [`FirstOption`] narrows to one selection, for deterministic bots and
//!   replays.
//!
//! Human or scripted front ends implement the trait themselves.

/// Strategy for picking among options.
pub trait Chooser: Send + Sync {
    /// Selections of between `min` and `max` distinct indices out of
    /// `0..count`, each sorted ascending. Empty if no selection is valid.
    fn select(&self, count: usize, min: usize, max: usize) -> Vec<Vec<usize>>;
}

/// Every valid selection, smallest first.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnumerateAll;

impl Chooser for EnumerateAll {
    fn select(&self, count: usize, min: usize, max: usize) -> Vec<Vec<usize>> {
        let max = max.min(count);
        let mut out = Vec::new();
        for size in min..=max {
            combinations(count, size, &mut out);
        }
        out
    }
}

/// The first `max` options (or as many as there are).
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstOption;

impl Chooser for FirstOption {
    fn select(&self, count: usize, min: usize, max: usize) -> Vec<Vec<usize>> {
        let size = max.min(count);
        if size < min {
            return Vec::new();
        }
        vec![(0..size).collect()]
    }
}

/// Append every `size`-subset of `0..count` in lexicographic order.
fn combinations(count: usize, size: usize, out: &mut Vec<Vec<usize>>) {
    if size > count {
        return;
    }
    let mut indices: Vec<usize> = (0..size).collect();
    loop {
        out.push(indices.clone());

        // Rightmost index that can still move right.
        let Some(i) = (0..size).rev().find(|&i| indices[i] < count - size + i) else {
            return;
        };
        indices[i] += 1;
        for j in i + 1..size {
            indices[j] = indices[j - 1] + 1;
        }
    }
}

/// Pick exactly one option. One result per valid pick.
pub fn choose_exactly_one<T: Clone>(chooser: &dyn Chooser, options: &[T]) -> Vec<T> {
    chooser
        .select(options.len(), 1, 1)
        .into_iter()
        .filter_map(|selection| selection.first().map(|&i| options[i].clone()))
        .collect()
}

/// Pick exactly `n` distinct options.
pub fn choose_exactly_n<T: Clone>(chooser: &dyn Chooser, options: &[T], n: usize) -> Vec<Vec<T>> {
    pick(chooser, options, n, n)
}

/// Pick at most `n` distinct options (possibly none).
pub fn choose_n_or_fewer<T: Clone>(chooser: &dyn Chooser, options: &[T], n: usize) -> Vec<Vec<T>> {
    pick(chooser, options, 0, n)
}

fn pick<T: Clone>(chooser: &dyn Chooser, options: &[T], min: usize, max: usize) -> Vec<Vec<T>> {
    chooser
        .select(options.len(), min, max)
        .into_iter()
        .map(|selection| selection.iter().map(|&i| options[i].clone()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumerate_exactly_one() {
        let picks = choose_exactly_one(&EnumerateAll, &["a", "b", "c"]);
        assert_eq!(picks, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_enumerate_exactly_n() {
        let picks = choose_exactly_n(&EnumerateAll, &[1, 2, 3, 4], 2);
        assert_eq!(picks.len(), 6);
        assert_eq!(picks[0], vec![1, 2]);
        assert_eq!(picks[5], vec![3, 4]);
    }

    #[test]
    fn test_enumerate_n_or_fewer() {
        let picks = choose_n_or_fewer(&EnumerateAll, &['x', 'y'], 2);
        assert_eq!(picks, vec![vec![], vec!['x'], vec!['y'], vec!['x', 'y']]);
    }

    #[test]
    fn test_too_few_options() {
        assert!(choose_exactly_n(&EnumerateAll, &[1], 2).is_empty());
        assert!(choose_exactly_one::<u8>(&EnumerateAll, &[]).is_empty());
        assert!(choose_exactly_one::<u8>(&FirstOption, &[]).is_empty());
    }

    #[test]
    fn test_first_option_narrows() {
        assert_eq!(choose_exactly_one(&FirstOption, &["a", "b"]), vec!["a"]);
        assert_eq!(choose_n_or_fewer(&FirstOption, &[1, 2, 3], 2), vec![vec![1, 2]]);
        assert_eq!(choose_n_or_fewer(&FirstOption, &[1], 3), vec![vec![1]]);
    }

    #[test]
    fn test_zero_of_zero() {
        assert_eq!(EnumerateAll.select(0, 0, 0), vec![Vec::<usize>::new()]);
    }
}
