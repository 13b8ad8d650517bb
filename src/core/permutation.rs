/// Rearrange `values` into the next permutation in lexicographic order.
///
/// Returns false, leaving `values` sorted ascending, once the last
/// permutation has been passed.
pub fn next_permutation(values: &mut [usize]) -> bool {
    let n = values.len();
    if n < 2 {
        return false;
    }

    let mut pivot = n - 1;
    while pivot > 0 && values[pivot - 1] >= values[pivot] {
        pivot -= 1;
    }

    if pivot == 0 {
        values.reverse();
        return false;
    }

    let mut successor = n - 1;
    while values[successor] <= values[pivot - 1] {
        successor -= 1;
    }

    values.swap(pivot - 1, successor);
    values[pivot..].reverse();
    true
}

/// n!, or None when it does not fit in a u64.
pub fn factorial(n: usize) -> Option<u64> {
    (2..=n as u64).try_fold(1u64, |acc, k| acc.checked_mul(k))
}
