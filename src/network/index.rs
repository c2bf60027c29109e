//! Mixed-radix arithmetic mapping parent-state tuples to flat CPD rows.
//!
//! Each parent is a digit whose radix is that parent's state count. The row
//! index is found by narrowing a window over `[0, product of radices)` from
//! the last-listed parent to the first, so the first-listed parent varies
//! fastest. [`ParentCombinations`] enumerates tuples in exactly that order:
//! the k-th tuple it yields is the one [`cpd_index`] maps to `k`.

/// Number of CPD rows for a node whose parents have the given state counts.
pub fn cpd_length(radices: &[usize]) -> usize {
    radices.iter().product()
}

/// Flat CPD row for `states`, one entry per parent in parent order.
///
/// Returns `None` when the tuple does not match the parent list in length or
/// a state is outside its parent's domain.
pub fn cpd_index(radices: &[usize], states: &[usize]) -> Option<usize> {
    if radices.len() != states.len() {
        return None;
    }
    let mut start = 0;
    let mut end = cpd_length(radices);
    for i in (0..radices.len()).rev() {
        if states[i] >= radices[i] {
            return None;
        }
        let span = (end - start) / radices[i];
        start += states[i] * span;
        end = start + span;
    }
    Some(start)
}

/// Iterator over every parent-state tuple in CPD row order.
#[derive(Debug, Clone)]
pub struct ParentCombinations {
    radices: Vec<usize>,
    current: Vec<usize>,
    remaining: usize,
}

/// All parent-state tuples for the given radices, in row order.
pub fn parent_combinations(radices: &[usize]) -> ParentCombinations {
    ParentCombinations {
        radices: radices.to_vec(),
        current: vec![0; radices.len()],
        remaining: cpd_length(radices),
    }
}

impl Iterator for ParentCombinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let item = self.current.clone();

        // odometer step, first digit fastest
        for (digit, &radix) in self.current.iter_mut().zip(&self.radices) {
            *digit += 1;
            if *digit < radix {
                break;
            }
            *digit = 0;
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ParentCombinations {}
