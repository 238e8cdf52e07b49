use bitvec::prelude::*;
use num::{NumCast, ToPrimitive};
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::ops::Index;

/// Fixed-size set of small indices with a cached cardinality.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BitSet {
    cardinality: usize,
    bit_vec: BitVec,
}

impl Debug for BitSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let values: Vec<_> = self.iter().map(|i| i.to_string()).collect();
        write!(
            f,
            "BitSet {{ cardinality: {}, bits: [{}] }}",
            self.cardinality,
            values.join(", "),
        )
    }
}

impl BitSet {
    #[inline]
    pub fn new(size: usize) -> Self {
        Self {
            cardinality: 0,
            bit_vec: bitvec![0; size],
        }
    }

    pub fn from_slice<T: ToPrimitive + Copy>(size: usize, slice: &[T]) -> Self {
        let mut set = Self::new(size);
        slice.iter().for_each(|i| {
            set.set_bit(NumCast::from(*i).unwrap());
        });
        set
    }

    #[inline]
    pub fn empty(&self) -> bool {
        self.cardinality == 0
    }

    #[inline]
    pub fn full(&self) -> bool {
        self.cardinality == self.bit_vec.len()
    }

    /// Returns whether the bit was already set.
    #[inline]
    pub fn set_bit(&mut self, idx: usize) -> bool {
        if !*self.bit_vec.get(idx).unwrap() {
            self.bit_vec.set(idx, true);
            self.cardinality += 1;
            false
        } else {
            true
        }
    }

    /// Returns whether the bit was set before.
    #[inline]
    pub fn unset_bit(&mut self, idx: usize) -> bool {
        if *self.bit_vec.get(idx).unwrap() {
            self.bit_vec.set(idx, false);
            self.cardinality -= 1;
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn cardinality(&self) -> usize {
        self.cardinality
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bit_vec.len()
    }

    #[inline]
    pub fn at(&self, idx: usize) -> bool {
        self.bit_vec[idx]
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bit_vec
            .iter()
            .enumerate()
            .filter(|(_, b)| **b)
            .map(|(i, _)| i)
    }
}

impl Index<usize> for BitSet {
    type Output = bool;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        self.bit_vec.index(index)
    }
}

/// Merges two sorted, duplicate-free sequences, skipping everything in
/// `filter` (which must also be sorted).
pub(crate) fn filtered_set_union(
    first: &[usize],
    second: &[usize],
    filter: &[usize],
) -> Vec<usize> {
    let mut result = Vec::with_capacity(first.len() + second.len());
    let mut i = 0;
    let mut j = 0;
    while i < first.len() || j < second.len() {
        let next = if j >= second.len() || (i < first.len() && first[i] <= second[j]) {
            if j < second.len() && first[i] == second[j] {
                j += 1;
            }
            let v = first[i];
            i += 1;
            v
        } else {
            let v = second[j];
            j += 1;
            v
        };
        if filter.binary_search(&next).is_err() {
            result.push(next);
        }
    }
    result
}
