//! Fixed-length bitsets over state indices.

use std::{cmp::Ordering, fmt};

const WORD_BITS: usize = u64::BITS as usize;

fn words_for(len: usize) -> usize {
    (len + WORD_BITS - 1) / WORD_BITS
}

/// A fixed-length set of bits.
///
/// Each bit position corresponds to a state index in some alphabet, so that a set bit `k` means
/// that state `k` is among the possible states. Bits beyond the length are always unset.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Bitset {
    words: Vec<u64>,
    len: usize,
}

impl Bitset {
    /// Creates a new bitset of the provided length with all bits unset.
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; words_for(len)],
            len,
        }
    }

    /// Creates a new bitset of the provided length with all bits set.
    pub fn full(len: usize) -> Self {
        let mut bitset = Self::new(len);
        bitset.fill();
        bitset
    }

    /// Creates a new bitset of the provided length with the provided indices set.
    ///
    /// Indices outside the length are ignored.
    pub fn from_indices<I>(len: usize, indices: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut bitset = Self::new(len);
        indices
            .into_iter()
            .filter(|&i| i < len)
            .for_each(|i| bitset.set(i));
        bitset
    }

    /// Returns the number of bits, set or unset.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the bitset has length zero.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of set bits.
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns `true` if no bits are set.
    pub fn none(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Returns `true` if the bit at the provided index is set.
    ///
    /// Indices outside the length are never set.
    pub fn is_set(&self, index: usize) -> bool {
        index < self.len && self.words[index / WORD_BITS] & (1 << (index % WORD_BITS)) != 0
    }

    /// Sets the bit at the provided index.
    ///
    /// # Panics
    ///
    /// Panics if the index is not less than the length.
    pub fn set(&mut self, index: usize) {
        assert!(index < self.len, "bit index {index} out of range");
        self.words[index / WORD_BITS] |= 1 << (index % WORD_BITS);
    }

    /// Unsets all bits.
    pub fn clear(&mut self) {
        self.words.iter_mut().for_each(|w| *w = 0);
    }

    /// Sets all bits.
    pub fn fill(&mut self) {
        self.words.iter_mut().for_each(|w| *w = u64::MAX);
        self.mask_tail();
    }

    /// Sets all bits that are set in `other`.
    ///
    /// Bits of `other` beyond the length of `self` are ignored.
    pub fn or_assign(&mut self, other: &Bitset) {
        self.words
            .iter_mut()
            .zip(other.words.iter())
            .for_each(|(a, b)| *a |= *b);
        self.mask_tail();
    }

    /// Returns the index of the lowest set bit, if any.
    pub fn first(&self) -> Option<usize> {
        self.iter_ones().next()
    }

    /// Returns the index of the highest set bit, if any.
    pub fn last(&self) -> Option<usize> {
        self.words
            .iter()
            .enumerate()
            .rev()
            .find(|&(_, &w)| w != 0)
            .map(|(i, w)| i * WORD_BITS + (WORD_BITS - 1 - w.leading_zeros() as usize))
    }

    /// Returns an iterator over the indices of set bits in increasing order.
    pub fn iter_ones(&self) -> Ones<'_> {
        Ones {
            words: &self.words,
            word_index: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }

    /// Shifts all bits one position towards higher indices.
    ///
    /// The highest bit is shifted out and lost.
    pub fn shift_up(&mut self) {
        let mut carry = 0;
        for w in self.words.iter_mut() {
            let next_carry = *w >> (WORD_BITS - 1);
            *w = (*w << 1) | carry;
            carry = next_carry;
        }
        self.mask_tail();
    }

    /// Shifts all bits one position towards lower indices.
    ///
    /// The lowest bit is shifted out and lost.
    pub fn shift_down(&mut self) {
        let mut carry = 0;
        for w in self.words.iter_mut().rev() {
            let next_carry = *w & 1;
            *w = (*w >> 1) | (carry << (WORD_BITS - 1));
            carry = next_carry;
        }
    }

    /// Compares bitsets by their lowest differing bit.
    ///
    /// Starting from index zero, matching bits are skipped until the first index at which the
    /// bitsets differ; the bitset with the bit set at that index is the greater one. This is not
    /// the numeric order of the bits read as an integer: `{1}` is less than `{0}`, since bit zero
    /// is the first to differ.
    pub fn cmp_lowest_differing(&self, other: &Bitset) -> Ordering {
        let n = self.words.len().max(other.words.len());

        for i in 0..n {
            let a = self.words.get(i).copied().unwrap_or(0);
            let b = other.words.get(i).copied().unwrap_or(0);
            let diff = a ^ b;

            if diff != 0 {
                let bit = 1 << diff.trailing_zeros();
                return if a & bit != 0 {
                    Ordering::Greater
                } else {
                    Ordering::Less
                };
            }
        }

        Ordering::Equal
    }

    fn mask_tail(&mut self) {
        let rem = self.len % WORD_BITS;
        if rem > 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1 << rem) - 1;
            }
        }
    }
}

impl fmt::Display for Bitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (0..self.len).try_for_each(|i| f.write_str(if self.is_set(i) { "1" } else { "0" }))
    }
}

/// An iterator over the indices of set bits in a [`Bitset`].
///
/// See [`Bitset::iter_ones`].
#[derive(Clone, Debug)]
pub struct Ones<'a> {
    words: &'a [u64],
    word_index: usize,
    current: u64,
}

impl<'a> Iterator for Ones<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.current == 0 {
            self.word_index += 1;
            self.current = *self.words.get(self.word_index)?;
        }

        let bit = self.current.trailing_zeros() as usize;
        self.current &= self.current - 1;

        Some(self.word_index * WORD_BITS + bit)
    }
}
