use std::cmp::min;

/// An inclusive range of block numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockRange {
    pub from_block: u64,
    pub to_block: u64,
}

impl BlockRange {
    /// Returns `None` when `from_block > to_block`, the "nothing to do"
    /// outcome rather than an error.
    pub fn new(from_block: u64, to_block: u64) -> Option<Self> {
        if from_block > to_block {
            None
        } else {
            Some(Self {
                from_block,
                to_block,
            })
        }
    }

    pub fn block_count(&self) -> u64 {
        self.to_block - self.from_block + 1
    }

    /// Splits the range into consecutive windows of at most `batch_size`
    /// blocks, in ascending block order.
    pub fn windows(&self, batch_size: u64) -> Windows {
        Windows {
            next_from: self.from_block,
            to_block: self.to_block,
            batch_size: batch_size.max(1),
            done: false,
        }
    }
}

pub struct Windows {
    next_from: u64,
    to_block: u64,
    batch_size: u64,
    done: bool,
}

impl Iterator for Windows {
    type Item = BlockRange;

    fn next(&mut self) -> Option<BlockRange> {
        if self.done {
            return None;
        }

        let window_to = min(
            self.next_from.saturating_add(self.batch_size - 1),
            self.to_block,
        );
        let window = BlockRange {
            from_block: self.next_from,
            to_block: window_to,
        };

        if window_to == self.to_block {
            self.done = true;
        } else {
            self.next_from = window_to + 1;
        }

        Some(window)
    }
}
