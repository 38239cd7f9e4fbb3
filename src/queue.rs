use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Anything the queue can order by ascending weight.
pub trait Weighted {
    fn weight(&self) -> u64;
}

struct Entry<T> {
    weight: u64,
    seq: u64,
    item: T,
}

impl<T> Eq for Entry<T> {}
impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}

// BinaryHeap is a max-heap, so both keys are reversed. The insertion
// sequence keeps equal weights first-in first-out.
impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}
impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue with stable ordering among equal weights.
pub struct PriorityQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T: Weighted> PriorityQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn insert(&mut self, item: T) {
        let entry = Entry {
            weight: item.weight(),
            seq: self.next_seq,
            item,
        };
        self.next_seq += 1;
        self.heap.push(entry);
    }

    pub fn pop_min(&mut self) -> Option<T> {
        self.heap.pop().map(|entry| entry.item)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T: Weighted> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item(u64, &'static str);

    impl Weighted for Item {
        fn weight(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn pops_in_ascending_weight() {
        let mut queue = PriorityQueue::new();
        for weight in [5, 1, 4, 2, 3] {
            queue.insert(Item(weight, ""));
        }
        let order: Vec<u64> = std::iter::from_fn(|| queue.pop_min()).map(|i| i.0).collect();
        assert_eq!(order, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn equal_weights_are_first_in_first_out() {
        let mut queue = PriorityQueue::new();
        queue.insert(Item(2, "first"));
        queue.insert(Item(1, "low"));
        queue.insert(Item(2, "second"));
        queue.insert(Item(2, "third"));

        assert_eq!(queue.pop_min(), Some(Item(1, "low")));
        assert_eq!(queue.pop_min(), Some(Item(2, "first")));
        assert_eq!(queue.pop_min(), Some(Item(2, "second")));
        assert_eq!(queue.pop_min(), Some(Item(2, "third")));
    }

    #[test]
    fn pop_on_empty_is_none() {
        let mut queue: PriorityQueue<Item> = PriorityQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.pop_min(), None);
    }
}
