//! Min-priority queue of discovered cells, ordered by `(priority, insertion sequence)`.
//!
//! The sequence number is handed out at push time and makes the order among equal priorities
//! deterministic: the earlier insertion is popped first. Membership is tracked next to the heap
//! so [Frontier::contains] is a hash lookup.
use fxhash::FxHashMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

#[derive(Debug)]
struct FrontierEntry<K, N> {
    priority: K,
    sequence: u64,
    node: N,
}

impl<K: PartialEq, N> Eq for FrontierEntry<K, N> {}

impl<K: PartialEq, N> PartialEq for FrontierEntry<K, N> {
    fn eq(&self, other: &Self) -> bool {
        self.priority.eq(&other.priority) && self.sequence == other.sequence
    }
}

impl<K: Ord, N> PartialOrd for FrontierEntry<K, N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord, N> Ord for FrontierEntry<K, N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on both keys, BinaryHeap is a max-heap
        match other.priority.cmp(&self.priority) {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            s => s,
        }
    }
}

/// The open set of a search. Every node has at most one live entry: a node is
/// [contained](Frontier::contains) exactly while it has an entry that has not been popped.
#[derive(Debug)]
pub struct Frontier<N, K = u32> {
    heap: BinaryHeap<FrontierEntry<K, N>>,
    live: FxHashMap<N, (K, u64)>,
    next_sequence: u64,
}

impl<N, K> Default for Frontier<N, K>
where
    N: Eq + Hash + Clone,
    K: Ord + Copy,
{
    fn default() -> Self {
        Frontier::new()
    }
}

impl<N, K> Frontier<N, K>
where
    N: Eq + Hash + Clone,
    K: Ord + Copy,
{
    pub fn new() -> Self {
        Frontier {
            heap: BinaryHeap::new(),
            live: FxHashMap::default(),
            next_sequence: 0,
        }
    }

    /// Adds a node that is not yet in the frontier and returns the sequence number it received.
    pub fn push(&mut self, priority: K, node: N) -> u64 {
        debug_assert!(!self.contains(&node), "node pushed twice");
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.live.insert(node.clone(), (priority, sequence));
        self.heap.push(FrontierEntry {
            priority,
            sequence,
            node,
        });
        sequence
    }

    /// Lowers the priority of a node already in the frontier. The node keeps its sequence
    /// number, so ties are still resolved by first insertion. Returns `false` if the node is not
    /// contained or `priority` is not lower than its current one.
    pub fn decrease_priority(&mut self, priority: K, node: &N) -> bool {
        match self.live.get_mut(node) {
            Some((current, sequence)) if priority < *current => {
                *current = priority;
                let sequence = *sequence;
                // The superseded entry stays in the heap and is skipped when popped
                self.heap.push(FrontierEntry {
                    priority,
                    sequence,
                    node: node.clone(),
                });
                true
            }
            _ => false,
        }
    }

    /// Removes and returns the node with the smallest `(priority, sequence)`.
    pub fn pop_min(&mut self) -> Option<N> {
        while let Some(FrontierEntry {
            priority,
            sequence,
            node,
        }) = self.heap.pop()
        {
            match self.live.get(&node) {
                Some(&(p, s)) if p == priority && s == sequence => {
                    self.live.remove(&node);
                    return Some(node);
                }
                _ => continue,
            }
        }
        debug_assert!(self.live.is_empty(), "live node without heap entry");
        None
    }

    pub fn contains(&self, node: &N) -> bool {
        self.live.contains_key(node)
    }
    /// Current priority of a contained node.
    pub fn priority(&self, node: &N) -> Option<K> {
        self.live.get(node).map(|&(priority, _)| priority)
    }
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
    pub fn len(&self) -> usize {
        self.live.len()
    }
}
