//! Ordering primitives for the open list. These know nothing about search,
//! they only decide which of the pushed items comes out next.

use crate::search::HeuristicValue;
use priority_queue::PriorityQueue;
use std::{
    cmp::Reverse,
    collections::{HashMap, VecDeque},
    fmt::Debug,
};

pub trait Frontier<T>: Debug {
    /// Add an item. Containers that do not order by priority ignore it.
    fn push(&mut self, item: T, priority: HeuristicValue);

    /// Remove the item the container ranks first, if any.
    fn pop(&mut self) -> Option<T>;

    fn is_empty(&self) -> bool;

    fn len(&self) -> usize;
}

/// Last in, first out.
#[derive(Debug)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Debug> Frontier<T> for Stack<T> {
    fn push(&mut self, item: T, _priority: HeuristicValue) {
        self.items.push(item);
    }

    fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

/// First in, first out.
#[derive(Debug)]
pub struct Queue<T> {
    items: VecDeque<T>,
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Debug> Frontier<T> for Queue<T> {
    fn push(&mut self, item: T, _priority: HeuristicValue) {
        self.items.push_back(item);
    }

    fn pop(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

/// Lowest priority first. Items pushed with equal priority come out in the
/// order they were pushed.
///
/// The underlying [`PriorityQueue`] deduplicates by key, but search nodes may
/// legitimately be pushed several times, so every push is keyed by a fresh
/// ticket and the payload is kept on the side.
#[derive(Debug)]
pub struct PriorityFrontier<T> {
    queue: PriorityQueue<u64, Reverse<(HeuristicValue, u64)>>,
    items: HashMap<u64, T>,
    next_ticket: u64,
}

impl<T> PriorityFrontier<T> {
    pub fn new() -> Self {
        Self {
            queue: PriorityQueue::new(),
            items: HashMap::new(),
            next_ticket: 0,
        }
    }
}

impl<T> Default for PriorityFrontier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Debug> Frontier<T> for PriorityFrontier<T> {
    fn push(&mut self, item: T, priority: HeuristicValue) {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.items.insert(ticket, item);
        self.queue.push(ticket, Reverse((priority, ticket)));
    }

    fn pop(&mut self) -> Option<T> {
        let (ticket, _) = self.queue.pop()?;
        self.items.remove(&ticket)
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordered_float::OrderedFloat;

    fn drain<T, F: Frontier<T>>(frontier: &mut F) -> Vec<T> {
        let mut out = vec![];
        while let Some(item) = frontier.pop() {
            out.push(item);
        }
        out
    }

    #[test]
    fn stack_is_lifo() {
        let mut stack = Stack::new();
        for i in 0..4 {
            stack.push(i, OrderedFloat(0.));
        }
        assert_eq!(stack.len(), 4);
        assert_eq!(drain(&mut stack), vec![3, 2, 1, 0]);
        assert!(stack.is_empty());
    }

    #[test]
    fn queue_is_fifo() {
        let mut queue = Queue::new();
        for i in 0..4 {
            queue.push(i, OrderedFloat(10. - i as f64));
        }
        assert_eq!(drain(&mut queue), vec![0, 1, 2, 3]);
    }

    #[test]
    fn priority_frontier_pops_lowest_first() {
        let mut frontier = PriorityFrontier::new();
        frontier.push("c", OrderedFloat(3.));
        frontier.push("a", OrderedFloat(1.));
        frontier.push("b", OrderedFloat(2.));
        assert_eq!(drain(&mut frontier), vec!["a", "b", "c"]);
    }

    #[test]
    fn priority_frontier_breaks_ties_by_insertion() {
        let mut frontier = PriorityFrontier::new();
        frontier.push("first", OrderedFloat(1.));
        frontier.push("cheap", OrderedFloat(0.5));
        frontier.push("second", OrderedFloat(1.));
        frontier.push("third", OrderedFloat(1.));
        assert_eq!(
            drain(&mut frontier),
            vec!["cheap", "first", "second", "third"]
        );
    }

    #[test]
    fn priority_frontier_keeps_duplicates() {
        let mut frontier = PriorityFrontier::new();
        frontier.push('x', OrderedFloat(2.));
        frontier.push('x', OrderedFloat(1.));
        assert_eq!(frontier.len(), 2);
        assert_eq!(drain(&mut frontier), vec!['x', 'x']);
    }
}
