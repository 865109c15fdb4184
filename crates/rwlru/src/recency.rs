//! Recency order of cached keys
//!
//! Doubly-linked list stored in a slab of nodes. Indices stay stable while a
//! node is linked, so the store can hold a node index per entry and promote or
//! unlink it in O(1). Freed slots are recycled through a free list.

/// Node in the recency list
struct Node<K> {
    key: K,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Keys ordered from most recently used (head) to least recently used (tail)
pub(crate) struct RecencyList<K> {
    nodes: Vec<Option<Node<K>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    len: usize,
}

impl<K> RecencyList<K> {
    /// Create an empty list with room for `capacity` nodes
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Link a new key at the head and return its node index
    pub(crate) fn push_front(&mut self, key: K) -> usize {
        let idx = self.alloc_node();
        self.nodes[idx] = Some(Node {
            key,
            prev: None,
            next: self.head,
        });

        if let Some(head_idx) = self.head {
            if let Some(head) = &mut self.nodes[head_idx] {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
        self.len += 1;

        idx
    }

    /// Move a linked node to the head
    pub(crate) fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) || self.nodes.get(idx).map_or(true, Option::is_none) {
            return;
        }

        self.unlink(idx);

        if let Some(node) = &mut self.nodes[idx] {
            node.prev = None;
            node.next = self.head;
        }

        if let Some(head_idx) = self.head {
            if let Some(head) = &mut self.nodes[head_idx] {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
    }

    /// Unlink the tail node and hand back its key
    pub(crate) fn pop_back(&mut self) -> Option<K> {
        let tail_idx = self.tail?;
        self.remove(tail_idx)
    }

    /// Unlink a node by index and hand back its key
    pub(crate) fn remove(&mut self, idx: usize) -> Option<K> {
        if self.nodes.get(idx).map_or(true, Option::is_none) {
            return None;
        }

        self.unlink(idx);
        let node = self.nodes[idx].take()?;
        self.free_list.push(idx);
        self.len -= 1;

        Some(node.key)
    }

    /// Key at the tail, the next eviction victim
    #[cfg(test)]
    pub(crate) fn back(&self) -> Option<&K> {
        self.tail
            .and_then(|idx| self.nodes[idx].as_ref())
            .map(|node| &node.key)
    }

    /// Iterate keys from head to tail
    pub(crate) fn iter(&self) -> Iter<'_, K> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = if let Some(node) = &self.nodes[idx] {
            (node.prev, node.next)
        } else {
            return;
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.nodes[prev_idx] {
                    prev_node.next = next;
                }
            }
            None => {
                self.head = next;
            }
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.nodes[next_idx] {
                    next_node.prev = prev;
                }
            }
            None => {
                self.tail = prev;
            }
        }
    }

    fn alloc_node(&mut self) -> usize {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.nodes.len();
            self.nodes.push(None);
            idx
        }
    }
}

/// Head-to-tail iterator over a [`RecencyList`]
pub(crate) struct Iter<'a, K> {
    list: &'a RecencyList<K>,
    cursor: Option<usize>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let node = self.list.nodes[idx].as_ref()?;
        self.cursor = node.next;
        Some(&node.key)
    }
}
