//! Floyd's tortoise-and-hare cycle detection, and the queries built on it.
//!
//! Everything here terminates on cyclic chains. The other modules use
//! `Pool::acyclic` to reject cycles before walking a chain to its end.

use crate::Allocator;
use crate::List;
use crate::NodeId;
use crate::Pool;
use crate::Result;

impl<T, A: Allocator> Pool<T, A> {
  /// Whether following `next` from the head ever revisits a node.
  ///
  /// Runs in O(n) time with O(1) extra storage, on any input.
  ///
  /// ```
  /// use oxlist::Pool;
  ///
  /// let mut pool = Pool::new();
  /// let list = pool.from_values([1, 2, 3]);
  /// assert!(! pool.has_cycle(&list));
  ///
  /// let tail = pool.tail(&list).unwrap().unwrap();
  /// pool.set_next(tail, list.head());
  /// assert!(pool.has_cycle(&list));
  /// ```

  pub fn has_cycle(&self, list: &List) -> bool {
    self.meeting_point(list.head).is_some()
  }

  /// The node where the cycle begins: the first node reached twice when
  /// walking from the head. `None` if the list is acyclic.

  pub fn cycle_start(&self, list: &List) -> Option<NodeId> {
    self.entry(list.head)
  }

  /// The number of nodes on the cycle, or `None` if the list is acyclic.

  pub fn cycle_length(&self, list: &List) -> Option<usize> {
    let meet = self.meeting_point(list.head)?;
    let mut n = 1;
    let mut cursor = self.next(meet)?;

    while cursor != meet {
      n = n + 1;
      cursor = self.next(cursor)?;
    }

    Some(n)
  }

  /// The number of distinct nodes reachable from the head.
  ///
  /// Unlike [`length`](Self::length) this is defined for cyclic lists, where
  /// it counts the nodes leading up to the cycle plus the nodes on it.

  pub fn reachable(&self, list: &List) -> usize {
    let Some(entry) = self.entry(list.head) else {
      return self.count(list.head);
    };

    let mut lead = 0;
    let mut cursor = list.head;

    while let Some(id) = cursor {
      if id == entry {
        break;
      }
      lead = lead + 1;
      cursor = self.next(id);
    }

    lead + self.cycle_length(list).unwrap_or(0)
  }

  /// The first node shared by two acyclic lists, or `None` if their chains
  /// are disjoint.
  ///
  /// The tail of `a` is linked back to its head for the duration of the
  /// call, so that the shared node is exactly where `b` enters that cycle.
  /// The link is undone before returning.
  ///
  /// # Errors
  ///
  /// [`Error::Cyclic`](crate::Error::Cyclic) if either list contains a cycle.

  pub fn intersection(&mut self, a: &List, b: &List) -> Result<Option<NodeId>> {
    self.acyclic(a.head)?;
    self.acyclic(b.head)?;

    let Some(tail) = self.tail(a)? else {
      return Ok(None);
    };

    self.set_next(tail, a.head);
    let shared = self.entry(b.head);
    self.set_next(tail, None);

    Ok(shared)
  }

  // A node inside the cycle, where the fast pointer catches up with the slow
  // one, or `None` if the fast pointer runs off the end.

  pub(crate) fn meeting_point(&self, head: Option<NodeId>) -> Option<NodeId> {
    let mut slow = head?;
    let mut fast = slow;

    loop {
      fast = self.next(self.next(fast)?)?;
      slow = self.next(slow)?;

      if slow == fast {
        return Some(slow);
      }
    }
  }

  pub(crate) fn entry(&self, head: Option<NodeId>) -> Option<NodeId> {
    // From the meeting point, the distance to the cycle entry is congruent to
    // the distance from the head to the entry, modulo the cycle length.

    let mut b = self.meeting_point(head)?;
    let mut a = head?;

    while a != b {
      a = self.next(a)?;
      b = self.next(b)?;
    }

    Some(a)
  }
}
