use crate::Allocator;
use crate::Error;
use crate::List;
use crate::Pool;
use crate::Result;

impl<T, A: Allocator> Pool<T, A> {
  /// The value `k` nodes before the tail; `k = 0` is the last value.
  ///
  /// A lead pointer gets `k` nodes ahead, then both pointers advance
  /// together until the lead reaches the tail.
  ///
  /// ```
  /// use oxlist::{Error, Pool};
  ///
  /// let mut pool = Pool::new();
  /// let list = pool.from_values([1, 2, 3, 4, 5]);
  /// assert_eq!(pool.nth_from_end(&list, 0), Ok(&5));
  /// assert_eq!(pool.nth_from_end(&list, 4), Ok(&1));
  /// assert_eq!(pool.nth_from_end(&list, 5), Err(Error::OutOfBounds { index: 5, len: 5 }));
  /// ```
  ///
  /// # Errors
  ///
  /// [`Error::Cyclic`] if the list contains a cycle, and
  /// [`Error::OutOfBounds`] if `k >= length`.

  pub fn nth_from_end(&self, list: &List, k: usize) -> Result<&T> {
    self.acyclic(list.head)?;

    let mut lead = list.head;
    let mut steps = 0;

    while steps < k {
      let Some(id) = lead else { break };
      lead = self.next(id);
      steps = steps + 1;
    }

    // Either the list ran out early, in which case `steps` is its length, or
    // it has exactly `k` nodes.

    let Some(mut lead) = lead else {
      return Err(Error::OutOfBounds { index: k, len: steps });
    };

    let mut trail = list.head;

    while let Some(next) = self.next(lead) {
      lead = next;
      trail = trail.and_then(|id| self.next(id));
    }

    match trail {
      Some(id) => Ok(self.value(id)),
      None => Err(Error::OutOfBounds { index: k, len: steps }),
    }
  }

  /// The value at position `index` from the front.
  ///
  /// # Errors
  ///
  /// [`Error::Cyclic`] if the list contains a cycle, and
  /// [`Error::OutOfBounds`] if `index >= length`.

  pub fn nth(&self, list: &List, index: usize) -> Result<&T> {
    Ok(self.value(self.node_at(list, index)?))
  }

  /// The middle value. For an even length this is the later of the two
  /// middle values: `[1, 2, 3, 4]` gives `3`.
  ///
  /// The slow pointer advances one node per step and the fast pointer two;
  /// when the fast pointer runs out, the slow one is in the middle.
  ///
  /// # Errors
  ///
  /// [`Error::Empty`] if the list is empty, and [`Error::Cyclic`] if it
  /// contains a cycle.

  pub fn middle(&self, list: &List) -> Result<&T> {
    let Some(head) = list.head else {
      return Err(Error::Empty);
    };

    self.acyclic(list.head)?;

    let mut slow = head;
    let mut fast = Some(head);

    while let Some(f) = fast {
      let Some(next) = self.next(f) else { break };
      let Some(s) = self.next(slow) else { break };
      slow = s;
      fast = self.next(next);
    }

    Ok(self.value(slow))
  }

  /// Whether two lists have the same length and pairwise equal values.
  ///
  /// Stops at the first mismatch.
  ///
  /// # Errors
  ///
  /// [`Error::Cyclic`] if either list contains a cycle.

  pub fn equals<F>(&self, a: &List, b: &List, eq: F) -> Result<bool>
  where
    F: FnMut(&T, &T) -> bool
  {
    let mut eq = eq;
    let mut x = self.values(a)?;
    let mut y = self.values(b)?;

    loop {
      let (u, v) =
        match (x.next(), y.next()) {
          (None, None) => return Ok(true),
          (Some(u), Some(v)) => (u, v),
          _ => return Ok(false),
        };

      if ! eq(u, v) {
        return Ok(false);
      }
    }
  }

  /// The position of the first occurrence of `value`.
  ///
  /// # Errors
  ///
  /// [`Error::NotFound`] if the value does not occur, and [`Error::Cyclic`]
  /// if the list contains a cycle.

  pub fn index_of(&self, list: &List, value: &T) -> Result<usize>
  where
    T: PartialEq
  {
    match self.values(list)?.position(|x| x == value) {
      Some(i) => Ok(i),
      None => Err(Error::NotFound),
    }
  }
}
