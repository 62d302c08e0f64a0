use crate::Allocator;
use crate::Builder;
use crate::List;
use crate::NodeId;
use crate::Pool;
use crate::Result;

impl<T, A: Allocator> Pool<T, A> {
  /// Merges two sorted lists by re-linking their nodes. No node is
  /// allocated.
  ///
  /// Both inputs must be non-decreasing under `less` and must not share
  /// nodes. The result is non-decreasing and stable: an element of `a` comes
  /// before an equal element of `b`. On success `a` and `b` are left empty.
  ///
  /// ```
  /// use oxlist::Pool;
  ///
  /// let mut pool = Pool::new();
  /// let mut a = pool.from_values([1, 3, 5]);
  /// let mut b = pool.from_values([2, 4, 6]);
  /// let c = pool.merge(&mut a, &mut b, |x, y| x < y).unwrap();
  /// assert_eq!(pool.to_vec(&c).unwrap(), [1, 2, 3, 4, 5, 6]);
  /// assert!(a.is_empty() && b.is_empty());
  /// ```
  ///
  /// # Errors
  ///
  /// [`Error::Cyclic`](crate::Error::Cyclic) if either list contains a
  /// cycle, in which case neither is changed.

  pub fn merge<F>(&mut self, a: &mut List, b: &mut List, less: F) -> Result<List>
  where
    F: FnMut(&T, &T) -> bool
  {
    self.acyclic(a.head)?;
    self.acyclic(b.head)?;

    let mut less = less;
    let head = self.merge_runs(a.head.take(), b.head.take(), &mut less);

    tracing::trace!(?head, "merged lists");
    Ok(List { head })
  }

  /// Merges two sorted lists into fresh nodes. The inputs are untouched.
  ///
  /// Ordering and stability are as for [`merge`](Self::merge).
  ///
  /// # Errors
  ///
  /// [`Error::Cyclic`](crate::Error::Cyclic) if either list contains a
  /// cycle.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory.

  pub fn merged<F>(&mut self, a: &List, b: &List, less: F) -> Result<List>
  where
    T: Clone,
    F: FnMut(&T, &T) -> bool
  {
    self.acyclic(a.head)?;
    self.acyclic(b.head)?;

    let mut less = less;
    let mut chain = Builder::default();
    let mut x = a.head;
    let mut y = b.head;

    loop {
      let take =
        match (x, y) {
          (Some(i), Some(j)) =>
            if less(self.value(j), self.value(i)) {
              y = self.next(j);
              j
            } else {
              x = self.next(i);
              i
            },
          (Some(i), None) => { x = self.next(i); i }
          (None, Some(j)) => { y = self.next(j); j }
          (None, None) => break,
        };

      let value = self.value(take).clone();
      let id = self.alloc(value, None);
      self.append(&mut chain, id);
    }

    Ok(List { head: chain.head })
  }

  /// Sorts the list by re-linking its nodes, using a stable merge sort.
  ///
  /// # Errors
  ///
  /// [`Error::Cyclic`](crate::Error::Cyclic) if the list contains a cycle, in
  /// which case no link is changed.

  pub fn sort_by<F>(&mut self, list: &mut List, less: F) -> Result<()>
  where
    F: FnMut(&T, &T) -> bool
  {
    self.acyclic(list.head)?;

    let mut less = less;
    list.head = self.sort_run(list.head, &mut less);
    Ok(())
  }

  /// Sorts the list in ascending order, using a stable merge sort.
  ///
  /// # Errors
  ///
  /// [`Error::Cyclic`](crate::Error::Cyclic) if the list contains a cycle.

  pub fn sort(&mut self, list: &mut List) -> Result<()>
  where
    T: Ord
  {
    self.sort_by(list, |x, y| x < y)
  }

  fn merge_runs<F>(&mut self, x: Option<NodeId>, y: Option<NodeId>, less: &mut F) -> Option<NodeId>
  where
    F: FnMut(&T, &T) -> bool
  {
    let mut chain = Builder::default();
    let mut x = x;
    let mut y = y;

    while let (Some(i), Some(j)) = (x, y) {
      // Ties go to `x`.

      if less(self.value(j), self.value(i)) {
        y = self.next(j);
        self.append(&mut chain, j);
      } else {
        x = self.next(i);
        self.append(&mut chain, i);
      }
    }

    // The leftover run is already terminated.

    match (chain.tail, x.or(y)) {
      (None, rest) => rest,
      (Some(tail), rest) => {
        self.set_next(tail, rest);
        chain.head
      }
    }
  }

  // Recursion depth is logarithmic in the run length.

  fn sort_run<F>(&mut self, head: Option<NodeId>, less: &mut F) -> Option<NodeId>
  where
    F: FnMut(&T, &T) -> bool
  {
    let first = head?;
    let Some(mut fast) = self.next(first) else {
      return Some(first);
    };
    let mut slow = first;

    // Leaves `slow` on the last node of the first half. The second half gets
    // the extra node when the length is odd.

    while let Some(next) = self.next(fast) {
      let Some(after) = self.next(next) else {
        break;
      };
      let Some(s) = self.next(slow) else {
        break;
      };
      slow = s;
      fast = after;
    }

    let second = self.next(slow);
    self.set_next(slow, None);

    let left = self.sort_run(Some(first), less);
    let right = self.sort_run(second, less);
    self.merge_runs(left, right, less)
  }
}
