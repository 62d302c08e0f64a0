use crate::Allocator;
use crate::Builder;
use crate::Error;
use crate::List;
use crate::NodeId;
use crate::Pool;
use crate::Result;

impl<T, A: Allocator> Pool<T, A> {
  /// Removes consecutive duplicates, keeping the first of each run.
  ///
  /// Only adjacent duplicates are removed; a value that reappears after a
  /// different one is kept.
  ///
  /// ```
  /// use oxlist::Pool;
  ///
  /// let mut pool = Pool::new();
  /// let mut list = pool.from_values([1, 1, 2, 2, 2, 3, 1]);
  /// pool.dedup(&mut list, |x, y| x == y).unwrap();
  /// assert_eq!(pool.to_vec(&list).unwrap(), [1, 2, 3, 1]);
  /// ```
  ///
  /// The removed nodes stay allocated in the pool.
  ///
  /// # Errors
  ///
  /// [`Error::Cyclic`] if the list contains a cycle, in which case no link
  /// is changed.

  pub fn dedup<F>(&mut self, list: &mut List, eq: F) -> Result<()>
  where
    F: FnMut(&T, &T) -> bool
  {
    self.acyclic(list.head)?;

    let mut eq = eq;
    let mut cursor = list.head;

    while let Some(id) = cursor {
      let Some(next) = self.next(id) else { break };

      if eq(self.value(id), self.value(next)) {
        self.set_next(id, self.next(next));
      } else {
        cursor = Some(next);
      }
    }

    Ok(())
  }

  /// Splits the list into the values satisfying `pred` and the rest, both in
  /// their original relative order. The nodes are re-linked, and `list` is
  /// left empty.
  ///
  /// # Errors
  ///
  /// [`Error::Cyclic`] if the list contains a cycle, in which case no link
  /// is changed.

  pub fn partition<F>(&mut self, list: &mut List, pred: F) -> Result<(List, List)>
  where
    F: FnMut(&T) -> bool
  {
    self.acyclic(list.head)?;

    let mut pred = pred;
    let mut yes = Builder::default();
    let mut no = Builder::default();
    let mut cursor = list.head.take();

    while let Some(id) = cursor {
      cursor = self.next(id);

      if pred(self.value(id)) {
        self.append(&mut yes, id);
      } else {
        self.append(&mut no, id);
      }
    }

    let yes = self.finish(yes);
    let no = self.finish(no);

    tracing::trace!(?yes, ?no, "partitioned list");
    Ok((List { head: yes }, List { head: no }))
  }

  /// Unlinks the first node holding a minimal value under `less`, and
  /// returns its handle.
  ///
  /// # Errors
  ///
  /// [`Error::Empty`] if the list is empty, and [`Error::Cyclic`] if it
  /// contains a cycle.

  pub fn remove_min_by<F>(&mut self, list: &mut List, less: F) -> Result<NodeId>
  where
    F: FnMut(&T, &T) -> bool
  {
    let Some(head) = list.head else {
      return Err(Error::Empty);
    };

    self.acyclic(list.head)?;

    // `prev` is the predecessor of the best node so far, `None` while the
    // best node is the head. Only strictly smaller values replace it.

    let mut less = less;
    let mut best = head;
    let mut prev = None;
    let mut pre = head;

    while let Some(id) = self.next(pre) {
      if less(self.value(id), self.value(best)) {
        best = id;
        prev = Some(pre);
      }
      pre = id;
    }

    match prev {
      None => list.head = self.next(best),
      Some(p) => self.set_next(p, self.next(best)),
    }

    self.set_next(best, None);
    Ok(best)
  }

  /// Unlinks the first node whose key is minimal, and returns its handle.
  ///
  /// ```
  /// use oxlist::Pool;
  ///
  /// let mut pool = Pool::new();
  /// let mut list = pool.from_values(["foo", "bar", "baz", "quux", "foobar"]);
  /// let _ = pool.remove_min(&mut list).unwrap();
  /// assert_eq!(pool.to_vec(&list).unwrap(), ["foo", "baz", "quux", "foobar"]);
  /// let _ = pool.remove_min_by_key(&mut list, |s| s.len()).unwrap();
  /// assert_eq!(pool.to_vec(&list).unwrap(), ["baz", "quux", "foobar"]);
  /// ```
  ///
  /// # Errors
  ///
  /// [`Error::Empty`] if the list is empty, and [`Error::Cyclic`] if it
  /// contains a cycle.

  pub fn remove_min_by_key<K, F>(&mut self, list: &mut List, key: F) -> Result<NodeId>
  where
    K: Ord,
    F: FnMut(&T) -> K
  {
    let mut key = key;
    self.remove_min_by(list, |x, y| key(x) < key(y))
  }

  /// Unlinks the first node holding the minimum value, and returns its
  /// handle.
  ///
  /// # Errors
  ///
  /// [`Error::Empty`] if the list is empty, and [`Error::Cyclic`] if it
  /// contains a cycle.

  pub fn remove_min(&mut self, list: &mut List) -> Result<NodeId>
  where
    T: Ord
  {
    self.remove_min_by(list, |x, y| x < y)
  }
}
