use crate::Allocator;
use crate::List;
use crate::NodeId;
use crate::Pool;
use crate::Result;

impl<T, A: Allocator> Pool<T, A> {
  /// Reverses the list in place by re-pointing every successor at its
  /// predecessor.
  ///
  /// One walk, O(1) extra storage. Any other handle into the chain now sees
  /// the reversed links.
  ///
  /// ```
  /// use oxlist::Pool;
  ///
  /// let mut pool = Pool::new();
  /// let mut list = pool.from_values([1, 2, 3]);
  /// pool.reverse(&mut list).unwrap();
  /// assert_eq!(pool.to_vec(&list).unwrap(), [3, 2, 1]);
  /// ```
  ///
  /// # Errors
  ///
  /// [`Error::Cyclic`](crate::Error::Cyclic) if the list contains a cycle, in
  /// which case no link is changed.

  pub fn reverse(&mut self, list: &mut List) -> Result<()> {
    self.acyclic(list.head)?;

    let mut prev = None;
    let mut cursor = list.head;

    while let Some(id) = cursor {
      cursor = self.next(id);
      self.set_next(id, prev);
      prev = Some(id);
    }

    list.head = prev;
    Ok(())
  }

  /// A reversed copy of the list, in fresh nodes. The input is untouched.
  ///
  /// # Errors
  ///
  /// [`Error::Cyclic`](crate::Error::Cyclic) if the list contains a cycle.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory.

  pub fn reversed(&mut self, list: &List) -> Result<List>
  where
    T: Clone
  {
    self.acyclic(list.head)?;

    let mut head = None;
    let mut cursor = list.head;

    while let Some(id) = cursor {
      let value = self.value(id).clone();
      cursor = self.next(id);
      head = Some(self.alloc(value, head));
    }

    Ok(List { head })
  }

  /// Reverses the list in place, recursively.
  ///
  /// Produces the same order as [`reverse`](Self::reverse). The recursion is
  /// as deep as the list is long, so a long enough list overflows the call
  /// stack; use `reverse` when the length is not known to be small.
  ///
  /// # Errors
  ///
  /// [`Error::Cyclic`](crate::Error::Cyclic) if the list contains a cycle, in
  /// which case no link is changed.

  pub fn reverse_recursive(&mut self, list: &mut List) -> Result<()> {
    self.acyclic(list.head)?;

    if let Some(head) = list.head {
      list.head = Some(self.reverse_from(head));
    }

    Ok(())
  }

  // Reverses the chain starting at `id` and returns its new head, the old
  // tail. `id` ends up last.

  fn reverse_from(&mut self, id: NodeId) -> NodeId {
    let Some(next) = self.next(id) else {
      return id;
    };

    let head = self.reverse_from(next);
    self.set_next(next, Some(id));
    self.set_next(id, None);
    head
  }
}
