#![doc = include_str!("../README.md")]
#![no_std]
#![cfg_attr(feature = "allocator_api", feature(allocator_api))]

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;
use core::num::NonZeroUsize;

pub use allocator_api2::alloc::Allocator;
pub use allocator_api2::alloc::Global;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// SUBMODULES                                                                 //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

mod cycle;
mod edit;
mod merge;
mod query;
mod reverse;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// PUBLIC TYPE AND TRAIT DEFINITIONS                                          //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

/// The error returned when node storage cannot be allocated.

#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("failed to allocate node storage")]
pub struct AllocError;

/// The ways a list operation can fail.
///
/// A failed operation leaves every list it was given exactly as it was.

#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
  /// The operation needs a terminating chain, but following `next` from the
  /// head loops back onto an earlier node.
  #[error("list contains a cycle")]
  Cyclic,

  /// A positional query asked for an element the list does not have.
  #[error("index {index} is out of bounds for a list of length {len}")]
  OutOfBounds {
    /// The requested position.
    index: usize,
    /// The length of the list.
    len: usize,
  },

  /// The operation is only defined for non-empty lists.
  #[error("list is empty")]
  Empty,

  /// The searched-for value does not occur in the list.
  #[error("value is not in the list")]
  NotFound,
}

/// Result type for list operations.

pub type Result<T> = core::result::Result<T, Error>;

/// A handle to one node of a [`Pool`].
///
/// Handles are plain data. A handle is only meaningful for the pool that
/// created it, and only until that pool is [cleared](Pool::clear).

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(NonZeroUsize);

/// A singly linked list, named by the handle of its first node.
///
/// The nodes themselves live in a [`Pool`]. A `List` is deliberately not
/// `Clone`: operations that re-link nodes take `&mut List` and leave behind
/// an empty handle when they consume their input.

#[derive(Debug, Default)]
pub struct List {
  head: Option<NodeId>,
}

/// An arena owning the nodes of any number of lists.
///
/// Nodes are only ever appended. Unlinking a node from a list does not free
/// it; all storage is released together when the pool is dropped or
/// [cleared](Self::clear).
///
/// ```
/// use oxlist::Pool;
///
/// let mut pool = Pool::new();
/// let list = pool.from_values([10, 20, 30]);
/// assert_eq!(pool.to_vec(&list).unwrap(), [10, 20, 30]);
/// assert_eq!(pool.len(), 3);
/// ```

pub struct Pool<T, A: Allocator = Global> {
  slots: allocator_api2::vec::Vec<Node<T>, A>,
}

/// An iterator over the node handles of a list.
///
/// Created by [`Pool::nodes`].

pub struct Nodes<'a, T, A: Allocator = Global> {
  pool: &'a Pool<T, A>,
  cursor: Option<NodeId>,
}

/// An iterator over the values of a list, in link order.
///
/// Created by [`Pool::values`]. Cloning the iterator restarts the walk from
/// the cloned position.

pub struct Values<'a, T, A: Allocator = Global>(Nodes<'a, T, A>);

/// A [`Debug`](fmt::Debug) view of a chain.
///
/// Created by [`Pool::display`].

pub struct Chain<'a, T, A: Allocator = Global> {
  pool: &'a Pool<T, A>,
  head: Option<NodeId>,
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// PRIVATE TYPE AND TRAIT DEFINITIONS                                         //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

struct Node<T> {
  value: T,
  next: Option<NodeId>,
}

// The head and tail of a chain under construction.

#[derive(Clone, Copy, Default)]
struct Builder {
  head: Option<NodeId>,
  tail: Option<NodeId>,
}

enum Panicked { }

trait Fail: Sized {
  fn fail<T>(nodes: usize) -> core::result::Result<T, Self>;
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// CONSTANTS                                                                  //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

const DEFAULT_CAPACITY: usize = 1 << 4; // 16 nodes

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// UTILITY FUNCTIONS                                                          //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

#[inline(always)]
fn unwrap<T>(x: core::result::Result<T, Panicked>) -> T {
  match x { Ok(x) => x, Err(e) => match e { } }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Fail                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl Fail for Panicked {
  #[inline(never)]
  #[cold]
  fn fail<T>(nodes: usize) -> core::result::Result<T, Self> {
    panic!("oxlist: failed to reserve storage for {} more nodes!", nodes)
  }
}

impl Fail for AllocError {
  #[inline(never)]
  #[cold]
  fn fail<T>(nodes: usize) -> core::result::Result<T, Self> {
    tracing::warn!(nodes, "failed to reserve node storage");
    Err(AllocError)
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// NodeId                                                                     //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl NodeId {
  #[inline(always)]
  fn from_index(index: usize) -> Self {
    // The pool never holds more than `isize::MAX` nodes, so this does not
    // saturate.

    Self(NonZeroUsize::MIN.saturating_add(index))
  }

  #[inline(always)]
  fn index(self) -> usize {
    self.0.get() - 1
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// List                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl List {
  /// The empty list.

  pub const fn new() -> Self {
    Self { head: None }
  }

  /// A list starting at the given node.
  ///
  /// Two lists built this way may share nodes. That is how intersecting
  /// lists are set up; every other constructor produces disjoint chains.

  pub const fn from_head(head: Option<NodeId>) -> Self {
    Self { head }
  }

  /// The handle of the first node, if any.

  pub const fn head(&self) -> Option<NodeId> {
    self.head
  }

  /// Whether the list has no nodes.

  pub const fn is_empty(&self) -> bool {
    self.head.is_none()
  }

  /// Takes the chain out of this handle, leaving it empty.

  pub fn take(&mut self) -> List {
    List { head: self.head.take() }
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Pool                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

fn pool<T, A, E>(capacity: usize, allocator: A) -> core::result::Result<Pool<T, A>, E>
where
  A: Allocator,
  E: Fail,
{
  let mut slots = allocator_api2::vec::Vec::new_in(allocator);

  if slots.try_reserve(capacity).is_err() {
    return E::fail(capacity);
  }

  Ok(Pool { slots })
}

fn alloc<T, A, E>(pool: &mut Pool<T, A>, value: T, next: Option<NodeId>) -> core::result::Result<NodeId, E>
where
  A: Allocator,
  E: Fail,
{
  if pool.slots.len() == pool.slots.capacity() && pool.slots.try_reserve(1).is_err() {
    return E::fail(1);
  }

  let id = NodeId::from_index(pool.slots.len());
  pool.slots.push(Node { value, next });
  Ok(id)
}

fn from_values<T, A, E, I>(pool: &mut Pool<T, A>, values: I) -> core::result::Result<List, E>
where
  A: Allocator,
  E: Fail,
  I: IntoIterator<Item = T>,
{
  let mut chain = Builder::default();

  for value in values {
    let id = alloc(pool, value, None)?;
    pool.append(&mut chain, id);
  }

  Ok(List { head: chain.head })
}

impl<T> Pool<T, Global> {
  /// Creates a pool with room for a few nodes, backed by the global
  /// allocator.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory.

  pub fn new() -> Self {
    unwrap(pool(DEFAULT_CAPACITY, Global))
  }

  /// Creates a pool with room for a few nodes, backed by the global
  /// allocator.
  ///
  /// # Errors
  ///
  /// An error is returned on failure to allocate memory.

  pub fn try_new() -> core::result::Result<Self, AllocError> {
    pool(DEFAULT_CAPACITY, Global)
  }

  /// Creates a pool with room for `capacity` nodes, backed by the global
  /// allocator.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory.

  pub fn with_capacity(capacity: usize) -> Self {
    unwrap(pool(capacity, Global))
  }

  /// Creates a pool with room for `capacity` nodes, backed by the global
  /// allocator.
  ///
  /// # Errors
  ///
  /// An error is returned on failure to allocate memory.

  pub fn try_with_capacity(capacity: usize) -> core::result::Result<Self, AllocError> {
    pool(capacity, Global)
  }
}

impl<T> Default for Pool<T, Global> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T, A: Allocator> Pool<T, A> {
  /// Creates a pool with room for a few nodes in the given allocator.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory.

  pub fn new_in(allocator: A) -> Self {
    unwrap(pool(DEFAULT_CAPACITY, allocator))
  }

  /// Creates a pool with room for a few nodes in the given allocator.
  ///
  /// # Errors
  ///
  /// An error is returned on failure to allocate memory.

  pub fn try_new_in(allocator: A) -> core::result::Result<Self, AllocError> {
    pool(DEFAULT_CAPACITY, allocator)
  }

  /// Creates a pool with room for `capacity` nodes in the given allocator.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory.

  pub fn with_capacity_in(capacity: usize, allocator: A) -> Self {
    unwrap(pool(capacity, allocator))
  }

  /// Creates a pool with room for `capacity` nodes in the given allocator.
  ///
  /// # Errors
  ///
  /// An error is returned on failure to allocate memory.

  pub fn try_with_capacity_in(capacity: usize, allocator: A) -> core::result::Result<Self, AllocError> {
    pool(capacity, allocator)
  }

  /// A reference to the parent allocator.

  pub fn allocator(&self) -> &A {
    self.slots.allocator()
  }

  /// The number of nodes allocated so far, linked or not.

  pub fn len(&self) -> usize {
    self.slots.len()
  }

  /// Whether no node has been allocated since creation or the last
  /// [`clear`](Self::clear).

  pub fn is_empty(&self) -> bool {
    self.slots.is_empty()
  }

  /// The number of nodes the pool can hold without growing.

  pub fn capacity(&self) -> usize {
    self.slots.capacity()
  }

  /// Drops every node, keeping the storage for reuse.
  ///
  /// Every `NodeId` and `List` obtained from this pool becomes invalid.

  pub fn clear(&mut self) {
    tracing::trace!(nodes = self.slots.len(), "clearing pool");
    self.slots.clear();
  }

  /// Allocates a node holding `value`, whose successor is `next`.
  ///
  /// The new node is not reachable from any list until something links to
  /// it.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory.

  pub fn alloc(&mut self, value: T, next: Option<NodeId>) -> NodeId {
    unwrap(alloc(self, value, next))
  }

  /// Allocates a node holding `value`, whose successor is `next`.
  ///
  /// # Errors
  ///
  /// An error is returned on failure to allocate memory.

  pub fn try_alloc(&mut self, value: T, next: Option<NodeId>) -> core::result::Result<NodeId, AllocError> {
    alloc(self, value, next)
  }

  /// The value stored in a node.
  ///
  /// # Panics
  ///
  /// Panics if `id` does not belong to this pool.

  pub fn value(&self, id: NodeId) -> &T {
    &self.slots[id.index()].value
  }

  /// The value stored in a node, mutably.
  ///
  /// # Panics
  ///
  /// Panics if `id` does not belong to this pool.

  pub fn value_mut(&mut self, id: NodeId) -> &mut T {
    &mut self.slots[id.index()].value
  }

  /// The value stored in a node, or `None` if `id` is out of range.

  pub fn get(&self, id: NodeId) -> Option<&T> {
    self.slots.get(id.index()).map(|node| &node.value)
  }

  /// The successor of a node.
  ///
  /// # Panics
  ///
  /// Panics if `id` does not belong to this pool.

  pub fn next(&self, id: NodeId) -> Option<NodeId> {
    self.slots[id.index()].next
  }

  /// Re-points the successor of a node.
  ///
  /// This is the only way to make a node reachable from more than one
  /// predecessor, which is how cycles and shared tails are built.
  ///
  /// # Panics
  ///
  /// Panics if `id` does not belong to this pool.

  pub fn set_next(&mut self, id: NodeId, next: Option<NodeId>) {
    self.slots[id.index()].next = next;
  }

  /// Builds a list holding `values` in order.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory.

  pub fn from_values<I>(&mut self, values: I) -> List
  where
    I: IntoIterator<Item = T>
  {
    unwrap(from_values(self, values))
  }

  /// Builds a list holding `values` in order.
  ///
  /// # Errors
  ///
  /// An error is returned on failure to allocate memory. Nodes allocated
  /// before the failure stay in the pool, unreachable.

  pub fn try_from_values<I>(&mut self, values: I) -> core::result::Result<List, AllocError>
  where
    I: IntoIterator<Item = T>
  {
    from_values(self, values)
  }

  /// Prepends `value` to the list in O(1).
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory.

  pub fn push_front(&mut self, list: &mut List, value: T) -> NodeId {
    let id = self.alloc(value, list.head);
    list.head = Some(id);
    id
  }

  /// Iterates over the node handles of an acyclic list.
  ///
  /// # Errors
  ///
  /// [`Error::Cyclic`] if the list contains a cycle.

  pub fn nodes(&self, list: &List) -> Result<Nodes<'_, T, A>> {
    self.acyclic(list.head)?;
    Ok(Nodes { pool: self, cursor: list.head })
  }

  /// Iterates over the values of an acyclic list, in link order.
  ///
  /// # Errors
  ///
  /// [`Error::Cyclic`] if the list contains a cycle.

  pub fn values(&self, list: &List) -> Result<Values<'_, T, A>> {
    Ok(Values(self.nodes(list)?))
  }

  /// Copies the values of an acyclic list into a `Vec`.
  ///
  /// # Errors
  ///
  /// [`Error::Cyclic`] if the list contains a cycle.

  pub fn to_vec(&self, list: &List) -> Result<Vec<T>>
  where
    T: Clone
  {
    Ok(self.values(list)?.cloned().collect())
  }

  /// The number of nodes in an acyclic list.
  ///
  /// # Errors
  ///
  /// [`Error::Cyclic`] if the list contains a cycle.

  pub fn length(&self, list: &List) -> Result<usize> {
    self.acyclic(list.head)?;
    Ok(self.count(list.head))
  }

  /// The last node of an acyclic list, or `None` if it is empty.
  ///
  /// # Errors
  ///
  /// [`Error::Cyclic`] if the list contains a cycle.

  pub fn tail(&self, list: &List) -> Result<Option<NodeId>> {
    Ok(self.nodes(list)?.last())
  }

  /// The node at position `index` from the front.
  ///
  /// # Errors
  ///
  /// [`Error::Cyclic`] if the list contains a cycle, and
  /// [`Error::OutOfBounds`] if `index >= length`.

  pub fn node_at(&self, list: &List, index: usize) -> Result<NodeId> {
    let mut nodes = self.nodes(list)?;

    match nodes.nth(index) {
      Some(id) => Ok(id),
      None => Err(Error::OutOfBounds { index, len: self.count(list.head) }),
    }
  }

  /// A [`Debug`](fmt::Debug) view of the chain, printed as nested nodes.
  ///
  /// ```
  /// use oxlist::Pool;
  ///
  /// let mut pool = Pool::new();
  /// let list = pool.from_values(["ham", "spam"]);
  /// assert_eq!(format!("{:?}", pool.display(&list)), r#"Node("ham", Node("spam"))"#);
  /// ```
  ///
  /// Cyclic chains are printed up to the point where they loop, which is
  /// marked `..`.

  pub fn display(&self, list: &List) -> Chain<'_, T, A> {
    Chain { pool: self, head: list.head }
  }

  pub(crate) fn acyclic(&self, head: Option<NodeId>) -> Result<()> {
    match self.meeting_point(head) {
      None => Ok(()),
      Some(meet) => {
        tracing::debug!(?head, ?meet, "rejecting cyclic list");
        Err(Error::Cyclic)
      }
    }
  }

  // Only for chains already known to terminate.

  pub(crate) fn count(&self, head: Option<NodeId>) -> usize {
    let mut n = 0;
    let mut cursor = head;

    while let Some(id) = cursor {
      n = n + 1;
      cursor = self.next(id);
    }

    n
  }

  // Links `id` after the end of the chain and makes it the new tail. The
  // successor of `id` is left alone; callers terminate the chain.

  pub(crate) fn append(&mut self, chain: &mut Builder, id: NodeId) {
    match chain.tail {
      None => chain.head = Some(id),
      Some(tail) => self.set_next(tail, Some(id)),
    }

    chain.tail = Some(id);
  }

  pub(crate) fn finish(&mut self, chain: Builder) -> Option<NodeId> {
    if let Some(tail) = chain.tail {
      self.set_next(tail, None);
    }

    chain.head
  }
}

impl<T, A: Allocator> fmt::Debug for Pool<T, A> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Pool")
      .field("len", &self.slots.len())
      .field("capacity", &self.slots.capacity())
      .finish()
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Iterators                                                                  //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl<'a, T, A: Allocator> Iterator for Nodes<'a, T, A> {
  type Item = NodeId;

  #[inline(always)]
  fn next(&mut self) -> Option<NodeId> {
    let id = self.cursor?;
    self.cursor = self.pool.next(id);
    Some(id)
  }
}

impl<'a, T, A: Allocator> FusedIterator for Nodes<'a, T, A> { }

impl<'a, T, A: Allocator> Clone for Nodes<'a, T, A> {
  fn clone(&self) -> Self {
    Self { pool: self.pool, cursor: self.cursor }
  }
}

impl<'a, T, A: Allocator> Iterator for Values<'a, T, A> {
  type Item = &'a T;

  #[inline(always)]
  fn next(&mut self) -> Option<&'a T> {
    let pool = self.0.pool;
    let id = self.0.next()?;
    Some(pool.value(id))
  }
}

impl<'a, T, A: Allocator> FusedIterator for Values<'a, T, A> { }

impl<'a, T, A: Allocator> Clone for Values<'a, T, A> {
  fn clone(&self) -> Self {
    Self(self.0.clone())
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Chain                                                                      //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl<'a, T: fmt::Debug, A: Allocator> fmt::Debug for Chain<'a, T, A> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.head.is_none() {
      return f.write_str("None");
    }

    // Iterative on purpose; nesting `Node(..)` by recursion would overflow
    // the stack on long chains.

    let entry = self.pool.entry(self.head);
    let mut entered = false;
    let mut depth = 0;
    let mut cursor = self.head;

    while let Some(id) = cursor {
      if depth > 0 {
        f.write_str(", ")?;
      }

      if Some(id) == entry {
        if entered {
          f.write_str("..")?;
          break;
        }
        entered = true;
      }

      write!(f, "Node({:?}", self.pool.value(id))?;
      depth = depth + 1;
      cursor = self.pool.next(id);
    }

    for _ in 0 .. depth {
      f.write_str(")")?;
    }

    Ok(())
  }
}
