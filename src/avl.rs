use std::{collections::VecDeque, mem, ops::Deref};

use rand::Rng;
use tracing::{debug, trace};

use crate::depth::Depth;
use crate::entry::{Entry, Key};
use crate::error::AvlError;

/// Avl manage a single instance of in-memory index over two-dimensional
/// integer keys using a height-balanced [AVL][avl] tree.
///
/// Entries are ordered by their [`Key`], primary coordinate first and
/// secondary coordinate as tie-break. A key pair can be present at most
/// once.
///
/// [avl]: https://en.wikipedia.org/wiki/AVL_tree
#[derive(Clone)]
pub struct Avl<V>
where
    V: Clone,
{
    name: String,
    root: Option<Box<Node<V>>>,
    n_count: usize, // number of entries in the tree.
}

/// Different ways to construct a new Avl instance.
impl<V> Avl<V>
where
    V: Clone,
{
    /// Create an empty instance of Avl, identified by `name`.
    /// Applications can choose unique names.
    pub fn new<S>(name: S) -> Avl<V>
    where
        S: AsRef<str>,
    {
        Avl {
            name: name.as_ref().to_string(),
            root: Default::default(),
            n_count: Default::default(),
        }
    }

    /// Create a new instance of Avl tree and load it with entries
    /// from `iter`. Keys must be unique, the first repeated key pair
    /// fails the load.
    pub fn load_from<S, I>(name: S, iter: I) -> Result<Avl<V>, AvlError>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = Entry<V>>,
    {
        let mut avl = Avl::new(name);
        for entry in iter {
            let key = entry.key();
            if !avl.insert(entry) {
                return Err(AvlError::DuplicateKey(key));
            }
        }
        Ok(avl)
    }
}

/// Maintenance API.
impl<V> Avl<V>
where
    V: Clone,
{
    /// Identify this instance. Applications can choose unique names while
    /// creating Avl instances.
    #[inline]
    pub fn id(&self) -> String {
        self.name.clone()
    }

    /// Return number of entries in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_count
    }

    /// Same as [`Avl::len`].
    #[inline]
    pub fn size(&self) -> usize {
        self.n_count
    }

    /// Check whether this index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the tree, 0 for an empty tree, 1 for a single entry.
    #[inline]
    pub fn height(&self) -> usize {
        height(self.root())
    }

    /// Root node of the tree, for collaborators that want to walk the
    /// node graph, like a visualiser.
    #[inline]
    pub fn root(&self) -> Option<&Node<V>> {
        self.root.as_ref().map(Deref::deref)
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.root = None;
        self.n_count = 0;
    }

    /// Return quickly with basic statisics, only entries() and
    /// node_size() are valid with this statisics.
    pub fn stats(&self) -> Stats {
        Stats::new(self.n_count, mem::size_of::<Node<V>>())
    }
}

type Insert<V> = (Box<Node<V>>, bool);

type Delete<V> = (Option<Box<Node<V>>>, Option<Entry<V>>);

type Delmin<V> = (Option<Box<Node<V>>>, Entry<V>);

/// Write operations on Avl instance.
impl<V> Avl<V>
where
    V: Clone,
{
    /// Insert a new entry into the index. Return false, leaving the index
    /// untouched, if an entry with the same key pair is already present.
    pub fn insert(&mut self, entry: Entry<V>) -> bool {
        let key = entry.key();
        let (root, inserted) = Avl::do_insert(self.root.take(), entry);
        self.root = Some(root);
        if inserted {
            self.n_count += 1;
        } else {
            debug!("{}: insert {}, key already present", self.name, key);
        }
        inserted
    }

    /// Delete the entry for `key`. Return false, leaving the index
    /// untouched, if no such entry is present.
    pub fn delete(&mut self, key: &Key) -> bool {
        self.remove(key).is_some()
    }

    /// Delete the entry for `key` and return it.
    pub fn remove(&mut self, key: &Key) -> Option<Entry<V>> {
        let (root, old_entry) = Avl::do_delete(self.root.take(), key);
        self.root = root;
        match old_entry {
            Some(entry) => {
                self.n_count -= 1;
                Some(entry)
            }
            None => {
                debug!("{}: delete {}, key not found", self.name, key);
                None
            }
        }
    }

    /// Validate AVL tree with following rules:
    ///
    /// * Height of every node is one more than its taller child.
    /// * Balance factor of every node is -1, 0 or 1.
    /// * Keys are in strictly ascending order, in-order.
    /// * Number of nodes is same as the number of entries.
    ///
    /// Additionally return full statistics on the tree. Refer to [`Stats`]
    /// for more information.
    pub fn validate(&self) -> Result<Stats, AvlError> {
        let mut stats = Stats::new(self.n_count, mem::size_of::<Node<V>>());
        let mut depths = Depth::new();
        let (mut prev, mut count) = (None, 0);
        Avl::validate_tree(self.root(), 0, &mut prev, &mut count, &mut depths)?;
        if count != self.n_count {
            return Err(AvlError::CountMismatch(count, self.n_count));
        }
        stats.set_height(self.height());
        stats.set_depths(depths);
        Ok(stats)
    }
}

/// Read operations on Avl instance.
impl<V> Avl<V>
where
    V: Clone,
{
    /// Return the node holding `key`, if present.
    pub fn lookup(&self, key: &Key) -> Option<&Node<V>> {
        let mut node = self.root();
        while let Some(nref) = node {
            if nref.is_equal(key) {
                return Some(nref);
            }
            node = if nref.orders_after(key) {
                nref.left()
            } else {
                nref.right()
            };
        }
        None
    }

    /// Check whether an entry for `key` is present.
    #[inline]
    pub fn contains(&self, key: &Key) -> bool {
        self.lookup(key).is_some()
    }

    /// Get the value for key.
    pub fn get(&self, key: &Key) -> Option<V> {
        self.lookup(key).map(|node| node.entry.value().clone())
    }

    /// Return every entry whose primary coordinate lies within
    /// `[primary_min, primary_max]` and secondary coordinate within
    /// `[secondary_min, secondary_max]`. Order of the returned entries
    /// is not defined. An inverted window returns nothing.
    ///
    /// ```
    /// use avl_index::{Avl, Entry};
    ///
    /// let mut index: Avl<()> = Avl::new("track");
    /// for (p, s) in [(10, 0), (5, 1), (20, 2), (5, 0), (15, 1)].iter() {
    ///     index.insert(Entry::new(*p, *s, ()));
    /// }
    /// let mut keys: Vec<(i64, i64)> = index
    ///     .range_query(5, 15, 0, 2)
    ///     .iter()
    ///     .map(|e| (e.primary(), e.secondary()))
    ///     .collect();
    /// keys.sort();
    /// assert_eq!(keys, vec![(5, 0), (5, 1), (10, 0), (15, 1)]);
    /// ```
    pub fn range_query(
        &self,
        primary_min: i64,
        primary_max: i64,
        secondary_min: i64,
        secondary_max: i64,
    ) -> Vec<Entry<V>> {
        let mut acc = vec![];
        if primary_min > primary_max || secondary_min > secondary_max {
            return acc;
        }
        let window = (primary_min, primary_max, secondary_min, secondary_max);
        Avl::range_iter(self.root(), window, &mut acc);
        acc
    }

    /// Return all entries in level order, root first, each level from
    /// left to right.
    pub fn traverse_breadth_first(&self) -> Vec<Entry<V>> {
        let mut acc = Vec::with_capacity(self.n_count);
        let mut queue: VecDeque<&Node<V>> = VecDeque::new();
        queue.extend(self.root());
        while let Some(node) = queue.pop_front() {
            acc.push(node.entry.clone());
            queue.extend(node.left());
            queue.extend(node.right());
        }
        acc
    }

    /// Return all entries in ascending key order.
    pub fn traverse_in_order(&self) -> Vec<Entry<V>> {
        let mut acc = Vec::with_capacity(self.n_count);
        Avl::in_order(self.root(), &mut acc);
        acc
    }

    /// Return a random entry from this index.
    pub fn random<R: Rng>(&self, rng: &mut R) -> Option<Entry<V>> {
        let mut nref = self.root()?;

        let mut at_depth = rng.gen::<u8>() % 40;
        loop {
            let next = match rng.gen::<u8>() % 2 {
                0 => nref.left(),
                _ => nref.right(),
            };
            match next {
                Some(next) if at_depth > 0 => {
                    at_depth -= 1;
                    nref = next;
                }
                _ => break Some(nref.entry.clone()),
            }
        }
    }
}

impl<V> Avl<V>
where
    V: Clone,
{
    fn do_insert(node: Option<Box<Node<V>>>, entry: Entry<V>) -> Insert<V> {
        let mut node = match node {
            None => return (Node::new(entry), true),
            Some(node) => node,
        };

        if node.is_equal(&entry.key()) {
            return (node, false);
        }

        let inserted = if node.orders_after(&entry.key()) {
            let (left, ok) = Avl::do_insert(node.left.take(), entry);
            node.left = Some(left);
            ok
        } else {
            let (right, ok) = Avl::do_insert(node.right.take(), entry);
            node.right = Some(right);
            ok
        };
        node.recompute_height();
        (Avl::rebalance(node), inserted)
    }

    fn do_delete(node: Option<Box<Node<V>>>, key: &Key) -> Delete<V> {
        let mut node = match node {
            None => return (None, None),
            Some(node) => node,
        };

        let old_entry = if node.is_equal(key) {
            match (node.left.take(), node.right.take()) {
                (None, None) => return (None, Some(node.entry)),
                (Some(left), None) => return (Some(left), Some(node.entry)),
                (None, Some(right)) => return (Some(right), Some(node.entry)),
                (Some(left), Some(right)) => {
                    // overwrite this node's entry with its in-order successor.
                    let (right, successor) = Avl::delete_min(right);
                    node.left = Some(left);
                    node.right = right;
                    Some(mem::replace(&mut node.entry, successor))
                }
            }
        } else if node.orders_after(key) {
            let (left, old_entry) = Avl::do_delete(node.left.take(), key);
            node.left = left;
            old_entry
        } else {
            let (right, old_entry) = Avl::do_delete(node.right.take(), key);
            node.right = right;
            old_entry
        };
        node.recompute_height();
        (Some(Avl::rebalance(node)), old_entry)
    }

    // detach the left-most node of this sub-tree and return its entry.
    fn delete_min(mut node: Box<Node<V>>) -> Delmin<V> {
        match node.left.take() {
            None => {
                let Node { entry, right, .. } = *node;
                (right, entry)
            }
            Some(left) => {
                let (left, entry) = Avl::delete_min(left);
                node.left = left;
                node.recompute_height();
                (Some(Avl::rebalance(node)), entry)
            }
        }
    }

    fn range_iter(
        node: Option<&Node<V>>,
        window: (i64, i64, i64, i64),
        acc: &mut Vec<Entry<V>>, // accumulator for matching entries
    ) {
        let node = match node {
            None => return,
            Some(node) => node,
        };

        let (pmin, pmax, smin, smax) = window;
        if node.entry.is_within(pmin, pmax, smin, smax) {
            acc.push(node.entry.clone());
        }
        // left sub-tree cannot go beyond this node's primary, right
        // sub-tree cannot go below it.
        if node.entry.primary() >= pmin {
            Avl::range_iter(node.left(), window, acc);
        }
        if node.entry.primary() <= pmax {
            Avl::range_iter(node.right(), window, acc);
        }
    }

    fn in_order(node: Option<&Node<V>>, acc: &mut Vec<Entry<V>>) {
        if let Some(node) = node {
            Avl::in_order(node.left(), acc);
            acc.push(node.entry.clone());
            Avl::in_order(node.right(), acc);
        }
    }

    fn validate_tree(
        node: Option<&Node<V>>,
        depth: usize,
        prev: &mut Option<Key>,
        count: &mut usize,
        depths: &mut Depth,
    ) -> Result<usize, AvlError> {
        let node = match node {
            None => {
                depths.sample(depth);
                return Ok(0);
            }
            Some(node) => node,
        };

        let key = node.entry.key();
        let lheight = Avl::validate_tree(node.left(), depth + 1, prev, count, depths)?;
        if let Some(pkey) = *prev {
            if pkey >= key {
                return Err(AvlError::SortError(pkey, key));
            }
        }
        *prev = Some(key);
        *count += 1;
        let rheight = Avl::validate_tree(node.right(), depth + 1, prev, count, depths)?;

        let computed = 1 + lheight.max(rheight);
        if node.height != computed {
            return Err(AvlError::HeightMismatch(key, node.height, computed));
        }
        let balance = node.balance_factor();
        if balance.abs() > 1 {
            return Err(AvlError::Unbalanced(key, balance));
        }
        Ok(computed)
    }

    //--------- rotation routines ----------------

    fn rebalance(mut node: Box<Node<V>>) -> Box<Node<V>> {
        let balance = node.balance_factor();
        if balance > 1 {
            let left_balance = node.left().map_or(0, Node::balance_factor);
            if left_balance < 0 {
                trace!("rebalance {}, left-right", node.entry.key());
                node.left = node.left.take().map(Avl::rotate_left);
            }
            Avl::rotate_right(node)
        } else if balance < -1 {
            let right_balance = node.right().map_or(0, Node::balance_factor);
            if right_balance > 0 {
                trace!("rebalance {}, right-left", node.entry.key());
                node.right = node.right.take().map(Avl::rotate_right);
            }
            Avl::rotate_left(node)
        } else {
            node
        }
    }

    //              (i)                       (i)
    //               |                         |
    //              node                       x
    //              /  \                      / \
    //             /    \                    /   \
    //            /      \                  /     \
    //          left      x              node      xr
    //                   / \             /  \
    //                 xl   xr        left   xl
    //
    fn rotate_left(mut node: Box<Node<V>>) -> Box<Node<V>> {
        trace!("rotate_left {}", node.entry.key());
        let mut x = match node.right.take() {
            Some(x) => x,
            None => panic!("rotate_left(): no right child ? Call the programmer"),
        };
        node.right = x.left.take();
        node.recompute_height();
        x.left = Some(node);
        x.recompute_height();
        x
    }

    //              (i)                       (i)
    //               |                         |
    //              node                       x
    //              /  \                      / \
    //             /    \                    /   \
    //            /      \                  /     \
    //           x      right             xl      node
    //          / \                               / \
    //        xl   xr                           xr  right
    //
    fn rotate_right(mut node: Box<Node<V>>) -> Box<Node<V>> {
        trace!("rotate_right {}", node.entry.key());
        let mut x = match node.left.take() {
            Some(x) => x,
            None => panic!("rotate_right(): no left child ? Call the programmer"),
        };
        node.left = x.right.take();
        node.recompute_height();
        x.right = Some(node);
        x.recompute_height();
        x
    }
}

/// Height of an optional node, 0 when absent.
#[inline]
pub fn height<V>(node: Option<&Node<V>>) -> usize {
    node.map_or(0, |node| node.height)
}

/// Node corresponds to a single entry in Avl instance.
#[derive(Clone)]
pub struct Node<V> {
    entry: Entry<V>,
    height: usize,               // 1 for a leaf
    left: Option<Box<Node<V>>>,  // store: left child
    right: Option<Box<Node<V>>>, // store: right child
}

// Primary operations on a single node.
impl<V> Node<V> {
    // CREATE operation
    fn new(entry: Entry<V>) -> Box<Node<V>> {
        Box::new(Node {
            entry,
            height: 1,
            left: None,
            right: None,
        })
    }

    /// Entry held by this node.
    #[inline]
    pub fn entry(&self) -> &Entry<V> {
        &self.entry
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn left(&self) -> Option<&Node<V>> {
        self.left.as_ref().map(Deref::deref)
    }

    #[inline]
    pub fn right(&self) -> Option<&Node<V>> {
        self.right.as_ref().map(Deref::deref)
    }

    /// Left height minus right height. A magnitude above 1 means this
    /// node needs a rotation.
    pub fn balance_factor(&self) -> isize {
        height(self.left()) as isize - height(self.right()) as isize
    }

    /// Set height from children, call after any change to child links.
    pub fn recompute_height(&mut self) {
        self.height = 1 + height(self.left()).max(height(self.right()));
    }

    /// Whether this node holds `key`.
    #[inline]
    pub fn is_equal(&self, key: &Key) -> bool {
        self.entry.key() == *key
    }

    /// Whether this node's key orders strictly after `key`, in which
    /// case `key` belongs to the left of this node.
    #[inline]
    pub fn orders_after(&self, key: &Key) -> bool {
        self.entry.key() > *key
    }
}

/// Statistics on [`Avl`] tree. Serves two purpose:
///
/// * To get partial but quick statistics via [`Avl::stats`] method.
/// * To get full statisics via [`Avl::validate`] method.
#[derive(Default, Debug)]
pub struct Stats {
    entries: usize, // number of entries in the tree.
    node_size: usize,
    height: Option<usize>,
    depths: Option<Depth>,
}

impl Stats {
    fn new(entries: usize, node_size: usize) -> Stats {
        Stats {
            entries,
            node_size,
            height: Default::default(),
            depths: Default::default(),
        }
    }

    #[inline]
    fn set_height(&mut self, height: usize) {
        self.height = Some(height)
    }

    #[inline]
    fn set_depths(&mut self, depths: Depth) {
        self.depths = Some(depths)
    }

    /// Return number entries in [`Avl`] instance.
    #[inline]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Return node-size, including over-head for `Avl<V>`. Although
    /// the node overhead is constant, the node size varies based on
    /// value type. EG:
    ///
    /// ```
    /// use avl_index::Avl;
    /// let index: Avl<()> = Avl::new("myinstance");
    ///
    /// // size of key: 16 bytes
    /// // size of value: 0 bytes
    /// // overhead is 24 bytes
    /// assert_eq!(index.stats().node_size(), 40);
    /// ```
    #[inline]
    pub fn node_size(&self) -> usize {
        self.node_size
    }

    /// Return height of the tree, available only from validate().
    #[inline]
    pub fn height(&self) -> Option<usize> {
        self.height
    }

    /// Return [`Depth`] statistics.
    pub fn depths(&self) -> Option<Depth> {
        match &self.depths {
            Some(depths) if depths.samples() > 0 => Some(depths.clone()),
            _ => None,
        }
    }
}
