//! Document tree and query API.
//!
//! A parse produces a tree of [`Doc`] nodes rooted at a table. Table
//! children are stored name-sorted and looked up by binary search; list
//! elements keep their insertion order. All payloads are owned by their
//! node, so dropping the root frees the whole document.

use tmlc_util::Date;

/// The kind of a document node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Table,
    List,
    Int,
    Float,
    Str,
    Date,
    Bool,
}

/// Payload of a node. Tables keep children sorted by name.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum NodeValue {
    Table(Vec<Doc>),
    List(Vec<Doc>),
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(Date),
}

/// One node of a parsed document.
///
/// The root is always a table with an empty name. Every other node carries
/// the key under which its parent table holds it; list elements have an
/// empty name.
///
/// Scalar accessors return a documented default on kind mismatch rather
/// than panicking: 0, 0.0, `false`, `""`, or the zero [`Date`]. The numeric
/// accessors cross-cast between Int and Float.
#[derive(Clone, Debug, PartialEq)]
pub struct Doc {
    name: String,
    value: NodeValue,
}

impl Doc {
    pub(crate) fn new(name: String, value: NodeValue) -> Self {
        Self { name, value }
    }

    /// The kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self.value {
            NodeValue::Table(_) => NodeKind::Table,
            NodeValue::List(_) => NodeKind::List,
            NodeValue::Str(_) => NodeKind::Str,
            NodeValue::Int(_) => NodeKind::Int,
            NodeValue::Float(_) => NodeKind::Float,
            NodeValue::Bool(_) => NodeKind::Bool,
            NodeValue::Date(_) => NodeKind::Date,
        }
    }

    /// The key this node sits under in its parent table; empty for the root
    /// and for list elements.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up a direct child of a table by exact key.
    pub fn get(&self, key: &str) -> Option<&Doc> {
        match &self.value {
            NodeValue::Table(children) => children
                .binary_search_by(|child| child.name.as_str().cmp(key))
                .ok()
                .map(|i| &children[i]),
            _ => None,
        }
    }

    /// Walks a `.`-separated path. Table nodes are traversed with [`get`];
    /// on a list, a segment that parses as a non-negative decimal integer
    /// indexes into the list (`"foo.1.bar"` is the `bar` field of the second
    /// element of `foo`). Returns `None` on any miss or kind mismatch.
    ///
    /// The split is literal: consecutive, leading, or trailing dots produce
    /// empty segments, which look up the empty-string key (so `"a..b"` only
    /// resolves through a table that holds a key `""`). Keys containing
    /// literal dots cannot be addressed this way; use [`get`] for those.
    ///
    /// [`get`]: Doc::get
    pub fn get_path(&self, path: &str) -> Option<&Doc> {
        let mut node = self;
        for segment in path.split('.') {
            node = match &node.value {
                NodeValue::Table(_) => node.get(segment)?,
                NodeValue::List(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(node)
    }

    /// Integer payload; Float nodes are cast, anything else yields 0.
    pub fn as_int(&self) -> i64 {
        match self.value {
            NodeValue::Int(v) => v,
            NodeValue::Float(v) => v as i64,
            _ => 0,
        }
    }

    /// Float payload; Int nodes are cast, anything else yields 0.0.
    pub fn as_float(&self) -> f64 {
        match self.value {
            NodeValue::Float(v) => v,
            NodeValue::Int(v) => v as f64,
            _ => 0.0,
        }
    }

    /// Boolean payload, or `false` for non-Bool nodes.
    pub fn as_bool(&self) -> bool {
        match self.value {
            NodeValue::Bool(v) => v,
            _ => false,
        }
    }

    /// String payload, or `""` for non-Str nodes. The returned slice
    /// borrows from the document.
    pub fn as_str(&self) -> &str {
        match &self.value {
            NodeValue::Str(s) => s,
            _ => "",
        }
    }

    /// Date payload, or the zero date for non-Date nodes.
    pub fn as_date(&self) -> Date {
        match self.value {
            NodeValue::Date(d) => d,
            _ => Date::default(),
        }
    }

    /// Number of children for tables and lists; 0 for scalars.
    pub fn len(&self) -> usize {
        match &self.value {
            NodeValue::Table(children) => children.len(),
            NodeValue::List(items) => items.len(),
            _ => 0,
        }
    }

    /// True if this node has no children.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The i-th child: list elements by position, table children in
    /// name-sorted order.
    pub fn index(&self, idx: usize) -> Option<&Doc> {
        match &self.value {
            NodeValue::Table(children) => children.get(idx),
            NodeValue::List(items) => items.get(idx),
            _ => None,
        }
    }

    /// Iterates children: lists in insertion order, tables in name-sorted
    /// order. Scalars yield nothing.
    pub fn iter(&self) -> Iter<'_> {
        let children = match &self.value {
            NodeValue::Table(children) => children.as_slice(),
            NodeValue::List(items) => items.as_slice(),
            _ => &[],
        };
        Iter {
            inner: children.iter(),
        }
    }
}

/// Iterator over a node's children.
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, Doc>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Doc;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a Doc {
    type Item = &'a Doc;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
