//! Immutable, cost-accumulating paths
//!
//! A `Path` is a chain of segments ending at its current terminus.
//! Extending a path allocates one new link that points back at the old
//! chain, so many candidate paths in a search frontier can share a prefix
//! without copying it and without ever seeing each other's extensions.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// One hop of a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment<T> {
    start: T,
    end: T,
    cost: f64,
}

impl<T> Segment<T> {
    pub fn new(start: T, end: T, cost: f64) -> Self {
        Segment { start, end, cost }
    }

    pub fn start(&self) -> &T {
        &self.start
    }

    pub fn end(&self) -> &T {
        &self.end
    }

    /// Cost of this hop alone.
    pub fn cost(&self) -> f64 {
        self.cost
    }
}

struct Link<T> {
    segment: Segment<T>,
    prev: Option<Arc<Link<T>>>,
}

/// A path from a start value to its current end.
pub struct Path<T> {
    start: T,
    cost: f64,
    len: usize,
    last: Option<Arc<Link<T>>>,
}

impl<T: Clone> Path<T> {
    /// A zero-length, zero-cost path sitting at `start`.
    pub fn new(start: T) -> Self {
        Path {
            start,
            cost: 0.0,
            len: 0,
            last: None,
        }
    }

    /// A new path with one more segment from the current end to `next`.
    /// `self` is left untouched.
    pub fn extend(&self, next: T, hop_cost: f64) -> Path<T> {
        let segment = Segment::new(self.end().clone(), next, hop_cost);
        Path {
            start: self.start.clone(),
            cost: self.cost + hop_cost,
            len: self.len + 1,
            last: Some(Arc::new(Link {
                segment,
                prev: self.last.clone(),
            })),
        }
    }
}

impl<T> Path<T> {
    pub fn start(&self) -> &T {
        &self.start
    }

    /// The current terminus.
    pub fn end(&self) -> &T {
        match &self.last {
            Some(link) => &link.segment.end,
            None => &self.start,
        }
    }

    /// Sum of all segment costs.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Segments in travel order, start to end.
    pub fn segments(&self) -> Vec<&Segment<T>> {
        let mut out = Vec::with_capacity(self.len);
        let mut cursor = self.last.as_deref();
        while let Some(link) = cursor {
            out.push(&link.segment);
            cursor = link.prev.as_deref();
        }
        out.reverse();
        out
    }

    /// Every value visited, including the start.
    pub fn nodes(&self) -> Vec<&T> {
        std::iter::once(&self.start)
            .chain(self.segments().into_iter().map(Segment::end))
            .collect()
    }
}

impl<T> Clone for Path<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Path {
            start: self.start.clone(),
            cost: self.cost,
            len: self.len,
            last: self.last.clone(),
        }
    }
}

impl<T: PartialEq> PartialEq for Path<T> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start
            && self.cost == other.cost
            && self.len == other.len
            && self.segments() == other.segments()
    }
}

impl<T: fmt::Debug> fmt::Debug for Path<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Path")
            .field("start", &self.start)
            .field("cost", &self.cost)
            .field("segments", &self.segments())
            .finish()
    }
}

impl<T> Drop for Path<T> {
    fn drop(&mut self) {
        // Unlink iteratively so long chains don't recurse on drop.
        let mut cursor = self.last.take();
        while let Some(link) = cursor {
            cursor = match Arc::try_unwrap(link) {
                Ok(mut owned) => owned.prev.take(),
                Err(_) => None,
            };
        }
    }
}
