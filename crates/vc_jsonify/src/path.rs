use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

/// One step from a container to a nested value.
#[derive(Clone)]
pub(crate) enum Segment {
    Member(Rc<str>),
    Index(usize),
}

/// Helper struct tracking where in the graph the current value sits.
///
/// Printed as `$.member[0].nested`, with `$` standing for the root.
#[derive(Default, Clone)]
pub(crate) struct MemberPath {
    segments: Vec<Segment>,
}

impl MemberPath {
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    #[inline]
    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    #[inline]
    pub fn pop(&mut self) {
        self.segments.pop();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Drops the segments past `len`, e.g. the ones left by a failed walk.
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        self.segments.truncate(len);
    }

    #[inline]
    pub fn clear(&mut self) {
        self.segments.clear();
    }
}

impl fmt::Display for MemberPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            match segment {
                Segment::Member(name) => write!(f, ".{name}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl fmt::Debug for MemberPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
