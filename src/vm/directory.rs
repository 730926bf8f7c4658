//! Frame directory - per-frame metadata plus the intrusive eviction lists.
//!
//! The directory owns every [`Frame`]; eviction structures reference frames
//! by index, never by copy. Instead of separately allocated queue nodes, the
//! prev/next links live *inside* the frame entries and a [`FrameList`] is
//! just a `(head, tail, len)` view over them. Removal and promotion are
//! index rewrites, and membership is an O(1) check against the stored tag.

use tracing::warn;

use crate::common::{FrameId, PageId};

/// Access rights currently granted to a resident page.
///
/// Only these three states are ever legal, so this is an enum rather than
/// raw protection bits. Dirtiness is tracked separately in [`Frame::dirty`]
/// because second-chance demotion revokes the read permission while the
/// page content stays modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protection {
    /// Not readable: either unmapped or parked in second-chance.
    #[default]
    None,
    /// Readable, not yet written.
    Read,
    /// Readable and writable.
    ReadWrite,
}

impl Protection {
    /// Whether a read access is satisfied without faulting.
    #[inline]
    pub fn can_read(self) -> bool {
        !matches!(self, Protection::None)
    }

    /// Whether a write access is satisfied without faulting.
    #[inline]
    pub fn can_write(self) -> bool {
        matches!(self, Protection::ReadWrite)
    }
}

/// Which eviction structure a frame is currently linked into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Membership {
    /// Not in any eviction structure.
    #[default]
    None,
    /// In the single FIFO queue (fifo and custom policies).
    Fifo,
    /// In the 2fifo first-chance list.
    FirstChance,
    /// In the 2fifo second-chance (parole) list.
    SecondChance,
}

/// One entry per physical frame.
#[derive(Debug, Default)]
pub struct Frame {
    /// Which page is resident, or None if the frame is empty.
    pub resident_page: Option<PageId>,
    /// Permission state mirrored from the page-table entry.
    pub protection: Protection,
    /// Whether the frame holds page content (resident or parked).
    pub occupied: bool,
    /// Current eviction-structure membership tag.
    pub membership: Membership,
    /// Set when write permission is granted, cleared on load/eviction.
    pub dirty: bool,
    /// Intrusive list link toward the head of the owning list.
    prev: Option<FrameId>,
    /// Intrusive list link toward the tail of the owning list.
    next: Option<FrameId>,
}

/// The directory of all physical frames.
///
/// Allocated once at startup sized to the configured frame count and
/// zero-initialized: all frames unoccupied, protection `None`, membership
/// `None`.
#[derive(Debug)]
pub struct FrameDirectory {
    frames: Vec<Frame>,
}

impl FrameDirectory {
    /// Create a directory with `nframes` empty frames.
    pub fn new(nframes: usize) -> Self {
        assert!(nframes > 0, "nframes must be > 0");
        Self {
            frames: (0..nframes).map(|_| Frame::default()).collect(),
        }
    }

    /// Number of frames.
    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn frame(&self, id: FrameId) -> &Frame {
        &self.frames[id.0]
    }

    #[inline]
    pub fn frame_mut(&mut self, id: FrameId) -> &mut Frame {
        &mut self.frames[id.0]
    }

    /// Scan for an unoccupied frame.
    pub fn find_free(&self) -> Option<FrameId> {
        self.frames
            .iter()
            .position(|f| !f.occupied)
            .map(FrameId::new)
    }

    /// Reset a frame to the empty state after eviction.
    ///
    /// Does not touch the list links; the caller must have unlinked the
    /// frame from its eviction structure first.
    pub fn reset_frame(&mut self, id: FrameId) {
        let frame = self.frame_mut(id);
        frame.resident_page = None;
        frame.protection = Protection::None;
        frame.occupied = false;
        frame.dirty = false;
    }
}

/// An ordered list of frames threaded through the directory's links.
///
/// Head is the oldest entry, tail the newest. Invariants: a frame is linked
/// into this list iff its membership tag equals `tag`; a frame appears at
/// most once.
#[derive(Debug)]
pub struct FrameList {
    tag: Membership,
    head: Option<FrameId>,
    tail: Option<FrameId>,
    len: usize,
}

impl FrameList {
    /// Create an empty list with the given membership tag.
    pub fn new(tag: Membership) -> Self {
        assert!(tag != Membership::None, "a list needs a real tag");
        Self {
            tag,
            head: None,
            tail: None,
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// O(1) membership check via the stored tag.
    #[inline]
    pub fn contains(&self, dir: &FrameDirectory, id: FrameId) -> bool {
        dir.frame(id).membership == self.tag
    }

    /// Append a frame at the tail (newest end).
    ///
    /// Re-inserting a frame that is already in *some* structure is a logged
    /// no-op; it should not happen given the eviction semantics.
    pub fn push_back(&mut self, dir: &mut FrameDirectory, id: FrameId) {
        if dir.frame(id).membership != Membership::None {
            warn!(frame = %id, tag = ?self.tag, "refusing to re-link a frame already in a structure");
            return;
        }

        let old_tail = self.tail;
        {
            let frame = dir.frame_mut(id);
            frame.membership = self.tag;
            frame.prev = old_tail;
            frame.next = None;
        }
        match old_tail {
            Some(t) => dir.frame_mut(t).next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
    }

    /// Remove and return the head (oldest entry).
    pub fn pop_front(&mut self, dir: &mut FrameDirectory) -> Option<FrameId> {
        let id = self.head?;
        self.unlink(dir, id);
        Some(id)
    }

    /// Unlink an arbitrary frame from this list.
    ///
    /// A frame whose tag doesn't match is a structural invariant violation:
    /// logged, state untouched.
    pub fn unlink(&mut self, dir: &mut FrameDirectory, id: FrameId) {
        if dir.frame(id).membership != self.tag {
            warn!(frame = %id, tag = ?self.tag, actual = ?dir.frame(id).membership,
                "unlink from a list the frame is not in");
            return;
        }

        let (prev, next) = {
            let frame = dir.frame_mut(id);
            let links = (frame.prev, frame.next);
            frame.prev = None;
            frame.next = None;
            frame.membership = Membership::None;
            links
        };

        match prev {
            Some(p) => dir.frame_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => dir.frame_mut(n).prev = prev,
            None => self.tail = prev,
        }
        self.len -= 1;
    }

    /// Iterate frame ids from the oldest (head) toward the newest (tail).
    pub fn iter<'a>(&'a self, dir: &'a FrameDirectory) -> impl Iterator<Item = FrameId> + 'a {
        FrameListIter {
            dir,
            cur: self.head,
        }
    }
}

struct FrameListIter<'a> {
    dir: &'a FrameDirectory,
    cur: Option<FrameId>,
}

impl Iterator for FrameListIter<'_> {
    type Item = FrameId;

    fn next(&mut self) -> Option<FrameId> {
        let id = self.cur?;
        self.cur = self.dir.frame(id).next;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(list: &FrameList, dir: &FrameDirectory) -> Vec<usize> {
        list.iter(dir).map(|f| f.0).collect()
    }

    #[test]
    fn test_directory_new() {
        let dir = FrameDirectory::new(4);
        assert_eq!(dir.len(), 4);
        for i in 0..4 {
            let frame = dir.frame(FrameId::new(i));
            assert!(!frame.occupied);
            assert!(!frame.dirty);
            assert_eq!(frame.protection, Protection::None);
            assert_eq!(frame.membership, Membership::None);
            assert_eq!(frame.resident_page, None);
        }
    }

    #[test]
    fn test_find_free_scan_order() {
        let mut dir = FrameDirectory::new(3);
        assert_eq!(dir.find_free(), Some(FrameId::new(0)));

        dir.frame_mut(FrameId::new(0)).occupied = true;
        dir.frame_mut(FrameId::new(1)).occupied = true;
        assert_eq!(dir.find_free(), Some(FrameId::new(2)));

        dir.frame_mut(FrameId::new(2)).occupied = true;
        assert_eq!(dir.find_free(), None);
    }

    #[test]
    fn test_list_push_pop_order() {
        let mut dir = FrameDirectory::new(4);
        let mut list = FrameList::new(Membership::Fifo);

        for i in 0..4 {
            list.push_back(&mut dir, FrameId::new(i));
        }
        assert_eq!(list.len(), 4);
        assert_eq!(collect(&list, &dir), vec![0, 1, 2, 3]);

        assert_eq!(list.pop_front(&mut dir), Some(FrameId::new(0)));
        assert_eq!(dir.frame(FrameId::new(0)).membership, Membership::None);
        assert_eq!(collect(&list, &dir), vec![1, 2, 3]);
    }

    #[test]
    fn test_list_unlink_middle() {
        let mut dir = FrameDirectory::new(4);
        let mut list = FrameList::new(Membership::FirstChance);

        for i in 0..4 {
            list.push_back(&mut dir, FrameId::new(i));
        }
        list.unlink(&mut dir, FrameId::new(2));

        assert_eq!(collect(&list, &dir), vec![0, 1, 3]);
        assert_eq!(list.len(), 3);
        assert_eq!(dir.frame(FrameId::new(2)).membership, Membership::None);

        // Tail removal keeps the tail pointer correct.
        list.unlink(&mut dir, FrameId::new(3));
        list.push_back(&mut dir, FrameId::new(3));
        assert_eq!(collect(&list, &dir), vec![0, 1, 3]);
    }

    #[test]
    fn test_double_insert_is_noop() {
        let mut dir = FrameDirectory::new(2);
        let mut list = FrameList::new(Membership::Fifo);

        list.push_back(&mut dir, FrameId::new(0));
        list.push_back(&mut dir, FrameId::new(0));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_unlink_wrong_list_is_noop() {
        let mut dir = FrameDirectory::new(2);
        let mut fifo = FrameList::new(Membership::Fifo);
        let mut first = FrameList::new(Membership::FirstChance);

        fifo.push_back(&mut dir, FrameId::new(0));
        first.unlink(&mut dir, FrameId::new(0));

        assert_eq!(fifo.len(), 1);
        assert_eq!(dir.frame(FrameId::new(0)).membership, Membership::Fifo);
    }

    #[test]
    fn test_membership_tag_matches_list() {
        let mut dir = FrameDirectory::new(3);
        let mut second = FrameList::new(Membership::SecondChance);

        second.push_back(&mut dir, FrameId::new(1));
        assert!(second.contains(&dir, FrameId::new(1)));
        assert!(!second.contains(&dir, FrameId::new(0)));

        second.pop_front(&mut dir);
        assert!(!second.contains(&dir, FrameId::new(1)));
    }

    #[test]
    fn test_reset_frame_clears_state() {
        let mut dir = FrameDirectory::new(1);
        let id = FrameId::new(0);
        {
            let frame = dir.frame_mut(id);
            frame.resident_page = Some(PageId::new(7));
            frame.protection = Protection::ReadWrite;
            frame.occupied = true;
            frame.dirty = true;
        }

        dir.reset_frame(id);

        let frame = dir.frame(id);
        assert_eq!(frame.resident_page, None);
        assert_eq!(frame.protection, Protection::None);
        assert!(!frame.occupied);
        assert!(!frame.dirty);
    }
}
