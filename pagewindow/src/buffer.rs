use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::key::KeySet;
use crate::{BufferError, Edge, Page, Placement};

/// A page owned by the window, together with what the engine knows about it.
#[derive(Clone, Debug)]
pub struct MountedPage<P> {
    page: P,
    placement: Placement,
    height: Option<u32>,
}

impl<P> MountedPage<P> {
    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn into_page(self) -> P {
        self.page
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// The last rendered height reported for this page, if any.
    pub fn height(&self) -> Option<u32> {
        self.height
    }
}

/// An ordered, bounded, double-ended sequence of pages, unique by id.
///
/// Iteration order is visual top-to-bottom order. Inserting at one end evicts from the other
/// end in the same call, so the buffer is never observable over its bound.
#[derive(Clone, Debug)]
pub struct PageBuffer<P: Page> {
    pages: VecDeque<MountedPage<P>>,
    ids: KeySet<P::Id>,
    max_len: usize,
}

impl<P: Page> PageBuffer<P> {
    pub fn new(max_len: usize) -> Self {
        debug_assert!(max_len > 0, "PageBuffer: max_len must be at least 1");
        Self {
            pages: VecDeque::new(),
            ids: KeySet::default(),
            max_len: max_len.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn contains(&self, id: &P::Id) -> bool {
        self.ids.contains(id)
    }

    pub fn head(&self) -> Option<&P> {
        self.pages.front().map(|m| &m.page)
    }

    pub fn tail(&self) -> Option<&P> {
        self.pages.back().map(|m| &m.page)
    }

    /// The boundary page at `edge`: `head()` for `Top`, `tail()` for `Bottom`.
    pub fn boundary(&self, edge: Edge) -> Option<&P> {
        match edge {
            Edge::Top => self.head(),
            Edge::Bottom => self.tail(),
        }
    }

    pub fn get(&self, id: &P::Id) -> Option<&MountedPage<P>> {
        if !self.ids.contains(id) {
            return None;
        }
        self.pages.iter().find(|m| m.page.id() == *id)
    }

    pub fn position(&self, id: &P::Id) -> Option<usize> {
        if !self.ids.contains(id) {
            return None;
        }
        self.pages.iter().position(|m| m.page.id() == *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MountedPage<P>> + '_ {
        self.pages.iter()
    }

    pub fn pages(&self) -> impl Iterator<Item = &P> + '_ {
        self.pages.iter().map(|m| &m.page)
    }

    pub fn height(&self, id: &P::Id) -> Option<u32> {
        self.get(id).and_then(|m| m.height)
    }

    /// Records a rendered height. Returns the previous height, or `None` if the page is not
    /// mounted (the outer `Option`).
    pub fn set_height(&mut self, id: &P::Id, height: u32) -> Option<Option<u32>> {
        if !self.ids.contains(id) {
            return None;
        }
        let slot = self.pages.iter_mut().find(|m| m.page.id() == *id)?;
        Some(slot.height.replace(height))
    }

    /// Prepends `page`. Returns the page evicted from the tail, if the bound was exceeded.
    pub fn insert_before(&mut self, page: P) -> Result<Option<MountedPage<P>>, BufferError<P::Id>> {
        self.insert(page, Edge::Top)
    }

    /// Appends `page`. Returns the page evicted from the head, if the bound was exceeded.
    pub fn insert_after(&mut self, page: P) -> Result<Option<MountedPage<P>>, BufferError<P::Id>> {
        self.insert(page, Edge::Bottom)
    }

    /// Inserts at `edge` and evicts from the opposite end if over bound.
    pub fn insert(
        &mut self,
        page: P,
        edge: Edge,
    ) -> Result<Option<MountedPage<P>>, BufferError<P::Id>> {
        let id = page.id();
        if self.ids.contains(&id) {
            return Err(BufferError::DuplicateId { id });
        }
        self.ids.insert(id);

        let slot = MountedPage {
            page,
            placement: edge.placement(),
            height: None,
        };
        match edge {
            Edge::Top => self.pages.push_front(slot),
            Edge::Bottom => self.pages.push_back(slot),
        }

        if self.pages.len() <= self.max_len {
            return Ok(None);
        }
        // The bound held before this insert, so exactly one page has to go.
        let evicted = self.pop(edge.opposite());
        debug_assert!(self.pages.len() <= self.max_len);
        Ok(evicted)
    }

    /// Changes the bound. When shrinking, pages are evicted from the end opposite to `keep`,
    /// nearest-to-that-end first.
    pub fn set_max_len(&mut self, max_len: usize, keep: Edge) -> Vec<MountedPage<P>> {
        debug_assert!(max_len > 0, "PageBuffer: max_len must be at least 1");
        self.max_len = max_len.max(1);
        let mut evicted = Vec::new();
        while self.pages.len() > self.max_len {
            match self.pop(keep.opposite()) {
                Some(m) => evicted.push(m),
                None => break,
            }
        }
        evicted
    }

    /// Removes every page, top to bottom.
    pub fn clear(&mut self) -> Vec<MountedPage<P>> {
        self.ids.clear();
        self.pages.drain(..).collect()
    }

    fn pop(&mut self, edge: Edge) -> Option<MountedPage<P>> {
        let m = match edge {
            Edge::Top => self.pages.pop_front(),
            Edge::Bottom => self.pages.pop_back(),
        }?;
        self.ids.remove(&m.page.id());
        Some(m)
    }
}
