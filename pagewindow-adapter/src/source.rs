use alloc::format;
use alloc::vec::Vec;

use pagewindow::{Edge, Page, SourceError};

/// Loads pages by neighbour.
///
/// `None` as the boundary means "the window is empty": return the page the feed starts from.
/// `Ok(None)` means there is nothing further in that direction.
///
/// Asynchronous sources don't fit this trait; drive `WindowEngine` directly with the
/// `FetchRequest` it returns and call `Controller::complete` once the page arrives.
pub trait PageSource<P: Page> {
    fn page_before(&mut self, head: Option<&P>) -> Result<Option<P>, SourceError>;

    fn page_after(&mut self, tail: Option<&P>) -> Result<Option<P>, SourceError>;

    /// Dispatches to `page_before` / `page_after` for `edge`.
    fn fetch(&mut self, edge: Edge, boundary: Option<&P>) -> Result<Option<P>, SourceError> {
        match edge {
            Edge::Top => self.page_before(boundary),
            Edge::Bottom => self.page_after(boundary),
        }
    }
}

/// Where an empty window starts reading a [`VecSource`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Origin {
    /// `page_after(None)` returns the first page.
    #[default]
    Start,
    /// `page_before(None)` returns the last page (chat-style feeds).
    End,
    /// Split before `index`: `page_after(None)` returns `pages[index]` and `page_before(None)`
    /// returns `pages[index - 1]`.
    At(usize),
}

/// An in-memory, ordered page feed.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VecSource<P> {
    pages: Vec<P>,
    origin: Origin,
}

impl<P: Page + Clone> VecSource<P> {
    pub fn new(pages: Vec<P>, origin: Origin) -> Self {
        Self { pages, origin }
    }

    pub fn from_start(pages: Vec<P>) -> Self {
        Self::new(pages, Origin::Start)
    }

    pub fn from_end(pages: Vec<P>) -> Self {
        Self::new(pages, Origin::End)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Appends a page at the end of the feed (e.g. a new chat message).
    pub fn push(&mut self, page: P) {
        self.pages.push(page);
    }

    fn split(&self) -> usize {
        match self.origin {
            Origin::Start => 0,
            Origin::End => self.pages.len(),
            Origin::At(index) => index.min(self.pages.len()),
        }
    }

    fn position(&self, page: &P) -> Result<usize, SourceError> {
        let id = page.id();
        self.pages
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(|| SourceError::new(format!("unknown cursor {id:?}")))
    }
}

impl<P: Page + Clone> PageSource<P> for VecSource<P> {
    fn page_before(&mut self, head: Option<&P>) -> Result<Option<P>, SourceError> {
        let end = match head {
            Some(head) => self.position(head)?,
            None => self.split(),
        };
        Ok(end.checked_sub(1).and_then(|i| self.pages.get(i)).cloned())
    }

    fn page_after(&mut self, tail: Option<&P>) -> Result<Option<P>, SourceError> {
        let start = match tail {
            Some(tail) => self.position(tail)? + 1,
            None => self.split(),
        };
        Ok(self.pages.get(start).cloned())
    }
}
