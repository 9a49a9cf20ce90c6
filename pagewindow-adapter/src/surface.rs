use pagewindow::{Page, Placement};

/// The rendering side of a paged view: a scroll container holding the mounted pages.
///
/// Offsets and heights are in the host's own units (pixels, rows, ...).
pub trait RenderSurface<P: Page> {
    /// Mounts `page` above the first (`Before`) or below the last (`After`) mounted page.
    fn mount(&mut self, page: &P, placement: Placement);

    fn unmount(&mut self, id: &P::Id);

    /// The laid-out height of a mounted page, or `None` if layout is not available yet.
    fn measure(&mut self, id: &P::Id) -> Option<u32>;

    /// Top of a mounted page relative to the viewport top (negative when above it).
    ///
    /// Surfaces that cannot report positions return `None`; anchoring is then left to the host.
    fn page_top(&self, _id: &P::Id) -> Option<i64> {
        None
    }

    fn scroll_offset(&self) -> u64;

    /// Moves the view by `delta` relative to its current position.
    fn scroll_by(&mut self, delta: i64);

    /// Jumps to the end of the content. Used once after the first page of a bottom-started feed.
    fn pin_to_end(&mut self) {}
}
