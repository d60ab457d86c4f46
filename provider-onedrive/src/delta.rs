//! Incremental change enumeration.

use futures::stream::Stream;

use crate::error::Result;
use crate::iterator::{CollectionIterator, CursorState};
use crate::metadata::{HydrateContext, ItemMetadata};
use crate::page::{validate_link, PageFlavor};

/// Cursor over one delta pass.
///
/// Yields every changed item, tombstones included (see
/// [`ItemMetadata::is_deleted`]). The last page of the pass carries the sync
/// token, available from [`delta_link`](Self::delta_link) once the pass is
/// drained. Feed it to `Folder::delta_from` to enumerate later changes only.
#[derive(Debug)]
pub struct DeltaIterator {
    inner: CollectionIterator<ItemMetadata>,
}

impl DeltaIterator {
    /// Full enumeration starting at the canonical delta URL
    pub(crate) fn new(url: impl Into<String>, context: HydrateContext) -> Self {
        Self {
            inner: CollectionIterator::new(url, PageFlavor::Delta, context),
        }
    }

    /// Enumeration of changes since `delta_link`
    pub(crate) fn resume(delta_link: impl Into<String>, context: HydrateContext) -> Result<Self> {
        let delta_link = delta_link.into();
        validate_link(&delta_link)?;
        Ok(Self::new(delta_link, context))
    }

    pub fn state(&self) -> CursorState {
        self.inner.state()
    }

    pub fn is_exhausted(&self) -> bool {
        self.inner.is_exhausted()
    }

    /// Next page of the current pass, if one is pending
    pub fn next_link(&self) -> Option<&str> {
        self.inner.next_link()
    }

    /// Sync token for the next pass, once the last page has been fetched
    pub fn delta_link(&self) -> Option<&str> {
        self.inner.delta_link()
    }

    pub async fn has_next(&mut self) -> Result<bool> {
        self.inner.has_next().await
    }

    pub async fn next(&mut self) -> Result<ItemMetadata> {
        self.inner.next().await
    }

    pub async fn try_next(&mut self) -> Result<Option<ItemMetadata>> {
        self.inner.try_next().await
    }

    /// Drains the pass and returns its items with the sync token
    pub async fn drain(mut self) -> Result<(Vec<ItemMetadata>, Option<String>)> {
        let items = self.inner.collect_all().await?;
        Ok((items, self.inner.delta_link().map(str::to_string)))
    }

    pub fn into_stream(self) -> impl Stream<Item = Result<ItemMetadata>> {
        self.inner.into_stream()
    }
}
