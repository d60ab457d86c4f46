//! Lazy, page-at-a-time iteration over collection endpoints.

use futures::stream::{self, Stream};
use std::collections::VecDeque;
use std::fmt;
use std::marker::PhantomData;
use tracing::debug;

use crate::error::{OneDriveError, Result};
use crate::metadata::{Hydrate, HydrateContext, JsonObject};
use crate::page::{validate_link, PageContinuation, PageFetcher, PageFlavor};

/// Where a [`CollectionIterator`] stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// Items are waiting in the buffer
    Buffered,
    /// Buffer drained, another page is known
    EmptyNeedFetch,
    /// Buffer drained, no page left
    EmptyNoMore,
}

/// Cursor over a paged collection, hydrating items of type `T`.
///
/// Pages are fetched only when the buffer runs dry, one request at a time,
/// by whichever call needs the next item. Empty pages that still carry a next
/// link are skipped. The iterator is single-use: once it reports no more
/// items it stays that way.
pub struct CollectionIterator<T> {
    fetcher: PageFetcher,
    context: HydrateContext,
    buffer: VecDeque<JsonObject>,
    next_url: Option<String>,
    delta_link: Option<String>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Hydrate> CollectionIterator<T> {
    /// Starts at `url`; nothing is fetched until the first `has_next`/`next`
    pub fn new(url: impl Into<String>, flavor: PageFlavor, context: HydrateContext) -> Self {
        Self {
            fetcher: PageFetcher::new(context.connection().clone(), flavor),
            context,
            buffer: VecDeque::new(),
            next_url: Some(url.into()),
            delta_link: None,
            _marker: PhantomData,
        }
    }

    /// Continues a pass from a link captured with [`next_link`](Self::next_link)
    pub fn resume(
        link: impl Into<String>,
        flavor: PageFlavor,
        context: HydrateContext,
    ) -> Result<Self> {
        let link = link.into();
        validate_link(&link)?;
        Ok(Self::new(link, flavor, context))
    }

    pub fn state(&self) -> CursorState {
        if !self.buffer.is_empty() {
            CursorState::Buffered
        } else if self.next_url.is_some() {
            CursorState::EmptyNeedFetch
        } else {
            CursorState::EmptyNoMore
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.state() == CursorState::EmptyNoMore
    }

    /// URL of the next unfetched page.
    ///
    /// Once the buffer is drained, a new iterator resumed from this link
    /// yields exactly the items this one would still have yielded.
    pub fn next_link(&self) -> Option<&str> {
        self.next_url.as_deref()
    }

    /// Sync token of a finished delta pass, set when its last page arrives
    pub fn delta_link(&self) -> Option<&str> {
        self.delta_link.as_deref()
    }

    /// Whether another item is available, fetching pages as needed.
    ///
    /// The pending link is only replaced once its page has been decoded, so a
    /// failed or cancelled fetch leaves the iterator where it was and the call
    /// may be repeated.
    pub async fn has_next(&mut self) -> Result<bool> {
        loop {
            if !self.buffer.is_empty() {
                return Ok(true);
            }
            let Some(url) = self.next_url.clone() else {
                return Ok(false);
            };

            let page = self.fetcher.fetch(&url).await?;

            self.buffer.extend(page.items);
            self.next_url = None;
            match page.continuation {
                PageContinuation::NextPage(next) => self.next_url = Some(next),
                PageContinuation::ResumeToken(token) => {
                    debug!("Delta pass complete");
                    self.delta_link = Some(token);
                }
                PageContinuation::End => {}
            }
        }
    }

    /// Next item; fails with [`OneDriveError::NoMoreElements`] past the end
    pub async fn next(&mut self) -> Result<T> {
        self.try_next().await?.ok_or(OneDriveError::NoMoreElements)
    }

    /// Next item, or `None` past the end
    pub async fn try_next(&mut self) -> Result<Option<T>> {
        if !self.has_next().await? {
            return Ok(None);
        }
        match self.buffer.pop_front() {
            Some(json) => T::hydrate(&json, &self.context).map(Some),
            None => Ok(None),
        }
    }

    /// Drains the remaining items
    pub async fn collect_all(&mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while let Some(item) = self.try_next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Turns the iterator into a stream; the stream ends after the first error
    pub fn into_stream(self) -> impl Stream<Item = Result<T>> {
        stream::try_unfold(self, |mut iterator| async move {
            let item = iterator.try_next().await?;
            Ok::<_, OneDriveError>(item.map(|item| (item, iterator)))
        })
    }
}

impl<T> fmt::Debug for CollectionIterator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionIterator")
            .field("flavor", &self.fetcher.flavor())
            .field("buffered", &self.buffer.len())
            .field("next_url", &self.next_url)
            .field("delta_link", &self.delta_link)
            .finish()
    }
}
