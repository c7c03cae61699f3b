use super::assets::Assets;
use super::models::{ListFilesQuery, ListFilesResponse};
use crate::error::Error;

/// Page-number iterator over [`Assets::list_files`].
///
/// Yields one response per page and stops after a page with `hasNext == false`
/// or after the first error.
#[derive(Debug, Clone)]
pub struct FilesPaginator {
    assets: Assets,
    query: ListFilesQuery,
    page_no: u32,
    has_next: bool,
}

impl FilesPaginator {
    pub(crate) fn new(assets: Assets, query: ListFilesQuery) -> Self {
        let page_no = query.page_no.unwrap_or(1);
        Self {
            assets,
            query,
            page_no,
            has_next: true,
        }
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    /// Page that the next call will request.
    pub fn page_no(&self) -> u32 {
        self.page_no
    }
}

impl Iterator for FilesPaginator {
    type Item = Result<ListFilesResponse, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.has_next {
            return None;
        }
        let query = ListFilesQuery {
            page_no: Some(self.page_no),
            ..self.query.clone()
        };
        match self.assets.list_files(&query) {
            Ok(resp) => {
                self.has_next = resp.page.has_next;
                let current = u32::try_from(resp.page.current).unwrap_or(self.page_no);
                self.page_no = current.max(self.page_no).saturating_add(1);
                tracing::debug!(page = current, has_next = self.has_next, "listed files page");
                Some(Ok(resp))
            }
            Err(e) => {
                self.has_next = false;
                Some(Err(e))
            }
        }
    }
}
