use crate::db::models::{Book, BookPatch, NewBook};
use crate::db::query::{BookPage, BookQuery, Pagination};
use uuid::Uuid;

/// In-memory book collection kept in insertion order.
///
/// Absence is reported through `Option`/`bool`; turning it into a domain
/// error is the caller's job.
#[derive(Debug, Default)]
pub struct CatalogStore {
    books: Vec<Book>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn create(&mut self, data: NewBook) -> Book {
        let book = Book::from(data);
        self.books.push(book.clone());
        book
    }

    /// Filter, then sort (stable), then cut out one page.
    pub fn find_all(&self, query: &BookQuery) -> BookPage {
        let page = query.page.max(1);
        let limit = query.limit.max(1);

        let mut matched: Vec<&Book> = self
            .books
            .iter()
            .filter(|b| query.filter.matches(b))
            .collect();

        if let Some(sort) = query.sort {
            matched.sort_by(|a, b| sort.compare(a, b));
        }

        let total = matched.len();
        let start = (page - 1).saturating_mul(limit);
        let books = matched
            .into_iter()
            .skip(start)
            .take(limit)
            .cloned()
            .collect();

        BookPage {
            books,
            pagination: Pagination {
                total,
                page,
                limit,
                total_pages: total.div_ceil(limit),
            },
        }
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<Book> {
        self.books.iter().find(|b| b.id == id).cloned()
    }

    pub fn update(&mut self, id: Uuid, patch: BookPatch) -> Option<Book> {
        let slot = self.books.iter_mut().find(|b| b.id == id)?;
        *slot = slot.merged(patch);
        Some(slot.clone())
    }

    pub fn delete(&mut self, id: Uuid) -> bool {
        match self.books.iter().position(|b| b.id == id) {
            Some(idx) => {
                self.books.remove(idx);
                true
            }
            None => false,
        }
    }
}
