use crate::db::models::Book;
use crate::error::FolioError;
use serde::Serialize;
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Title,
    Author,
    Genre,
    PublishedYear,
    Price,
    CreatedAt,
}

impl SortField {
    fn compare(self, a: &Book, b: &Book) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Title => a.title.cmp(&b.title),
            SortField::Author => a.author.cmp(&b.author),
            SortField::Genre => a.genre.cmp(&b.genre),
            SortField::PublishedYear => a.published_year.cmp(&b.published_year),
            SortField::Price => a.price.total_cmp(&b.price),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        }
    }
}

impl FromStr for SortField {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Self::Id),
            "title" => Ok(Self::Title),
            "author" => Ok(Self::Author),
            "genre" => Ok(Self::Genre),
            "publishedYear" => Ok(Self::PublishedYear),
            "price" => Ok(Self::Price),
            "createdAt" => Ok(Self::CreatedAt),
            other => Err(FolioError::Validation(format!(
                "Invalid sort field: {other}"
            ))),
        }
    }
}

/// A sort key such as `price` or `-createdAt` (leading `-` means descending).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub descending: bool,
}

impl SortSpec {
    pub fn compare(&self, a: &Book, b: &Book) -> Ordering {
        let ord = self.field.compare(a, b);
        if self.descending { ord.reverse() } else { ord }
    }
}

impl FromStr for SortSpec {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (descending, name) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        Ok(Self {
            field: name.parse()?,
            descending,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub genre: Option<String>,
    pub search: Option<String>,
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        let genre_ok = non_empty(&self.genre).is_none_or(|g| contains_ci(&book.genre, g));
        let search_ok = non_empty(&self.search)
            .is_none_or(|s| contains_ci(&book.title, s) || contains_ci(&book.author, s));
        genre_ok && search_ok
    }
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Everything `CatalogStore::find_all` needs. `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookQuery {
    pub filter: BookFilter,
    pub sort: Option<SortSpec>,
    pub page: usize,
    pub limit: usize,
}

impl Default for BookQuery {
    fn default() -> Self {
        Self {
            filter: BookFilter::default(),
            sort: None,
            page: 1,
            limit: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookPage {
    pub books: Vec<Book>,
    pub pagination: Pagination,
}
