use crate::db::{Book, BookFilter, BookPage, BookPatch, BookQuery, NewBook, SortSpec};
use crate::error::FolioError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Page-size policy for list queries.
#[derive(Debug, Clone, Copy)]
pub struct PageLimits {
    pub default_limit: usize,
    pub max_limit: usize,
}

/// Raw `GET /books` query string. Everything arrives as text and is checked in
/// [`ListBooksParams::into_query`].
#[derive(Debug, Default, Deserialize)]
pub struct ListBooksParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
    pub genre: Option<String>,
    pub search: Option<String>,
}

impl ListBooksParams {
    pub fn into_query(self, limits: PageLimits) -> Result<BookQuery, FolioError> {
        let page = parse_positive("page", self.page.as_deref())?.unwrap_or(1);
        let limit = parse_positive("limit", self.limit.as_deref())?
            .unwrap_or(limits.default_limit)
            .min(limits.max_limit)
            .max(1);
        let sort = self
            .sort
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse::<SortSpec>)
            .transpose()?;

        Ok(BookQuery {
            filter: BookFilter {
                genre: self.genre,
                search: self.search,
            },
            sort,
            page,
            limit,
        })
    }
}

fn parse_positive(name: &str, raw: Option<&str>) -> Result<Option<usize>, FolioError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(Some(n)),
        _ => Err(FolioError::Validation(format!(
            "{name} must be a positive integer"
        ))),
    }
}

/// Body of `POST /books`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub published_year: Option<i32>,
    /// Kept loose: numbers and numeric strings are both accepted.
    pub price: Option<Value>,
}

impl CreateBookRequest {
    pub fn validate(self) -> Result<NewBook, FolioError> {
        let mut missing = Vec::new();
        if self.title.as_deref().is_none_or(|t| t.trim().is_empty()) {
            missing.push("title");
        }
        if self.author.as_deref().is_none_or(|a| a.trim().is_empty()) {
            missing.push("author");
        }
        let price = self.price.filter(|p| !p.is_null());
        if price.is_none() {
            missing.push("price");
        }
        if !missing.is_empty() {
            return Err(FolioError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        Ok(NewBook {
            title: self.title.unwrap_or_default(),
            author: self.author.unwrap_or_default(),
            genre: self.genre.unwrap_or_default(),
            published_year: self.published_year,
            price: parse_price(price.as_ref())?,
        })
    }
}

/// Body of `PATCH /books/{id}`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub published_year: Option<i32>,
    pub price: Option<Value>,
}

impl UpdateBookRequest {
    pub fn validate(self) -> Result<BookPatch, FolioError> {
        let price = match self.price.filter(|p| !p.is_null()) {
            Some(p) => Some(parse_price(Some(&p))?),
            None => None,
        };
        let patch = BookPatch {
            title: self.title,
            author: self.author,
            genre: self.genre,
            published_year: self.published_year,
            price,
        };
        if patch.is_empty() {
            return Err(FolioError::Validation(
                "Please provide at least one field to update".to_string(),
            ));
        }
        for (name, value) in [("title", &patch.title), ("author", &patch.author)] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(FolioError::Validation(format!("{name} must not be empty")));
            }
        }
        Ok(patch)
    }
}

fn parse_price(raw: Option<&Value>) -> Result<f64, FolioError> {
    let parsed = match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(p) if p.is_finite() && p >= 0.0 => Ok(p),
        _ => Err(FolioError::Validation(
            "Price must be a positive number".to_string(),
        )),
    }
}

#[derive(Debug, Serialize)]
pub struct BookData {
    pub book: Book,
}

/// `{"status": "success", "books": [...], "pagination": {...}}`
#[derive(Debug, Serialize)]
pub struct BookListResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub page: BookPage,
}
