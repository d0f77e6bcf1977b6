use crate::db::{Book, BookPage, BookPatch, BookQuery, NewBook};
use crate::error::FolioError;
use crate::service::store_actor::StoreHandle;
use tracing::info;
use uuid::Uuid;

/// Book operations with "not found" translated into `FolioError::BookNotFound`.
#[derive(Clone)]
pub struct CatalogService {
    store: StoreHandle,
}

impl CatalogService {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    pub async fn create_book(&self, data: NewBook) -> Result<Book, FolioError> {
        let book = self.store.create_book(data).await?;
        info!(id = %book.id, title = %book.title, "book created");
        Ok(book)
    }

    pub async fn get_all_books(&self, query: BookQuery) -> Result<BookPage, FolioError> {
        self.store.find_books(query).await
    }

    pub async fn get_book_by_id(&self, id: Uuid) -> Result<Book, FolioError> {
        self.store
            .find_book(id)
            .await?
            .ok_or(FolioError::BookNotFound)
    }

    pub async fn update_book(&self, id: Uuid, patch: BookPatch) -> Result<Book, FolioError> {
        let book = self
            .store
            .update_book(id, patch)
            .await?
            .ok_or(FolioError::BookNotFound)?;
        info!(%id, "book updated");
        Ok(book)
    }

    pub async fn delete_book(&self, id: Uuid) -> Result<(), FolioError> {
        if !self.store.delete_book(id).await? {
            return Err(FolioError::BookNotFound);
        }
        info!(%id, "book deleted");
        Ok(())
    }
}
