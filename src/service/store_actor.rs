use crate::db::{
    Book, BookPage, BookPatch, BookQuery, CatalogStore, CredentialStore, NewBook, User,
};
use crate::error::FolioError;

use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use tracing::{debug, info};
use uuid::Uuid;

/// Messages handled by the store actor. Each one is a single store operation.
#[derive(Debug)]
pub enum StoreMessage {
    CreateBook(NewBook, RpcReplyPort<Book>),
    FindBooks(BookQuery, RpcReplyPort<BookPage>),
    FindBook(Uuid, RpcReplyPort<Option<Book>>),
    UpdateBook(Uuid, BookPatch, RpcReplyPort<Option<Book>>),
    DeleteBook(Uuid, RpcReplyPort<bool>),

    /// Insert a user; replies `None` if the username is taken.
    InsertUser(String, String, RpcReplyPort<Option<User>>),
    FindUserByName(String, RpcReplyPort<Option<User>>),
    FindUserById(Uuid, RpcReplyPort<Option<User>>),
}

/// Handle for talking to the store actor.
#[derive(Clone)]
pub struct StoreHandle {
    actor: ActorRef<StoreMessage>,
}

impl StoreHandle {
    pub async fn create_book(&self, data: NewBook) -> Result<Book, FolioError> {
        ractor::call!(self.actor, StoreMessage::CreateBook, data)
            .map_err(|e| FolioError::StoreUnavailable(format!("CreateBook RPC failed: {e}")))
    }

    pub async fn find_books(&self, query: BookQuery) -> Result<BookPage, FolioError> {
        ractor::call!(self.actor, StoreMessage::FindBooks, query)
            .map_err(|e| FolioError::StoreUnavailable(format!("FindBooks RPC failed: {e}")))
    }

    pub async fn find_book(&self, id: Uuid) -> Result<Option<Book>, FolioError> {
        ractor::call!(self.actor, StoreMessage::FindBook, id)
            .map_err(|e| FolioError::StoreUnavailable(format!("FindBook RPC failed: {e}")))
    }

    pub async fn update_book(
        &self,
        id: Uuid,
        patch: BookPatch,
    ) -> Result<Option<Book>, FolioError> {
        ractor::call!(self.actor, StoreMessage::UpdateBook, id, patch)
            .map_err(|e| FolioError::StoreUnavailable(format!("UpdateBook RPC failed: {e}")))
    }

    pub async fn delete_book(&self, id: Uuid) -> Result<bool, FolioError> {
        ractor::call!(self.actor, StoreMessage::DeleteBook, id)
            .map_err(|e| FolioError::StoreUnavailable(format!("DeleteBook RPC failed: {e}")))
    }

    pub async fn insert_user(
        &self,
        username: impl Into<String>,
        password_hash: String,
    ) -> Result<Option<User>, FolioError> {
        ractor::call!(
            self.actor,
            StoreMessage::InsertUser,
            username.into(),
            password_hash
        )
        .map_err(|e| FolioError::StoreUnavailable(format!("InsertUser RPC failed: {e}")))
    }

    pub async fn find_user_by_name(
        &self,
        username: impl AsRef<str>,
    ) -> Result<Option<User>, FolioError> {
        ractor::call!(
            self.actor,
            StoreMessage::FindUserByName,
            username.as_ref().to_string()
        )
        .map_err(|e| FolioError::StoreUnavailable(format!("FindUserByName RPC failed: {e}")))
    }

    pub async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, FolioError> {
        ractor::call!(self.actor, StoreMessage::FindUserById, id)
            .map_err(|e| FolioError::StoreUnavailable(format!("FindUserById RPC failed: {e}")))
    }
}

/// State owned by the actor; nothing else can reach it.
struct StoreActorState {
    catalog: CatalogStore,
    users: CredentialStore,
}

struct StoreActor;

#[ractor::async_trait]
impl Actor for StoreActor {
    type Msg = StoreMessage;
    type State = StoreActorState;
    type Arguments = ();

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        _arguments: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        info!("StoreActor started with empty catalog and credential stores");
        Ok(StoreActorState {
            catalog: CatalogStore::new(),
            users: CredentialStore::new(),
        })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            StoreMessage::CreateBook(data, rp) => {
                let book = state.catalog.create(data);
                debug!(id = %book.id, total = state.catalog.len(), "book inserted");
                let _ = rp.send(book);
            }
            StoreMessage::FindBooks(query, rp) => {
                let _ = rp.send(state.catalog.find_all(&query));
            }
            StoreMessage::FindBook(id, rp) => {
                let _ = rp.send(state.catalog.find_by_id(id));
            }
            StoreMessage::UpdateBook(id, patch, rp) => {
                let _ = rp.send(state.catalog.update(id, patch));
            }
            StoreMessage::DeleteBook(id, rp) => {
                let removed = state.catalog.delete(id);
                debug!(%id, removed, "book delete processed");
                let _ = rp.send(removed);
            }
            StoreMessage::InsertUser(username, hash, rp) => {
                let _ = rp.send(state.users.insert(username, hash));
            }
            StoreMessage::FindUserByName(username, rp) => {
                let _ = rp.send(state.users.find_by_username(&username));
            }
            StoreMessage::FindUserById(id, rp) => {
                let _ = rp.send(state.users.find_by_id(id));
            }
        }
        Ok(())
    }
}

/// Spawn an unnamed store actor (so tests can run several side by side).
pub async fn spawn() -> Result<StoreHandle, FolioError> {
    let (actor, _jh) = Actor::spawn(None, StoreActor, ())
        .await
        .map_err(|e| FolioError::StoreUnavailable(format!("failed to spawn StoreActor: {e}")))?;
    Ok(StoreHandle { actor })
}
