// src/storage.rs
//
// Armazenamento durável do lado do cliente, no papel do localStorage do
// navegador: chave/valor de strings, sem transações, último escritor vence.

pub mod file_store;
pub mod memory_store;
pub mod session_store;

pub use file_store::FileStorage;
pub use memory_store::MemoryStorage;
pub use session_store::SessionStore;

use crate::common::error::AppError;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const CURRENT_USER_KEY: &str = "current_user";
// Chave usada pelas primeiras versões do cliente; só é lida, nunca escrita.
pub const LEGACY_TOKEN_KEY: &str = "auth_token";

pub trait DurableStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, AppError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove_item(&self, key: &str) -> Result<(), AppError>;
}
