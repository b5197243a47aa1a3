// src/api.rs
//
// Acesso ao backend REST. Os serviços falam só com o `ApiClient`; formato de
// listagem, cabeçalho de autenticação e mapeamento de erros ficam aqui.

pub mod client;
pub mod list;

pub use client::ApiClient;
pub use list::{page_from, unwrap_list, ListFilters, Page};
