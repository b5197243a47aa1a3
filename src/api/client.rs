// src/api/client.rs

use reqwest::{header::AUTHORIZATION, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;

use crate::{
    common::error::{ApiError, AppError},
    storage::SessionStore,
};

/// Cliente HTTP do backend. Todo pedido leva o token bearer da sessão; sem
/// token o pedido vai assim mesmo e o backend decide (normalmente 401).
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, session: SessionStore) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url, session }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.auth_header() {
            Some(header) => builder.header(AUTHORIZATION, header),
            None => builder,
        }
    }

    // Envia o pedido e devolve o corpo JSON (`Null` para corpo vazio).
    async fn send(&self, builder: RequestBuilder, fallback: &str) -> Result<Value, AppError> {
        let response = self.authorized(builder).send().await?;
        let status = response.status();
        let url = response.url().path().to_string();
        let text = response.text().await?;

        if !status.is_success() {
            let message = ApiError::detail_or(&text, fallback);
            tracing::error!("🔥 {} em {}: {}", status, url, message);
            return Err(if status == StatusCode::UNAUTHORIZED {
                AppError::Unauthorized(message)
            } else {
                AppError::Backend { status, message }
            });
        }

        tracing::debug!("{} {}", status, url);
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| AppError::Schema(format!("corpo de {url} não é JSON: {e}")))
    }

    pub async fn get(&self, path: &str, fallback: &str) -> Result<Value, AppError> {
        self.send(self.http.get(self.url(path)), fallback).await
    }

    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
        fallback: &str,
    ) -> Result<Value, AppError> {
        self.send(self.http.get(self.url(path)).query(query), fallback).await
    }

    /// Busca um único registro. Qualquer resposta de erro (menos 401) e o
    /// corpo `null` que o backend devolve para id inexistente viram `NotFound`.
    pub async fn get_one(&self, path: &str, fallback: &str) -> Result<Value, AppError> {
        match self.get(path, fallback).await {
            Ok(Value::Null) => Err(AppError::NotFound(fallback.to_string())),
            Ok(body) => Ok(body),
            Err(AppError::Backend { message, .. }) => Err(AppError::NotFound(message)),
            Err(e) => Err(e),
        }
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> Result<Value, AppError> {
        self.send(self.http.post(self.url(path)).json(body), fallback).await
    }

    pub async fn post_form<F: Serialize + ?Sized>(
        &self,
        path: &str,
        form: &F,
        fallback: &str,
    ) -> Result<Value, AppError> {
        self.send(self.http.post(self.url(path)).form(form), fallback).await
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> Result<Value, AppError> {
        self.send(self.http.put(self.url(path)).json(body), fallback).await
    }

    pub async fn delete(&self, path: &str, fallback: &str) -> Result<(), AppError> {
        self.send(self.http.delete(self.url(path)), fallback).await?;
        Ok(())
    }
}

/// Codifica um trecho de caminho (nomes de bairro e rua têm espaço e acento).
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}
