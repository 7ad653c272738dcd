//! REST client for the backend. Every call is a single request: no retries,
//! no cancellation. Whichever response arrives last is what a page renders.

pub mod envelope;

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::AppSettings;
use crate::errors::AppError;
pub use envelope::{http_error, ApiEnvelope};

pub const ACCOUNTS: &str = "/api/contas";
pub const CARDS: &str = "/api/cartoes";
pub const CATEGORIES: &str = "/api/categorias";
pub const EXPENSES: &str = "/api/despesas";
pub const INCOMES: &str = "/api/receitas";
pub const VEHICLES: &str = "/api/veiculos";
pub const FINANCINGS: &str = "/api/financiamentos";

pub fn vehicle_expenses(vehicle_id: i64) -> String {
    format!("{}/{}/despesas", VEHICLES, vehicle_id)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &AppSettings) -> Self {
        Self::new(settings.api_base_url.clone())
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn item_url(&self, path: &str, id: i64) -> String {
        format!("{}/{}", self.url(path), id)
    }

    async fn send(
        &self,
        method: &'static str,
        url: String,
        builder: RequestBuilder,
    ) -> Result<Response, AppError> {
        tracing::debug!(method, url = %url, "request");
        let builder = builder.header("Accept", "application/json");
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(method, url = %url, error = %e, "request failed");
            AppError::from(e)
        })?;
        Self::check_status(method, &url, response).await
    }

    async fn send_json<B: Serialize>(
        &self,
        method: &'static str,
        url: String,
        builder: RequestBuilder,
        body: &B,
    ) -> Result<Response, AppError> {
        tracing::debug!(method, url = %url, "request");
        let request = builder
            .header("Accept", "application/json")
            .json(body)
            .map_err(AppError::from)?;
        let response = request.send().await.map_err(|e| {
            tracing::warn!(method, url = %url, error = %e, "request failed");
            AppError::from(e)
        })?;
        Self::check_status(method, &url, response).await
    }

    async fn check_status(
        method: &'static str,
        url: &str,
        response: Response,
    ) -> Result<Response, AppError> {
        if response.ok() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let err = http_error(status, &body);
        tracing::warn!(method, url, status, error = %err, "request rejected");
        Err(err)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
        let envelope = response.json::<ApiEnvelope<T>>().await?;
        envelope.into_data()
    }

    pub async fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, AppError> {
        let url = self.url(path);
        let response = self.send("GET", url.clone(), Request::get(&url)).await?;
        Self::decode(response).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, id: i64) -> Result<T, AppError> {
        let url = self.item_url(path, id);
        let response = self.send("GET", url.clone(), Request::get(&url)).await?;
        Self::decode(response).await
    }

    pub async fn create<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let url = self.url(path);
        let response = self
            .send_json("POST", url.clone(), Request::post(&url), body)
            .await?;
        Self::decode(response).await
    }

    pub async fn update<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        id: i64,
        body: &B,
    ) -> Result<T, AppError> {
        let url = self.item_url(path, id);
        let response = self
            .send_json("PUT", url.clone(), Request::put(&url), body)
            .await?;
        Self::decode(response).await
    }

    /// Creates when `id` is `None`, updates otherwise.
    pub async fn save<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        id: Option<i64>,
        body: &B,
    ) -> Result<T, AppError> {
        match id {
            Some(id) => self.update(path, id, body).await,
            None => self.create(path, body).await,
        }
    }

    pub async fn delete(&self, path: &str, id: i64) -> Result<(), AppError> {
        let url = self.item_url(path, id);
        let response = self.send("DELETE", url.clone(), Request::delete(&url)).await?;
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(());
        }
        serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&body)?.into_unit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_without_double_slashes() {
        let client = ApiClient::new("http://localhost:8000/");
        assert_eq!(client.url(CATEGORIES), "http://localhost:8000/api/categorias");
        assert_eq!(
            client.item_url(EXPENSES, 4),
            "http://localhost:8000/api/despesas/4"
        );
        assert_eq!(vehicle_expenses(2), "/api/veiculos/2/despesas");
        assert_eq!(ApiClient::new("").url(ACCOUNTS), "/api/contas");
    }
}
