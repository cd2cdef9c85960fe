use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client as HttpClient, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::ContactStore;
use crate::api::error::ApiError;
use crate::api::models::{Contact, ContactFormData, ContactPatch, ContactsResponse, ListQuery};

/// REST adapter for the contacts backend. Constructed once and shared by the
/// views; holds no state besides the connection pool and base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: Url) -> Result<Self, ApiError> {
        Self::build(base_url, HttpClient::builder())
    }

    pub fn with_timeout(base_url: Url, timeout: Duration) -> Result<Self, ApiError> {
        Self::build(base_url, HttpClient::builder().timeout(timeout))
    }

    fn build(base_url: Url, builder: reqwest::ClientBuilder) -> Result<Self, ApiError> {
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Remote {
                status: None,
                message: format!("{base_url} cannot be used as a base URL"),
            });
        }
        let http = builder.build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/api/contacts[/{id}]`. A base that already ends in `/api` is
    /// not given a second one.
    pub fn endpoint(&self, id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        let ends_with_api = url
            .path_segments()
            .and_then(|segs| segs.filter(|s| !s.is_empty()).last())
            == Some("api");
        if let Ok(mut segs) = url.path_segments_mut() {
            segs.pop_if_empty();
            if !ends_with_api {
                segs.push("api");
            }
            segs.push("contacts");
            if let Some(id) = id {
                segs.push(id);
            }
        }
        url
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, ApiError> {
        let resp = req.send().await.map_err(|e| {
            warn!("contacts request failed: {e}");
            ApiError::from(e)
        })?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        let err = ApiError::from_response(status, &body);
        warn!("contacts request rejected: {err}");
        Err(err)
    }

    async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ContactStore for ApiClient {
    async fn list(&self, query: &ListQuery) -> Result<ContactsResponse, ApiError> {
        let url = self.endpoint(None);
        let pairs = query.to_pairs();
        debug!("GET {url} {pairs:?}");
        let resp = self.send(self.http.get(url).query(&pairs)).await?;
        Self::read_json(resp).await
    }

    async fn get(&self, id: &str) -> Result<Contact, ApiError> {
        let url = self.endpoint(Some(id));
        debug!("GET {url}");
        let resp = self.send(self.http.get(url)).await?;
        Self::read_json(resp).await
    }

    async fn create(&self, data: &ContactFormData) -> Result<Contact, ApiError> {
        let url = self.endpoint(None);
        debug!("POST {url}");
        let resp = self.send(self.http.post(url).json(data)).await?;
        Self::read_json(resp).await
    }

    async fn update(&self, id: &str, patch: &ContactPatch) -> Result<Contact, ApiError> {
        let url = self.endpoint(Some(id));
        debug!("PUT {url}");
        let resp = self.send(self.http.put(url).json(patch)).await?;
        Self::read_json(resp).await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(Some(id));
        debug!("DELETE {url}");
        self.send(self.http.delete(url)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(Url::parse(base).unwrap()).unwrap()
    }

    #[test]
    fn endpoint_appends_api_path() {
        let c = client("http://localhost:3001");
        assert_eq!(c.endpoint(None).as_str(), "http://localhost:3001/api/contacts");
        assert_eq!(
            c.endpoint(Some("abc")).as_str(),
            "http://localhost:3001/api/contacts/abc"
        );
    }

    #[test]
    fn endpoint_reuses_existing_api_suffix() {
        let c = client("https://example.com/backend/api/");
        assert_eq!(
            c.endpoint(None).as_str(),
            "https://example.com/backend/api/contacts"
        );
    }

    #[test]
    fn endpoint_escapes_ids() {
        let c = client("http://localhost:3001");
        assert_eq!(
            c.endpoint(Some("a/b c")).as_str(),
            "http://localhost:3001/api/contacts/a%2Fb%20c"
        );
    }

    #[test]
    fn rejects_non_base_urls() {
        assert!(ApiClient::new(Url::parse("mailto:someone@example.com").unwrap()).is_err());
    }
}
