use crate::client::error::{ClientError, Result as ClientResult};
use crate::client::member_directory::{MemberDirectory, MemberHealth, MemberRecord};

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Method, header::AUTHORIZATION};
use serde::de::DeserializeOwned;

/// HTTP client for the member-service REST API
pub struct MemberClient {
    pub base_url: String,
    client: ReqwestClient,
}

impl MemberClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - member-service URL (e.g., "http://127.0.0.1:8082")
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let client = ReqwestClient::builder().build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn request(&self, method: Method, path: &str, authorization: Option<&str>) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, &url);

        if let Some(value) = authorization {
            req = req.header(AUTHORIZATION, value);
        }

        req
    }

    async fn execute<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> ClientResult<T> {
        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ClientError::status(status.as_u16()));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl MemberDirectory for MemberClient {
    async fn member_by_id(&self, id: i64, authorization: Option<&str>) -> ClientResult<MemberRecord> {
        log::debug!("Fetching member {} from {}", id, self.base_url);
        let req = self.request(Method::GET, &format!("/members/{}", id), authorization);
        self.execute(req).await
    }

    async fn health(&self) -> ClientResult<MemberHealth> {
        let req = self.request(Method::GET, "/members/health", None);
        self.execute(req).await
    }
}
