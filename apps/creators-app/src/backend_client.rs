use async_trait::async_trait;
use axum::body::Bytes;
use creators_shared::api::{FaqEntry, MainSettings, TransactionPage, UserProfile, ValidationErrors};
use reqwest::{
    multipart::{Form, Part},
    Client, StatusCode,
};
use std::time::Duration;
use thiserror::Error;

const API_KEY_HEADER: &str = "X-API-KEY";
const RECEIPT_FIELD: &str = "payment_check";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("API key rejected by backend")]
    Unauthorized,
    #[error("backend responded with status {0}")]
    Status(u16),
    /// Connection, timeout or decoding failure; carries the raw error text.
    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Image the user picked as proof of a manual bank transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadStatus {
    /// 201
    Accepted,
    /// 400, with the first `non_field_errors` entry when the body has one
    Rejected { first_error: Option<String> },
    /// Any other status
    ServerError(u16),
}

#[async_trait]
pub trait Backend: Send + Sync {
    async fn main_settings(&self) -> Result<MainSettings, BackendError>;

    async fn profile(&self, api_key: &str) -> Result<UserProfile, BackendError>;

    async fn transaction_history(
        &self,
        api_key: &str,
        page: u32,
    ) -> Result<TransactionPage, BackendError>;

    async fn faqs(&self) -> Result<Vec<FaqEntry>, BackendError>;

    async fn upload_payment_check(
        &self,
        api_key: &str,
        receipt: &Receipt,
    ) -> Result<UploadStatus, BackendError>;
}

#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(3))
            .timeout(timeout)
            .build()?;

        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/common{}", self.base_url, path)
    }

    async fn get_public<T: for<'de> serde::Deserialize<'de>>(
        &self,
        path: &str,
    ) -> Result<T, BackendError> {
        let response = self.client.get(self.url(path)).send().await?;

        if !response.status().is_success() {
            return Err(BackendError::Status(response.status().as_u16()));
        }

        Ok(response.json().await?)
    }

    async fn get_authed<T: for<'de> serde::Deserialize<'de>>(
        &self,
        path: &str,
        api_key: &str,
    ) -> Result<T, BackendError> {
        let response = self
            .client
            .get(self.url(path))
            .header(API_KEY_HEADER, api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Err(BackendError::Unauthorized),
            status if !status.is_success() => Err(BackendError::Status(status.as_u16())),
            _ => Ok(response.json().await?),
        }
    }
}

#[async_trait]
impl Backend for BackendClient {
    async fn main_settings(&self) -> Result<MainSettings, BackendError> {
        self.get_public("/extra/main-settings/").await
    }

    async fn profile(&self, api_key: &str) -> Result<UserProfile, BackendError> {
        self.get_authed("/profile/me/", api_key).await
    }

    async fn transaction_history(
        &self,
        api_key: &str,
        page: u32,
    ) -> Result<TransactionPage, BackendError> {
        let path = format!("/profile/transaction-history/?page={}", page);
        self.get_authed(&path, api_key).await
    }

    async fn faqs(&self) -> Result<Vec<FaqEntry>, BackendError> {
        self.get_public("/extra/faq/").await
    }

    async fn upload_payment_check(
        &self,
        api_key: &str,
        receipt: &Receipt,
    ) -> Result<UploadStatus, BackendError> {
        let part = Part::bytes(receipt.bytes.to_vec())
            .file_name(receipt.file_name.clone())
            .mime_str(&receipt.content_type)?;
        let form = Form::new().part(RECEIPT_FIELD, part);

        let response = self
            .client
            .post(self.url("/profile/payment-check/"))
            .header(API_KEY_HEADER, api_key)
            .multipart(form)
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED => Ok(UploadStatus::Accepted),
            StatusCode::BAD_REQUEST => {
                // An unreadable 400 body still counts as a rejection
                let body = response
                    .json::<ValidationErrors>()
                    .await
                    .unwrap_or_default();
                Ok(UploadStatus::Rejected {
                    first_error: body.first().map(str::to_string),
                })
            }
            status => Ok(UploadStatus::ServerError(status.as_u16())),
        }
    }
}
