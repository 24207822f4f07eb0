//! 账号 REST API 客户端
//!
//! [`AccountsApi`] 抽象六个后端端点，刷新控制与操作分发都只依赖
//! 该抽象；[`HttpAccountsApi`] 是基于 reqwest 的实现。
//! 业务错误体（`status:"error"`）即使随 4xx 状态下发也会被识别。

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::config::DashboardConfig;
use crate::error::ApiError;
use crate::models::{
    AccountListResponse, BanRequest, ErrorBody, GameIdRequest, LoginRequest, LoginResponse,
    NewAccountInput,
};

/// 账号后端接口
#[async_trait]
pub trait AccountsApi: Send + Sync {
    /// GET /api/accounts
    async fn fetch_accounts(&self) -> Result<AccountListResponse, ApiError>;

    /// POST /api/login
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;

    /// POST /api/accounts
    async fn create_account(&self, input: &NewAccountInput) -> Result<(), ApiError>;

    /// DELETE /api/accounts/{username}
    async fn delete_account(&self, username: &str) -> Result<(), ApiError>;

    /// POST /api/accounts/{username}/ban
    async fn set_ban(&self, username: &str, days: u32) -> Result<(), ApiError>;

    /// PUT /api/accounts/{username}/game_id
    async fn update_game_id(&self, username: &str, game_id: &str) -> Result<(), ApiError>;
}

/// 基于 reqwest 的账号后端客户端
pub struct HttpAccountsApi {
    client: Client,
    base_url: Url,
}

impl HttpAccountsApi {
    pub fn new(config: &DashboardConfig) -> Result<Self, ApiError> {
        let base_url = config
            .base_url
            .parse::<Url>()
            .map_err(|err| ApiError::Transport(format!("无效的服务地址 {}: {}", config.base_url, err)))?;
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|err| ApiError::Transport(format!("HTTP 客户端构建失败: {}", err)))?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|err| ApiError::Transport(format!("无效的请求路径 {}: {}", path, err)))
    }

    fn account_path(username: &str, suffix: &str) -> String {
        format!("/api/accounts/{}{}", urlencoding::encode(username), suffix)
    }
}

fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

/// 分类响应并解析成功体
///
/// 先识别业务错误体，再看 HTTP 状态，最后才反序列化成功 shape。
async fn classify_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(transport)?;

    if let Ok(body) = serde_json::from_slice::<ErrorBody>(&bytes) {
        if body.status.as_deref() == Some("error") {
            return Err(ApiError::App {
                code: body.code,
                message: body.message.unwrap_or_default(),
            });
        }
    }
    if !status.is_success() {
        return Err(ApiError::Http(status.as_u16()));
    }
    serde_json::from_slice::<T>(&bytes).map_err(|err| ApiError::Decode(err.to_string()))
}

/// 分类响应，成功时忽略响应体内容
async fn classify_ok(response: reqwest::Response) -> Result<(), ApiError> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(transport)?;

    if let Ok(body) = serde_json::from_slice::<ErrorBody>(&bytes) {
        if body.status.as_deref() == Some("error") {
            return Err(ApiError::App {
                code: body.code,
                message: body.message.unwrap_or_default(),
            });
        }
    }
    if !status.is_success() {
        return Err(ApiError::Http(status.as_u16()));
    }
    Ok(())
}

#[async_trait]
impl AccountsApi for HttpAccountsApi {
    async fn fetch_accounts(&self) -> Result<AccountListResponse, ApiError> {
        let url = self.endpoint("/api/accounts")?;
        let response = self.client.get(url).send().await.map_err(transport)?;
        classify_json(response).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let url = self.endpoint("/api/login")?;
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(transport)?;
        classify_json(response).await
    }

    async fn create_account(&self, input: &NewAccountInput) -> Result<(), ApiError> {
        let url = self.endpoint("/api/accounts")?;
        let response = self
            .client
            .post(url)
            .json(input)
            .send()
            .await
            .map_err(transport)?;
        classify_ok(response).await
    }

    async fn delete_account(&self, username: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&Self::account_path(username, ""))?;
        let response = self.client.delete(url).send().await.map_err(transport)?;
        classify_ok(response).await
    }

    async fn set_ban(&self, username: &str, days: u32) -> Result<(), ApiError> {
        let url = self.endpoint(&Self::account_path(username, "/ban"))?;
        let response = self
            .client
            .post(url)
            .json(&BanRequest { days })
            .send()
            .await
            .map_err(transport)?;
        classify_ok(response).await
    }

    async fn update_game_id(&self, username: &str, game_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&Self::account_path(username, "/game_id"))?;
        let response = self
            .client
            .put(url)
            .json(&GameIdRequest {
                game_id: game_id.to_string(),
            })
            .send()
            .await
            .map_err(transport)?;
        classify_ok(response).await
    }
}
