//! 账号 API 错误类型
//!
//! 区分传输层失败、HTTP 状态异常与服务端业务错误。
//! 业务错误体即使随 4xx 状态下发也会被解析为 `App` 变体。

use thiserror::Error;

/// 账号 API 错误
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// 网络不可达或请求发送失败
    #[error("网络请求失败: {0}")]
    Transport(String),

    /// 非 2xx 状态且响应体不含业务错误信息
    #[error("HTTP 状态异常: {0}")]
    Http(u16),

    /// 服务端返回 status:"error" 的业务错误
    #[error("{message}")]
    App {
        /// 业务错误码，见 [`crate::models::error_codes`]
        code: Option<i64>,
        message: String,
    },

    /// 响应体解析失败
    #[error("响应解析失败: {0}")]
    Decode(String),
}

impl ApiError {
    /// 业务错误码（仅 `App` 变体携带）
    pub fn code(&self) -> Option<i64> {
        match self {
            ApiError::App { code, .. } => *code,
            _ => None,
        }
    }
}

impl From<ApiError> for String {
    fn from(err: ApiError) -> Self {
        err.to_string()
    }
}

impl serde::Serialize for ApiError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
