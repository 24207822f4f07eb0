//! 账号数据模型与接口报文类型
//!
//! `username` 是账号的稳定主键，所有查找与更新都以它为键。
//! `status` 是服务端下发的自由格式字符串，客户端按前缀/子串规则
//! 解释其语义，见 [`Account::status_kind`]。

use serde::{Deserialize, Serialize};

/// 封禁时长选项（天），由选择菜单提供
pub const BAN_DAY_OPTIONS: [u32; 4] = [1, 3, 7, 30];

/// 服务端业务错误码
pub mod error_codes {
    /// 未知错误
    pub const UNKNOWN_ERROR: i64 = 1000;
    /// 无效的参数
    pub const INVALID_PARAMS: i64 = 1001;
    /// 未找到 Steam 客户端
    pub const STEAM_NOT_FOUND: i64 = 2000;
    /// Steam 启动失败
    pub const STEAM_LAUNCH_FAILED: i64 = 2001;
    /// Steam 登录失败（密码登录超时）
    pub const STEAM_LOGIN_FAILED: i64 = 2002;
    /// Steam 配置错误
    pub const STEAM_CONFIG_ERROR: i64 = 2003;
    /// Steam 进程操作失败
    pub const STEAM_PROCESS_ERROR: i64 = 2004;
    /// 账号不存在
    pub const ACCOUNT_NOT_FOUND: i64 = 3000;
    /// 账号已存在
    pub const ACCOUNT_EXISTS: i64 = 3001;
    /// 密码错误
    pub const INVALID_PASSWORD: i64 = 3002;
    /// 账号已被封禁
    pub const ACCOUNT_BANNED: i64 = 3003;
}

/// 账号记录
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub game_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub steam_id: String,
    #[serde(default)]
    pub persona_name: String,
    #[serde(default)]
    pub last_login: String,
    /// 是否已缓存凭据、可免密快速切换
    #[serde(default)]
    pub can_quick_switch: bool,
    /// 行内登录进行中的瞬态标记，不参与序列化
    #[serde(skip)]
    pub is_logging_in: bool,
}

/// status 字符串的客户端语义
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatusKind {
    /// 恰为 "正常"
    Normal,
    /// 恰为 "已解封"
    Unbanned,
    /// 包含 "登录失败"
    LoginFailed,
    /// 其余内容视为封禁倒计时文本（如 "03-15 18:00"）
    Banned,
}

impl Account {
    /// 解释服务端下发的状态串
    pub fn status_kind(&self) -> AccountStatusKind {
        if self.status == "正常" {
            AccountStatusKind::Normal
        } else if self.status == "已解封" {
            AccountStatusKind::Unbanned
        } else if self.status.contains("登录失败") {
            AccountStatusKind::LoginFailed
        } else {
            AccountStatusKind::Banned
        }
    }
}

/// 添加/编辑表单输入
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewAccountInput {
    pub username: String,
    pub password: String,
}

/// GET /api/accounts 成功响应
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountListResponse {
    #[serde(default)]
    pub accounts: Vec<Account>,
    /// 本次检查中刚解除封禁的账号名
    #[serde(default)]
    pub unbanned: Vec<String>,
}

/// POST /api/login 请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remember_password: Option<bool>,
}

/// POST /api/login 成功响应
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    /// 服务端要求前端整表刷新
    #[serde(default)]
    pub refresh: bool,
}

/// 服务端业务错误响应体
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

/// POST /api/accounts/{username}/ban 请求体
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BanRequest {
    pub days: u32,
}

/// PUT /api/accounts/{username}/game_id 请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameIdRequest {
    pub game_id: String,
}
