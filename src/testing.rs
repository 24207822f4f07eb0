//! 测试用的脚本化后端替身

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::client::AccountsApi;
use crate::error::ApiError;
use crate::models::{
    Account, AccountListResponse, LoginRequest, LoginResponse, NewAccountInput,
};

pub(crate) fn account(username: &str) -> Account {
    Account {
        username: username.to_string(),
        password: "pw".to_string(),
        status: "正常".to_string(),
        ..Account::default()
    }
}

/// 可脚本化的 [`AccountsApi`] 替身：结果与延迟可按测试改写，
/// 并记录调用次数和最近一次的请求参数。
pub(crate) struct MockApi {
    pub list_result: Mutex<Result<AccountListResponse, ApiError>>,
    pub login_result: Mutex<Result<LoginResponse, ApiError>>,
    pub mutation_result: Mutex<Result<(), ApiError>>,
    /// fetch_accounts 返回前的人为延迟
    pub fetch_delay: Mutex<Option<Duration>>,

    pub fetch_count: AtomicUsize,
    pub login_count: AtomicUsize,
    pub create_count: AtomicUsize,
    pub delete_count: AtomicUsize,
    pub ban_count: AtomicUsize,
    pub game_id_count: AtomicUsize,

    pub last_login: Mutex<Option<LoginRequest>>,
    pub last_create: Mutex<Option<NewAccountInput>>,
    pub last_delete: Mutex<Option<String>>,
    pub last_ban: Mutex<Option<(String, u32)>>,
    pub last_game_id: Mutex<Option<(String, String)>>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            list_result: Mutex::new(Ok(AccountListResponse::default())),
            login_result: Mutex::new(Ok(LoginResponse::default())),
            mutation_result: Mutex::new(Ok(())),
            fetch_delay: Mutex::new(None),
            fetch_count: AtomicUsize::new(0),
            login_count: AtomicUsize::new(0),
            create_count: AtomicUsize::new(0),
            delete_count: AtomicUsize::new(0),
            ban_count: AtomicUsize::new(0),
            game_id_count: AtomicUsize::new(0),
            last_login: Mutex::new(None),
            last_create: Mutex::new(None),
            last_delete: Mutex::new(None),
            last_ban: Mutex::new(None),
            last_game_id: Mutex::new(None),
        }
    }
}

impl MockApi {
    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        let api = Self::default();
        *api.list_result.lock() = Ok(AccountListResponse {
            accounts,
            unbanned: Vec::new(),
        });
        api
    }
}

#[async_trait]
impl AccountsApi for MockApi {
    async fn fetch_accounts(&self) -> Result<AccountListResponse, ApiError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        let delay = *self.fetch_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.list_result.lock().clone()
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.login_count.fetch_add(1, Ordering::SeqCst);
        *self.last_login.lock() = Some(request.clone());
        self.login_result.lock().clone()
    }

    async fn create_account(&self, input: &NewAccountInput) -> Result<(), ApiError> {
        self.create_count.fetch_add(1, Ordering::SeqCst);
        *self.last_create.lock() = Some(input.clone());
        self.mutation_result.lock().clone()
    }

    async fn delete_account(&self, username: &str) -> Result<(), ApiError> {
        self.delete_count.fetch_add(1, Ordering::SeqCst);
        *self.last_delete.lock() = Some(username.to_string());
        self.mutation_result.lock().clone()
    }

    async fn set_ban(&self, username: &str, days: u32) -> Result<(), ApiError> {
        self.ban_count.fetch_add(1, Ordering::SeqCst);
        *self.last_ban.lock() = Some((username.to_string(), days));
        self.mutation_result.lock().clone()
    }

    async fn update_game_id(&self, username: &str, game_id: &str) -> Result<(), ApiError> {
        self.game_id_count.fetch_add(1, Ordering::SeqCst);
        *self.last_game_id.lock() = Some((username.to_string(), game_id.to_string()));
        self.mutation_result.lock().clone()
    }
}
