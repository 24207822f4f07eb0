//! 账号操作分发
//!
//! 所有操作同一骨架：发请求、等待、成功后就地调账/通知、
//! 失败只通知不改状态、终结步骤无条件执行。错误不向上传播，
//! 统一转成 [`UiEvent`](crate::notify::UiEvent) 交给渲染层。

use std::sync::Arc;

use anyhow::anyhow;
use parking_lot::Mutex;

use crate::client::AccountsApi;
use crate::confirm::{ConfirmGate, ConfirmKind, ConfirmRequest};
use crate::error::ApiError;
use crate::models::{error_codes, LoginRequest, NewAccountInput, BAN_DAY_OPTIONS};
use crate::notify::Notifier;
use crate::refresh::RefreshController;
use crate::store::AccountStore;

/// 添加/编辑对话框状态（单实例）
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub visible: bool,
    pub username: String,
    pub password: String,
}

#[derive(Default)]
pub struct AccountForm {
    state: Mutex<FormState>,
}

impl AccountForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// 打开空白表单（添加）
    pub fn open_blank(&self) {
        *self.state.lock() = FormState {
            visible: true,
            ..FormState::default()
        };
    }

    /// 按已有行预填后打开（编辑）
    pub fn open_with(&self, username: impl Into<String>, password: impl Into<String>) {
        *self.state.lock() = FormState {
            visible: true,
            username: username.into(),
            password: password.into(),
        };
    }

    pub fn set_input(&self, username: impl Into<String>, password: impl Into<String>) {
        let mut state = self.state.lock();
        state.username = username.into();
        state.password = password.into();
    }

    /// 关闭并清空输入
    pub fn close_and_clear(&self) {
        *self.state.lock() = FormState::default();
    }

    pub fn input(&self) -> NewAccountInput {
        let state = self.state.lock();
        NewAccountInput {
            username: state.username.clone(),
            password: state.password.clone(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.state.lock().visible
    }

    pub fn snapshot(&self) -> FormState {
        self.state.lock().clone()
    }
}

/// 登录业务错误码到用户可读文案的映射
///
/// 3002 固定显示密码错误文案，不透传服务端原文。
pub(crate) fn login_error_message(code: Option<i64>, message: &str) -> String {
    match code {
        Some(error_codes::STEAM_NOT_FOUND) => "未找到Steam客户端，请检查安装".to_string(),
        Some(error_codes::STEAM_LAUNCH_FAILED) => "Steam启动失败，请检查进程".to_string(),
        Some(error_codes::INVALID_PASSWORD) => "密码错误，请重试".to_string(),
        _ if !message.is_empty() => message.to_string(),
        _ => "登录失败".to_string(),
    }
}

/// 操作分发器
pub struct ActionDispatcher {
    api: Arc<dyn AccountsApi>,
    store: Arc<AccountStore>,
    notifier: Arc<Notifier>,
    refresh: RefreshController,
    gate: Arc<ConfirmGate>,
    form: Arc<AccountForm>,
}

impl ActionDispatcher {
    pub fn new(
        api: Arc<dyn AccountsApi>,
        store: Arc<AccountStore>,
        notifier: Arc<Notifier>,
        refresh: RefreshController,
        gate: Arc<ConfirmGate>,
        form: Arc<AccountForm>,
    ) -> Self {
        Self {
            api,
            store,
            notifier,
            refresh,
            gate,
            form,
        }
    }

    /// 主登录入口：登录期间暂停自动刷新，结束后无条件恢复
    pub async fn login(&self, username: &str, password: &str) {
        self.refresh.stop_auto_refresh();
        tracing::info!("[操作] 登录账号: {}", username);

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
            remember_password: None,
        };
        match self.api.login(&request).await {
            Ok(response) => {
                self.notifier.success("登录成功");
                if response.refresh {
                    self.refresh.request_refresh(false);
                }
            }
            Err(ApiError::App { code, message }) => {
                self.notifier.error(login_error_message(code, &message));
            }
            Err(err) => {
                tracing::warn!("[操作] 登录请求失败: {}", err);
                self.notifier.error("网络请求失败，请重试");
            }
        }

        self.refresh.start_auto_refresh();
    }

    /// 行内登录：带持续 loading 消息与行内进行中标记
    pub async fn login_row(&self, username: &str) {
        let Some(account) = self.store.get(username) else {
            tracing::warn!("[操作] 行内登录目标不存在: {}", username);
            return;
        };

        self.store.set_logging_in(username, true);
        self.notifier.loading("正在登录...");

        let request = LoginRequest {
            username: account.username.clone(),
            password: account.password.clone(),
            remember_password: Some(true),
        };
        match self.api.login(&request).await {
            Ok(response) => {
                self.notifier.dismiss_loading();
                self.notifier.success("登录成功");
                if response.refresh {
                    self.refresh.request_refresh(false);
                }
            }
            Err(ApiError::App { code, message }) => {
                self.notifier.dismiss_loading();
                // 密码登录超时在行内场景只给简短提示
                let content = if code == Some(error_codes::STEAM_LOGIN_FAILED) {
                    "登录失败".to_string()
                } else if message.is_empty() {
                    "登录失败".to_string()
                } else {
                    message
                };
                self.notifier.error(content);
            }
            Err(err) => {
                tracing::warn!("[操作] 行内登录请求失败: {}", err);
                self.notifier.dismiss_loading();
                self.notifier.error("网络请求失败，请重试");
            }
        }

        self.store.set_logging_in(username, false);
    }

    /// 添加或更新账号：已有用户名走纯本地合并，新用户名走创建请求
    pub async fn add_or_update(&self, input: &NewAccountInput) {
        if input.username.is_empty() || input.password.is_empty() {
            self.notifier.warning("账号和密码不能为空");
            return;
        }

        if self.store.contains(&input.username) {
            if !self.store.merge_credentials(input) {
                self.notifier.error("更新失败，请重试");
                return;
            }
            self.form.close_and_clear();
            self.refresh.request_refresh(false);
            self.notifier.success("账号已更新");
        } else {
            if let Err(err) = self.api.create_account(input).await {
                tracing::warn!("[操作] 创建账号失败: {}", err);
                self.notifier.error("添加失败，请重试");
                return;
            }
            self.form.close_and_clear();
            self.refresh.request_refresh(false);
            self.notifier.success("账号添加成功");
        }
    }

    /// 装填删除确认；请求在操作者确认后才发出
    pub fn request_delete(&self, username: &str) {
        let api = Arc::clone(&self.api);
        let notifier = Arc::clone(&self.notifier);
        let refresh = self.refresh.clone();
        let target = username.to_string();

        self.gate.arm(ConfirmRequest {
            title: "删除账号".to_string(),
            message: format!("确定要删除账号 {} 吗？此操作不可恢复！", username),
            kind: ConfirmKind::Error,
            tag: "危险".to_string(),
            callback: Arc::new(move || {
                let api = Arc::clone(&api);
                let notifier = Arc::clone(&notifier);
                let refresh = refresh.clone();
                let target = target.clone();
                Box::pin(async move {
                    match api.delete_account(&target).await {
                        Ok(()) => {
                            notifier.success("账号已删除");
                            refresh.request_refresh(false);
                            Ok(())
                        }
                        Err(err) => {
                            tracing::warn!("[操作] 删除账号失败: {}", err);
                            notifier.error("删除失败，请重试");
                            Err(anyhow!(err))
                        }
                    }
                })
            }),
        });
    }

    /// 装填封禁确认；非法时长在装填前拒绝
    pub fn request_ban(&self, username: &str, days: u32) -> bool {
        if !BAN_DAY_OPTIONS.contains(&days) {
            self.notifier.warning(format!("无效的封禁时长: {}天", days));
            return false;
        }

        let api = Arc::clone(&self.api);
        let notifier = Arc::clone(&self.notifier);
        let refresh = self.refresh.clone();
        let target = username.to_string();

        self.gate.arm(ConfirmRequest {
            title: "封禁账号".to_string(),
            message: format!("确定要封禁账号 {} {}天吗？", username, days),
            kind: ConfirmKind::Warning,
            tag: "警告".to_string(),
            callback: Arc::new(move || {
                let api = Arc::clone(&api);
                let notifier = Arc::clone(&notifier);
                let refresh = refresh.clone();
                let target = target.clone();
                Box::pin(async move {
                    match api.set_ban(&target, days).await {
                        Ok(()) => {
                            notifier.success("设置成功");
                            refresh.request_refresh(false);
                            Ok(())
                        }
                        Err(err) => {
                            tracing::warn!("[操作] 封禁账号失败: {}", err);
                            notifier.error("设置失败");
                            Err(anyhow!(err))
                        }
                    }
                })
            }),
        });
        true
    }

    /// 更新游戏 ID：值未变化或行不存在时不发请求
    ///
    /// 成功时乐观更新本地值；失败时触发整表刷新对齐服务端。
    pub async fn update_game_id(&self, username: &str, game_id: &str) {
        let Some(current) = self.store.game_id(username) else {
            return;
        };
        if current == game_id {
            return;
        }

        match self.api.update_game_id(username, game_id).await {
            Ok(()) => {
                self.store.set_game_id(username, game_id);
                self.notifier.success("游戏ID已更新");
            }
            Err(err) => {
                tracing::warn!("[操作] 更新游戏 ID 失败: {}", err);
                self.notifier.error("保存失败，请重试");
                self.refresh.request_refresh(false);
            }
        }
    }
}
