//! 面板装配与生命周期
//!
//! [`Dashboard`] 把存储、刷新控制、操作分发、确认门和右键菜单
//! 接成一个实例：挂载时首次加载并启动自动刷新，可见性变化
//! 转发给刷新控制器，卸载时停表并丢弃迟到的响应。

use std::sync::Arc;

use crate::client::{AccountsApi, HttpAccountsApi};
use crate::config::DashboardConfig;
use crate::confirm::ConfirmGate;
use crate::dispatcher::{AccountForm, ActionDispatcher};
use crate::error::ApiError;
use crate::menu::{ContextMenu, MenuAction};
use crate::notify::Notifier;
use crate::refresh::RefreshController;
use crate::store::AccountStore;

/// 面板实例
pub struct Dashboard {
    store: Arc<AccountStore>,
    notifier: Arc<Notifier>,
    gate: Arc<ConfirmGate>,
    form: Arc<AccountForm>,
    menu: Arc<ContextMenu>,
    refresh: RefreshController,
    dispatcher: ActionDispatcher,
}

impl Dashboard {
    /// 以 HTTP 后端构建面板
    pub fn new(config: &DashboardConfig) -> Result<Self, ApiError> {
        let api = Arc::new(HttpAccountsApi::new(config)?);
        Ok(Self::with_api(config, api))
    }

    /// 注入自定义后端实现（测试用）
    pub fn with_api(config: &DashboardConfig, api: Arc<dyn AccountsApi>) -> Self {
        let store = Arc::new(AccountStore::new());
        let notifier = Arc::new(Notifier::new());
        let gate = Arc::new(ConfirmGate::new());
        let form = Arc::new(AccountForm::new());
        let menu = Arc::new(ContextMenu::new());
        let refresh = RefreshController::new(
            config,
            Arc::clone(&api),
            Arc::clone(&store),
            Arc::clone(&notifier),
        );
        let dispatcher = ActionDispatcher::new(
            api,
            Arc::clone(&store),
            Arc::clone(&notifier),
            refresh.clone(),
            Arc::clone(&gate),
            Arc::clone(&form),
        );
        Self {
            store,
            notifier,
            gate,
            form,
            menu,
            refresh,
            dispatcher,
        }
    }

    /// 挂载：首次加载（带解封检测）并启动自动刷新
    pub fn mount(&self) {
        tracing::info!("[面板] 挂载，执行首次加载");
        self.refresh.request_refresh(true);
        self.refresh.start_auto_refresh();
    }

    /// 宿主页面可见性变化
    pub fn set_visible(&self, visible: bool) {
        self.refresh.set_visible(visible);
    }

    /// 处理右键菜单选择，完成后关闭菜单
    pub async fn handle_menu_select(&self, action: MenuAction) {
        match action {
            MenuAction::Login => {
                // 分发时才查行；行可能已被并发刷新移除
                if let Some(target) = self.menu.target() {
                    if let Some(account) = self.store.get(&target) {
                        self.dispatcher
                            .login(&account.username, &account.password)
                            .await;
                    }
                }
            }
            MenuAction::Edit => {
                if let Some(target) = self.menu.target() {
                    if let Some(account) = self.store.get(&target) {
                        self.form.open_with(account.username, account.password);
                    }
                }
            }
            MenuAction::Add => self.form.open_blank(),
        }
        self.menu.close();
    }

    /// 卸载：停止定时器与待执行加载
    pub fn shutdown(&self) {
        tracing::info!("[面板] 卸载，停止刷新");
        self.refresh.shutdown();
    }

    pub fn store(&self) -> &Arc<AccountStore> {
        &self.store
    }

    pub fn notifier(&self) -> &Arc<Notifier> {
        &self.notifier
    }

    pub fn confirm_gate(&self) -> &Arc<ConfirmGate> {
        &self.gate
    }

    pub fn form(&self) -> &Arc<AccountForm> {
        &self.form
    }

    pub fn menu(&self) -> &Arc<ContextMenu> {
        &self.menu
    }

    pub fn refresh(&self) -> &RefreshController {
        &self.refresh
    }

    pub fn dispatcher(&self) -> &ActionDispatcher {
        &self.dispatcher
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{account, MockApi};
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn dashboard(api: MockApi) -> (Arc<MockApi>, Dashboard) {
        let api = Arc::new(api);
        let config = DashboardConfig {
            load_debounce_ms: 10,
            ..DashboardConfig::default()
        };
        let dashboard = Dashboard::with_api(&config, Arc::clone(&api) as Arc<dyn AccountsApi>);
        (api, dashboard)
    }

    #[tokio::test]
    async fn mount_loads_accounts_and_starts_timer() {
        let (api, dashboard) = dashboard(MockApi::with_accounts(vec![account("alice")]));

        dashboard.mount();
        tokio::time::sleep(Duration::from_millis(60)).await;

        assert_eq!(api.fetch_count.load(Ordering::SeqCst), 1);
        assert_eq!(dashboard.store().len(), 1);
        assert!(dashboard.refresh().auto_refresh_active());
        dashboard.shutdown();
    }

    #[tokio::test]
    async fn menu_login_uses_targeted_rows_credentials() {
        let (api, dashboard) = dashboard(MockApi::default());
        let mut row = account("alice");
        row.password = "stored-pw".to_string();
        dashboard.store().replace_all(vec![row]);
        dashboard.menu().open_on_row(10, 10, "alice");

        dashboard.handle_menu_select(MenuAction::Login).await;

        let request = api.last_login.lock().clone().unwrap();
        assert_eq!(request.username, "alice");
        assert_eq!(request.password, "stored-pw");
        assert!(!dashboard.menu().snapshot().visible);
        dashboard.shutdown();
    }

    #[tokio::test]
    async fn menu_login_on_removed_row_is_silent() {
        let (api, dashboard) = dashboard(MockApi::default());
        dashboard.menu().open_on_row(10, 10, "ghost");

        dashboard.handle_menu_select(MenuAction::Login).await;

        assert_eq!(api.login_count.load(Ordering::SeqCst), 0);
        assert!(!dashboard.menu().snapshot().visible);
    }

    #[tokio::test]
    async fn menu_edit_prefills_form_from_row() {
        let (_, dashboard) = dashboard(MockApi::default());
        dashboard.store().replace_all(vec![account("alice")]);
        dashboard.menu().open_on_row(10, 10, "alice");

        dashboard.handle_menu_select(MenuAction::Edit).await;

        let form = dashboard.form().snapshot();
        assert!(form.visible);
        assert_eq!(form.username, "alice");
        assert_eq!(form.password, "pw");
    }

    #[tokio::test]
    async fn menu_add_opens_blank_form() {
        let (_, dashboard) = dashboard(MockApi::default());
        dashboard.store().replace_all(vec![account("alice")]);
        dashboard.menu().open_on_background(5, 5);

        dashboard.handle_menu_select(MenuAction::Add).await;

        let form = dashboard.form().snapshot();
        assert!(form.visible);
        assert!(form.username.is_empty());
    }

    #[tokio::test]
    async fn shutdown_stops_auto_refresh() {
        let (_, dashboard) = dashboard(MockApi::default());
        dashboard.mount();
        dashboard.shutdown();
        assert!(!dashboard.refresh().auto_refresh_active());
    }
}
