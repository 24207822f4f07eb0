//! SteamSwitch - Steam 账号管理面板核心
//!
//! 负责账号列表的轮询刷新、操作分发与确认对话框协调。
//! 渲染层（表格、对话框、右键菜单）通过 [`notify::Notifier`] 的
//! 事件通道消费本 crate 的状态，本身不在 crate 范围内。

// 核心模块
pub mod app;
pub mod client;
pub mod confirm;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod logging;
pub mod menu;
pub mod models;
pub mod notify;
pub mod refresh;
pub mod store;
pub mod util;

#[cfg(test)]
pub(crate) mod testing;

// 重新导出核心类型
pub use app::Dashboard;
pub use client::{AccountsApi, HttpAccountsApi};
pub use config::DashboardConfig;
pub use error::ApiError;
pub use models::{Account, AccountStatusKind};
pub use notify::{MessageKind, Notifier, UiEvent};
pub use store::AccountStore;
