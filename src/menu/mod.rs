//! 右键菜单协议
//!
//! 纯展示/分发层：仅持有 {可见, 位置, 目标行}。目标是用户名
//! 弱引用，分发时再到存储中查行；动作分发在 [`crate::app::Dashboard`]。

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// 菜单动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuAction {
    /// 登录此账号
    Login,
    /// 编辑账号（预填添加对话框）
    Edit,
    /// 添加账号
    Add,
}

/// 菜单项
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuEntry {
    pub action: MenuAction,
    pub label: String,
}

/// 菜单状态快照
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuState {
    pub visible: bool,
    pub x: i32,
    pub y: i32,
    /// 目标行的用户名；None 表示在空白处打开
    pub target: Option<String>,
}

/// 右键菜单（单实例）
#[derive(Default)]
pub struct ContextMenu {
    state: RwLock<MenuState>,
}

impl ContextMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// 在某一行上打开
    pub fn open_on_row(&self, x: i32, y: i32, username: impl Into<String>) {
        let mut state = self.state.write();
        state.visible = true;
        state.x = x;
        state.y = y;
        state.target = Some(username.into());
    }

    /// 在表格空白处/容器上打开
    pub fn open_on_background(&self, x: i32, y: i32) {
        let mut state = self.state.write();
        state.visible = true;
        state.x = x;
        state.y = y;
        state.target = None;
    }

    pub fn close(&self) {
        let mut state = self.state.write();
        state.visible = false;
    }

    pub fn target(&self) -> Option<String> {
        self.state.read().target.clone()
    }

    pub fn snapshot(&self) -> MenuState {
        self.state.read().clone()
    }

    /// 行上打开：登录/编辑/添加；空白处打开：仅添加
    pub fn options(&self) -> Vec<MenuEntry> {
        let state = self.state.read();
        let mut options = Vec::new();
        if state.target.is_some() {
            options.push(MenuEntry {
                action: MenuAction::Login,
                label: "登录此账号".to_string(),
            });
            options.push(MenuEntry {
                action: MenuAction::Edit,
                label: "编辑账号".to_string(),
            });
        }
        options.push(MenuEntry {
            action: MenuAction::Add,
            label: "添加账号".to_string(),
        });
        options
    }
}
