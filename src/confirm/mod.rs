//! 确认对话框协调
//!
//! 单实例对话框：危险/不可逆操作先经确认再执行。
//! 回调执行期间对话框进入 loading 状态；回调失败时保持打开，
//! 操作者可以重试或取消。重复装填采用后写覆盖，不排队。

use std::sync::Arc;

use anyhow::Result;
use futures::future::BoxFuture;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// 确认回调；可重复调用以支持失败后重试
pub type ConfirmCallback = Arc<dyn Fn() -> BoxFuture<'static, Result<()>> + Send + Sync>;

/// 对话框样式类型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmKind {
    Info,
    #[default]
    Warning,
    Error,
}

/// 对话框装填请求
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
    pub kind: ConfirmKind,
    pub tag: String,
    pub callback: ConfirmCallback,
}

/// 渲染层可见的对话框快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmDialogView {
    pub visible: bool,
    pub title: String,
    pub message: String,
    pub kind: ConfirmKind,
    pub tag: String,
    pub loading: bool,
}

#[derive(Default)]
struct GateState {
    visible: bool,
    title: String,
    message: String,
    kind: ConfirmKind,
    tag: String,
    loading: bool,
    callback: Option<ConfirmCallback>,
}

/// 确认门（单全局实例）
#[derive(Default)]
pub struct ConfirmGate {
    state: Mutex<GateState>,
}

impl ConfirmGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// 装填并显示对话框；已有未决回调时直接覆盖
    pub fn arm(&self, request: ConfirmRequest) {
        let mut state = self.state.lock();
        if state.visible {
            tracing::debug!("[确认] 覆盖未决确认: {}", state.title);
        }
        state.title = request.title;
        state.message = request.message;
        state.kind = request.kind;
        state.tag = request.tag;
        state.callback = Some(request.callback);
        state.loading = false;
        state.visible = true;
    }

    /// 操作者接受：执行回调，成功后关闭，失败保持打开以便重试
    pub async fn confirm(&self) -> Result<()> {
        let callback = {
            let mut state = self.state.lock();
            let Some(callback) = state.callback.clone() else {
                return Ok(());
            };
            state.loading = true;
            callback
        };

        let result = callback().await;

        let mut state = self.state.lock();
        state.loading = false;
        if result.is_ok() {
            state.visible = false;
            state.callback = None;
        }
        result
    }

    /// 操作者取消：隐藏并丢弃回调，无任何副作用
    pub fn cancel(&self) {
        let mut state = self.state.lock();
        state.visible = false;
        state.loading = false;
        state.callback = None;
    }

    pub fn is_visible(&self) -> bool {
        self.state.lock().visible
    }

    pub fn snapshot(&self) -> ConfirmDialogView {
        let state = self.state.lock();
        ConfirmDialogView {
            visible: state.visible,
            title: state.title.clone(),
            message: state.message.clone(),
            kind: state.kind,
            tag: state.tag.clone(),
            loading: state.loading,
        }
    }
}
