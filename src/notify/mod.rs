//! 渲染层事件通道
//!
//! 消息与通知通过广播通道发给渲染层，这是本 crate 与
//! 范围外渲染层之间的全部接缝。无订阅者时事件被静默丢弃。

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// 消息类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Success,
    Warning,
    Error,
    Info,
    /// 持续显示，直到 [`UiEvent::DismissLoading`]
    Loading,
}

/// 发往渲染层的 UI 事件
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UiEvent {
    /// 短暂消息（toast）
    Message { kind: MessageKind, content: String },

    /// 带标题的通知
    Notification {
        kind: MessageKind,
        title: String,
        content: String,
        duration_ms: u64,
        timestamp_ms: i64,
    },

    /// 关闭所有持续显示的加载消息
    DismissLoading,
}

/// 事件发送端
pub struct Notifier {
    tx: broadcast::Sender<UiEvent>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(100);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.tx.subscribe()
    }

    fn send(&self, event: UiEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("[通知] 无订阅者，事件被丢弃");
        }
    }

    pub fn message(&self, kind: MessageKind, content: impl Into<String>) {
        self.send(UiEvent::Message {
            kind,
            content: content.into(),
        });
    }

    pub fn success(&self, content: impl Into<String>) {
        self.message(MessageKind::Success, content);
    }

    pub fn warning(&self, content: impl Into<String>) {
        self.message(MessageKind::Warning, content);
    }

    pub fn error(&self, content: impl Into<String>) {
        self.message(MessageKind::Error, content);
    }

    pub fn info(&self, content: impl Into<String>) {
        self.message(MessageKind::Info, content);
    }

    /// 持续显示的加载消息，需显式 [`Notifier::dismiss_loading`] 关闭
    pub fn loading(&self, content: impl Into<String>) {
        self.message(MessageKind::Loading, content);
    }

    pub fn notify(
        &self,
        kind: MessageKind,
        title: impl Into<String>,
        content: impl Into<String>,
        duration_ms: u64,
    ) {
        self.send(UiEvent::Notification {
            kind,
            title: title.into(),
            content: content.into(),
            duration_ms,
            timestamp_ms: Utc::now().timestamp_millis(),
        });
    }

    pub fn dismiss_loading(&self) {
        self.send(UiEvent::DismissLoading);
    }
}
