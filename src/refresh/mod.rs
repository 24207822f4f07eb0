//! 列表刷新控制
//!
//! 防抖 + 忙碌保护的列表加载、周期自动刷新定时器、
//! 页面可见性暂停/恢复，以及节流的手动刷新入口。
//! 定时器与手动入口都汇入同一个防抖加载器，突发触发会正确合并。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::client::AccountsApi;
use crate::config::DashboardConfig;
use crate::error::ApiError;
use crate::notify::{MessageKind, Notifier};
use crate::store::AccountStore;
use crate::util::rate_limit::{Debounce, Throttle};

/// 刷新控制器，可廉价克隆共享
#[derive(Clone)]
pub struct RefreshController {
    inner: Arc<RefreshInner>,
}

struct RefreshInner {
    api: Arc<dyn AccountsApi>,
    store: Arc<AccountStore>,
    notifier: Arc<Notifier>,
    loader: Debounce,
    manual_gate: Throttle,
    loading: AtomicBool,
    /// 不变式：至多一个周期定时器在运行
    timer: Mutex<Option<JoinHandle<()>>>,
    shutdown: CancellationToken,
    interval: Duration,
}

/// 把一次加载挂到防抖器上
fn schedule_load(inner: &Arc<RefreshInner>, initial: bool) {
    let task_inner = Arc::clone(inner);
    inner.loader.call(move || async move {
        task_inner.load_now(initial).await;
    });
}

impl RefreshController {
    pub fn new(
        config: &DashboardConfig,
        api: Arc<dyn AccountsApi>,
        store: Arc<AccountStore>,
        notifier: Arc<Notifier>,
    ) -> Self {
        Self::with_intervals(
            api,
            store,
            notifier,
            config.load_debounce(),
            config.manual_refresh_min_interval(),
            config.refresh_interval(),
        )
    }

    pub(crate) fn with_intervals(
        api: Arc<dyn AccountsApi>,
        store: Arc<AccountStore>,
        notifier: Arc<Notifier>,
        debounce: Duration,
        manual_min_interval: Duration,
        interval: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(RefreshInner {
                api,
                store,
                notifier,
                loader: Debounce::new(debounce),
                manual_gate: Throttle::new(manual_min_interval),
                loading: AtomicBool::new(false),
                timer: Mutex::new(None),
                shutdown: CancellationToken::new(),
                interval,
            }),
        }
    }

    /// 请求一次列表刷新（防抖入口，安静窗口内的多次调用合并为一次）
    pub fn request_refresh(&self, initial: bool) {
        schedule_load(&self.inner, initial);
    }

    /// 绕过防抖立即加载一次；仍受忙碌保护约束
    pub async fn refresh_now(&self, initial: bool) {
        self.inner.load_now(initial).await;
    }

    /// 手动刷新入口：触发之间保持最小间隔，多余触发被丢弃
    pub fn manual_refresh(&self) -> bool {
        let inner = Arc::clone(&self.inner);
        self.inner
            .manual_gate
            .try_run(move || schedule_load(&inner, false))
    }

    /// （重新）启动周期自动刷新；先停掉已有定时器
    pub fn start_auto_refresh(&self) {
        self.stop_auto_refresh();
        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(inner.interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // interval 的首个 tick 立即完成，跳过
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = inner.shutdown.cancelled() => break,
                    _ = ticker.tick() => schedule_load(&inner, false),
                }
            }
        });
        *self.inner.timer.lock() = Some(handle);
    }

    /// 停止自动刷新；重复调用为空操作
    pub fn stop_auto_refresh(&self) {
        if let Some(handle) = self.inner.timer.lock().take() {
            handle.abort();
        }
    }

    pub fn auto_refresh_active(&self) -> bool {
        self.inner
            .timer
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// 宿主页面可见性变化：隐藏时暂停，可见时立即刷新并恢复
    pub fn set_visible(&self, visible: bool) {
        if visible {
            self.request_refresh(false);
            self.start_auto_refresh();
        } else {
            self.stop_auto_refresh();
        }
    }

    pub fn is_loading(&self) -> bool {
        self.inner.loading.load(Ordering::SeqCst)
    }

    /// 卸载：停止定时器与待执行加载
    ///
    /// 在途请求不会被中止；其响应落地时会因令牌已取消而被丢弃。
    pub fn shutdown(&self) {
        self.inner.shutdown.cancel();
        self.stop_auto_refresh();
        self.inner.loader.cancel();
    }
}

impl RefreshInner {
    async fn load_now(&self, initial: bool) {
        if self.shutdown.is_cancelled() {
            return;
        }
        // 忙碌保护：已有加载在途时直接丢弃本次触发，不排队
        if self
            .loading
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("[刷新] 列表加载进行中，忽略本次触发");
            return;
        }

        match self.api.fetch_accounts().await {
            Ok(list) => {
                if self.shutdown.is_cancelled() {
                    tracing::debug!("[刷新] 视图已卸载，丢弃迟到的响应");
                } else {
                    tracing::debug!("[刷新] 加载到 {} 个账号", list.accounts.len());
                    let unbanned = list.unbanned;
                    self.store.replace_all(list.accounts);
                    if initial && !unbanned.is_empty() {
                        self.notify_unbanned(&unbanned);
                    }
                }
            }
            Err(ApiError::App { message, .. }) => {
                let content = if message.is_empty() {
                    "加载失败".to_string()
                } else {
                    message
                };
                self.notifier.error(content);
            }
            Err(err) => {
                tracing::warn!("[刷新] 列表加载失败: {}", err);
                self.notifier.error("加载失败，请检查网络连接");
            }
        }

        self.loading.store(false, Ordering::SeqCst);
    }

    fn notify_unbanned(&self, unbanned: &[String]) {
        let content = if unbanned.len() == 1 {
            format!("账号 {} 已解除封禁", unbanned[0])
        } else {
            format!("{}个账号已解除封禁：\n{}", unbanned.len(), unbanned.join(", "))
        };
        self.notifier
            .notify(MessageKind::Success, "账号解封提醒", content, 5000);
    }
}
