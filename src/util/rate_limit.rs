//! 调用频率控制
//!
//! 节流与防抖两个原语。每个实例独立维护自己的状态，
//! 不同包装实例之间互不影响；参数通过闭包捕获转发。

use std::future::Future;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::task::JoinHandle;

/// 节流器：两次执行之间至少间隔 `min_interval`
///
/// 间隔不足时调用被直接丢弃（不排队），且仅在实际执行时
/// 更新上次执行时间。
pub struct Throttle {
    min_interval: Duration,
    last_fire: Mutex<Option<Instant>>,
}

impl Throttle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_fire: Mutex::new(None),
        }
    }

    /// 满足间隔则立即执行 `f` 并返回 true，否则丢弃本次调用
    pub fn try_run<F: FnOnce()>(&self, f: F) -> bool {
        {
            let mut last = self.last_fire.lock();
            let now = Instant::now();
            match *last {
                Some(prev) if now.duration_since(prev) < self.min_interval => return false,
                _ => *last = Some(now),
            }
        }
        f();
        true
    }
}

/// 防抖器：安静窗口内的多次调用只有最后一次生效
///
/// 每次调用取消上一个尚未执行的任务并重新计时；
/// 回调不会同步执行，总是延迟 `delay` 后在运行时上执行。
pub struct Debounce {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// 调度 `f` 在 `delay` 后执行，取代任何待执行的前次调度
    pub fn call<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let mut pending = self.pending.lock();
        if let Some(prev) = pending.take() {
            prev.abort();
        }
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            f().await;
        }));
    }

    /// 取消待执行的调度；无任务时为空操作
    pub fn cancel(&self) {
        if let Some(task) = self.pending.lock().take() {
            task.abort();
        }
    }
}
