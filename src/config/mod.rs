//! 面板配置
//!
//! 所有字段带默认值，缺省即可直连本机后端。

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// 面板运行配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// 后端服务地址
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// 自动刷新周期（秒）
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// 列表加载防抖窗口（毫秒）
    #[serde(default = "default_load_debounce_ms")]
    pub load_debounce_ms: u64,

    /// 手动刷新最小间隔（秒）
    #[serde(default = "default_manual_refresh_min_secs")]
    pub manual_refresh_min_secs: u64,

    /// 单次请求超时（秒）
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_refresh_interval_secs() -> u64 {
    30
}

fn default_load_debounce_ms() -> u64 {
    300
}

fn default_manual_refresh_min_secs() -> u64 {
    5
}

fn default_request_timeout_secs() -> u64 {
    15
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            refresh_interval_secs: default_refresh_interval_secs(),
            load_debounce_ms: default_load_debounce_ms(),
            manual_refresh_min_secs: default_manual_refresh_min_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl DashboardConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn load_debounce(&self) -> Duration {
        Duration::from_millis(self.load_debounce_ms)
    }

    pub fn manual_refresh_min_interval(&self) -> Duration {
        Duration::from_secs(self.manual_refresh_min_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
