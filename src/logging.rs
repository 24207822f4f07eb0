//! 日志初始化

/// 安装全局 fmt 订阅器；重复调用被忽略
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_target(false).try_init();
}
