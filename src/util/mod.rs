//! 通用工具

pub mod rate_limit;
