//! 账号内存存储
//!
//! 有序账号集合，镜像服务端状态。刷新成功时整表替换，
//! 乐观编辑按用户名原地修改。不做增量合并：刷新落地时
//! 尚未同步到服务端的本地修改采用后写覆盖语义。

use parking_lot::RwLock;

use crate::models::{Account, NewAccountInput};

/// 账号存储（单实例，挂载时填充，卸载时随整体丢弃）
#[derive(Default)]
pub struct AccountStore {
    accounts: RwLock<Vec<Account>>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 整表替换为最新服务端状态（后写覆盖）
    pub fn replace_all(&self, accounts: Vec<Account>) {
        *self.accounts.write() = accounts;
    }

    /// 当前全部账号的快照，保持服务端顺序
    pub fn snapshot(&self) -> Vec<Account> {
        self.accounts.read().clone()
    }

    pub fn get(&self, username: &str) -> Option<Account> {
        self.accounts
            .read()
            .iter()
            .find(|account| account.username == username)
            .cloned()
    }

    pub fn contains(&self, username: &str) -> bool {
        self.accounts
            .read()
            .iter()
            .any(|account| account.username == username)
    }

    pub fn game_id(&self, username: &str) -> Option<String> {
        self.accounts
            .read()
            .iter()
            .find(|account| account.username == username)
            .map(|account| account.game_id.clone())
    }

    /// 更新游戏 ID；用户名不存在时返回 false
    ///
    /// 行可能已被并发刷新移除，此时静默跳过而非报错。
    pub fn set_game_id(&self, username: &str, game_id: &str) -> bool {
        let mut accounts = self.accounts.write();
        match accounts
            .iter_mut()
            .find(|account| account.username == username)
        {
            Some(account) => {
                account.game_id = game_id.to_string();
                true
            }
            None => false,
        }
    }

    /// 设置行内登录进行中的瞬态标记
    pub fn set_logging_in(&self, username: &str, logging_in: bool) -> bool {
        let mut accounts = self.accounts.write();
        match accounts
            .iter_mut()
            .find(|account| account.username == username)
        {
            Some(account) => {
                account.is_logging_in = logging_in;
                true
            }
            None => false,
        }
    }

    /// 按用户名浅合并账号与密码（编辑路径的纯本地更新）
    pub fn merge_credentials(&self, input: &NewAccountInput) -> bool {
        let mut accounts = self.accounts.write();
        match accounts
            .iter_mut()
            .find(|account| account.username == input.username)
        {
            Some(account) => {
                account.password = input.password.clone();
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }
}
