//! 会话存储抽象接口

use crate::trail::BreadcrumbTrail;
use async_trait::async_trait;

/// 在存储锁内对 trail 执行的修改
pub type TrailOp<'a> = Box<dyn FnOnce(&mut BreadcrumbTrail) + Send + 'a>;

/// 会话存储抽象接口
///
/// `get` 返回 trail 的副本；修改必须经由 `update`，保证同一会话上的并发请求串行执行。
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// 读取会话的 trail
    ///
    /// # Returns
    /// * `Some(trail)` - 会话存在
    /// * `None` - 会话不存在或已过期
    async fn get(&self, session_id: &str) -> Option<BreadcrumbTrail>;

    /// 写入（或创建）会话的 trail
    async fn put(&self, session_id: &str, trail: BreadcrumbTrail);

    /// 在持有写锁期间原地修改会话的 trail
    ///
    /// 会话不存在或已过期时不调用 `op`，返回 false。
    async fn update(&self, session_id: &str, op: TrailOp<'_>) -> bool;

    /// 丢弃会话，返回会话此前是否存在
    async fn remove(&self, session_id: &str) -> bool;

    /// 当前会话数量（包括尚未清理的过期会话）
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// 清理过期会话，返回被清理的数量
    async fn purge_expired(&self) -> usize;
}
