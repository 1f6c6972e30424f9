//! 会话存储
//!
//! 以会话 ID 为键保存每个会话的面包屑。trail 本身不做并发保护，
//! 修改类请求通过 `SessionStore::update` 在存储的写锁内完成。

mod backend;
mod memory;

pub use backend::{SessionStore, TrailOp};
pub use memory::MemorySessionStore;
