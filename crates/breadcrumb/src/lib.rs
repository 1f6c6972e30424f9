//! Breadcrumb - 会话级导航面包屑
//!
//! 提供以下功能：
//! 1. 有序的面包屑条目列表（追加、替换、截断、按标签查找）
//! 2. 渲染为 HTML 片段，供页面模板嵌入
//! 3. 以会话 ID 为键的会话存储抽象及内存实现
//! 4. 通过 HTTP 接口对会话中的面包屑进行操作

pub mod entry;
pub mod error;
pub mod handlers;
pub mod render;
pub mod store;
pub mod trail;
pub mod types;

// Re-export commonly used items
pub use entry::BreadcrumbEntry;
pub use error::{ApiError, Result, TrailError};
pub use handlers::{TrailState, create_router, create_trail_state};
pub use store::{MemorySessionStore, SessionStore};
pub use trail::BreadcrumbTrail;
