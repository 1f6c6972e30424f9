//! HTTP 接口数据类型定义

use crate::entry::BreadcrumbEntry;
use serde::{Deserialize, Serialize};

/// 追加、替换或访问条目时的请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryRequest {
    pub label: String,
    pub link: String,
    pub display: String,
}

/// 截断请求：保留 `[0, index)`
#[derive(Debug, Serialize, Deserialize)]
pub struct TruncateRequest {
    pub index: usize,
}

/// 移除末尾 `count` 个条目
#[derive(Debug, Serialize, Deserialize)]
pub struct RemoveTopRequest {
    pub count: usize,
}

/// 按标签查找的查询参数
#[derive(Debug, Serialize, Deserialize)]
pub struct FindQuery {
    pub label: String,
}

/// 创建会话响应
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
}

/// 修改类操作的响应：操作后的条目数量
#[derive(Debug, Serialize, Deserialize)]
pub struct SizeResponse {
    pub size: usize,
}

/// 条目列表响应
#[derive(Debug, Serialize, Deserialize)]
pub struct EntriesResponse {
    pub size: usize,
    pub entries: Vec<BreadcrumbEntry>,
}

/// 查找响应，未找到时 index 为 -1
#[derive(Debug, Serialize, Deserialize)]
pub struct FindResponse {
    pub index: isize,
}

/// 健康检查响应
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub sessions: usize,
}
