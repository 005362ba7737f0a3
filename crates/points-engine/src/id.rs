//! 记录 ID 生成

use uuid::Uuid;

/// 记录 ID 生成器
///
/// 生成的 ID 在进程生命周期内不得重复。
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// 基于随机 UUID v4 的 ID 生成器
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
