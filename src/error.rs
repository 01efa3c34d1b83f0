//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义全局统一的 `LabelError` 枚举，替代各模块中分散的
//! `.map_err(|e| e.to_string())`、`format!(...)` 等不一致模式。
//!
//! 排版引擎入口统一返回 `Result<T, LabelError>`，调用方拿到的
//! 永远是"无图 + 可读诊断信息"，不会有未捕获的内部失败穿透边界。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 字体缺失不在此处建模：`font` 模块内部降级为内置字体并记日志，
//!   生成流程照常继续。
//! - 实现 `Serialize` 将错误序列化为字符串，方便上层 UI 直接展示。

use serde::Serialize;

/// 标签生成统一错误类型
///
/// 入口函数 [`crate::generate_label`] 的错误通道，确保调用方收到一致的失败格式。
#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    /// 输入校验失败（空学号/空姓名/比例越界），在排版开始前拒绝
    #[error("输入无效: {0}")]
    InvalidInput(String),

    /// 调用方显式指定的 Logo 文件缺失或损坏。
    /// 整次生成直接失败，不会悄悄降级为"无 Logo"标签。
    #[error("Logo 加载失败: {0}")]
    LogoLoad(String),

    /// 图像解码/缓冲构建失败
    #[error("图片解码失败: {0}")]
    Decode(String),

    /// 二维码载荷超出容量上限，必须显式失败而非截断身份数据
    #[error("二维码容量不足: {0}")]
    QrCapacity(String),

    /// 配置写回失败
    #[error("配置序列化失败: {0}")]
    Config(String),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),
}

/// 将错误序列化为人类可读的字符串，供上层 UI 直接展示。
impl Serialize for LabelError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
