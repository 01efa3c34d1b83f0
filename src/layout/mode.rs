//! 版式选择模块
//!
//! 小幅面/自定义介质（如标签打印机纸卷）需要二维码和 Logo 占满整个
//! 画布才保证可扫描、可辨认；整页幅面则把版面主体留给其他内容，
//! 身份标识推到角落。

use serde::Serialize;

/// A4 横向（毫米）
pub const A4_LANDSCAPE_MM: (f64, f64) = (297.0, 210.0);
/// A3 横向（毫米）
pub const A3_LANDSCAPE_MM: (f64, f64) = (420.0, 297.0);

/// 小幅面判定阈值：短边不足 100mm 即视为小幅面介质
const SMALL_MEDIA_THRESHOLD_MM: f64 = 100.0;

/// 版式模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LayoutMode {
    /// 紧凑角标版式：二维码/Logo/文字按短边比例缩入画布一角
    Compact,
    /// 全幅分栏版式：Logo+文字与二维码左右平分画布
    Full,
}

/// 按物理纸张尺寸选择版式。
///
/// 短边不足 100mm，或尺寸不是 A4/A3 横向预设之一时选全幅版式，
/// 否则选紧凑版式。
pub fn select_mode(paper_size_mm: (f64, f64)) -> LayoutMode {
    let short_side = paper_size_mm.0.min(paper_size_mm.1);
    let is_preset = paper_size_mm == A4_LANDSCAPE_MM || paper_size_mm == A3_LANDSCAPE_MM;

    if short_side < SMALL_MEDIA_THRESHOLD_MM || !is_preset {
        LayoutMode::Full
    } else {
        LayoutMode::Compact
    }
}
