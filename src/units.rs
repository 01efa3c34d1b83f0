//! 物理单位换算模块
//!
//! 整个系统以毫米描述版面、以像素绘制版面，换算率由打印分辨率决定。
//! 除配置显式覆盖外，全局固定 300 DPI。

/// 系统默认打印分辨率（每英寸像素数）
pub const DEFAULT_DPI: u32 = 300;

/// 毫米转像素：`floor(mm * dpi / 25.4)`
///
/// 纯函数，无失败路径。负毫米值不在业务输入范围内，统一截断为 0。
pub fn mm_to_px(mm: f64, dpi: u32) -> u32 {
    let px = (mm * dpi as f64 / 25.4).floor();
    if px <= 0.0 { 0 } else { px as u32 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn one_inch_is_exactly_dpi_pixels() {
        assert_eq!(mm_to_px(25.4, 300), 300);
        assert_eq!(mm_to_px(25.4, DEFAULT_DPI), DEFAULT_DPI);
        assert_eq!(mm_to_px(50.8, 300), 600);
    }

    #[test]
    fn common_paper_sizes() {
        // A4 横向
        assert_eq!(mm_to_px(297.0, 300), 3507);
        assert_eq!(mm_to_px(210.0, 300), 2480);
    }

    #[test]
    fn negative_clamps_to_zero() {
        assert_eq!(mm_to_px(-3.0, 300), 0);
    }

    proptest! {
        #[test]
        fn monotonic_in_mm(a in 0.0f64..1000.0, b in 0.0f64..1000.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(mm_to_px(lo, 300) <= mm_to_px(hi, 300));
        }
    }
}
