//! 版面几何规划模块
//!
//! # 设计思路
//!
//! 两种版式的矩形推导是纯几何计算，与像素合成完全分离：
//! 策略只产出一份 `PlacementPlan`（二维码/Logo/各行文字的绝对像素
//! 矩形），合成器按计划执行一次粘贴与绘字。紧凑/全幅共用同一个
//! `LayoutStrategy` 能力接口，避免把合成步骤复制两份。
//!
//! # 实现思路
//!
//! - 所有物理尺寸先经 `mm_to_px` 进入像素域，再做整数几何。
//! - Logo 目标尺寸用 `fit_within` 在规划阶段就按源图宽高比定死，
//!   合成阶段的缩放因此是精确命中，不再二次取整。
//! - 计算结果统一夹取进画布边界，退化纸张尺寸不会产出越界矩形。

use crate::layout::mode::LayoutMode;
use crate::resize::fit_within;
use crate::units::mm_to_px;

/// 画布上的绝对像素矩形
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub w: u32,
    pub h: u32,
}

/// 一次生成的完整摆放计划，策略产出、合成器立即消费
#[derive(Debug, Clone)]
pub struct PlacementPlan {
    pub mode: LayoutMode,
    /// 二维码矩形，恒为正方形
    pub qr: Rect,
    /// Logo 矩形（无 Logo 时为 None），宽高已按源图比例适配
    pub logo: Option<Rect>,
    /// 文字各行左上角锚点，顺序为 姓名 / 学号 / 主题
    pub text_anchors: Vec<(i64, i64)>,
    /// 行高像素
    pub font_size: f32,
}

/// 版式策略：从画布尺寸与素材信息算出摆放计划
pub(crate) trait LayoutStrategy {
    fn plan(
        &self,
        canvas: (u32, u32),
        logo_size: Option<(u32, u32)>,
        has_subject: bool,
        dpi: u32,
    ) -> PlacementPlan;
}

/// 紧凑角标版式：按短边比例缩放，整块右下角对齐
pub(crate) struct CompactLayout {
    pub qr_size_ratio: f64,
}

/// 全幅分栏版式：Logo+文字居左、二维码居右，四边 2mm 留白
pub(crate) struct FullLayout;

impl LayoutStrategy for CompactLayout {
    fn plan(
        &self,
        canvas: (u32, u32),
        logo_size: Option<(u32, u32)>,
        has_subject: bool,
        dpi: u32,
    ) -> PlacementPlan {
        let (canvas_w, canvas_h) = (canvas.0 as i64, canvas.1 as i64);
        let qr_side_raw =
            ((canvas.0.min(canvas.1) as f64 * self.qr_size_ratio).floor() as i64).max(1);
        let margin = mm_to_px(5.0, dpi) as i64;

        let Some(logo_src) = logo_size else {
            // 无 Logo：单独二维码贴右下角，不绘制文字。
            // 比例取满 1.0 时边长受两侧 5mm 边距封顶，保证矩形不越界
            let qr_side = qr_side_raw
                .min(canvas_w - 2 * margin)
                .min(canvas_h - 2 * margin)
                .max(1);
            let qr = Rect {
                x: (canvas_w - margin - qr_side).max(0),
                y: (canvas_h - margin - qr_side).max(0),
                w: qr_side as u32,
                h: qr_side as u32,
            };
            return PlacementPlan {
                mode: LayoutMode::Compact,
                qr,
                logo: None,
                text_anchors: Vec::new(),
                font_size: 0.0,
            };
        };

        // 双列整块（2 × 边长 + 列间距）连同两侧 5mm 边距必须放得进画布
        let column_gap = mm_to_px(2.0, dpi) as i64;
        let qr_side = qr_side_raw
            .min((canvas_w - 2 * margin - column_gap) / 2)
            .min(canvas_h - 2 * margin)
            .max(1);

        // 字号为二维码边长的 15%，上限 3mm
        let font_size = (qr_side as f64 * 0.15).min(mm_to_px(3.0, dpi) as f64);
        // 三行文字 + 行距，经验系数保证行间不重叠
        let text_block = (font_size * 3.3) as i64;
        let logo_gap = mm_to_px(1.0, dpi) as i64;
        let logo_max_h = (qr_side - text_block - logo_gap).max(1);

        let (logo_w, logo_h) = fit_within(logo_src, (qr_side as u32, logo_max_h as u32));

        // Logo 列与二维码列等宽
        let block_w = 2 * qr_side + column_gap;
        let block_x = (canvas_w - margin - block_w).max(0);
        let block_y = (canvas_h - margin - qr_side).max(0);

        let logo = Rect {
            x: block_x,
            y: block_y,
            w: logo_w,
            h: logo_h,
        };
        let qr = Rect {
            x: block_x + qr_side + column_gap,
            y: block_y,
            w: qr_side as u32,
            h: qr_side as u32,
        };

        // 文字紧贴 Logo 下方，与 Logo 左缘对齐
        let text_x = block_x;
        let text_y = block_y + logo_h as i64 + logo_gap;
        let mut text_anchors = vec![
            (text_x, text_y),
            (text_x, text_y + (font_size * 1.1) as i64),
        ];
        if has_subject {
            text_anchors.push((text_x, text_y + (font_size * 2.2) as i64));
        }

        PlacementPlan {
            mode: LayoutMode::Compact,
            qr,
            logo: Some(logo),
            text_anchors,
            font_size: font_size as f32,
        }
    }
}

impl LayoutStrategy for FullLayout {
    fn plan(
        &self,
        canvas: (u32, u32),
        logo_size: Option<(u32, u32)>,
        has_subject: bool,
        dpi: u32,
    ) -> PlacementPlan {
        let (canvas_w, canvas_h) = (canvas.0 as i64, canvas.1 as i64);
        let margin = mm_to_px(2.0, dpi) as i64;
        let content_w = (canvas_w - 2 * margin).max(1);
        let content_h = (canvas_h - 2 * margin).max(1);

        // 左右两栏各占内容宽度的 45%，二维码受内容高度封顶以免越界
        let qr_side = ((content_w as f64 * 0.45).floor() as i64)
            .min(content_h)
            .max(1);

        let font_size = canvas_w.min(canvas_h) as f64 * 0.12;
        let text_block = (font_size * 3.0) as i64;

        // Logo 外接框高度受"内容高 − 文字块"封顶，
        // 竖长 Logo 不会把下方的学号/主题行挤出画布
        let logo_box = (
            ((content_w as f64 * 0.45).floor() as i64).max(1) as u32,
            (((content_h as f64 * 0.9).floor() as i64).min(content_h - text_block)).max(1) as u32,
        );
        let logo = logo_size.map(|src| {
            let (w, h) = fit_within(src, logo_box);
            // 连同下方预留的文字块整体在内容区垂直居中
            let y = margin + ((content_h - h as i64 - text_block) / 2).max(0);
            Rect { x: margin, y, w, h }
        });

        let qr = Rect {
            x: (canvas_w - margin - qr_side).max(0),
            y: ((canvas_h - qr_side) / 2).max(0),
            w: qr_side as u32,
            h: qr_side as u32,
        };

        // 文字在 Logo 正下方；无 Logo 时文字块单独在左栏垂直居中
        let text_y = match &logo {
            Some(rect) => rect.y + rect.h as i64,
            None => margin + ((content_h - text_block) / 2).max(0),
        };
        let mut text_anchors = vec![
            (margin, text_y),
            (margin, text_y + font_size as i64),
        ];
        if has_subject {
            text_anchors.push((margin, text_y + 2 * font_size as i64));
        }

        PlacementPlan {
            mode: LayoutMode::Full,
            qr,
            logo,
            text_anchors,
            font_size: font_size as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::DEFAULT_DPI;

    fn assert_in_bounds(rect: &Rect, canvas: (u32, u32)) {
        assert!(rect.x >= 0 && rect.y >= 0, "矩形起点越界: {:?}", rect);
        assert!(
            rect.x + rect.w as i64 <= canvas.0 as i64
                && rect.y + rect.h as i64 <= canvas.1 as i64,
            "矩形超出画布: {:?}",
            rect
        );
    }

    // A4 横向 300 DPI 像素画布
    const A4_PX: (u32, u32) = (3507, 2480);

    #[test]
    fn compact_without_logo_is_qr_only_in_corner() {
        let plan = CompactLayout { qr_size_ratio: 0.08 }.plan(A4_PX, None, false, DEFAULT_DPI);

        let qr_side = (2480.0_f64 * 0.08).floor() as i64;
        let margin = mm_to_px(5.0, DEFAULT_DPI) as i64;
        assert_eq!(plan.qr.w, plan.qr.h);
        assert_eq!(plan.qr.x, 3507 - margin - qr_side);
        assert_eq!(plan.qr.y, 2480 - margin - qr_side);
        assert!(plan.logo.is_none());
        assert!(plan.text_anchors.is_empty());
        assert_in_bounds(&plan.qr, A4_PX);
    }

    #[test]
    fn compact_with_logo_places_two_equal_columns() {
        let plan =
            CompactLayout { qr_size_ratio: 0.15 }.plan(A4_PX, Some((400, 200)), true, DEFAULT_DPI);

        let logo = plan.logo.unwrap();
        let qr_side = plan.qr.w as i64;
        // Logo 列在左、二维码列在右，列间距 2mm
        assert_eq!(plan.qr.x, logo.x + qr_side + mm_to_px(2.0, DEFAULT_DPI) as i64);
        assert_eq!(plan.qr.y, logo.y);
        // 三行文字与 Logo 左缘对齐
        assert_eq!(plan.text_anchors.len(), 3);
        for (x, _) in &plan.text_anchors {
            assert_eq!(*x, logo.x);
        }
        // 行距：1.1 与 2.2 倍字号
        let y0 = plan.text_anchors[0].1;
        assert_eq!(plan.text_anchors[1].1 - y0, (plan.font_size as f64 * 1.1) as i64);
        assert_eq!(plan.text_anchors[2].1 - y0, (plan.font_size as f64 * 2.2) as i64);
        assert_in_bounds(&plan.qr, A4_PX);
        assert_in_bounds(&logo, A4_PX);
    }

    #[test]
    fn compact_font_size_is_clamped_to_3mm() {
        let plan =
            CompactLayout { qr_size_ratio: 0.5 }.plan(A4_PX, Some((100, 100)), false, DEFAULT_DPI);
        assert!(plan.font_size <= mm_to_px(3.0, DEFAULT_DPI) as f32);
    }

    #[test]
    fn full_splits_canvas_between_logo_and_qr() {
        // 50x30mm 标签纸 @300DPI
        let canvas = (590, 354);
        let plan = FullLayout.plan(canvas, Some((300, 300)), true, DEFAULT_DPI);

        let margin = mm_to_px(2.0, DEFAULT_DPI) as i64;
        let logo = plan.logo.unwrap();
        assert_eq!(logo.x, margin);
        // 二维码贴右缘、全画布垂直居中
        assert_eq!(plan.qr.x + plan.qr.w as i64, canvas.0 as i64 - margin);
        assert_eq!(plan.qr.y, (canvas.1 as i64 - plan.qr.h as i64) / 2);
        assert_eq!(plan.qr.w, plan.qr.h);
        // 文字在 Logo 下方，按 0/1/2 倍字号排行
        assert_eq!(plan.text_anchors.len(), 3);
        let y0 = plan.text_anchors[0].1;
        assert_eq!(y0, logo.y + logo.h as i64);
        assert_eq!(plan.text_anchors[1].1 - y0, plan.font_size as i64);
        assert_eq!(plan.text_anchors[2].1 - y0, 2 * plan.font_size as i64);
        assert_in_bounds(&plan.qr, canvas);
        assert_in_bounds(&logo, canvas);
    }

    #[test]
    fn compact_large_ratio_block_is_capped_to_canvas() {
        // 比例合法但偏大时，双列整块按画布封顶，右缘 5mm 边距保持
        let plan =
            CompactLayout { qr_size_ratio: 0.8 }.plan(A4_PX, Some((300, 300)), true, DEFAULT_DPI);
        let margin = mm_to_px(5.0, DEFAULT_DPI) as i64;
        let logo = plan.logo.unwrap();
        assert_in_bounds(&plan.qr, A4_PX);
        assert_in_bounds(&logo, A4_PX);
        assert_eq!(plan.qr.x + plan.qr.w as i64, A4_PX.0 as i64 - margin);
        assert_eq!(plan.qr.y + plan.qr.h as i64, A4_PX.1 as i64 - margin);
    }

    #[test]
    fn compact_full_ratio_without_logo_stays_in_bounds() {
        let plan = CompactLayout { qr_size_ratio: 1.0 }.plan(A4_PX, None, false, DEFAULT_DPI);
        let margin = mm_to_px(5.0, DEFAULT_DPI) as i64;
        assert_in_bounds(&plan.qr, A4_PX);
        assert_eq!(plan.qr.x + plan.qr.w as i64, A4_PX.0 as i64 - margin);
        assert_eq!(plan.qr.y + plan.qr.h as i64, A4_PX.1 as i64 - margin);
    }

    #[test]
    fn full_tall_logo_keeps_text_lines_on_canvas() {
        // 100x100mm 自定义画布 + 竖长 Logo：文字块预留空间优先于 Logo 高度
        let canvas = (1181, 1181);
        let plan = FullLayout.plan(canvas, Some((100, 800)), true, DEFAULT_DPI);
        let logo = plan.logo.unwrap();
        assert_in_bounds(&logo, canvas);
        assert_eq!(plan.text_anchors.len(), 3);
        for (_, y) in &plan.text_anchors {
            assert!(
                *y + plan.font_size as i64 <= canvas.1 as i64,
                "文字行越过画布底边: y={}",
                y
            );
        }
    }

    #[test]
    fn full_qr_is_capped_by_content_height() {
        // 极端扁长画布：0.45 倍内容宽会超过画布高
        let canvas = (3543, 590);
        let plan = FullLayout.plan(canvas, None, false, DEFAULT_DPI);
        assert_in_bounds(&plan.qr, canvas);
        assert_eq!(plan.qr.w, plan.qr.h);
    }

    #[test]
    fn full_without_logo_still_places_text() {
        let plan = FullLayout.plan((590, 354), None, false, DEFAULT_DPI);
        assert!(plan.logo.is_none());
        assert_eq!(plan.text_anchors.len(), 2);
    }

    #[test]
    fn logo_aspect_ratio_is_preserved_in_plan() {
        let plan =
            FullLayout.plan((1181, 1181), Some((640, 480)), false, DEFAULT_DPI);
        let logo = plan.logo.unwrap();
        let planned = logo.w as f64 / logo.h as f64;
        assert!((planned - 640.0 / 480.0).abs() < 0.01);
    }
}
