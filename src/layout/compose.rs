//! 合成编排模块
//!
//! # 设计思路
//!
//! 对外唯一入口 `generate_label`：校验输入 → 选版式 → 加载素材 →
//! 策略规划 → 一次性合成。所有内部失败在此边界收敛为
//! `LabelError`，调用方只会看到"无图 + 诊断信息"。
//!
//! # 实现思路
//!
//! - 调用方显式指定的 Logo 不可读 ⇒ 整次生成失败（宁可不出图，
//!   也不打出一张缺 Logo 的错误标签）。
//! - 配置里的默认 Logo 文件不存在 ⇒ 按无 Logo 继续。
//! - 每次调用独占一块白底 RGB 画布，调用间无共享可变状态。

use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView, Rgb, RgbImage, imageops};

use crate::config::LabelConfig;
use crate::error::LabelError;
use crate::font::LabelFont;
use crate::layout::mode::{LayoutMode, select_mode};
use crate::layout::plan::{CompactLayout, FullLayout, LayoutStrategy};
use crate::qr::make_qr;
use crate::resize::{ResizeTarget, resize_preserving_aspect};
use crate::units::mm_to_px;

/// 一次标签生成的不可变输入
#[derive(Debug, Clone)]
pub struct LabelRequest {
    pub student_id: String,
    pub name: String,
    pub subject: Option<String>,
    /// 纸张物理尺寸（毫米，宽 × 高）
    pub paper_size_mm: (f64, f64),
    /// 二维码边长相对画布短边的比例，取值 (0, 1]
    pub qr_size_ratio: f64,
    pub logo_path: Option<PathBuf>,
}

/// 生成标签位图。
///
/// 成功返回 `mm_to_px(宽) × mm_to_px(高)` 的白底 RGB 画布，
/// 相同输入（含同一 Logo 文件）产出逐像素一致的结果。
pub fn generate_label(
    request: &LabelRequest,
    config: &LabelConfig,
) -> Result<RgbImage, LabelError> {
    validate(request)?;

    let dpi = config.dpi;
    let canvas_w = mm_to_px(request.paper_size_mm.0, dpi);
    let canvas_h = mm_to_px(request.paper_size_mm.1, dpi);
    if canvas_w == 0 || canvas_h == 0 {
        return Err(LabelError::InvalidInput(format!(
            "纸张尺寸过小: {:?} mm",
            request.paper_size_mm
        )));
    }

    let mode = select_mode(request.paper_size_mm);
    let logo = load_logo(request.logo_path.as_deref(), config)?;
    let logo_size = logo.as_ref().map(|img| img.dimensions());

    let subject = request
        .subject
        .as_deref()
        .filter(|s| !s.trim().is_empty());

    let compact;
    let strategy: &dyn LayoutStrategy = match mode {
        LayoutMode::Compact => {
            compact = CompactLayout {
                qr_size_ratio: request.qr_size_ratio,
            };
            &compact
        }
        LayoutMode::Full => &FullLayout,
    };
    let plan = strategy.plan((canvas_w, canvas_h), logo_size, subject.is_some(), dpi);

    log::info!(
        "开始合成标签 - 学号: {} 版式: {:?} 画布: {}x{}",
        request.student_id,
        plan.mode,
        canvas_w,
        canvas_h
    );

    let mut canvas = RgbImage::from_pixel(canvas_w, canvas_h, Rgb([255, 255, 255]));

    let qr = make_qr(&request.student_id, &request.name, subject)?;
    let qr = resize_preserving_aspect(&qr, ResizeTarget::Fit(plan.qr.w, plan.qr.h));
    imageops::replace(&mut canvas, &qr.to_rgb8(), plan.qr.x, plan.qr.y);

    if let (Some(logo), Some(rect)) = (&logo, &plan.logo) {
        let scaled = resize_preserving_aspect(logo, ResizeTarget::Fit(rect.w, rect.h));
        imageops::replace(&mut canvas, &scaled.to_rgb8(), rect.x, rect.y);
    }

    if !plan.text_anchors.is_empty() {
        let font = LabelFont::load(config.font_path.as_deref());
        let mut lines = vec![
            format!("姓名：{}", request.name),
            format!("学号：{}", request.student_id),
        ];
        if let Some(subject) = subject {
            lines.push(format!("主题：{}", subject));
        }
        for ((x, y), line) in plan.text_anchors.iter().zip(&lines) {
            font.draw_line(&mut canvas, line, *x as i32, *y as i32, plan.font_size);
        }
    }

    log::info!("标签合成完成 - 学号: {}", request.student_id);
    Ok(canvas)
}

fn validate(request: &LabelRequest) -> Result<(), LabelError> {
    if request.student_id.trim().is_empty() {
        return Err(LabelError::InvalidInput("学号不能为空".to_string()));
    }
    if request.name.trim().is_empty() {
        return Err(LabelError::InvalidInput("姓名不能为空".to_string()));
    }
    if !(request.qr_size_ratio > 0.0 && request.qr_size_ratio <= 1.0) {
        return Err(LabelError::InvalidInput(format!(
            "二维码比例需在 (0, 1] 区间: {}",
            request.qr_size_ratio
        )));
    }
    Ok(())
}

/// 加载 Logo。
///
/// 调用方显式路径：缺失或解码失败都直接报错。
/// 配置默认路径：文件不存在按无 Logo 处理，存在但解码失败仍报错。
fn load_logo(
    path: Option<&Path>,
    config: &LabelConfig,
) -> Result<Option<DynamicImage>, LabelError> {
    if let Some(path) = path {
        let img = image::open(path)
            .map_err(|e| LabelError::LogoLoad(format!("{}: {}", path.display(), e)))?;
        return Ok(Some(img));
    }

    if let Some(default) = &config.default_logo {
        if default.exists() {
            let img = image::open(default)
                .map_err(|e| LabelError::LogoLoad(format!("{}: {}", default.display(), e)))?;
            return Ok(Some(img));
        }
        log::warn!("默认 Logo 文件不存在，按无 Logo 继续: {}", default.display());
    }

    Ok(None)
}
