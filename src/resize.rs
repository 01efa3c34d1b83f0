//! 保持宽高比的缩放模块
//!
//! # 设计思路
//!
//! 排版中所有位图缩放都经过这里：Logo 按外接框适配、二维码按目标边长
//! 等比缩放。先用纯整数几何算出目标尺寸，再执行高质量重采样，
//! 几何与采样分离，便于对"永不越界、比例误差 ≤ 1px"做独立测试。
//!
//! # 实现思路
//!
//! 1. `fit_within` 通过交叉相乘比较宽高比选出约束边，整除向下取整，
//!    保证结果完全落在外接框内且至少贴住一条边。
//! 2. 重采样优先走 `fast_image_resize`（Lanczos3 卷积）；缓冲构建失败时
//!    回退 `image::resize_exact`，缩放本身没有失败路径。

use fast_image_resize as fr;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageBuffer, Rgba};

/// 缩放目标
///
/// - `Height`：单标量目标按高度解释，宽度由源图宽高比推出（与历史行为一致）。
/// - `Fit`：(宽, 高) 外接框，按约束边适配，结果完整落在框内。
#[derive(Debug, Clone, Copy)]
pub enum ResizeTarget {
    Height(u32),
    Fit(u32, u32),
}

/// 计算源尺寸在外接框内按宽高比适配后的目标尺寸。
///
/// 源图更"宽"（宽高比大于框）时宽度贴住框宽，否则高度贴住框高。
/// 两个维度都向下取整，结果绝不超出外接框。
pub fn fit_within(src: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = (src.0.max(1) as u64, src.1.max(1) as u64);
    let (box_w, box_h) = (bounds.0.max(1) as u64, bounds.1.max(1) as u64);

    // src_w/src_h >= box_w/box_h ⟺ src_w*box_h >= box_w*src_h
    if src_w * box_h >= box_w * src_h {
        let height = (box_w * src_h / src_w).max(1);
        (box_w as u32, height as u32)
    } else {
        let width = (box_h * src_w / src_h).max(1);
        (width as u32, box_h as u32)
    }
}

/// 按目标等比缩放图像，保持宽高比，不裁剪。
pub fn resize_preserving_aspect(image: &DynamicImage, target: ResizeTarget) -> DynamicImage {
    let (src_w, src_h) = image.dimensions();

    let (target_w, target_h) = match target {
        ResizeTarget::Height(h) => {
            let h = h.max(1);
            let w = (h as u64 * src_w.max(1) as u64 / src_h.max(1) as u64).max(1);
            (w as u32, h)
        }
        ResizeTarget::Fit(w, h) => fit_within((src_w, src_h), (w, h)),
    };

    if (target_w, target_h) == (src_w, src_h) {
        return image.clone();
    }

    match resize_with_fast_image_resize(image, target_w, target_h) {
        Ok(resized) => resized,
        Err(err) => {
            log::warn!("fast_image_resize 缩放失败，回退 image::resize_exact: {}", err);
            image.resize_exact(target_w, target_h, FilterType::Lanczos3)
        }
    }
}

fn resize_with_fast_image_resize(
    image: &DynamicImage,
    target_width: u32,
    target_height: u32,
) -> Result<DynamicImage, String> {
    let src = image.to_rgba8();
    let (src_width, src_height) = src.dimensions();

    let src_image =
        fr::images::Image::from_vec_u8(src_width, src_height, src.into_raw(), fr::PixelType::U8x4)
            .map_err(|e| format!("构建源图像缓冲失败: {}", e))?;

    let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x4);

    let mut resizer = fr::Resizer::new();
    let options = fr::ResizeOptions::new()
        .resize_alg(fr::ResizeAlg::Convolution(fr::FilterType::Lanczos3));

    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| format!("fast_image_resize 执行失败: {}", e))?;

    let rgba = ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(
        target_width,
        target_height,
        dst_image.into_vec(),
    )
    .ok_or_else(|| "fast_image_resize 输出缓冲长度异常".to_string())?;

    Ok(DynamicImage::ImageRgba8(rgba))
}
