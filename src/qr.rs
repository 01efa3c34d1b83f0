//! 二维码编码模块
//!
//! # 设计思路
//!
//! 身份数据（学号/姓名/可选主题）按固定换行分隔格式编码，供扫码端解析。
//! 纠错等级固定为最高档 H（容忍约 30% 符号损伤），保证打印与物理磨损后
//! 仍可扫描。版本由编码器按载荷自动选取最小可容纳者，载荷超限时显式
//! 报错，绝不截断身份数据。
//!
//! # 实现思路
//!
//! 以固定模块像素尺寸 + 1 模块静区手工栅格化为黑白灰度图，
//! 最终边长由上层调用 `resize` 模块等比缩放到版面需要的像素尺寸。

use image::{DynamicImage, GrayImage, Luma};
use qrcode::{EcLevel, QrCode};

use crate::error::LabelError;

/// 单个二维码模块的像素边长
const MODULE_PX: u32 = 10;
/// 静区宽度（模块数）
const QUIET_ZONE_MODULES: u32 = 1;

/// 构造二维码载荷：换行分隔的 `ID:` / `Name:` / 可选 `Subject:` 行，无尾随换行。
pub fn qr_payload(student_id: &str, name: &str, subject: Option<&str>) -> String {
    let mut payload = format!("ID:{}\nName:{}", student_id, name);
    if let Some(subject) = subject {
        if !subject.is_empty() {
            payload.push_str("\nSubject:");
            payload.push_str(subject);
        }
    }
    payload
}

/// 将身份数据编码为黑白正方形二维码位图。
pub fn make_qr(
    student_id: &str,
    name: &str,
    subject: Option<&str>,
) -> Result<DynamicImage, LabelError> {
    let payload = qr_payload(student_id, name, subject);

    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H)
        .map_err(|e| LabelError::QrCapacity(format!("载荷 {} 字节: {}", payload.len(), e)))?;

    let modules = code.to_colors();
    let module_count = code.width() as u32;
    let total_modules = module_count + QUIET_ZONE_MODULES * 2;
    let side = total_modules * MODULE_PX;

    let mut img = GrayImage::from_pixel(side, side, Luma([255u8]));

    for (i, color) in modules.iter().enumerate() {
        if *color != qrcode::Color::Dark {
            continue;
        }
        let mx = (i as u32 % module_count + QUIET_ZONE_MODULES) * MODULE_PX;
        let my = (i as u32 / module_count + QUIET_ZONE_MODULES) * MODULE_PX;
        for dy in 0..MODULE_PX {
            for dx in 0..MODULE_PX {
                img.put_pixel(mx + dx, my + dy, Luma([0u8]));
            }
        }
    }

    Ok(DynamicImage::ImageLuma8(img))
}
