//! 文字栅格化模块
//!
//! # 设计思路
//!
//! 标签文字的渲染不允许仅因字体文件缺失而中断整次生成。
//! 解析顺序：配置指定的字体文件 → 常见系统中文字体路径 → 内置 5×7
//! 点阵兜底字体。降级只记一条警告日志，不向上传播错误。
//!
//! # 实现思路
//!
//! - TrueType 路径：`rusttype` 逐字形布局，按覆盖度 alpha 混合到画布。
//! - 点阵兜底：ASCII 子集的 5×7 位图按字号整数倍放大绘制，
//!   未收录字符画空心占位框，保证行位置与行距始终成立。

use std::fs;
use std::path::Path;

use image::{Rgb, RgbImage};
use rusttype::{Font, Scale, point};

/// 常见中文字体兜底路径（Windows / Linux / macOS）
const FALLBACK_FONT_PATHS: &[&str] = &[
    "C:\\Windows\\Fonts\\simhei.ttf",
    "C:\\Windows\\Fonts\\msyh.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/System/Library/Fonts/PingFang.ttc",
];

/// 标签文字字体：TrueType 或内置点阵兜底
pub enum LabelFont {
    TrueType(Font<'static>),
    Builtin,
}

impl LabelFont {
    /// 按降级链加载字体，必然成功。
    pub fn load(preferred: Option<&Path>) -> Self {
        if let Some(path) = preferred {
            match load_truetype(path) {
                Some(font) => return Self::TrueType(font),
                None => {
                    log::warn!("配置字体不可用，尝试系统字体: {}", path.display());
                }
            }
        }

        for path in FALLBACK_FONT_PATHS {
            if let Some(font) = load_truetype(Path::new(path)) {
                return Self::TrueType(font);
            }
        }

        log::warn!("未找到可用字体文件，使用内置点阵字体");
        Self::Builtin
    }

    /// 在画布上以黑色绘制一行文字，`(x, y)` 为行左上角，`size` 为行高像素。
    pub fn draw_line(&self, canvas: &mut RgbImage, text: &str, x: i32, y: i32, size: f32) {
        match self {
            Self::TrueType(font) => draw_truetype_line(canvas, font, text, x, y, size),
            Self::Builtin => draw_builtin_line(canvas, text, x, y, size),
        }
    }
}

fn load_truetype(path: &Path) -> Option<Font<'static>> {
    let data = fs::read(path).ok()?;
    Font::try_from_vec(data)
}

fn draw_truetype_line(
    canvas: &mut RgbImage,
    font: &Font<'static>,
    text: &str,
    x: i32,
    y: i32,
    size: f32,
) {
    let scale = Scale::uniform(size);
    let v_metrics = font.v_metrics(scale);
    let baseline = y as f32 + v_metrics.ascent;

    let (width, height) = canvas.dimensions();

    for glyph in font.layout(text, scale, point(x as f32, baseline)) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, coverage| {
                let px = bb.min.x + gx as i32;
                let py = bb.min.y + gy as i32;
                if px >= 0 && py >= 0 && (px as u32) < width && (py as u32) < height {
                    let alpha = (coverage * 255.0) as u16;
                    let pixel = canvas.get_pixel_mut(px as u32, py as u32);
                    for channel in pixel.0.iter_mut() {
                        *channel = ((*channel as u16 * (255 - alpha)) / 255) as u8;
                    }
                }
            });
        }
    }
}

fn draw_builtin_line(canvas: &mut RgbImage, text: &str, x: i32, y: i32, size: f32) {
    // 点阵字形 7 行高，按字号整数放大
    let cell = ((size / 8.0).round() as i32).max(1);
    let mut cursor_x = x;

    for ch in text.chars() {
        let glyph = builtin_glyph(ch);
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..5 {
                if bits & (0x10 >> col) == 0 {
                    continue;
                }
                let base_x = cursor_x + col as i32 * cell;
                let base_y = y + row as i32 * cell;
                fill_cell(canvas, base_x, base_y, cell);
            }
        }
        // 5 列字形 + 1 列间距
        cursor_x += 6 * cell;
    }
}

fn fill_cell(canvas: &mut RgbImage, x: i32, y: i32, cell: i32) {
    let (width, height) = canvas.dimensions();
    for dy in 0..cell {
        for dx in 0..cell {
            let px = x + dx;
            let py = y + dy;
            if px >= 0 && py >= 0 && (px as u32) < width && (py as u32) < height {
                canvas.put_pixel(px as u32, py as u32, Rgb([0, 0, 0]));
            }
        }
    }
}

/// 5×7 点阵字形，每行 5 bit，最高位在左。
/// 小写映射为大写，全角冒号映射为半角，未收录字符返回占位框。
fn builtin_glyph(ch: char) -> [u8; 7] {
    let ch = match ch {
        '：' => ':',
        c if c.is_ascii_lowercase() => c.to_ascii_uppercase(),
        c => c,
    };
    match ch {
        ' ' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '_' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F],
        // 未收录字符（含汉字）：空心占位框
        _ => [0x1F, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1F],
    }
}
