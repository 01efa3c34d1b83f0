//! # 学生标签排版引擎 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │            调用方（桌面表单 / 打印 / 预览，库外）          │
//! │                                                          │
//! │   generate_label(request, config) → RgbImage | LabelError │
//! └───────┬──────────────────────────────────────────────────┘
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↓            本库 (Rust)                            │
//! │                                                          │
//! │  ┌─ error ────── LabelError (统一错误类型)               │
//! │  │                                                       │
//! │  ├─ config ───── settings.json 读写 + 内置默认值          │
//! │  │                                                       │
//! │  ├─ layout ───── 版面引擎（核心）                         │
//! │  │   ├─ mode      紧凑/全幅版式选择                       │
//! │  │   ├─ plan      LayoutStrategy + PlacementPlan         │
//! │  │   └─ compose   画布合成编排                            │
//! │  │                                                       │
//! │  ├─ units ────── 毫米 → 像素（300 DPI）                   │
//! │  ├─ resize ───── 保比缩放 (fast_image_resize)            │
//! │  ├─ qr ───────── 二维码编码 (EC-H, 自动选版)              │
//! │  └─ font ─────── 文字栅格化 + 内置兜底字体                │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `LabelError`，引擎边界的唯一失败通道 |
//! | [`config`] | 不可变配置值 `LabelConfig`，JSON 持久化，缺失/损坏回退默认 |
//! | [`layout`] | 版式选择、几何规划与像素合成，入口 `generate_label` |
//! | [`units`] | 毫米到像素换算，全局 300 DPI |
//! | [`resize`] | 保持宽高比的高质量缩放 |
//! | [`qr`] | 身份数据编码为最高纠错等级二维码 |
//! | [`font`] | TrueType 渲染，缺字体时降级内置点阵字体 |

pub mod config;
pub mod error;
pub mod font;
pub mod layout;
pub mod qr;
pub mod resize;
pub mod units;

pub use config::LabelConfig;
pub use error::LabelError;
pub use layout::{LabelRequest, LayoutMode, generate_label, select_mode};
