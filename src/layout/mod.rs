//! # 版面引擎模块（layout）
//!
//! ## 设计思路
//!
//! 该模块将"版式选择 → 几何规划 → 像素合成"按职责拆分为三个子模块，
//! 几何计算保持纯函数，合成器只写一份。
//!
//! - `mode`：按物理纸张尺寸在紧凑/全幅两种版式间选择
//! - `plan`：`LayoutStrategy` 能力接口与两种版式的矩形推导
//! - `compose`：入口 `generate_label`，编排素材加载与一次性合成
//!
//! ## 实现思路
//!
//! 调用链：
//!
//! ```text
//! generate_label(request, config)
//!    ↓
//! mode.rs（选版式）
//!    ↓
//! plan.rs（算出 PlacementPlan：二维码/Logo/文字行矩形）
//!    ├─ units（毫米 → 像素）
//!    └─ resize::fit_within（Logo 宽高比适配）
//!    ↓
//! compose.rs（白底画布 + qr/resize/font 模块产出素材 → 粘贴绘字）
//!    ↓
//! RgbImage 或 LabelError
//! ```

pub mod compose;
pub mod mode;
pub mod plan;

pub use compose::{LabelRequest, generate_label};
pub use mode::{A3_LANDSCAPE_MM, A4_LANDSCAPE_MM, LayoutMode, select_mode};
pub use plan::{PlacementPlan, Rect};
