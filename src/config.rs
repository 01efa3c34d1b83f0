//! 配置模块
//!
//! # 设计思路
//!
//! 将所有"可调策略"集中到 `LabelConfig`，作为显式构造的不可变值传入
//! 排版入口，而不是进程级全局状态。字段名与落盘 JSON 键一一对应，
//! 便于与历史配置文件直接互通。
//!
//! # 实现思路
//!
//! - `Default` 提供开箱可用的完整默认值。
//! - `load` 读取 `settings.json`：文件缺失 ⇒ 默认值；解析失败 ⇒ 记一条
//!   警告日志后回退默认值，绝不向调用方抛错（显式的默认替换，而非
//!   吞掉一切异常）。
//! - 每个字段带 `#[serde(default)]`，旧配置文件缺键时按键合并默认值。
//! - `save` 以 pretty JSON 写回，仅此方向会暴露 I/O 错误。

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::LabelError;
use crate::units::DEFAULT_DPI;

/// 标签生成配置。
///
/// 覆盖默认 Logo、纸张预设、二维码/Logo 默认尺寸提示与字体选择。
/// 尺寸提示类字段供 UI 层做默认值展示，排版引擎本身只消费
/// `default_logo`、`font_path`、`dpi` 三项。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelConfig {
    /// 调用方未指定 Logo 时使用的默认 Logo 路径
    #[serde(rename = "DEFAULT_LOGO", default)]
    pub default_logo: Option<PathBuf>,

    /// 命名纸张预设（毫米，横向）
    #[serde(rename = "PAPER_SIZES", default = "default_paper_sizes")]
    pub paper_sizes: BTreeMap<String, (f64, f64)>,

    /// 二维码大小（相对于纸张短边的百分比）
    #[serde(rename = "QR_CODE_SIZE_PERCENT", default = "default_qr_size_percent")]
    pub qr_code_size_percent: f64,

    /// 二维码到纸张边缘的距离（毫米）
    #[serde(rename = "QR_MARGIN", default = "default_qr_margin")]
    pub qr_margin: f64,

    /// 二维码下方姓名的字体大小
    #[serde(rename = "QR_NAME_FONT_SIZE", default = "default_font_size")]
    pub qr_name_font_size: u32,

    /// Logo 大小（相对于纸张短边的百分比）
    #[serde(rename = "LOGO_SIZE_PERCENT", default = "default_logo_size_percent")]
    pub logo_size_percent: f64,

    /// Logo 到纸张边缘的距离（毫米）
    #[serde(rename = "LOGO_MARGIN", default = "default_logo_margin")]
    pub logo_margin: f64,

    /// 姓名字体大小
    #[serde(rename = "FONT_SIZE", default = "default_font_size")]
    pub font_size: u32,

    /// 标签文字字体文件路径，缺失时由字体模块逐级降级
    #[serde(rename = "FONT_PATH", default = "default_font_path")]
    pub font_path: Option<PathBuf>,

    /// 打印分辨率覆盖项，默认 300
    #[serde(rename = "DPI", default = "default_dpi")]
    pub dpi: u32,
}

fn default_paper_sizes() -> BTreeMap<String, (f64, f64)> {
    BTreeMap::from([
        ("A4".to_string(), (297.0, 210.0)),
        ("A3".to_string(), (420.0, 297.0)),
    ])
}

fn default_qr_size_percent() -> f64 {
    15.0
}

fn default_qr_margin() -> f64 {
    20.0
}

fn default_logo_size_percent() -> f64 {
    12.0
}

fn default_logo_margin() -> f64 {
    20.0
}

fn default_font_size() -> u32 {
    24
}

fn default_font_path() -> Option<PathBuf> {
    Some(PathBuf::from("C:\\Windows\\Fonts\\simhei.ttf"))
}

fn default_dpi() -> u32 {
    DEFAULT_DPI
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            default_logo: None,
            paper_sizes: default_paper_sizes(),
            qr_code_size_percent: default_qr_size_percent(),
            qr_margin: default_qr_margin(),
            qr_name_font_size: default_font_size(),
            logo_size_percent: default_logo_size_percent(),
            logo_margin: default_logo_margin(),
            font_size: default_font_size(),
            font_path: default_font_path(),
            dpi: default_dpi(),
        }
    }
}

impl LabelConfig {
    /// 从配置文件加载。
    ///
    /// 文件缺失直接使用默认值；文件存在但解析失败时记录警告并回退默认值。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<Self>(&content) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("配置文件解析失败，使用默认配置: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("配置文件读取失败，使用默认配置: {}", e);
                Self::default()
            }
        }
    }

    /// 将当前配置以 pretty JSON 写回磁盘。
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), LabelError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| LabelError::Config(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_two_paper_presets() {
        let config = LabelConfig::default();
        assert_eq!(config.paper_sizes.get("A4"), Some(&(297.0, 210.0)));
        assert_eq!(config.paper_sizes.get("A3"), Some(&(420.0, 297.0)));
        assert_eq!(config.dpi, 300);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = LabelConfig::load("/nonexistent/settings.json");
        assert_eq!(config.qr_code_size_percent, 15.0);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("qrlabel_bad_settings.json");
        fs::write(&path, "{ not json !").unwrap();
        let config = LabelConfig::load(&path);
        assert_eq!(config.font_size, 24);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn partial_file_merges_with_defaults() {
        let path = std::env::temp_dir().join("qrlabel_partial_settings.json");
        fs::write(&path, r#"{"QR_MARGIN": 8.0}"#).unwrap();
        let config = LabelConfig::load(&path);
        assert_eq!(config.qr_margin, 8.0);
        assert_eq!(config.logo_margin, 20.0);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn save_then_load_round_trips() {
        let path = std::env::temp_dir().join("qrlabel_saved_settings.json");
        let mut config = LabelConfig::default();
        config.dpi = 150;
        config.default_logo = Some(PathBuf::from("logo.png"));
        config.save(&path).unwrap();

        let loaded = LabelConfig::load(&path);
        assert_eq!(loaded.dpi, 150);
        assert_eq!(loaded.default_logo, Some(PathBuf::from("logo.png")));
        let _ = fs::remove_file(&path);
    }
}
