use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Result, RutestError};

/// 输出相关配置
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// 以 JSON 行输出报告
    #[serde(default)]
    pub json: bool,

    /// 控制台输出是否着色
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_color() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json: false,
            color: true,
        }
    }
}

/// rutest.toml 文件配置
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FileConfig {
    /// 默认的 glob 发现模式，命令行给出模式时被覆盖
    #[serde(default)]
    pub patterns: Vec<String>,

    #[serde(default)]
    pub output: OutputConfig,
}

/// 配置文件加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置文件名
    const CONFIG_FILE: &'static str = "rutest.toml";

    /// 从指定路径加载配置文件
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<FileConfig> {
        let content = fs::read_to_string(path.as_ref())?;
        toml::from_str(&content).map_err(|e| RutestError::ConfigError(e.to_string()))
    }

    /// 查找并加载配置文件
    /// 查找顺序：
    /// 1. 当前目录
    /// 2. 父目录递归查找
    /// 3. 用户配置目录 ~/.config/rutest/
    pub fn find_and_load() -> Option<FileConfig> {
        if let Some(config) = Self::try_load_from_current_dir() {
            return Some(config);
        }

        if let Some(config) = Self::try_load_from_user_dir() {
            return Some(config);
        }

        None
    }

    /// 尝试从当前目录及其父目录加载
    fn try_load_from_current_dir() -> Option<FileConfig> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let config_path = current.join(Self::CONFIG_FILE);
            if config_path.exists() {
                return Self::load_from_path(&config_path).ok();
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// 尝试从用户配置目录加载
    fn try_load_from_user_dir() -> Option<FileConfig> {
        let home = dirs::home_dir()?;
        let config_path = home.join(".config").join("rutest").join(Self::CONFIG_FILE);

        if config_path.exists() {
            Self::load_from_path(&config_path).ok()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_from_path() {
        let config_content = r#"
patterns = ["tests/**/*_test.rs", "spec/*.rs"]

[output]
json = true
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = ConfigLoader::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.patterns.len(), 2);
        assert!(config.output.json);
        // 未给出的键落到默认值
        assert!(config.output.color);
    }

    #[test]
    fn test_empty_file_is_all_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"").unwrap();
        temp_file.flush().unwrap();

        let config = ConfigLoader::load_from_path(temp_file.path()).unwrap();
        assert!(config.patterns.is_empty());
        assert!(!config.output.json);
        assert!(config.output.color);
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"patterns = 3").unwrap();
        temp_file.flush().unwrap();

        assert!(matches!(
            ConfigLoader::load_from_path(temp_file.path()),
            Err(RutestError::ConfigError(_))
        ));
    }
}
