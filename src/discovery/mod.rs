pub mod collector;
pub mod directory;
pub mod pattern;

// Re-export commonly used types
pub use directory::{DirInfo, Directory};
pub use pattern::Pattern;

use std::path::PathBuf;

use crate::Result;

/// 在 root 下解析一组 glob 模式，返回去重排序后的文件列表
///
/// 所有模式先整体编译，语法错误在任何目录被读取之前返回；
/// 随后各模式依次对同一棵惰性目录树求值，每个目录至多读一次。
pub fn glob(root: impl Into<PathBuf>, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let compiled = patterns
        .iter()
        .map(|p| Pattern::compile(p))
        .collect::<Result<Vec<_>>>()?;

    let mut root = Directory::root(root);
    let mut all = Vec::new();
    for pattern in &compiled {
        all.extend(pattern.matches(&mut root)?);
    }
    Ok(collector::collect(all))
}
