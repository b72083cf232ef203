use std::fs;
use std::path::{Path, PathBuf};

use crate::Result;

/// 目录的直接子项
#[derive(Debug, Default)]
pub struct DirInfo {
    pub subdirs: Vec<Directory>,
    pub files: Vec<String>,
}

/// 惰性读取的目录节点
///
/// 第一次调用 info() 时读取文件系统，之后始终返回同一份缓存，
/// 即使磁盘内容在运行中发生变化。以 `.` 开头的隐藏项在
/// 两类列表中都被过滤掉。
#[derive(Debug)]
pub struct Directory {
    name: String,
    path: PathBuf,
    info: Option<DirInfo>,
}

impl Directory {
    /// 以给定根路径创建节点
    pub fn root(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            name,
            path,
            info: None,
        }
    }

    fn child(name: String, parent: &Path) -> Self {
        let path = parent.join(&name);
        Self {
            name,
            path,
            info: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 返回目录的直接子项，必要时读取文件系统
    ///
    /// 读取错误直接向上传播，整个发现阶段随之失败。
    pub fn info(&mut self) -> Result<&mut DirInfo> {
        if self.info.is_none() {
            self.info = Some(self.read()?);
        }
        Ok(self.info.as_mut().expect("directory info just cached"))
    }

    fn read(&self) -> Result<DirInfo> {
        let mut subdirs = Vec::new();
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.path)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            if entry.file_type()?.is_dir() {
                subdirs.push(Directory::child(name, &self.path));
            } else {
                files.push(name);
            }
        }
        Ok(DirInfo { subdirs, files })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_lists_children_and_skips_hidden() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::create_dir(tmp.path().join(".git")).unwrap();
        fs::write(tmp.path().join("a.rs"), "").unwrap();
        fs::write(tmp.path().join(".hidden"), "").unwrap();

        let mut dir = Directory::root(tmp.path());
        let info = dir.info().unwrap();
        assert_eq!(info.files, vec!["a.rs".to_string()]);
        assert_eq!(info.subdirs.len(), 1);
        assert_eq!(info.subdirs[0].name(), "sub");
    }

    #[test]
    fn test_read_is_memoized() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.rs"), "").unwrap();

        let mut dir = Directory::root(tmp.path());
        assert_eq!(dir.info().unwrap().files.len(), 1);

        // 第一次读取之后的磁盘变化不再反映到缓存里
        fs::write(tmp.path().join("b.rs"), "").unwrap();
        assert_eq!(dir.info().unwrap().files.len(), 1);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let mut dir = Directory::root("/definitely/not/a/real/path");
        assert!(dir.info().is_err());
    }
}
