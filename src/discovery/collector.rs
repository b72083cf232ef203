use std::collections::HashSet;
use std::path::PathBuf;

/// 去掉重复路径，保留首次出现的位置
pub(crate) fn unique(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    paths.into_iter().filter(|p| seen.insert(p.clone())).collect()
}

/// 合并各条模式的匹配结果：去重后按路径字符串的字节序升序排序
pub fn collect(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut out = unique(paths);
    out.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    out
}
