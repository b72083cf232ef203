use regex::Regex;

use crate::Result;

/// 按嵌套深度编译的名称选择器
///
/// 原始模式以 `/` 分层，`[...]` 与 `(...)` 内的 `/` 不参与分层；
/// 每一层是一条不加锚定的正则。空模式匹配一切。
#[derive(Debug, Default)]
pub struct NameMatcher {
    filters: Vec<Regex>,
}

impl NameMatcher {
    /// 编译选择器，空字符串表示全选
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            filters: split_pattern(pattern)?,
        })
    }

    /// 匹配一切的选择器
    pub fn match_all() -> Self {
        Self::default()
    }

    /// 判断候选路径（自执行根到当前节点的名字序列）是否应该执行
    ///
    /// 模式只约束路径前缀：候选路径超出模式深度的部分一律放行，
    /// 这样 `Suite/Case` 选中一个子测试后，它的后代总是会执行。
    pub fn matches(&self, path: &[String]) -> bool {
        for (i, name) in path.iter().enumerate() {
            match self.filters.get(i) {
                Some(rx) => {
                    if !rx.is_match(name) {
                        return false;
                    }
                }
                None => break,
            }
        }
        true
    }
}

/// 在 `[...]` 和 `(...)` 之外的 `/` 上切分模式，每段编译成正则
fn split_pattern(pattern: &str) -> Result<Vec<Regex>> {
    if pattern.is_empty() {
        return Ok(Vec::new());
    }

    let mut res = Vec::new();
    let mut brack = 0usize;
    let mut paren = 0i32;
    let mut off = 0;
    for (i, c) in pattern.char_indices() {
        match c {
            '[' => brack += 1,
            ']' => brack = brack.saturating_sub(1),
            '(' if brack == 0 => paren += 1,
            ')' if brack == 0 => paren -= 1,
            '/' if brack == 0 && paren == 0 => {
                res.push(Regex::new(&pattern[off..i])?);
                off = i + 1;
            }
            _ => {}
        }
    }
    res.push(Regex::new(&pattern[off..])?);
    Ok(res)
}
