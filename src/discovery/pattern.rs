use std::path::PathBuf;

use regex::Regex;

use crate::discovery::collector;
use crate::discovery::directory::Directory;
use crate::error::{Result, RutestError};

/// 编译后的一条 glob 模式
///
/// 自后向前把每一段编译成 Matcher 链，对目录树做显式递归求值。
#[derive(Debug)]
pub struct Pattern {
    head: Matcher,
}

impl Pattern {
    /// 编译一条以 `/` 分隔的模式，语法错误在任何匹配发生前返回
    pub fn compile(pattern: &str) -> Result<Self> {
        let normalized = pattern.replace('\\', "/");
        let segments: Vec<&str> = normalized.split('/').collect();
        Ok(Self {
            head: compile_segments(&segments)?,
        })
    }

    /// 对以 root 为根的目录树求值，返回匹配到的文件路径
    pub fn matches(&self, root: &mut Directory) -> Result<Vec<PathBuf>> {
        self.head.eval(root)
    }
}

/// 一段模式的编译结果，持有下一段的编译形式
#[derive(Debug)]
enum Matcher {
    /// 空段或末段 `**`，永远不产生匹配
    Nothing,
    /// 末段 `*`：当前目录下的全部文件
    AllFiles,
    /// 非末段 `*`：进入每个子目录
    AllDirs(Box<Matcher>),
    /// 非末段 `**`：在当前目录以及任意深度的子目录求值剩余模式
    Recursive(Box<Matcher>),
    /// 末段字面量：按正则过滤文件名
    FileRegex(Regex),
    /// 非末段字面量：按正则过滤子目录名并继续
    DirRegex(Regex, Box<Matcher>),
}

fn compile_segments(segments: &[&str]) -> Result<Matcher> {
    let Some((first, rest)) = segments.split_first() else {
        return Ok(Matcher::Nothing);
    };

    let is_last = rest.is_empty();
    // 后段先编译，前段持有后段的结果
    let next = compile_segments(rest)?;
    Ok(match *first {
        "" => Matcher::Nothing,
        "*" if is_last => Matcher::AllFiles,
        "*" => Matcher::AllDirs(Box::new(next)),
        // 递归通配符只选目录，收尾的 `**` 不收任何文件
        "**" if is_last => Matcher::Nothing,
        "**" => Matcher::Recursive(Box::new(next)),
        token if is_last => Matcher::FileRegex(token_regex(token)?),
        token => Matcher::DirRegex(token_regex(token)?, Box::new(next)),
    })
}

impl Matcher {
    fn eval(&self, dir: &mut Directory) -> Result<Vec<PathBuf>> {
        match self {
            Matcher::Nothing => Ok(Vec::new()),

            Matcher::AllFiles => {
                let base = dir.path().to_path_buf();
                let info = dir.info()?;
                Ok(info.files.iter().map(|f| base.join(f)).collect())
            }

            Matcher::AllDirs(next) => {
                let mut out = Vec::new();
                for sub in &mut dir.info()?.subdirs {
                    out.extend(next.eval(sub)?);
                }
                Ok(out)
            }

            Matcher::Recursive(next) => {
                // 零层情形：剩余模式先在当前目录求值，再对每个子目录自递归
                let mut out = next.eval(dir)?;
                for sub in &mut dir.info()?.subdirs {
                    out.extend(self.eval(sub)?);
                }
                // 不同分支可能命中同一路径，在这一步去重
                Ok(collector::unique(out))
            }

            Matcher::FileRegex(rx) => {
                let base = dir.path().to_path_buf();
                let info = dir.info()?;
                Ok(info
                    .files
                    .iter()
                    .filter(|f| rx.is_match(f))
                    .map(|f| base.join(f))
                    .collect())
            }

            Matcher::DirRegex(rx, next) => {
                let mut out = Vec::new();
                for sub in &mut dir.info()?.subdirs {
                    if rx.is_match(sub.name()) {
                        out.extend(next.eval(sub)?);
                    }
                }
                Ok(out)
            }
        }
    }
}

/// 把一个字面量段翻译成锚定的正则
///
/// `*`→`.*`，`?`→`.`，`.` 转义为字面量；`[...]` 内容原样透传，
/// 开头的 `!` 翻译成取反的 `^`。没有闭合的括号表达式直接拒绝。
fn token_regex(token: &str) -> Result<Regex> {
    let mut rx = String::from("^");
    let mut chars = token.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => {
                if chars.peek() == Some(&'*') {
                    return Err(RutestError::InvalidPattern(format!(
                        "字面量段中不允许相邻的 `**`: {token}"
                    )));
                }
                rx.push_str(".*");
            }
            '?' => rx.push('.'),
            '.' => rx.push_str("\\."),
            '[' => {
                rx.push('[');
                match chars.next() {
                    Some('!') => rx.push('^'),
                    Some(first) => rx.push(first),
                    None => {
                        return Err(RutestError::InvalidPattern(format!(
                            "括号表达式没有闭合: {token}"
                        )));
                    }
                }
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == ']' {
                        closed = true;
                        break;
                    }
                    rx.push(c);
                }
                if !closed {
                    return Err(RutestError::InvalidPattern(format!(
                        "括号表达式没有闭合: {token}"
                    )));
                }
                rx.push(']');
            }
            _ => rx.push(c),
        }
    }
    rx.push('$');

    Regex::new(&rx).map_err(|e| RutestError::InvalidPattern(format!("{token}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rx(token: &str) -> Regex {
        token_regex(token).unwrap()
    }

    #[test]
    fn test_token_regex_wildcards() {
        assert!(rx("*_test.rs").is_match("glob_test.rs"));
        assert!(rx("*_test.rs").is_match("_test.rs"));
        assert!(!rx("*_test.rs").is_match("glob_test_rs"));
        assert!(rx("a?c").is_match("abc"));
        assert!(!rx("a?c").is_match("ac"));
    }

    #[test]
    fn test_token_regex_is_anchored() {
        assert!(!rx("test").is_match("my_test_file"));
        assert!(rx("test").is_match("test"));
    }

    #[test]
    fn test_token_regex_brackets() {
        assert!(rx("[abc].rs").is_match("a.rs"));
        assert!(!rx("[abc].rs").is_match("d.rs"));
        assert!(rx("[!abc].rs").is_match("d.rs"));
        assert!(!rx("[!abc].rs").is_match("a.rs"));
    }

    #[test]
    fn test_unterminated_bracket_is_rejected() {
        assert!(matches!(
            token_regex("[abc"),
            Err(RutestError::InvalidPattern(_))
        ));
        assert!(matches!(
            token_regex("x["),
            Err(RutestError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_adjacent_recursive_wildcard_in_token_is_rejected() {
        assert!(matches!(
            token_regex("a**b"),
            Err(RutestError::InvalidPattern(_))
        ));
        assert!(matches!(
            Pattern::compile("src/a**/b"),
            Err(RutestError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_syntax_error_behind_empty_segment_still_detected() {
        // 空段让模式不产生任何匹配，但后面的段照样要能编译
        assert!(matches!(
            Pattern::compile("/a**b"),
            Err(RutestError::InvalidPattern(_))
        ));
    }
}
