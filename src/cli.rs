use std::path::PathBuf;

use clap::Parser;

use crate::config::{ConfigLoader, FileConfig};
use crate::discovery;
use crate::runner::{JsonReporter, ListReporter, Registry, Reporter, TestExecutor};
use crate::selector::NameMatcher;

pub type Result<T> = std::result::Result<T, anyhow::Error>;

/// 没有任何来源给出模式时的缺省发现模式
const DEFAULT_PATTERN: &str = "**/*_test.rs";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// glob 发现模式，以 / 分隔，支持 `**`
    pub patterns: Vec<String>,

    /// 按名称模式选择要运行的测试，以 / 对应嵌套深度
    #[arg(short = 'r', long = "run")]
    pub run: Option<String>,

    /// 以 JSON 行输出报告
    #[arg(long)]
    pub json: bool,

    /// 只列出发现的测试文件，不运行
    #[arg(long)]
    pub list: bool,

    /// 发现的根目录，缺省为当前目录
    #[arg(long)]
    pub root: Option<PathBuf>,
}

/// 解析完成的运行配置：文件列表、选择器、报告器
///
/// 文件列表交给嵌入方按需注册（编译型语言没有 require 这一步），
/// 注册表再经 run 执行。
pub struct Config {
    pub files: Vec<PathBuf>,
    pub matcher: NameMatcher,
    pub reporter: Box<dyn Reporter>,
    pub list: bool,
}

impl Config {
    /// 解析进程参数，结合 rutest.toml 生成配置
    pub fn from_args() -> Result<Self> {
        Self::resolve(Cli::parse(), ConfigLoader::find_and_load().unwrap_or_default())
    }

    /// 命令行参数覆盖文件配置
    ///
    /// 所有模式先整体编译再求值，语法错误和目录读取错误
    /// 都在任何测试运行之前返回。
    pub fn resolve(cli: Cli, file: FileConfig) -> Result<Self> {
        let mut patterns = cli.patterns;
        if patterns.is_empty() {
            patterns = file.patterns;
        }
        if patterns.is_empty() {
            patterns.push(DEFAULT_PATTERN.to_string());
        }

        let root = match cli.root {
            Some(root) => root,
            None => std::env::current_dir()?,
        };

        let json = cli.json || file.output.json;
        if !file.output.color {
            colored::control::set_override(false);
        }

        let files = discovery::glob(root, &patterns)?;
        tracing::debug!("发现 {} 个测试文件", files.len());

        let matcher = NameMatcher::new(cli.run.as_deref().unwrap_or(""))?;
        let reporter: Box<dyn Reporter> = if json {
            Box::new(JsonReporter::new())
        } else {
            Box::new(ListReporter::new())
        };

        Ok(Self {
            files,
            matcher,
            reporter,
            list: cli.list,
        })
    }

    /// 执行注册表，返回是否没有任何失败
    pub fn run(&mut self, registry: &Registry) -> bool {
        TestExecutor::new(&self.matcher).execute_all(registry, self.reporter.as_mut())
    }
}
