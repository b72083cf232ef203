use colored::{ColoredString, Colorize};

use crate::runner::types::{Report, RunSummary, Status};

/// 报告消费方
///
/// start/finish 是可选钩子，默认什么都不做；每个已执行节点
/// 按执行顺序恰好触发一次 report。返回值不被引擎消费。
pub trait Reporter {
    fn start(&mut self) {}

    fn report(&mut self, report: &Report);

    fn finish(&mut self) {}
}

/// 逐行打印的控制台报告器
///
/// 每个节点一行：状态图标、以 ` / ` 连接的路径、耗时；
/// 错误消息缩进跟在后面。finish 打印计数汇总和最终判定。
pub struct ListReporter {
    summary: RunSummary,
}

impl ListReporter {
    pub fn new() -> Self {
        Self {
            summary: RunSummary::default(),
        }
    }

    /// 运行结束后的汇总
    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    fn icon(status: Status) -> ColoredString {
        match status {
            Status::Passed => "✓".green(),
            Status::Failed => "✗".red(),
            Status::Skipped => "»".dimmed(),
        }
    }
}

impl Default for ListReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for ListReporter {
    fn start(&mut self) {
        self.summary = RunSummary::default();
    }

    fn report(&mut self, report: &Report) {
        let name = report.path.join(" / ");
        println!(
            "{} {} ({:.2}s)",
            Self::icon(report.status),
            name,
            report.duration.as_secs_f64()
        );
        for err in &report.errors {
            println!("\terror: {}", err.replace('\n', "\n\t\t"));
        }

        self.summary.record(report);
    }

    fn finish(&mut self) {
        let s = &self.summary;
        if s.skipped > 0 {
            println!(
                "\n{} passed, {} failed, {} skipped, {} total ({:.3}s)",
                s.passed.to_string().green(),
                s.failed.to_string().red(),
                s.skipped.to_string().dimmed(),
                s.total,
                s.total_duration.as_secs_f64()
            );
        } else {
            println!(
                "\n{} passed, {} failed, {} total ({:.3}s)",
                s.passed.to_string().green(),
                s.failed.to_string().red(),
                s.total,
                s.total_duration.as_secs_f64()
            );
        }

        if s.all_passed() {
            println!("{}", "PASSED".green().bold());
        } else {
            println!("{}", "FAILED".red().bold());
        }
    }
}

/// 每行一个 JSON 对象的机器可读报告器
///
/// 各节点一行报告对象，finish 时追加一行汇总对象。
pub struct JsonReporter {
    summary: RunSummary,
}

impl JsonReporter {
    pub fn new() -> Self {
        Self {
            summary: RunSummary::default(),
        }
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for JsonReporter {
    fn start(&mut self) {
        self.summary = RunSummary::default();
    }

    fn report(&mut self, report: &Report) {
        match serde_json::to_string(report) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::warn!("无法序列化报告: {e}"),
        }
        self.summary.record(report);
    }

    fn finish(&mut self) {
        match serde_json::to_string(&self.summary) {
            Ok(line) => println!("{{\"summary\":{line}}}"),
            Err(e) => tracing::warn!("无法序列化汇总: {e}"),
        }
    }
}
