use std::time::Instant;

use crate::runner::types::{Report, Status};
use crate::selector::NameMatcher;

/// 中止信号
///
/// skip/fatal 用它提前结束当前测试体：信号沿返回值传回到
/// 调用该测试体的 run，在那里被原样吞掉。它只承载控制流，
/// 测试代码的 panic 不走这里，会直接冲出整个运行。
#[derive(Debug)]
pub struct Abort(());

/// 测试体的返回类型
///
/// 正常结束返回 Ok(())，skip/fatal 的信号用 `return` 或 `?` 传出去。
pub type TestFlow = std::result::Result<(), Abort>;

/// 子上下文向上看到的父链
///
/// 链的根由执行器的会话实现：它吸收失败传播并转发报告。
pub(crate) trait Propagate {
    fn mark_failed(&mut self);
    fn selector(&self) -> &NameMatcher;
    fn emit(&mut self, report: Report);
}

/// 一次 run 调用对应的执行上下文
///
/// 独占借用父节点，只用于向上传播；run 返回时随之销毁。
pub struct TestContext<'a> {
    up: &'a mut dyn Propagate,
    path: Vec<String>,
    failed: bool,
    skipped: bool,
    errors: Vec<String>,
}

impl<'a> TestContext<'a> {
    pub(crate) fn new(up: &'a mut dyn Propagate, path: Vec<String>) -> Self {
        Self {
            up,
            path,
            failed: false,
            skipped: false,
            errors: Vec::new(),
        }
    }

    /// 自执行根到当前节点的名字序列
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// 标记跳过并立即结束当前测试体，不算失败
    #[must_use = "skip 的信号要从测试体 return 出去才会生效"]
    pub fn skip(&mut self) -> TestFlow {
        self.skipped = true;
        Err(Abort(()))
    }

    /// 标记失败，所有祖先当场一并标记；测试体继续执行
    pub fn fail(&mut self) {
        self.up.mark_failed();
        self.failed = true;
    }

    /// fail 并记录一条错误消息
    pub fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
        self.fail();
    }

    /// error 并立即结束当前测试体
    #[must_use = "fatal 的信号要从测试体 return 出去才会生效"]
    pub fn fatal(&mut self, msg: impl Into<String>) -> TestFlow {
        self.error(msg);
        Err(Abort(()))
    }

    /// 以当前节点为父执行一个子测试，返回子测试是否通过
    ///
    /// 子路径被选择器拒绝时不创建上下文、不执行函数体，
    /// 按"没有运行，也不算失败"返回 true。执行过的子节点
    /// 在函数体结束或中止后恰好产生一份报告，
    /// 状态优先级 Failed > Skipped > Passed。
    ///
    /// # Panics
    ///
    /// name 为空时 panic：这是调用方的用法错误，不是测试失败。
    pub fn run<F>(&mut self, name: &str, func: F) -> bool
    where
        F: FnOnce(&mut TestContext<'_>) -> TestFlow,
    {
        assert!(!name.is_empty(), "no test name provided");

        let mut child_path = self.path.clone();
        child_path.push(name.to_string());

        if !self.up.selector().matches(&child_path) {
            return true;
        }

        let mut child = TestContext::new(self, child_path);
        let start = Instant::now();
        // 只吞掉内部的中止信号；panic 原样向外传播
        let _ = func(&mut child);
        let duration = start.elapsed();

        let TestContext {
            up,
            path,
            failed,
            skipped,
            errors,
        } = child;
        let status = if failed {
            Status::Failed
        } else if skipped {
            Status::Skipped
        } else {
            Status::Passed
        };
        up.emit(Report {
            path,
            status,
            duration,
            errors,
        });
        !failed
    }
}

impl Propagate for TestContext<'_> {
    fn mark_failed(&mut self) {
        self.up.mark_failed();
        self.failed = true;
    }

    fn selector(&self) -> &NameMatcher {
        self.up.selector()
    }

    fn emit(&mut self, report: Report) {
        self.up.emit(report);
    }
}
