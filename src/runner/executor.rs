use crate::runner::context::{Propagate, TestContext};
use crate::runner::registry::Registry;
use crate::runner::reporter::Reporter;
use crate::runner::types::Report;
use crate::selector::NameMatcher;

/// 顶层驱动：把注册表里的测试按注册顺序全部跑一遍
pub struct TestExecutor<'m> {
    matcher: &'m NameMatcher,
}

/// 父链的根：吸收失败传播，转发报告
///
/// 根上下文本身不出报告，它的失败标记只用来得出整体判定。
struct Session<'a> {
    matcher: &'a NameMatcher,
    reporter: &'a mut dyn Reporter,
    failed: bool,
}

impl Propagate for Session<'_> {
    fn mark_failed(&mut self) {
        self.failed = true;
    }

    fn selector(&self) -> &NameMatcher {
        self.matcher
    }

    fn emit(&mut self, report: Report) {
        self.reporter.report(&report);
    }
}

impl<'m> TestExecutor<'m> {
    pub fn new(matcher: &'m NameMatcher) -> Self {
        Self { matcher }
    }

    /// 顺序执行全部注册的测试，返回是否没有任何失败
    ///
    /// 根上下文路径为空，每条顶层测试都经由同一个 run 原语执行，
    /// 所以顶层测试的路径就是它自己的名字。start/finish 各调用一次。
    pub fn execute_all(&self, registry: &Registry, reporter: &mut dyn Reporter) -> bool {
        reporter.start();

        let failed = {
            let mut session = Session {
                matcher: self.matcher,
                reporter: &mut *reporter,
                failed: false,
            };
            let mut root = TestContext::new(&mut session, Vec::new());
            for case in registry.cases() {
                root.run(case.name(), |t| case.invoke(t));
            }
            drop(root);
            session.failed
        };

        reporter.finish();
        !failed
    }
}
