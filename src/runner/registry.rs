use crate::runner::context::{TestContext, TestFlow};

/// 注册的测试函数
pub type TestFunc = Box<dyn Fn(&mut TestContext<'_>) -> TestFlow>;

/// 一条注册的顶层测试
pub struct TestCase {
    name: String,
    func: TestFunc,
}

impl TestCase {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn invoke(&self, t: &mut TestContext<'_>) -> TestFlow {
        (self.func)(t)
    }
}

/// 按注册顺序保存顶层测试的注册表
///
/// 生命周期：先注册完，再运行一次，然后丢弃。
/// 运行中不支持追加，注册顺序就是执行顺序。
#[derive(Default)]
pub struct Registry {
    cases: Vec<TestCase>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条顶层测试
    pub fn register<F>(&mut self, name: impl Into<String>, func: F)
    where
        F: Fn(&mut TestContext<'_>) -> TestFlow + 'static,
    {
        self.cases.push(TestCase {
            name: name.into(),
            func: Box::new(func),
        });
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub(crate) fn cases(&self) -> &[TestCase] {
        &self.cases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_order_is_kept() {
        let mut registry = Registry::new();
        registry.register("b", |_| Ok(()));
        registry.register("a", |_| Ok(()));
        registry.register("c", |_| Ok(()));

        let names: Vec<&str> = registry.cases().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
    }
}
