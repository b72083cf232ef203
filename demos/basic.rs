//! 最小嵌入示例：注册几条层级测试，交给 CLI 配置执行
//!
//! ```text
//! cargo run --example basic
//! cargo run --example basic -- -r arithmetic/addition
//! cargo run --example basic -- --json
//! ```

use std::process::ExitCode;

use rutest::cli::Config;
use rutest::runner::Registry;

fn main() -> anyhow::Result<ExitCode> {
    rutest::logger::init_logger();

    let mut registry = Registry::new();

    registry.register("arithmetic", |t| {
        t.run("addition", |t| {
            if 1 + 1 != 2 {
                t.error("1 + 1 应该等于 2");
            }
            Ok(())
        });
        t.run("overflow", |t| {
            if std::env::var("RUTEST_DEMO_SLOW").is_err() {
                // 慢用例默认跳过，设置 RUTEST_DEMO_SLOW=1 打开
                return t.skip();
            }
            if i32::MAX.checked_add(1).is_some() {
                t.error("i32::MAX + 1 应该溢出");
            }
            Ok(())
        });
        Ok(())
    });

    registry.register("strings", |t| {
        if !"rutest".starts_with("ru") {
            return t.fatal("crate 名字的前缀不对");
        }
        t.run("join", |t| {
            let joined = ["a", "b"].join("/");
            if joined != "a/b" {
                t.error(format!("意外的拼接结果: {joined}"));
            }
            Ok(())
        });
        Ok(())
    });

    let mut config = Config::from_args()?;
    let passed = config.run(&registry);

    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
