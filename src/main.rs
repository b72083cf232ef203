use std::process::ExitCode;

use anyhow::Result;

use rutest::cli::Config;
use rutest::runner::Registry;

fn main() -> Result<ExitCode> {
    // 初始化日志系统
    rutest::logger::init_logger();

    let mut config = Config::from_args()?;

    if config.list {
        for file in &config.files {
            println!("{}", file.display());
        }
        return Ok(ExitCode::SUCCESS);
    }

    // 独立运行时注册表是空的，只报告发现结果；
    // 嵌入方通过库接口带上自己的注册表（见 demos/basic.rs）。
    let registry = Registry::new();
    let passed = config.run(&registry);

    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
