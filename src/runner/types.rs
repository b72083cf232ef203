use serde::Serialize;
use std::time::Duration;

/// 单个（子）测试的终态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Passed,
    Failed,
    Skipped,
}

/// 一个已执行节点的终局报告
///
/// 每个通过选择器、真正执行过的上下文恰好产生一份，
/// 在其函数体运行完或中止之后生成。
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// 自执行根到该节点的名字序列
    pub path: Vec<String>,

    pub status: Status,

    /// 执行耗时
    #[serde(rename = "duration_ms", serialize_with = "as_millis")]
    pub duration: Duration,

    /// 记录的错误消息，按发生顺序
    pub errors: Vec<String>,
}

fn as_millis<S>(d: &Duration, s: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    s.serialize_u128(d.as_millis())
}

/// 一次运行的汇总
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,

    #[serde(rename = "duration_ms", serialize_with = "as_millis")]
    pub total_duration: Duration,
}

impl RunSummary {
    pub fn from_reports(reports: &[Report]) -> Self {
        let mut summary = Self::default();
        for report in reports {
            summary.record(report);
        }
        summary
    }

    /// 把一份报告计入汇总
    pub fn record(&mut self, report: &Report) {
        self.total += 1;
        match report.status {
            Status::Passed => self.passed += 1,
            Status::Failed => self.failed += 1,
            Status::Skipped => self.skipped += 1,
        }
        self.total_duration += report.duration;
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(status: Status, millis: u64) -> Report {
        Report {
            path: vec!["t".to_string()],
            status,
            duration: Duration::from_millis(millis),
            errors: Vec::new(),
        }
    }

    #[test]
    fn test_summary_counts() {
        let reports = vec![
            report(Status::Passed, 100),
            report(Status::Failed, 200),
            report(Status::Skipped, 0),
            report(Status::Passed, 50),
        ];

        let summary = RunSummary::from_reports(&reports);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.total_duration, Duration::from_millis(350));
        assert!(!summary.all_passed());
    }

    #[test]
    fn test_report_serializes_duration_as_millis() {
        let r = report(Status::Failed, 1234);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["duration_ms"], 1234);
        assert_eq!(json["path"][0], "t");
    }
}
