//! 日志输出，按级别着色
//!
//! 级别由命令行的`-v`决定，也可以用环境变量LOG指定（ERROR/WARN/INFO/DEBUG/TRACE）

use log::{Level, LevelFilter, Log, Metadata, Record};

struct SimpleLogger;

impl Log for SimpleLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let color = match record.level() {
            Level::Error => 31, // 红色
            Level::Warn => 93,  // 亮黄色
            Level::Info => 34,  // 蓝色
            Level::Debug => 32, // 绿色
            Level::Trace => 90, // 灰色
        };
        eprintln!(
            "\u{1B}[{}m[{:>5}] {}\u{1B}[0m",
            color,
            record.level(),
            record.args()
        );
    }

    fn flush(&self) {}
}

fn level_from_env() -> Option<LevelFilter> {
    match std::env::var("LOG").ok()?.to_ascii_uppercase().as_str() {
        "ERROR" => Some(LevelFilter::Error),
        "WARN" => Some(LevelFilter::Warn),
        "INFO" => Some(LevelFilter::Info),
        "DEBUG" => Some(LevelFilter::Debug),
        "TRACE" => Some(LevelFilter::Trace),
        _ => None,
    }
}

fn level_from_verbosity(verbosity: u64) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub fn init(verbosity: u64) {
    static LOGGER: SimpleLogger = SimpleLogger;
    // 重复初始化时保留原来的logger
    let _ = log::set_logger(&LOGGER);
    let level = if verbosity > 0 {
        level_from_verbosity(verbosity)
    } else {
        level_from_env().unwrap_or(LevelFilter::Warn)
    };
    log::set_max_level(level);
}
