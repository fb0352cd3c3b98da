pub mod signal;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

pub fn init_logger(log_level: &str) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(false)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(
            "%b %d %H:%M:%S".to_owned(),
        ))
        .with_filter(build_optimized_filter(log_level));

    tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .expect("初始化日志失败");
}

/// 构建日志过滤器，压低数据库与 HTTP 库的噪音日志
fn build_optimized_filter(base_level: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::builder().parse_lossy(format!(
        "{},\
            sqlx::query=error,\
            sqlx=error,\
            sea_orm::database=error,\
            sea_orm_migration=warn,\
            hyper=warn,\
            tower_http=info",
        base_level
    ))
}
