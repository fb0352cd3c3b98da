#[macro_use]
extern crate tracing;

mod api;
mod config;
mod database;
mod feed;
mod task;
mod utils;

use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;

use anyhow::{bail, Result};
use task::http_server;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::config::{load_config, ARGS, CONFIG_DIR};
use crate::database::setup_database;
use crate::utils::init_logger;
use crate::utils::signal::terminate;

#[tokio::main]
async fn main() -> Result<()> {
    init();

    let config = Arc::new(load_config()?);
    if !config.check() {
        bail!("配置检查未通过，请修改 {} 后重试", CONFIG_DIR.join("config.json").display());
    }
    let connection = Arc::new(setup_database().await?);
    let token = CancellationToken::new();
    let tracker = TaskTracker::new();

    spawn_task("HTTP 服务", http_server(connection, config), &tracker, token.clone());

    tracker.close();
    handle_shutdown(tracker, token).await;
    Ok(())
}

fn spawn_task(
    task_name: &'static str,
    task: impl Future<Output = impl Debug> + Send + 'static,
    tracker: &TaskTracker,
    token: CancellationToken,
) {
    tracker.spawn(async move {
        tokio::select! {
            res = task => {
                error!("「{}」异常结束，返回结果为：「{:?}」，取消其它仍在执行的任务..", task_name, res);
                token.cancel();
            },
            _ = token.cancelled() => {
                info!("「{}」接收到取消信号，终止运行..", task_name);
            }
        }
    });
}

/// 初始化日志系统，打印欢迎信息
fn init() {
    init_logger(&ARGS.log_level);
    info!("欢迎使用 moss-feed，当前程序版本：{}", config::version());
    debug!("配置目录：{}", CONFIG_DIR.display());
}

async fn handle_shutdown(tracker: TaskTracker, token: CancellationToken) {
    tokio::select! {
        _ = tracker.wait() => {
            error!("所有任务均已终止，程序退出")
        }
        _ = terminate() => {
            info!("接收到终止信号，正在终止任务..");
            token.cancel();
            tracker.wait().await;
            info!("所有任务均已终止，程序退出");
        }
    }
}
