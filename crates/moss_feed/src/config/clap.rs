use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "moss-feed", version = version(), about, long_about = None)]
pub struct Args {
    /// 配置目录，默认位于系统配置目录下的 moss-feed
    #[arg(short, long, env = "MOSS_FEED_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    #[arg(short, long, default_value = "info", env = "MOSS_FEED_LOG_LEVEL")]
    pub log_level: String,

    /// 覆盖配置文件中的监听地址
    #[arg(short, long, env = "MOSS_FEED_BIND_ADDRESS")]
    pub bind_address: Option<String>,
}

mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub fn version() -> String {
    format!(
        "{} ({}, {})",
        built_info::PKG_VERSION,
        built_info::PROFILE,
        built_info::BUILT_TIME_UTC
    )
}
