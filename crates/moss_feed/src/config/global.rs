use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use once_cell::sync::Lazy;

use crate::config::clap::Args;
use crate::config::Config;

/// 全局的 ARGS，用来解析命令行参数
pub static ARGS: Lazy<Args> = Lazy::new(Args::parse);

/// 全局的 CONFIG_DIR，表示配置文件夹的路径
pub static CONFIG_DIR: Lazy<PathBuf> = Lazy::new(|| {
    ARGS.config_dir
        .clone()
        .unwrap_or_else(|| dirs::config_dir().expect("No config path found").join("moss-feed"))
});

/// 从配置目录加载 config.json，文件不存在时使用默认配置
pub fn load_config() -> Result<Config> {
    let path = CONFIG_DIR.join("config.json");
    let mut config = if path.exists() {
        info!("开始加载配置文件：{}", path.display());
        let content = std::fs::read_to_string(&path).with_context(|| format!("读取配置文件 {} 失败", path.display()))?;
        serde_json::from_str::<Config>(&content).with_context(|| format!("解析配置文件 {} 失败", path.display()))?
    } else {
        info!("未找到配置文件 {}，使用默认配置", path.display());
        Config::default()
    };
    if config.media_root.is_relative() {
        config.media_root = CONFIG_DIR.join(&config.media_root);
    }
    if let Some(bind_address) = &ARGS.bind_address {
        config.bind_address = bind_address.clone();
    }
    info!("配置加载完毕");
    Ok(config)
}
