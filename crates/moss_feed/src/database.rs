use anyhow::Result;
use moss_feed_migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};

use crate::config::CONFIG_DIR;

fn database_url() -> String {
    // 确保配置目录存在
    if !CONFIG_DIR.exists() {
        std::fs::create_dir_all(&*CONFIG_DIR).expect("创建配置目录失败");
    }
    format!(
        "sqlite://{}?mode=rwc",
        CONFIG_DIR.join("data.sqlite").to_string_lossy()
    )
}

async fn database_connection() -> Result<DatabaseConnection> {
    let mut option = ConnectOptions::new(database_url());
    option
        .max_connections(16)
        .min_connections(2)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .sqlx_logging(false);

    let connection = Database::connect(option).await?;

    // feed 请求只读，WAL 模式下读写互不阻塞
    connection.execute_unprepared("PRAGMA journal_mode = WAL;").await?;
    connection.execute_unprepared("PRAGMA synchronous = NORMAL;").await?;
    connection.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

    info!("SQLite WAL 模式已启用");
    Ok(connection)
}

async fn migrate_database() -> Result<()> {
    let db_path = CONFIG_DIR.join("data.sqlite");
    if !db_path.exists() {
        info!("数据库文件不存在，将创建新的数据库");
    } else {
        info!("检测到现有数据库文件，将在必要时应用迁移");
    }

    // 迁移使用单独的默认连接，避免多连接池导致迁移顺序问题
    let connection = Database::connect(database_url()).await?;
    Ok(Migrator::up(&connection, None).await?)
}

/// 进行数据库迁移并获取数据库连接，供外部使用
pub async fn setup_database() -> Result<DatabaseConnection> {
    migrate_database().await?;
    database_connection().await
}

/// 内存数据库，应用全部迁移，仅用于测试
#[cfg(test)]
pub async fn setup_memory_database() -> DatabaseConnection {
    let mut option = ConnectOptions::new("sqlite::memory:");
    // 内存数据库每个连接互相独立，只能保留一个连接
    option.max_connections(1).min_connections(1).sqlx_logging(false);
    let connection = Database::connect(option).await.unwrap();
    Migrator::up(&connection, None).await.unwrap();
    connection
}
