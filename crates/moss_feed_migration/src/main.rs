use sea_orm_migration::prelude::*;

#[async_std::main]
async fn main() {
    cli::run_cli(moss_feed_migration::Migrator).await;
}
