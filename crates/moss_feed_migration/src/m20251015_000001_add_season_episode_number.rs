use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 旧数据没有季内编号，允许为空，feed 生成时回退到全局编号
        if !manager.has_column("episode", "season_episode_number").await? {
            manager
                .alter_table(
                    Table::alter()
                        .table(Episode::Table)
                        .add_column(ColumnDef::new(Episode::SeasonEpisodeNumber).integer().null())
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Episode::Table)
                    .drop_column(Episode::SeasonEpisodeNumber)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Episode {
    Table,
    SeasonEpisodeNumber,
}
