use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Image::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Image::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Image::Title).string().not_null().default(""))
                    .col(ColumnDef::new(Image::File).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Episode::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Episode::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Episode::EpisodeNumber).integer().not_null())
                    .col(ColumnDef::new(Episode::SeasonNumber).integer().not_null().default(1))
                    .col(ColumnDef::new(Episode::Title).string().not_null())
                    .col(ColumnDef::new(Episode::Slug).string().not_null())
                    .col(ColumnDef::new(Episode::Description).text().not_null())
                    .col(ColumnDef::new(Episode::Transcript).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Episode::PublicationDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Episode::AudioFile).string().not_null())
                    .col(ColumnDef::new(Episode::DurationInSeconds).double().null())
                    .col(ColumnDef::new(Episode::CoverImageId).integer().null())
                    .col(
                        ColumnDef::new(Episode::ExplicitContent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Episode::Guid).string_len(64).not_null().default(""))
                    .col(ColumnDef::new(Episode::Live).boolean().not_null().default(true))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_episode_cover_image")
                            .from(Episode::Table, Episode::CoverImageId)
                            .to(Image::Table, Image::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 单集编号全局唯一
        manager
            .create_index(
                Index::create()
                    .name("idx_episode_episode_number")
                    .table(Episode::Table)
                    .col(Episode::EpisodeNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // feed 按发布时间倒序读取
        manager
            .create_index(
                Index::create()
                    .name("idx_episode_live_publication_date")
                    .table(Episode::Table)
                    .col(Episode::Live)
                    .col(Episode::PublicationDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PodcastSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PodcastSettings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PodcastSettings::Title).string().not_null())
                    .col(ColumnDef::new(PodcastSettings::Subtitle).string().not_null())
                    .col(ColumnDef::new(PodcastSettings::Summary).text().not_null())
                    .col(ColumnDef::new(PodcastSettings::Description).text().not_null())
                    .col(ColumnDef::new(PodcastSettings::Author).string().not_null())
                    .col(ColumnDef::new(PodcastSettings::OwnerName).string().not_null())
                    .col(ColumnDef::new(PodcastSettings::Email).string().not_null())
                    .col(ColumnDef::new(PodcastSettings::CoverImageId).integer().null())
                    .col(ColumnDef::new(PodcastSettings::CopyrightNotice).string().not_null())
                    .col(ColumnDef::new(PodcastSettings::Language).string_len(10).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_podcast_settings_cover_image")
                            .from(PodcastSettings::Table, PodcastSettings::CoverImageId)
                            .to(Image::Table, Image::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PodcastSettings::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_episode_live_publication_date")
                    .table(Episode::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_episode_episode_number")
                    .table(Episode::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Episode::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Image::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Image {
    Table,
    Id,
    Title,
    File,
}

#[derive(DeriveIden)]
enum Episode {
    Table,
    Id,
    EpisodeNumber,
    SeasonNumber,
    Title,
    Slug,
    Description,
    Transcript,
    PublicationDate,
    AudioFile,
    DurationInSeconds,
    CoverImageId,
    ExplicitContent,
    Guid,
    Live,
}

#[derive(DeriveIden)]
enum PodcastSettings {
    Table,
    Id,
    Title,
    Subtitle,
    Summary,
    Description,
    Author,
    OwnerName,
    Email,
    CoverImageId,
    CopyrightNotice,
    Language,
}
