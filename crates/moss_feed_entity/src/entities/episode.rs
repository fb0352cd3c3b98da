//! 节目单集实体定义

use std::path::Path;

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "episode")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// 全局唯一的单集编号
    #[sea_orm(unique)]
    pub episode_number: i32,
    pub season_number: i32,
    /// 季内编号，旧数据可能为空
    pub season_episode_number: Option<i32>,
    pub title: String,
    pub slug: String,
    /// 富文本（HTML）
    pub description: String,
    pub transcript: String,
    pub publication_date: DateTimeWithTimeZone,
    /// 相对于媒体目录的音频路径
    pub audio_file: String,
    pub duration_in_seconds: Option<f64>,
    pub cover_image_id: Option<i32>,
    pub explicit_content: bool,
    pub guid: String,
    pub live: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::image::Entity",
        from = "Column::CoverImageId",
        to = "super::image::Column::Id",
        on_delete = "SetNull"
    )]
    CoverImage,
}

impl Related<super::image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CoverImage.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        self.validate()?;

        if let Some(&number) = current(&self.episode_number) {
            self.slug = ActiveValue::Set(padded_number(number));

            let default_title = format!("Episode {}", number);
            match current(&self.title) {
                Some(title) if !title.is_empty() && *title != default_title => {}
                Some(_) => self.title = ActiveValue::Set(default_title),
                None if insert => self.title = ActiveValue::Set(default_title),
                None => {}
            }
        }

        // 未提供 guid 时按发布日期生成
        let needs_guid = match current(&self.guid) {
            Some(guid) => guid.is_empty(),
            None => insert,
        };
        if needs_guid {
            if let Some(date) = current(&self.publication_date) {
                self.guid = ActiveValue::Set(format!("itm{}", date.format("%Y%m%d")));
            }
        }

        Ok(self)
    }
}

impl ActiveModel {
    fn validate(&self) -> Result<(), DbErr> {
        for (field, value) in [
            ("episode_number", current(&self.episode_number).copied()),
            ("season_number", current(&self.season_number).copied()),
            ("season_episode_number", current(&self.season_episode_number).copied().flatten()),
        ] {
            if let Some(value) = value {
                if value < 1 {
                    return Err(DbErr::Custom(format!("{} 必须大于等于 1，当前值：{}", field, value)));
                }
            }
        }

        if let Some(audio_file) = current(&self.audio_file) {
            if !is_mp3_path(audio_file) {
                return Err(DbErr::Custom(format!("仅支持 MP3 音频文件：{}", audio_file)));
            }
        }

        Ok(())
    }
}

/// 三位补零的单集编号，用作 slug 与链接
pub fn padded_number(episode_number: i32) -> String {
    format!("{:03}", episode_number)
}

fn is_mp3_path(path: &str) -> bool {
    Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mp3"))
}

fn current<V>(value: &ActiveValue<V>) -> Option<&V>
where
    V: Into<Value>,
{
    match value {
        ActiveValue::Set(v) | ActiveValue::Unchanged(v) => Some(v),
        ActiveValue::NotSet => None,
    }
}
