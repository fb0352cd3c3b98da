//! 播客站点设置实体（单例，只会读取第一行）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "podcast_settings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub subtitle: String,
    pub summary: String,
    pub description: String,
    pub author: String,
    pub owner_name: String,
    pub email: String,
    pub cover_image_id: Option<i32>,
    pub copyright_notice: String,
    pub language: String,
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

impl ActiveModelBehavior for ActiveModel {}
