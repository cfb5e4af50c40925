use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A reader following a publisher. Unique per (reader, publisher).
#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "publisher_subscription")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub reader_id: i32,
    pub publisher_id: i32,
    pub date_subscribed: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ReaderId",
        to   = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Reader,

    #[sea_orm(
        belongs_to = "super::publisher::Entity",
        from = "Column::PublisherId",
        to   = "super::publisher::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Publisher,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef { Relation::Reader.def() }
}

impl Related<super::publisher::Entity> for Entity {
    fn to() -> RelationDef { Relation::Publisher.def() }
}

impl ActiveModelBehavior for ActiveModel {}
