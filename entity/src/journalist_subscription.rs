use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A reader following a journalist. Unique per (reader, journalist).
#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "journalist_subscription")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub reader_id: i32,
    pub journalist_id: i32,
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
        belongs_to = "super::user::Entity",
        from = "Column::JournalistId",
        to   = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Journalist,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef { Relation::Reader.def() }
}

impl ActiveModelBehavior for ActiveModel {}
