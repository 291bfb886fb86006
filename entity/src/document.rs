use sea_orm::entity::prelude::*;

/// One JSON document inside a named collection (`routes`, `alerts`, `drivers`).
///
/// `(collection, doc_id)` is unique; uniqueness is enforced by the migration index and by
/// the repository which looks documents up before writing.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "document")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub collection: String,
    pub doc_id: String,
    pub data: Json,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
