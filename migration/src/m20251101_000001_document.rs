use sea_orm_migration::{prelude::*, schema::*};

static IDX_DOCUMENT_COLLECTION_DOC_ID: &str = "idx_document_collection_doc_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Document::Table)
                    .if_not_exists()
                    .col(pk_auto(Document::Id))
                    .col(string(Document::Collection))
                    .col(string(Document::DocId))
                    .col(json(Document::Data))
                    .col(timestamp(Document::CreatedAt))
                    .col(timestamp(Document::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DOCUMENT_COLLECTION_DOC_ID)
                    .table(Document::Table)
                    .col(Document::Collection)
                    .col(Document::DocId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_DOCUMENT_COLLECTION_DOC_ID)
                    .table(Document::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Document::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Document {
    Table,
    Id,
    Collection,
    DocId,
    Data,
    CreatedAt,
    UpdatedAt,
}
