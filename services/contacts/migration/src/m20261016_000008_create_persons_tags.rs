use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PersonsTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PersonsTags::PersonId).string().not_null())
                    .col(ColumnDef::new(PersonsTags::TagId).string().not_null())
                    .primary_key(
                        Index::create()
                            .col(PersonsTags::PersonId)
                            .col(PersonsTags::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PersonsTags::Table, PersonsTags::PersonId)
                            .to(Persons::Table, Persons::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PersonsTags::Table, PersonsTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(PersonsTags::Table)
                    .col(PersonsTags::TagId)
                    .name("idx_persons_tags_tag_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PersonsTags::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PersonsTags {
    Table,
    PersonId,
    TagId,
}

#[derive(Iden)]
enum Persons {
    Table,
    Id,
}

#[derive(Iden)]
enum Tags {
    Table,
    Id,
}
