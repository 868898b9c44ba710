use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PersonsRelationships::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PersonsRelationships::PersonId).string().not_null())
                    .col(ColumnDef::new(PersonsRelationships::RelationshipId).string().not_null())
                    .primary_key(
                        Index::create()
                            .col(PersonsRelationships::PersonId)
                            .col(PersonsRelationships::RelationshipId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PersonsRelationships::Table, PersonsRelationships::PersonId)
                            .to(Persons::Table, Persons::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PersonsRelationships::Table, PersonsRelationships::RelationshipId)
                            .to(Relationships::Table, Relationships::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(PersonsRelationships::Table)
                    .col(PersonsRelationships::RelationshipId)
                    .name("idx_persons_relationships_relationship_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PersonsRelationships::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PersonsRelationships {
    Table,
    PersonId,
    RelationshipId,
}

#[derive(Iden)]
enum Persons {
    Table,
    Id,
}

#[derive(Iden)]
enum Relationships {
    Table,
    Id,
}
