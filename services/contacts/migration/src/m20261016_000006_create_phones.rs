use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Phones::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Phones::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Phones::UserId).string().not_null())
                    .col(ColumnDef::new(Phones::PersonId).string().null())
                    .col(ColumnDef::new(Phones::Name).string().not_null())
                    .col(ColumnDef::new(Phones::Number).string().not_null())
                    .col(
                        ColumnDef::new(Phones::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Phones::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Phones::Table, Phones::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Phones::Table, Phones::PersonId)
                            .to(Persons::Table, Persons::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Phones::Table)
                    .col(Phones::UserId)
                    .col(Phones::Number)
                    .unique()
                    .name("uq_phones_user_id_number")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Phones::Table)
                    .col(Phones::PersonId)
                    .name("idx_phones_person_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Phones::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Phones {
    Table,
    Id,
    UserId,
    PersonId,
    Name,
    Number,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Persons {
    Table,
    Id,
}
