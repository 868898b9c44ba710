use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Persons::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Persons::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Persons::UserId).string().not_null())
                    .col(ColumnDef::new(Persons::FirstName).string().not_null())
                    .col(ColumnDef::new(Persons::LastName).string().null())
                    .col(ColumnDef::new(Persons::Nickname).string().null())
                    .col(ColumnDef::new(Persons::Avatar).string().null())
                    .col(ColumnDef::new(Persons::Description).text().null())
                    .col(
                        ColumnDef::new(Persons::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Persons::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Persons::Table, Persons::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Persons::Table)
                    .col(Persons::UserId)
                    .name("idx_persons_user_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Persons::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Persons {
    Table,
    Id,
    UserId,
    FirstName,
    LastName,
    Nickname,
    Avatar,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
