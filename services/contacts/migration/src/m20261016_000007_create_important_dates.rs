use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ImportantDates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ImportantDates::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ImportantDates::UserId).string().not_null())
                    .col(ColumnDef::new(ImportantDates::PersonId).string().null())
                    .col(ColumnDef::new(ImportantDates::Name).string().not_null())
                    .col(
                        ColumnDef::new(ImportantDates::Date)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ImportantDates::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ImportantDates::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ImportantDates::Table, ImportantDates::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ImportantDates::Table, ImportantDates::PersonId)
                            .to(Persons::Table, Persons::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(ImportantDates::Table)
                    .col(ImportantDates::UserId)
                    .col(ImportantDates::Name)
                    .unique()
                    .name("uq_important_dates_user_id_name")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(ImportantDates::Table)
                    .col(ImportantDates::PersonId)
                    .name("idx_important_dates_person_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ImportantDates::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ImportantDates {
    Table,
    Id,
    UserId,
    PersonId,
    Name,
    Date,
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
