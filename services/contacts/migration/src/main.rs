use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(rolodex_contacts_migration::Migrator).await;
}
