//! Alerts produced by budget and goal mutations.

use sea_orm_migration::prelude::*;

use crate::m20261019_000000_init::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Alerts {
    Table,
    Id,
    UserId,
    Kind,
    Message,
    Timestamp,
    Read,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alerts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Alerts::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Alerts::UserId).string().not_null())
                    .col(ColumnDef::new(Alerts::Kind).string().not_null())
                    .col(ColumnDef::new(Alerts::Message).string().not_null())
                    .col(ColumnDef::new(Alerts::Timestamp).timestamp().not_null())
                    .col(
                        ColumnDef::new(Alerts::Read)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Alerts::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Alerts::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-alerts-user_id")
                            .from(Alerts::Table, Alerts::UserId)
                            .to(Users::Table, Users::Username)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-alerts-user_id-timestamp")
                    .table(Alerts::Table)
                    .col(Alerts::UserId)
                    .col(Alerts::Timestamp)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alerts::Table).to_owned())
            .await?;
        Ok(())
    }
}
