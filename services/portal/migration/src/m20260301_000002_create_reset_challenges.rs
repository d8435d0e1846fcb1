use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ResetChallenges::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ResetChallenges::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ResetChallenges::UserId).uuid().not_null())
                    .col(ColumnDef::new(ResetChallenges::Code).string_len(6).not_null())
                    .col(
                        ColumnDef::new(ResetChallenges::Token)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ResetChallenges::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ResetChallenges::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ResetChallenges::Attempts)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ResetChallenges::MaxAttempts)
                            .small_integer()
                            .not_null()
                            .default(5),
                    )
                    .col(
                        ColumnDef::new(ResetChallenges::Used)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ResetChallenges::Table, ResetChallenges::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ResetChallenges::Table)
                    .col(ResetChallenges::UserId)
                    .name("idx_reset_challenges_user_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ResetChallenges::Table)
                    .col(ResetChallenges::ExpiresAt)
                    .name("idx_reset_challenges_expires_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ResetChallenges::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ResetChallenges {
    Table,
    Id,
    UserId,
    Code,
    Token,
    CreatedAt,
    ExpiresAt,
    Attempts,
    MaxAttempts,
    Used,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
