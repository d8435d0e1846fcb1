use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let text = |col: ChurchSettings, default: &str| {
            ColumnDef::new(col)
                .string()
                .not_null()
                .default(default)
                .to_owned()
        };

        manager
            .create_table(
                Table::create()
                    .table(ChurchSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ChurchSettings::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(text(ChurchSettings::ChurchName, "Église Manager"))
                    .col(text(ChurchSettings::Slogan, ""))
                    .col(text(ChurchSettings::Email, ""))
                    .col(text(ChurchSettings::Phone, ""))
                    .col(text(ChurchSettings::Whatsapp, ""))
                    .col(text(ChurchSettings::Address, ""))
                    .col(text(ChurchSettings::City, ""))
                    .col(text(ChurchSettings::Country, "Niger"))
                    .col(text(ChurchSettings::Website, ""))
                    .col(text(ChurchSettings::PrimaryColor, "#4F46E5"))
                    .col(text(ChurchSettings::SecondaryColor, "#7C3AED"))
                    .col(text(ChurchSettings::AccentColor, "#F59E0B"))
                    .col(text(ChurchSettings::SuccessColor, "#10B981"))
                    .col(text(ChurchSettings::DangerColor, "#EF4444"))
                    .col(text(ChurchSettings::WarningColor, "#F59E0B"))
                    .col(text(ChurchSettings::Timezone, "Africa/Niamey"))
                    .col(text(ChurchSettings::Language, "fr"))
                    .col(
                        ColumnDef::new(ChurchSettings::EnableWhatsappNotifications)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ChurchSettings::EnableEmailNotifications)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ChurchSettings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ChurchSettings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(ChurchSettings::UpdatedBy).uuid())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ChurchSettings::Table, ChurchSettings::UpdatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .check(Expr::col(ChurchSettings::Id).eq(1))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChurchSettings::Table).to_owned())
            .await
    }
}

#[derive(Iden, Clone, Copy)]
enum ChurchSettings {
    Table,
    Id,
    ChurchName,
    Slogan,
    Email,
    Phone,
    Whatsapp,
    Address,
    City,
    Country,
    Website,
    PrimaryColor,
    SecondaryColor,
    AccentColor,
    SuccessColor,
    DangerColor,
    WarningColor,
    Timezone,
    Language,
    EnableWhatsappNotifications,
    EnableEmailNotifications,
    CreatedAt,
    UpdatedAt,
    UpdatedBy,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
