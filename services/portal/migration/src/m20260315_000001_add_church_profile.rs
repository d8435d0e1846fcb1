use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const TEXT_COLUMNS: [ChurchSettings; 7] = [
    ChurchSettings::History,
    ChurchSettings::Vision,
    ChurchSettings::Mission,
    ChurchSettings::CoreValues,
    ChurchSettings::PastorBio,
    ChurchSettings::LeadershipTeam,
    ChurchSettings::CustomServices,
];

const SHORT_COLUMNS: [ChurchSettings; 5] = [
    ChurchSettings::CurrentPastor,
    ChurchSettings::Facebook,
    ChurchSettings::Instagram,
    ChurchSettings::Youtube,
    ChurchSettings::Twitter,
];

const DATE_COLUMNS: [ChurchSettings; 2] = [ChurchSettings::FoundedDate, ChurchSettings::PastorSince];

const TIME_COLUMNS: [ChurchSettings; 3] = [
    ChurchSettings::SundayServiceTime,
    ChurchSettings::WednesdayServiceTime,
    ChurchSettings::FridayServiceTime,
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut alter = Table::alter().table(ChurchSettings::Table).to_owned();
        for col in TEXT_COLUMNS {
            alter.add_column(ColumnDef::new(col).text().not_null().default(""));
        }
        for col in SHORT_COLUMNS {
            alter.add_column(ColumnDef::new(col).string().not_null().default(""));
        }
        for col in DATE_COLUMNS {
            alter.add_column(ColumnDef::new(col).date());
        }
        for col in TIME_COLUMNS {
            alter.add_column(ColumnDef::new(col).time());
        }
        manager.alter_table(alter).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut alter = Table::alter().table(ChurchSettings::Table).to_owned();
        for col in TEXT_COLUMNS
            .into_iter()
            .chain(SHORT_COLUMNS)
            .chain(DATE_COLUMNS)
            .chain(TIME_COLUMNS)
        {
            alter.drop_column(col);
        }
        manager.alter_table(alter).await
    }
}

#[derive(Iden, Clone, Copy)]
enum ChurchSettings {
    Table,
    FoundedDate,
    History,
    Vision,
    Mission,
    CoreValues,
    CurrentPastor,
    PastorSince,
    PastorBio,
    LeadershipTeam,
    Facebook,
    Instagram,
    Youtube,
    Twitter,
    SundayServiceTime,
    WednesdayServiceTime,
    FridayServiceTime,
    CustomServices,
}
