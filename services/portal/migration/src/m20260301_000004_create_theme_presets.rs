use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Presets shipped with a fresh install: (name, description, primary, secondary, accent).
const SEED: &[(&str, &str, &str, &str, &str)] = &[
    ("Indigo", "Thème par défaut", "#4F46E5", "#7C3AED", "#F59E0B"),
    ("Océan", "Bleus et turquoises", "#0369A1", "#0891B2", "#F97316"),
    ("Forêt", "Verts profonds", "#166534", "#15803D", "#CA8A04"),
    ("Bordeaux", "Rouges chauds", "#881337", "#BE123C", "#D97706"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ThemePresets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ThemePresets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ThemePresets::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(ThemePresets::Description)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(ThemePresets::PrimaryColor).string_len(7).not_null())
                    .col(
                        ColumnDef::new(ThemePresets::SecondaryColor)
                            .string_len(7)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ThemePresets::AccentColor).string_len(7).not_null())
                    .col(
                        ColumnDef::new(ThemePresets::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        let mut insert = Query::insert();
        insert.into_table(ThemePresets::Table).columns([
            ThemePresets::Name,
            ThemePresets::Description,
            ThemePresets::PrimaryColor,
            ThemePresets::SecondaryColor,
            ThemePresets::AccentColor,
        ]);
        for (name, description, primary, secondary, accent) in SEED {
            insert.values_panic([
                (*name).into(),
                (*description).into(),
                (*primary).into(),
                (*secondary).into(),
                (*accent).into(),
            ]);
        }
        manager.exec_stmt(insert.to_owned()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ThemePresets::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ThemePresets {
    Table,
    Id,
    Name,
    Description,
    PrimaryColor,
    SecondaryColor,
    AccentColor,
    IsActive,
}
