use sea_orm::entity::prelude::*;

/// Organization-wide settings. Exactly one row, `id = 1`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "church_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub church_name: String,
    pub slogan: String,
    pub founded_date: Option<chrono::NaiveDate>,
    #[sea_orm(column_type = "Text")]
    pub history: String,
    #[sea_orm(column_type = "Text")]
    pub vision: String,
    #[sea_orm(column_type = "Text")]
    pub mission: String,
    #[sea_orm(column_type = "Text")]
    pub core_values: String,
    pub current_pastor: String,
    pub pastor_since: Option<chrono::NaiveDate>,
    #[sea_orm(column_type = "Text")]
    pub pastor_bio: String,
    #[sea_orm(column_type = "Text")]
    pub leadership_team: String,
    pub email: String,
    pub phone: String,
    pub whatsapp: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub facebook: String,
    pub instagram: String,
    pub youtube: String,
    pub twitter: String,
    pub website: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub success_color: String,
    pub danger_color: String,
    pub warning_color: String,
    pub sunday_service_time: Option<chrono::NaiveTime>,
    pub wednesday_service_time: Option<chrono::NaiveTime>,
    pub friday_service_time: Option<chrono::NaiveTime>,
    #[sea_orm(column_type = "Text")]
    pub custom_services: String,
    pub timezone: String,
    pub language: String,
    pub enable_whatsapp_notifications: bool,
    pub enable_email_notifications: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub updated_by: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
