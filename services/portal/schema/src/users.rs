use sea_orm::entity::prelude::*;

/// Portal account. `role` holds the wire name of `ecclesia_domain::user::Role`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub role: String,
    pub is_superuser: bool,
    pub is_active: bool,
    pub is_validated: bool,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::reset_challenges::Entity")]
    ResetChallenges,
}

impl Related<super::reset_challenges::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ResetChallenges.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
