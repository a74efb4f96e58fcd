use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "visitors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub session_key: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub total_analyses: i32,
    pub created_at: DateTimeWithTimeZone,
    pub last_activity: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::label_analyses::Entity")]
    LabelAnalyses,
    #[sea_orm(has_many = "super::conversations::Entity")]
    Conversations,
}

impl Related<super::label_analyses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LabelAnalyses.def()
    }
}

impl Related<super::conversations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Conversations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
