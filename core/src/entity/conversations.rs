use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "conversations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub visitor_id: Uuid,
    pub analysis_id: Uuid,
    pub title: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::label_analyses::Entity",
        from = "Column::AnalysisId",
        to = "super::label_analyses::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    LabelAnalyses,
    #[sea_orm(
        belongs_to = "super::visitors::Entity",
        from = "Column::VisitorId",
        to = "super::visitors::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Visitors,
    #[sea_orm(has_many = "super::chat_turns::Entity")]
    ChatTurns,
}

impl Related<super::label_analyses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LabelAnalyses.def()
    }
}

impl Related<super::visitors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Visitors.def()
    }
}

impl Related<super::chat_turns::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChatTurns.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
