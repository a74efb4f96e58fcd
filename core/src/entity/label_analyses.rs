use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "label_analyses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub visitor_id: Uuid,
    pub image_object_key: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub extracted_text: String,
    #[sea_orm(column_type = "Text")]
    pub ingredients_text: String,
    #[sea_orm(column_type = "Text")]
    pub nutrition_text: String,
    pub recommendation: String,
    pub health_score: i32,
    #[sea_orm(column_type = "Text")]
    pub analysis: String,
    #[sea_orm(column_type = "Text")]
    pub summary: String,
    #[sea_orm(column_type = "Text")]
    pub raw_response: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::visitors::Entity",
        from = "Column::VisitorId",
        to = "super::visitors::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Visitors,
    #[sea_orm(has_many = "super::conversations::Entity")]
    Conversations,
}

impl Related<super::visitors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Visitors.def()
    }
}

impl Related<super::conversations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Conversations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
