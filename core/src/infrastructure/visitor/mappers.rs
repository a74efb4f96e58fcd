use crate::{domain::visitor::entities::Visitor, entity::visitors};

impl From<&visitors::Model> for Visitor {
    fn from(model: &visitors::Model) -> Self {
        Self {
            id: model.id,
            session_key: model.session_key.clone(),
            ip_address: model.ip_address.clone(),
            user_agent: model.user_agent.clone(),
            total_analyses: model.total_analyses,
            created_at: model.created_at.to_utc(),
            last_activity: model.last_activity.to_utc(),
        }
    }
}

impl From<visitors::Model> for Visitor {
    fn from(model: visitors::Model) -> Self {
        Self::from(&model)
    }
}
