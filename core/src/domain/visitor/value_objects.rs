#[derive(Debug, Clone)]
pub struct ResolveVisitorInput {
    pub session_id: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}
