use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RecentGamesParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct RackResult {
    pub won: bool,
}
