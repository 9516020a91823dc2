use serde::Serialize;

#[derive(Serialize)]
pub struct StaffCreatedResponse {
    pub user_id: String,
    pub username: String,
    pub secret: String,
}

#[derive(Serialize)]
pub struct ClubCreatedResponse {
    pub club_id: String,
    pub president_username: String,
    pub president_secret: String,
}
