use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateMessageRequest {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub subject: String,
    pub message: String,
}

impl CreateMessageRequest {
    pub fn is_complete(&self) -> bool {
        [
            &self.name,
            &self.email,
            &self.phone_number,
            &self.subject,
            &self.message,
        ]
        .iter()
        .all(|f| !f.is_empty())
    }
}
