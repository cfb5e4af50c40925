use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct SendEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
}

impl Default for SendEmail {
    fn default() -> Self {
        Self {
            from: "noreply@dailynews.local".to_string(),
            to: vec![],
            subject: String::new(),
            text: String::new(),
        }
    }
}

/// Body of a post to the X v2 tweets endpoint.
#[derive(Serialize, Debug)]
pub struct TweetPayload {
    pub text: String,
}
