use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::{Client, ClientBuilder, StatusCode};
use tracing::{error, info, warn};

use crate::config::{EnvConfig, MailConfig};
use crate::db::mariadb_service::MariaDbService;
use crate::types::article::ArticleView;
use crate::types::mail::{SendEmail, TweetPayload};

pub const TWEETS_ENDPOINT: &str = "https://api.twitter.com/2/tweets";
const INDEPENDENT: &str = "Independent";

/// Outbound side effects of publishing: subscriber mail and the X post.
/// Cheap to clone; every clone shares one HTTP client.
#[derive(Clone)]
pub struct Notifier {
    client: Client,
    mail: MailConfig,
    base_url: String,
    x_access_token: Option<String>,
}

pub fn article_url(base_url: &str, article_id: i32) -> String {
    format!("{}/article/{article_id}/", base_url.trim_end_matches('/'))
}

fn publisher_name(article: &ArticleView) -> &str {
    article
        .publisher
        .as_ref()
        .map(|p| p.name.as_str())
        .unwrap_or(INDEPENDENT)
}

/// Subject and plain-text body of the "new article" mail.
pub fn compose_article_mail(article: &ArticleView, base_url: &str) -> (String, String) {
    let author = &article.author.display_name;
    let subject = format!("NEW ARTICLE: {} by {author}", article.title);
    let body = format!(
        "Dear Subscriber,\n\nA new article, '{}', has been published by {author} at {}.\n\nRead it here: {}\n\nThank you for subscribing!",
        article.title,
        publisher_name(article),
        article_url(base_url, article.id),
    );
    (subject, body)
}

pub fn compose_tweet(article: &ArticleView, base_url: &str) -> String {
    format!(
        "NEW: {} by {} for  {}. Read more: {} #DjangoNews",
        article.title,
        article.author.username,
        publisher_name(article),
        article_url(base_url, article.id),
    )
}

impl Notifier {
    pub fn new(config: &EnvConfig) -> Result<Self, reqwest::Error> {
        let client = ClientBuilder::new()
            .user_agent("dailynews/0.1 (+reqwest)")
            .tcp_nodelay(true)
            .pool_idle_timeout(Duration::from_secs(30))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            mail: config.mail.clone(),
            base_url: config.base_url.clone(),
            x_access_token: config.x_access_token.clone(),
        })
    }

    pub async fn send_email(&self, email: SendEmail) -> Result<String, String> {
        let Some(api_key) = self.mail.api_key.as_deref() else {
            info!("MAIL_API_KEY not set, skipping mail '{}' to {:?}", email.subject, email.to);
            return Ok(String::new());
        };

        let req = self
            .client
            .post(&self.mail.endpoint)
            .bearer_auth(api_key)
            .json(&email)
            .build()
            .map_err(|e| format!("build request failed: {e}"))?;

        info!("[mail] -> POST {} subject={:?} to={:?}", self.mail.endpoint, email.subject, email.to);
        for (k, v) in req.headers().iter() {
            let vv = if k.as_str().eq_ignore_ascii_case("authorization") {
                "<redacted>"
            } else {
                v.to_str().unwrap_or("<non-utf8>")
            };
            tracing::debug!("[mail] header {k}: {vv}");
        }

        let t0 = Instant::now();
        let res = self
            .client
            .execute(req)
            .await
            .map_err(|e| format!("send failed: {e}"))?;
        let status = res.status();
        let body = res.text().await.map_err(|e| format!("read body failed: {e}"))?;
        info!("[mail] <- status: {status} in {} ms", t0.elapsed().as_millis());

        if status.is_success() {
            Ok(body)
        } else {
            Err(format!("mail API error: HTTP {status}: {body}"))
        }
    }

    /// Posts the announcement to X. Without an access token this is a no-op.
    pub async fn post_tweet(&self, text: String) -> Result<(), String> {
        let Some(token) = self.x_access_token.as_deref() else {
            return Ok(());
        };
        let res = self
            .client
            .post(TWEETS_ENDPOINT)
            .bearer_auth(token)
            .json(&TweetPayload { text })
            .send()
            .await
            .map_err(|e| format!("tweet request failed: {e}"))?;
        let status = res.status();
        if status == StatusCode::CREATED {
            info!("Posted article announcement to X");
            Ok(())
        } else {
            let body = res.text().await.unwrap_or_default();
            Err(format!("X API error: HTTP {status}: {body}"))
        }
    }

    /// Mails every subscriber of the author or publisher, then posts to X.
    /// Failures are logged, never returned.
    pub async fn notify_publication(&self, db: &MariaDbService, article: &ArticleView) {
        let publisher_id = article.publisher.as_ref().map(|p| p.id);
        let recipients = match db.subscriber_emails(article.author.id, publisher_id).await {
            Ok(r) => r,
            Err(e) => {
                error!("Could not load subscribers for article {}: {e}", article.id);
                vec![]
            }
        };

        if recipients.is_empty() {
            info!("No subscribers to notify for article {}", article.id);
        }
        let (subject, text) = compose_article_mail(article, &self.base_url);
        for to in recipients {
            let email = SendEmail {
                from: self.mail.from.clone(),
                to: vec![to.clone()],
                subject: subject.clone(),
                text: text.clone(),
            };
            if let Err(e) = self.send_email(email).await {
                warn!("Failed to mail {to} about article {}: {e}", article.id);
            }
        }

        if let Err(e) = self.post_tweet(compose_tweet(article, &self.base_url)).await {
            warn!("Failed to post article {} to X: {e}", article.id);
        }
    }

    /// Runs [`Notifier::notify_publication`] in the background.
    pub fn spawn_publication(&self, db: Arc<MariaDbService>, article: ArticleView) {
        let notifier = self.clone();
        tokio::spawn(async move {
            notifier.notify_publication(&db, &article).await;
        });
    }

    pub async fn mail_password_reset(&self, to: &str, user_id: i32, code: &str) {
        let link = format!("{}/reset/{user_id}/{code}/", self.base_url);
        let email = SendEmail {
            from: self.mail.from.clone(),
            to: vec![to.to_string()],
            subject: "Password reset on DailyNews".to_string(),
            text: format!(
                "You're receiving this email because you requested a password reset for your user account.\n\nPlease go to the following page and choose a new password:\n\n{link}\n\nThe link is valid for 30 minutes."
            ),
        };
        if let Err(e) = self.send_email(email).await {
            warn!("Failed to send password reset mail: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::article::AuthorRef;
    use crate::types::publisher::PublisherRef;
    use chrono::Utc;
    use entity::article::ArticleStatus;

    fn view(publisher: Option<PublisherRef>) -> ArticleView {
        let now = Utc::now();
        ArticleView {
            id: 7,
            title: "Rates hold".into(),
            body: "...".into(),
            status: ArticleStatus::Published,
            is_approved: true,
            creation_date: now,
            last_edited_date: now,
            publication_date: Some(now),
            featured_image: None,
            author: AuthorRef {
                id: 3,
                username: "jdoe".into(),
                display_name: "Jane Doe".into(),
            },
            publisher,
            editor_id: None,
        }
    }

    #[test]
    fn mail_names_author_and_publisher() {
        let article = view(Some(PublisherRef { id: 1, name: "ActualToday".into() }));
        let (subject, body) = compose_article_mail(&article, "http://news.test/");
        assert_eq!(subject, "NEW ARTICLE: Rates hold by Jane Doe");
        assert_eq!(
            body,
            "Dear Subscriber,\n\nA new article, 'Rates hold', has been published by Jane Doe at ActualToday.\n\nRead it here: http://news.test/article/7/\n\nThank you for subscribing!"
        );
    }

    #[test]
    fn independent_articles_say_so() {
        let (_, body) = compose_article_mail(&view(None), "http://news.test");
        assert!(body.contains("by Jane Doe at Independent."));
    }

    #[test]
    fn tweet_text() {
        let article = view(Some(PublisherRef { id: 2, name: "SportToday".into() }));
        assert_eq!(
            compose_tweet(&article, "http://news.test"),
            "NEW: Rates hold by jdoe for  SportToday. Read more: http://news.test/article/7/ #DjangoNews"
        );
    }

    #[actix_web::test]
    async fn missing_keys_skip_delivery() {
        let config = EnvConfig {
            bind_addr: "127.0.0.1:0".into(),
            db_url: "mysql://unused".into(),
            base_url: "http://news.test".into(),
            mail: MailConfig::default(),
            x_access_token: None,
        };
        let notifier = Notifier::new(&config).unwrap();
        let sent = notifier
            .send_email(SendEmail { to: vec!["a@b.test".into()], ..Default::default() })
            .await;
        assert_eq!(sent, Ok(String::new()));
        assert_eq!(notifier.post_tweet("hi".into()).await, Ok(()));
    }
}
