use std::sync::Arc;

use dailynews::config::{EnvConfig, MailConfig};
use dailynews::db::mariadb_service::MariaDbService;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::mariadb::Mariadb;

pub mod client;

pub struct TestContext {
    pub db: Arc<MariaDbService>,
    /// `mysql://root@host:port/` without a database selected.
    pub server_url: String,
    pub db_url: String,
    pub _container: ContainerAsync<Mariadb>,
}

impl TestContext {
    pub async fn new() -> TestContext {
        let container = Mariadb::default()
            .start()
            .await
            .expect("Failed to start mariadb container");

        let host = container.get_host().await.expect("Failed to get host");
        let port = container
            .get_host_port_ipv4(3306)
            .await
            .expect("Failed to get port");

        let server_url = format!("mysql://root@{host}:{port}/");
        let db_url = format!("{server_url}test");

        let db = Arc::new(
            MariaDbService::new(&db_url)
                .await
                .expect("Failed to initialize MariaDbService"),
        );

        TestContext {
            db,
            server_url,
            db_url,
            _container: container,
        }
    }
}

/// No mail key and no X token, so notifications only log.
pub fn get_test_config() -> EnvConfig {
    EnvConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        db_url: "unused".to_string(),
        base_url: "http://testserver".to_string(),
        mail: MailConfig::default(),
        x_access_token: None,
    }
}
