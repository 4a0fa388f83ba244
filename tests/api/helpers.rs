use developer_network::{
    configuration::{get_configuration, Settings},
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};
use once_cell::sync::Lazy;
use reqwest::{Client, Method, RequestBuilder, Response};
use secrecy::Secret;
use std::net::SocketAddr;
use wiremock::MockServer;

static TRACING: Lazy<()> = Lazy::new(|| {
    let name = "test";
    let default_env_filter = "info";
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(name.into(), default_env_filter.into(), std::io::stdout);
        init_subscriber(subscriber).expect("Failed to initialize tracing");
    } else {
        let subscriber = get_subscriber(name.into(), default_env_filter.into(), std::io::sink);
        init_subscriber(subscriber).expect("Failed to initialize tracing");
    }
});

static FAILED_TO_EXECUTE_REQUEST: &str = "Failed to execute request";

pub const AIRTABLE_RECORDS_PATH: &str = "/appTest/tblDevelopers";
pub const REDIRECT_URI: &str = "http://localhost:8080/api/linkedin/callback";

pub struct TestApp {
    pub address: SocketAddr,
    pub airtable_server: MockServer,
    pub linkedin_server: MockServer,
    client: Client,
}

impl TestApp {
    /// Spawns the application with every integration configured against mock servers.
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    pub async fn spawn_with(customize: impl FnOnce(&mut Settings)) -> Self {
        Lazy::force(&TRACING);

        let airtable_server = MockServer::start().await;
        let linkedin_server = MockServer::start().await;

        let mut config = get_configuration().expect("Failed to read configuration");
        config.application.host = "127.0.0.1".into();
        config.application.port = 0;
        config.application.allowed_origins =
            "http://localhost:3000,https://devnet.example.com".into();
        config.application.http_timeout_milliseconds = 2000;

        config.airtable.base_url = airtable_server.uri();
        config.airtable.api_key = Secret::new("airtable-key".into());
        config.airtable.base_id = "appTest".into();
        config.airtable.table_id = "tblDevelopers".into();

        config.linkedin.oauth_base_url = linkedin_server.uri();
        config.linkedin.api_base_url = linkedin_server.uri();
        config.linkedin.client_id = "linkedin-client".into();
        config.linkedin.client_secret = Secret::new("linkedin-secret".into());
        config.linkedin.access_token = Secret::new("linkedin-token".into());
        config.linkedin.redirect_uri = REDIRECT_URI.into();

        customize(&mut config);

        let app = Application::build(config)
            .await
            .expect("Failed to build application");
        let address = app.local_addr();

        tokio::spawn(app.run_until_stopped());

        Self {
            address,
            airtable_server,
            linkedin_server,
            client: Client::new(),
        }
    }

    pub async fn get_health(&self) -> Response {
        self.client
            .get(self.url("/api/health"))
            .send()
            .await
            .expect(FAILED_TO_EXECUTE_REQUEST)
    }

    pub async fn post_developer(&self, body: String) -> Response {
        self.post_json("/api/developer/submit", body).await
    }

    pub async fn post_newsletter(&self, body: String) -> Response {
        self.post_json("/api/newsletter", body).await
    }

    pub async fn get_linkedin_auth(&self) -> Response {
        self.client
            .get(self.url("/api/linkedin/auth"))
            .send()
            .await
            .expect(FAILED_TO_EXECUTE_REQUEST)
    }

    pub async fn get_linkedin_callback(&self, query: &[(&str, &str)]) -> Response {
        self.client
            .get(self.url("/api/linkedin/callback"))
            .query(query)
            .send()
            .await
            .expect(FAILED_TO_EXECUTE_REQUEST)
    }

    pub async fn post_linkedin_exchange(&self, body: String) -> Response {
        self.post_json("/api/linkedin/exchange", body).await
    }

    pub fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        self.client.request(method, self.url(endpoint))
    }

    async fn post_json(&self, endpoint: &str, body: String) -> Response {
        self.client
            .post(self.url(endpoint))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect(FAILED_TO_EXECUTE_REQUEST)
    }

    fn url(&self, endpoint: &str) -> String {
        format!("http://{}{endpoint}", self.address)
    }
}

pub fn ada_submission() -> serde_json::Value {
    serde_json::json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@example.com",
        "github": "ada",
        "howFound": "podcast"
    })
}
