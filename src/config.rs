use std::env;

#[derive(Clone)]
pub struct Config {
    // Absence is reported per-request so the gateway gets a well-formed 400
    // instead of the endpoint disappearing at startup.
    pub webhook_secret: Option<String>,
    pub sanity: SanityConfig,
    pub port: u16,
}

#[derive(Clone)]
pub struct SanityConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    pub token: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            webhook_secret: env::var("RAZORPAY_WEBHOOK_SECRET").ok(),
            sanity: SanityConfig {
                project_id: env::var("SANITY_PROJECT_ID")
                    .expect("Couldn't find secret SANITY_PROJECT_ID"),
                dataset: env::var("SANITY_DATASET").expect("Couldn't find secret SANITY_DATASET"),
                api_version: env::var("SANITY_API_VERSION").unwrap_or_else(|_| "v2022-03-07".into()),
                token: env::var("SANITY_API_TOKEN")
                    .expect("Couldn't find secret SANITY_API_TOKEN"),
            },
            port: env::var("PORT")
                .map(|port| port.parse().expect("PORT must be a number"))
                .unwrap_or(8000),
        }
    }
}
