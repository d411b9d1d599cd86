use lambda_http::{run, tracing, Error};
use std::env::set_var;
use std::sync::Arc;

use api::{cors_layer, create_app, state::AppState};
use shared::config::Config;
use shared::datastore::{Datastore, DynamoDbConnector};

#[tokio::main]
async fn main() -> Result<(), Error> {
    set_var("AWS_LAMBDA_HTTP_IGNORE_STAGE_IN_PATH", "true");

    // required to enable CloudWatch error logging by the runtime
    tracing::init_default_subscriber();

    let config = Config::from_env()?;
    if config.jwt_secret.is_none() {
        tracing::warn!("JWT_SECRET is not set: logins will fail and every request is anonymous");
    }

    // The DynamoDB client is created lazily by the first request that needs it.
    let connector = DynamoDbConnector::new(&config.admins_table, &config.articles_table);
    let datastore = Arc::new(Datastore::new(Arc::new(connector)));
    let app_state = AppState::new(&config, datastore);

    tracing::info!(
        environment = %config.environment,
        admins_table = %config.admins_table,
        articles_table = %config.articles_table,
        "Starting API"
    );

    let app = create_app(app_state).layer(cors_layer(&config.cors_origin)?);

    run(app).await
}
