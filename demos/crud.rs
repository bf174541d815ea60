extern crate dotenv;
use aws_config::{meta::region::RegionProviderChain, BehaviorVersion};
use dotenv::dotenv;
use dynabind::{record, Client, Config, Expression, TableItem};
use serde::{Deserialize, Serialize};
use std::env;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Todo {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Item", default, skip_serializing_if = "String::is_empty")]
    item: String,
}

record!(Todo {
    "ID" => id (dynamodb = "paritionkey"),
    "Item" => item,
});

impl TableItem for Todo {
    fn table_name() -> String {
        String::from("todo")
    }
}

#[tokio::main]
async fn main() -> Result<(), dynabind::Error> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Local DynamoDB unless told otherwise
    let endpoint =
        env::var("DYNAMODB_ENDPOINT").unwrap_or_else(|_| String::from("http://localhost:8000"));
    let region = RegionProviderChain::default_provider().or_else("ap-southeast-1");
    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(region)
        .endpoint_url(endpoint)
        .load()
        .await;

    let client = Client::from_sdk_config(&sdk_config, Config::default())?;
    client
        .create_table_op(Todo::table_name())
        .bind(&Todo::default())
        .if_not_exists()
        .execute()
        .await?;

    let todos = client.table_for::<Todo>();
    let todo = Todo {
        id: String::from("3"),
        item: String::from("Nonsense"),
    };
    todos.put(&todo).await?;

    let key = Todo {
        id: String::from("3"),
        ..Default::default()
    };
    let found: Todo = todos.get(&key).await?;
    println!("{:?}", found);

    let expr = Expression::builder()
        .set("Item", dynabind::AttributeValue::S(String::from("Sense")))
        .build();
    let updated: Todo = todos
        .update_item()
        .bind(&key)
        .use_expr(expr)
        .execute_returning()
        .await?;
    println!("{:?}", updated);

    let removed: Todo = todos.delete_item().bind_key(&key).execute_returning().await?;
    println!("removed {:?}", removed);

    Ok(())
}
