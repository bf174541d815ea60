use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_dynamodb::{
    operation::{
        create_table::{builders::CreateTableInputBuilder, CreateTableOutput},
        delete_item::{builders::DeleteItemInputBuilder, DeleteItemOutput},
        get_item::{builders::GetItemInputBuilder, GetItemOutput},
        put_item::{builders::PutItemInputBuilder, PutItemOutput},
        update_item::{builders::UpdateItemInputBuilder, UpdateItemOutput},
    },
    Client,
};

use crate::{context::Context, error::ServiceError};

/// The subset of the DynamoDB API this crate dispatches to.
///
/// Every call receives the context it runs under. Deadlines and
/// cancellation are enforced by the caller, so implementations only need to
/// look at the context if they do their own waiting.
#[async_trait]
pub trait DynamoService: Send + Sync {
    async fn create_table(
        &self,
        ctx: &Context,
        input: CreateTableInputBuilder,
    ) -> Result<CreateTableOutput, ServiceError>;

    async fn put_item(
        &self,
        ctx: &Context,
        input: PutItemInputBuilder,
    ) -> Result<PutItemOutput, ServiceError>;

    async fn get_item(
        &self,
        ctx: &Context,
        input: GetItemInputBuilder,
    ) -> Result<GetItemOutput, ServiceError>;

    async fn update_item(
        &self,
        ctx: &Context,
        input: UpdateItemInputBuilder,
    ) -> Result<UpdateItemOutput, ServiceError>;

    async fn delete_item(
        &self,
        ctx: &Context,
        input: DeleteItemInputBuilder,
    ) -> Result<DeleteItemOutput, ServiceError>;
}

#[async_trait]
impl DynamoService for Client {
    async fn create_table(
        &self,
        _ctx: &Context,
        input: CreateTableInputBuilder,
    ) -> Result<CreateTableOutput, ServiceError> {
        input
            .send_with(self)
            .await
            .map_err(|err| aws_sdk_dynamodb::Error::from(err).into())
    }

    async fn put_item(
        &self,
        _ctx: &Context,
        input: PutItemInputBuilder,
    ) -> Result<PutItemOutput, ServiceError> {
        input
            .send_with(self)
            .await
            .map_err(|err| aws_sdk_dynamodb::Error::from(err).into())
    }

    async fn get_item(
        &self,
        _ctx: &Context,
        input: GetItemInputBuilder,
    ) -> Result<GetItemOutput, ServiceError> {
        input
            .send_with(self)
            .await
            .map_err(|err| aws_sdk_dynamodb::Error::from(err).into())
    }

    async fn update_item(
        &self,
        _ctx: &Context,
        input: UpdateItemInputBuilder,
    ) -> Result<UpdateItemOutput, ServiceError> {
        input
            .send_with(self)
            .await
            .map_err(|err| aws_sdk_dynamodb::Error::from(err).into())
    }

    async fn delete_item(
        &self,
        _ctx: &Context,
        input: DeleteItemInputBuilder,
    ) -> Result<DeleteItemOutput, ServiceError> {
        input
            .send_with(self)
            .await
            .map_err(|err| aws_sdk_dynamodb::Error::from(err).into())
    }
}

/// Builds an SDK client from an already loaded AWS configuration.
pub fn sdk_client(config: &SdkConfig) -> Client {
    Client::new(config)
}

/// Builds an SDK client from the environment (credentials, region, endpoint).
pub async fn sdk_client_from_env() -> Client {
    let config = aws_config::load_from_env().await;
    Client::new(&config)
}
