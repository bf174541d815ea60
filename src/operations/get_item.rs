use aws_sdk_dynamodb::operation::get_item::{builders::GetItemInputBuilder, GetItemInput};
use serde::{de::DeserializeOwned, Serialize};

use super::{decode, dispatch};
use crate::{
    client::Client,
    context::Context,
    encoding::key::Item,
    error::{Error, Operation},
    expression::Expression,
    models::reflect::Reflect,
};

/// Reads one item by key and decodes it.
#[derive(Debug)]
pub struct GetItem {
    client: Client,
    table: String,
    input: GetItemInputBuilder,
    bound: Result<(), Error>,
}

impl GetItem {
    pub(crate) fn new(client: Client, table: String) -> Self {
        let input = GetItemInput::builder().table_name(table.clone());
        GetItem {
            client,
            table,
            input,
            bound: Ok(()),
        }
    }

    /// Binds the key fields of `key`.
    pub fn bind<T: Reflect + Serialize>(mut self, key: &T) -> Self {
        self.bound = match self.client.key_encoder().encode(key) {
            Ok(key) => {
                self.input = self.input.set_key(Some(key));
                Ok(())
            }
            Err(err) => Err(err),
        };
        self
    }

    /// Uses an already built key map as the key.
    pub fn bind_attributes(mut self, key: Item) -> Self {
        self.input = self.input.set_key(Some(key));
        self.bound = Ok(());
        self
    }

    pub fn use_expr(mut self, expr: Expression) -> Self {
        self.input = self
            .input
            .set_projection_expression(expr.projection())
            .set_expression_attribute_names(expr.names());
        self
    }

    pub fn consistent_read(mut self, consistent: bool) -> Self {
        self.input = self.input.consistent_read(consistent);
        self
    }

    pub fn input(&self) -> &GetItemInputBuilder {
        &self.input
    }

    pub async fn execute<T: DeserializeOwned>(self) -> Result<T, Error> {
        let ctx = self.client.context();
        self.execute_with_context(&ctx).await
    }

    pub async fn execute_with_context<T: DeserializeOwned>(self, ctx: &Context) -> Result<T, Error> {
        let GetItem {
            client,
            table,
            input,
            bound,
        } = self;
        bound?;

        let output = dispatch(
            ctx,
            Operation::GetItem,
            &table,
            client.service().get_item(ctx, input),
        )
        .await?;
        decode(output.item)
    }
}
