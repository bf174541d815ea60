use aws_sdk_dynamodb::{
    operation::update_item::{builders::UpdateItemInputBuilder, UpdateItemInput, UpdateItemOutput},
    types::ReturnValue,
};
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

/// Applies an update expression to the item identified by a key.
#[derive(Debug)]
pub struct UpdateItem {
    client: Client,
    table: String,
    input: UpdateItemInputBuilder,
    bound: Result<(), Error>,
}

impl UpdateItem {
    pub(crate) fn new(client: Client, table: String) -> Self {
        let input = UpdateItemInput::builder().table_name(table.clone());
        UpdateItem {
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
            .set_update_expression(expr.update())
            .set_condition_expression(expr.condition())
            .set_expression_attribute_names(expr.names())
            .set_expression_attribute_values(expr.values());
        self
    }

    pub fn input(&self) -> &UpdateItemInputBuilder {
        &self.input
    }

    pub async fn execute(self) -> Result<(), Error> {
        let ctx = self.client.context();
        self.execute_with_context(&ctx).await
    }

    pub async fn execute_with_context(self, ctx: &Context) -> Result<(), Error> {
        self.send(ctx).await?;
        Ok(())
    }

    /// Executes and decodes the item as it is after the update.
    pub async fn execute_returning<T: DeserializeOwned>(self) -> Result<T, Error> {
        let ctx = self.client.context();
        self.execute_returning_with_context(&ctx).await
    }

    pub async fn execute_returning_with_context<T: DeserializeOwned>(
        mut self,
        ctx: &Context,
    ) -> Result<T, Error> {
        self.input = self.input.return_values(ReturnValue::AllNew);
        let output = self.send(ctx).await?;
        decode(output.attributes)
    }

    async fn send(self, ctx: &Context) -> Result<UpdateItemOutput, Error> {
        let UpdateItem {
            client,
            table,
            input,
            bound,
        } = self;
        bound?;

        dispatch(
            ctx,
            Operation::UpdateItem,
            &table,
            client.service().update_item(ctx, input),
        )
        .await
    }
}
