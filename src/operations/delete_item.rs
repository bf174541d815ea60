use aws_sdk_dynamodb::{
    operation::delete_item::{builders::DeleteItemInputBuilder, DeleteItemInput, DeleteItemOutput},
    types::ReturnValue,
};
use serde::{de::DeserializeOwned, Serialize};

use super::{decode, dispatch};
use crate::{
    client::Client,
    context::Context,
    encoding::key::{marshal, Item},
    error::{Error, Operation},
    expression::Expression,
    models::reflect::Reflect,
};

/// Deletes the item identified by a key.
#[derive(Debug)]
pub struct DeleteItem {
    client: Client,
    table: String,
    input: DeleteItemInputBuilder,
    bound: Result<(), Error>,
}

impl DeleteItem {
    pub(crate) fn new(client: Client, table: String) -> Self {
        let input = DeleteItemInput::builder().table_name(table.clone());
        DeleteItem {
            client,
            table,
            input,
            bound: Ok(()),
        }
    }

    /// Marshals every field of `input` into the key.
    ///
    /// Only works against tables whose items hold nothing but key
    /// attributes. Use [`bind_key`](Self::bind_key) for everything else.
    pub fn bind<T: Serialize + ?Sized>(self, input: &T) -> Self {
        let key = marshal(input);
        self.set_key(key)
    }

    /// Binds only the key fields of `key`.
    pub fn bind_key<T: Reflect + Serialize>(self, key: &T) -> Self {
        let key = self.client.key_encoder().encode(key);
        self.set_key(key)
    }

    /// Uses an already built key map as the key.
    pub fn bind_attributes(self, key: Item) -> Self {
        self.set_key(Ok(key))
    }

    fn set_key(mut self, key: Result<Item, Error>) -> Self {
        self.bound = match key {
            Ok(key) => {
                self.input = self.input.set_key(Some(key));
                Ok(())
            }
            Err(err) => Err(err),
        };
        self
    }

    pub fn use_expr(mut self, expr: Expression) -> Self {
        self.input = self
            .input
            .set_condition_expression(expr.condition())
            .set_expression_attribute_names(expr.names())
            .set_expression_attribute_values(expr.values());
        self
    }

    pub fn input(&self) -> &DeleteItemInputBuilder {
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

    /// Executes and decodes the item as it was before deletion.
    pub async fn execute_returning<T: DeserializeOwned>(self) -> Result<T, Error> {
        let ctx = self.client.context();
        self.execute_returning_with_context(&ctx).await
    }

    pub async fn execute_returning_with_context<T: DeserializeOwned>(
        mut self,
        ctx: &Context,
    ) -> Result<T, Error> {
        self.input = self.input.return_values(ReturnValue::AllOld);
        let output = self.send(ctx).await?;
        decode(output.attributes)
    }

    async fn send(self, ctx: &Context) -> Result<DeleteItemOutput, Error> {
        let DeleteItem {
            client,
            table,
            input,
            bound,
        } = self;
        bound?;

        dispatch(
            ctx,
            Operation::DeleteItem,
            &table,
            client.service().delete_item(ctx, input),
        )
        .await
    }
}
