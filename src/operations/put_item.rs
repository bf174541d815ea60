use aws_sdk_dynamodb::operation::put_item::{builders::PutItemInputBuilder, PutItemInput};
use serde::Serialize;

use super::dispatch;
use crate::{
    client::Client,
    context::Context,
    encoding::key::{marshal, Item},
    error::{Error, Operation},
    expression::Expression,
};

/// Writes one full item.
#[derive(Debug)]
pub struct PutItem {
    client: Client,
    table: String,
    input: PutItemInputBuilder,
    bound: Result<(), Error>,
}

impl PutItem {
    pub(crate) fn new(client: Client, table: String) -> Self {
        let input = PutItemInput::builder().table_name(table.clone());
        PutItem {
            client,
            table,
            input,
            bound: Ok(()),
        }
    }

    /// Marshals every field of `item` into the request.
    pub fn bind<T: Serialize + ?Sized>(mut self, item: &T) -> Self {
        self.bound = match marshal(item) {
            Ok(item) => {
                self.input = self.input.set_item(Some(item));
                Ok(())
            }
            Err(err) => Err(err),
        };
        self
    }

    /// Uses an already built attribute map as the item.
    pub fn bind_attributes(mut self, item: Item) -> Self {
        self.input = self.input.set_item(Some(item));
        self.bound = Ok(());
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

    pub fn input(&self) -> &PutItemInputBuilder {
        &self.input
    }

    pub async fn execute(self) -> Result<(), Error> {
        let ctx = self.client.context();
        self.execute_with_context(&ctx).await
    }

    pub async fn execute_with_context(self, ctx: &Context) -> Result<(), Error> {
        let PutItem {
            client,
            table,
            input,
            bound,
        } = self;
        bound?;

        dispatch(
            ctx,
            Operation::PutItem,
            &table,
            client.service().put_item(ctx, input),
        )
        .await?;
        Ok(())
    }
}
