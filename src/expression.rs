use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;

/// Expression fragments attached to a request through `use_expr`.
///
/// Each operation only copies the fragments it understands: conditions go
/// to put, update and delete, projections to get, and update clauses to
/// update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expression {
    condition: Option<String>,
    projection: Option<String>,
    update: Option<String>,
    names: HashMap<String, String>,
    values: HashMap<String, AttributeValue>,
}

impl Expression {
    pub fn builder() -> ExpressionBuilder {
        ExpressionBuilder::default()
    }

    pub fn condition(&self) -> Option<String> {
        self.condition.clone()
    }

    pub fn projection(&self) -> Option<String> {
        self.projection.clone()
    }

    pub fn update(&self) -> Option<String> {
        self.update.clone()
    }

    // DynamoDB rejects empty name and value maps, so those become `None`.
    pub fn names(&self) -> Option<HashMap<String, String>> {
        (!self.names.is_empty()).then(|| self.names.clone())
    }

    pub fn values(&self) -> Option<HashMap<String, AttributeValue>> {
        (!self.values.is_empty()).then(|| self.values.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExpressionBuilder {
    condition: Option<String>,
    projection: Vec<String>,
    set: Vec<String>,
    remove: Vec<String>,
    names: HashMap<String, String>,
    values: HashMap<String, AttributeValue>,
    // attribute -> first placeholder registered for it
    placeholders: HashMap<String, String>,
    next: usize,
}

impl ExpressionBuilder {
    /// Raw condition text. Placeholders it uses are registered with
    /// [`name`](Self::name) and [`value`](Self::value).
    pub fn condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn name(mut self, placeholder: impl Into<String>, attribute: impl Into<String>) -> Self {
        let (placeholder, attribute) = (placeholder.into(), attribute.into());
        self.placeholders
            .entry(attribute.clone())
            .or_insert_with(|| placeholder.clone());
        self.names.insert(placeholder, attribute);
        self
    }

    pub fn value(mut self, placeholder: impl Into<String>, value: AttributeValue) -> Self {
        self.values.insert(placeholder.into(), value);
        self
    }

    /// Adds `attribute` to the projection.
    pub fn project(mut self, attribute: &str) -> Self {
        let name = self.name_placeholder(attribute);
        self.projection.push(name);
        self
    }

    /// Adds `SET attribute = value` to the update clause.
    pub fn set(mut self, attribute: &str, value: AttributeValue) -> Self {
        let name = self.name_placeholder(attribute);
        let placeholder = format!(":v{}", self.allocate());
        self.values.insert(placeholder.clone(), value);
        self.set.push(format!("{} = {}", name, placeholder));
        self
    }

    /// Adds `REMOVE attribute` to the update clause.
    pub fn remove(mut self, attribute: &str) -> Self {
        let name = self.name_placeholder(attribute);
        self.remove.push(name);
        self
    }

    pub fn build(self) -> Expression {
        let mut clauses = Vec::new();
        if !self.set.is_empty() {
            clauses.push(format!("SET {}", self.set.join(", ")));
        }
        if !self.remove.is_empty() {
            clauses.push(format!("REMOVE {}", self.remove.join(", ")));
        }

        Expression {
            condition: self.condition,
            projection: (!self.projection.is_empty()).then(|| self.projection.join(", ")),
            update: (!clauses.is_empty()).then(|| clauses.join(" ")),
            names: self.names,
            values: self.values,
        }
    }

    fn allocate(&mut self) -> usize {
        let n = self.next;
        self.next += 1;
        n
    }

    fn name_placeholder(&mut self, attribute: &str) -> String {
        if let Some(placeholder) = self.placeholders.get(attribute) {
            return placeholder.clone();
        }
        let placeholder = format!("#n{}", self.allocate());
        self.names.insert(placeholder.clone(), attribute.to_string());
        self.placeholders.insert(attribute.to_string(), placeholder.clone());
        placeholder
    }
}
