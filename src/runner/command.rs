use crate::{
    dto::{CartOperation, NewLineItem, OperationType},
    store::CartStore,
    Error,
};

/// A validated script row, ready to apply to a cart.
#[derive(Debug, PartialEq)]
pub enum Command {
    Add(NewLineItem),
    Increment(String),
    Decrement(String),
}

impl TryFrom<CartOperation> for Command {
    type Error = Error;

    fn try_from(op: CartOperation) -> Result<Self, Self::Error> {
        match op.op_type {
            OperationType::Add => {
                let missing = |field: &str| {
                    Error::InvalidOperation(format!("add {} is missing {}", op.id, field))
                };
                let title = op.title.ok_or_else(|| missing("title"))?;
                let image_url = op.image_url.ok_or_else(|| missing("image_url"))?;
                let price = op.price.ok_or_else(|| missing("price"))?;
                Ok(Command::Add(NewLineItem {
                    id: op.id,
                    title,
                    image_url,
                    price,
                }))
            }
            OperationType::Increment => Ok(Command::Increment(op.id)),
            OperationType::Decrement => Ok(Command::Decrement(op.id)),
        }
    }
}

impl Command {
    pub fn apply(self, cart: &CartStore) {
        match self {
            Command::Add(product) => cart.add_to_cart(product),
            Command::Increment(id) => cart.increment(&id),
            Command::Decrement(id) => cart.decrement(&id),
        }
    }
}
