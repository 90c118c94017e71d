use crate::model::ItemId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreepickError {
    #[error("Duplicate item id: {0}")]
    DuplicateId(ItemId),

    #[error("Item `{child}` references unknown parent `{parent}`")]
    UnknownParent { child: ItemId, parent: ItemId },

    #[error("Cycle in parent chain involving item: {0}")]
    ParentCycle(ItemId),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TreepickError>;
