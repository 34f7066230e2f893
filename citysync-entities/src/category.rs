use crate::id::Id;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Category {
    pub id: Id,
    pub name: String,
    pub slug: String,
}
