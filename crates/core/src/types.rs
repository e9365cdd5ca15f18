/// Record identity. Uniqueness is the storage layer's concern.
pub type DbId = i64;
