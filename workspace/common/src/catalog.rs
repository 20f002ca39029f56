use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{DeptId, StoreId};

/// Payload of the provider's `GET /stores`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct StoresResponse {
    pub stores: Vec<StoreId>,
}

/// Payload of the provider's `GET /depts`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct DeptsResponse {
    pub depts: Vec<DeptId>,
}
