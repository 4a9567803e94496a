//! Wire types specific to the REST surface.
//!
//! The `Goods` entity and the create/update payloads live in
//! `wares-core`; this module only holds shapes that exist for the wire
//! alone.

use serde::{Deserialize, Serialize};

/// `projectId` query parameter shared by all goods endpoints.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectQuery {
    pub project_id: i64,
}

/// Payload returned by a successful delete: a confirmation of the
/// soft-delete rather than a full goods row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteGoodsResponse {
    pub id: i64,
    pub project_id: i64,
    pub removed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_response_wire_shape() {
        let resp = DeleteGoodsResponse {
            id: 4,
            project_id: 2,
            removed: true,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 4, "projectId": 2, "removed": true})
        );
    }
}
