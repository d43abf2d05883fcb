//! The JSON response envelope shared by every gateway endpoint.

use serde::Deserialize;

/// Standard `{success, data, message}` wrapper around every response body.
///
/// `data` is absent on bare acknowledgements (e.g. deletes) and on
/// failures, where `message` carries the reason instead.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    /// Whether the gateway accepted the request.
    pub success: bool,
    /// The payload, when one is returned.
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    /// Human-readable status or failure reason.
    #[serde(default)]
    pub message: Option<String>,
    /// Paging metadata, present on list endpoints.
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Paging metadata attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    /// 1-based page number of this response.
    pub page: u32,
    /// Requested page size.
    pub limit: u32,
    /// Total matching items across all pages.
    pub total_items: u64,
    /// Total number of pages.
    pub total_pages: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_success_with_data() {
        let json = r#"{"success": true, "data": 7}"#;
        let envelope: Envelope<i64> = serde_json::from_str(json).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data, Some(7));
        assert!(envelope.message.is_none());
        assert!(envelope.pagination.is_none());
    }

    #[test]
    fn deserialize_failure_with_message() {
        let json = r#"{"success": false, "message": "insufficient stock"}"#;
        let envelope: Envelope<i64> = serde_json::from_str(json).unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.message.as_deref(), Some("insufficient stock"));
    }

    #[test]
    fn deserialize_list_with_pagination() {
        let json = r#"{
            "success": true,
            "data": [1, 2, 3],
            "pagination": {"page": 1, "limit": 10, "total_items": 3, "total_pages": 1}
        }"#;
        let envelope: Envelope<Vec<i64>> = serde_json::from_str(json).unwrap();
        let pagination = envelope.pagination.unwrap();
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.total_items, 3);
    }

    #[test]
    fn null_data_is_none() {
        let json = r#"{"success": true, "data": null}"#;
        let envelope: Envelope<i64> = serde_json::from_str(json).unwrap();
        assert!(envelope.data.is_none());
    }
}
