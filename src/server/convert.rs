use crate::server::proto::{Item as ProtoItem, Pagination};
use crate::store::{Item, PageQuery};

pub fn item_to_proto(item: &Item) -> ProtoItem {
    ProtoItem {
        id: item.id,
        name: item.name.clone(),
        created_at: item.created_at.to_rfc3339(),
    }
}

pub fn count_to_proto(count: usize) -> u64 {
    u64::try_from(count).unwrap_or(u64::MAX)
}

/// `has_more` compares the requested window against `total`, not against
/// the number of items actually returned.
pub fn pagination(query: &PageQuery, total: usize) -> Pagination {
    let offset = u32::try_from(query.offset).unwrap_or(u32::MAX);
    let limit = u32::try_from(query.limit).unwrap_or(u32::MAX);
    let total = count_to_proto(total);
    Pagination {
        offset,
        limit,
        total,
        has_more: u64::from(offset).saturating_add(u64::from(limit)) < total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_item_to_proto() {
        let created_at = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let proto = item_to_proto(&Item::seeded(7, created_at));
        assert_eq!(proto.id, 7);
        assert_eq!(proto.name, "Element 7");
        assert_eq!(proto.created_at, "2024-06-15T12:00:00+00:00");
    }

    #[test]
    fn test_pagination_has_more() {
        let p = pagination(&PageQuery::new(0, 20, ""), 21);
        assert!(p.has_more);
        assert_eq!(p.total, 21);

        let p = pagination(&PageQuery::new(20, 20, ""), 40);
        assert!(!p.has_more);
    }
}
