//! Condition filtering for [`crate::types::RecordSet`].

use crate::condition::ConditionGroup;
use crate::types::RecordSet;

/// Returns a new [`RecordSet`] containing only records matching `group`, in their original order.
///
/// An empty group keeps every record. Unlike update/delete, filtering does not require the
/// condition fields to exist anywhere: records without the field are evaluated as `undefined`.
pub fn filter(records: &RecordSet, group: &ConditionGroup) -> RecordSet {
    if group.is_empty() {
        return records.clone();
    }
    records.filter_records(|record| group.matches(record))
}
