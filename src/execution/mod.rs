//! Operation dispatch with observer hooks and run metrics.
//!
//! This module sits "above" [`crate::processing`]: it resolves a host parameter bundle into a
//! [`Request`], runs the matching operation over an owned [`RecordSet`], and reports what
//! happened through an optional [`ExecutionObserver`] and cumulative [`ExecutionMetrics`].
//!
//! Execution is synchronous; a run owns its record set for its whole duration.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use record_query::execution::{ExecutionEngine, TracingExecutionObserver};
//! use record_query::params::OperationParams;
//! use record_query::types::{Record, RecordSet};
//!
//! let engine = ExecutionEngine::new().with_observer(Arc::new(TracingExecutionObserver));
//! let records: RecordSet = vec![Record::from_pairs([("salary", 50000i64)])].into();
//!
//! let params = OperationParams::from_json_str(r#"{"operation":"statistics","statsField":"salary"}"#).unwrap();
//! let out = engine.execute(records, &params).unwrap();
//! assert_eq!(out.to_json_string(), r#"[{"count":1,"sum":50000,"avg":50000,"min":50000,"max":50000}]"#);
//! assert_eq!(engine.metrics().snapshot().runs, 1);
//! ```

mod observer;

use std::sync::Arc;
use std::time::Instant;

use crate::error::{CrudResult, OperationError};
use crate::params::{DeleteRequest, OperationParams, ReadRequest, Request, UpdateRequest};
use crate::processing;
use crate::types::RecordSet;

pub use observer::{
    ExecutionEvent, ExecutionMetrics, ExecutionMetricsSnapshot, ExecutionObserver, StdErrExecutionObserver,
    TracingExecutionObserver,
};

/// Runs record operations and reports on them.
pub struct ExecutionEngine {
    observer: Option<Arc<dyn ExecutionObserver>>,
    metrics: Arc<ExecutionMetrics>,
}

impl ExecutionEngine {
    pub fn new() -> Self {
        Self {
            observer: None,
            metrics: Arc::new(ExecutionMetrics::new()),
        }
    }

    /// Attach an observer for execution events (metrics/logging).
    pub fn with_observer(mut self, observer: Arc<dyn ExecutionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Get a handle to the engine's cumulative metrics.
    pub fn metrics(&self) -> Arc<ExecutionMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Resolve `params` and run the selected operation over `records`.
    ///
    /// Failures carry the operation selector as given in `params`, including unknown ones.
    pub fn execute(&self, records: RecordSet, params: &OperationParams) -> Result<RecordSet, OperationError> {
        match params.clone().into_request() {
            Ok(request) => self.run(records, request),
            Err(err) => {
                self.metrics.fail_run(std::time::Duration::ZERO);
                Err(self.failed(params.operation.clone(), err))
            }
        }
    }

    /// Run an already-resolved request over `records`.
    pub fn run(&self, records: RecordSet, request: Request) -> Result<RecordSet, OperationError> {
        let operation = request.operation();
        let start = Instant::now();
        self.metrics.begin_run(records.len());
        self.emit(ExecutionEvent::RunStarted {
            operation,
            input_records: records.len(),
        });

        match dispatch(records, request) {
            Ok(out) => {
                let elapsed = start.elapsed();
                self.metrics.end_run(out.len(), elapsed);
                self.emit(ExecutionEvent::RunFinished {
                    operation,
                    output_records: out.len(),
                    elapsed,
                    metrics: self.metrics.snapshot(),
                });
                Ok(out)
            }
            Err(err) => {
                self.metrics.fail_run(start.elapsed());
                Err(self.failed(operation.to_string(), err))
            }
        }
    }

    fn failed(&self, operation: String, err: crate::error::CrudError) -> OperationError {
        let err = OperationError::new(operation, err);
        self.emit(ExecutionEvent::RunFailed {
            operation: err.operation.clone(),
            error: err.message(),
        });
        err
    }

    fn emit(&self, event: ExecutionEvent) {
        if let Some(obs) = &self.observer {
            obs.on_event(&event);
        }
    }
}

impl Default for ExecutionEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Run one operation with a default engine (no observer).
pub fn execute(records: RecordSet, params: &OperationParams) -> Result<RecordSet, OperationError> {
    ExecutionEngine::new().execute(records, params)
}

fn dispatch(mut records: RecordSet, request: Request) -> CrudResult<RecordSet> {
    match request {
        Request::Create { payload, position } => {
            tracing::debug!(?position, "create");
            processing::create(records, &payload, position)
        }
        Request::Read(read) => Ok(match read {
            ReadRequest::Filter(group) => {
                tracing::debug!(conditions = group.conditions.len(), logic = ?group.logic, "read: filter");
                processing::filter(&records, &group)
            }
            ReadRequest::Sort { field, order } => {
                tracing::debug!(%field, ?order, "read: sort");
                processing::sort(&records, &field, order)
            }
            ReadRequest::Search {
                field,
                term,
                case_sensitive,
            } => {
                tracing::debug!(%field, %term, case_sensitive, "read: search");
                processing::search(&records, &field, &term, case_sensitive)
            }
            ReadRequest::Limit { limit, offset } => {
                tracing::debug!(limit, offset, "read: limit");
                processing::limit(&records, limit, offset)
            }
            ReadRequest::Cell {
                row_index,
                field_names,
            } => {
                tracing::debug!(%row_index, %field_names, "read: cell");
                processing::read_cells(&records, &row_index, &field_names)
            }
            ReadRequest::PassThrough => {
                tracing::debug!("read: unknown mode, passing records through");
                records
            }
        }),
        Request::Update(UpdateRequest::Condition { group, updates }) => {
            let updated = processing::update_by_condition(&mut records, &group, &updates)?;
            tracing::debug!(updated, fields = updates.len(), "update: condition");
            Ok(records)
        }
        Request::Update(UpdateRequest::Cell { row_index, field, value }) => {
            let updated = processing::update_cells(&mut records, &row_index, &field, &value);
            tracing::debug!(updated, %field, "update: cell");
            Ok(records)
        }
        Request::Delete(DeleteRequest::Condition(group)) => {
            tracing::debug!(conditions = group.conditions.len(), "delete: condition");
            processing::delete_by_condition(records, &group)
        }
        Request::Delete(DeleteRequest::RowIndex(row_index)) => {
            tracing::debug!(%row_index, "delete: row index");
            Ok(processing::delete_rows(records, &row_index))
        }
        Request::RemoveDuplicates { unique_fields } => {
            tracing::debug!(%unique_fields, "remove duplicates");
            Ok(processing::remove_duplicates(records, &unique_fields))
        }
        Request::Statistics { field, group_by } => {
            tracing::debug!(%field, ?group_by, "statistics");
            Ok(processing::statistics(&records, &field, group_by.as_deref()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{execute, ExecutionEngine};
    use std::sync::{Arc, Mutex};

    use crate::condition::{Condition, ConditionGroup, ConditionLogic, Operator};
    use crate::error::CrudError;
    use crate::execution::{ExecutionEvent, ExecutionObserver};
    use crate::params::{OperationParams, Request, UpdateRequest};
    use crate::processing::FieldUpdate;
    use crate::types::{Record, RecordSet, Value};

    fn staff() -> RecordSet {
        RecordSet::new(vec![
            Record::from_pairs([
                ("name", Value::string("張三")),
                ("department", Value::string("技術部")),
                ("salary", Value::Number(50000.0)),
            ]),
            Record::from_pairs([
                ("name", Value::string("李四")),
                ("department", Value::string("行銷部")),
                ("salary", Value::Number(45000.0)),
            ]),
        ])
    }

    #[derive(Default)]
    struct RecordingObserver {
        events: Mutex<Vec<ExecutionEvent>>,
    }

    impl ExecutionObserver for RecordingObserver {
        fn on_event(&self, event: &ExecutionEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    #[test]
    fn execute_dispatches_selected_operation() {
        let params = OperationParams {
            operation: "read".into(),
            read_mode: "limit".into(),
            limit: 1,
            ..Default::default()
        };
        let out = execute(staff(), &params).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out.records[0].get("name"), Some(&Value::string("張三")));
    }

    #[test]
    fn observer_sees_start_and_finish() {
        let observer = Arc::new(RecordingObserver::default());
        let engine = ExecutionEngine::new().with_observer(observer.clone());
        let params = OperationParams {
            operation: "removeDuplicates".into(),
            ..Default::default()
        };
        engine.execute(staff(), &params).unwrap();

        let events = observer.events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], ExecutionEvent::RunStarted { input_records: 2, .. }));
        assert!(matches!(events[1], ExecutionEvent::RunFinished { output_records: 2, .. }));
    }

    #[test]
    fn failed_validation_is_reported_and_leaves_no_partial_update() {
        let observer = Arc::new(RecordingObserver::default());
        let engine = ExecutionEngine::new().with_observer(observer.clone());
        let request = Request::Update(UpdateRequest::Condition {
            group: ConditionGroup::new(
                vec![Condition::new("nonExistentField", Operator::Equals, "x")],
                ConditionLogic::And,
                false,
            ),
            updates: vec![FieldUpdate::new("salary", "1")],
        });

        let err = engine.run(staff(), request).unwrap_err();
        assert_eq!(err.operation, "update");
        assert!(matches!(err.source, CrudError::MissingConditionField { .. }));
        assert!(err.to_string().starts_with("update: Condition field \"nonExistentField\""));

        let events = observer.events.lock().unwrap();
        assert!(matches!(&events[1], ExecutionEvent::RunFailed { operation, .. } if operation == "update"));

        let snap = engine.metrics().snapshot();
        assert_eq!(snap.runs, 1);
        assert_eq!(snap.failures, 1);
        assert_eq!(snap.records_out, 0);
    }

    #[test]
    fn unknown_operation_keeps_raw_selector() {
        let engine = ExecutionEngine::new();
        let params = OperationParams {
            operation: "merge".into(),
            ..Default::default()
        };
        let err = engine.execute(staff(), &params).unwrap_err();
        assert_eq!(err.operation, "merge");
        assert_eq!(err.message(), "Unsupported operation: merge");
        assert_eq!(engine.metrics().snapshot().failures, 1);
    }

    #[test]
    fn metrics_accumulate_across_runs() {
        let engine = ExecutionEngine::new();
        let metrics = engine.metrics();
        let stats = OperationParams {
            operation: "statistics".into(),
            stats_field: "salary".into(),
            group_by_field: "department".into(),
            ..Default::default()
        };
        engine.execute(staff(), &stats).unwrap();
        engine.execute(staff(), &OperationParams::default()).unwrap();

        let snap = metrics.snapshot();
        assert_eq!(snap.runs, 2);
        assert_eq!(snap.records_in, 4);
        assert_eq!(snap.records_out, 4);
        assert!(snap.last_elapsed.is_some());
        assert!(snap.to_string().starts_with("runs=2, failures=0"));
    }
}
