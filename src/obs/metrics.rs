// self
use crate::{
	_prelude::*,
	obs::{FlowKind, FlowOutcome},
};

/// Counter incremented for every attempt, success, and failure, labeled by `flow` + `outcome`.
pub const FLOW_TOTAL: &str = "oauth2_lite_flow_total";
/// Counter incremented for every failure, labeled by `flow` + `error` (see [`Error::class`]).
pub const FLOW_ERRORS_TOTAL: &str = "oauth2_lite_flow_errors_total";

/// Records a flow outcome via the global metrics recorder (when enabled).
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	metrics::counter!(FLOW_TOTAL, "flow" => kind.as_str(), "outcome" => outcome.as_str())
		.increment(1);
	#[cfg(not(feature = "metrics"))]
	let _ = (kind, outcome);
}

/// Records how an operation finished; failures also bump [`FLOW_ERRORS_TOTAL`].
pub fn record_flow_result<T>(kind: FlowKind, result: &Result<T>) {
	let Err(e) = result else {
		record_flow_outcome(kind, FlowOutcome::Success);

		return;
	};

	record_flow_outcome(kind, FlowOutcome::Failure);

	#[cfg(feature = "metrics")]
	metrics::counter!(FLOW_ERRORS_TOTAL, "flow" => kind.as_str(), "error" => e.class())
		.increment(1);
	#[cfg(not(feature = "metrics"))]
	let _ = e;
}
