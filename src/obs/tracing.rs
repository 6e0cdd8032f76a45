// self
use crate::{_prelude::*, obs::FlowKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// Span wrapper for client operations.
///
/// The span carries `flow` and `stage` from creation; `http_status` stays empty until the
/// token endpoint answers with a status the client rejects.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Creates a new span tagged with the provided flow kind + stage.
	pub fn new(kind: FlowKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"oauth2_lite.flow",
				flow = kind.as_str(),
				stage,
				http_status = tracing::field::Empty
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Enters the span for synchronous sections.
	pub fn entered(&self) -> FlowSpanGuard<'_> {
		#[cfg(feature = "tracing")]
		{
			FlowSpanGuard { guard: self.span.enter() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			FlowSpanGuard { _span: std::marker::PhantomData }
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}

	/// Records the operation's failure on the span; secrets never reach the event.
	pub fn record_failure(&self, err: &Error) {
		#[cfg(feature = "tracing")]
		{
			if let Some(status) = err.status() {
				self.span.record("http_status", status);
			}

			tracing::debug!(parent: &self.span, error = %err, "operation failed");
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = err;
		}
	}
}

/// RAII guard returned by [`FlowSpan::entered`].
pub struct FlowSpanGuard<'a> {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::Entered<'a>,
	#[cfg(not(feature = "tracing"))]
	_span: std::marker::PhantomData<&'a FlowSpan>,
}
impl Debug for FlowSpanGuard<'_> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("FlowSpanGuard(..)")
	}
}
