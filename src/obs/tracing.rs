// self
use crate::{_prelude::*, client::ServiceAddress, obs::OperationKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOperation<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOperation<F> = F;

/// A span builder used by facade operations.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Creates a new span tagged with the provided operation kind + stage.
	///
	/// The `app_id`, `service`, `service_version` and `instance_id` fields start empty and are
	/// filled by [`Self::with_app`] and [`Self::with_service`].
	pub fn new(kind: OperationKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"elements_sdk.operation",
				operation = kind.as_str(),
				stage,
				app_id = tracing::field::Empty,
				service = tracing::field::Empty,
				service_version = tracing::field::Empty,
				instance_id = tracing::field::Empty,
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Tags the span with the app the operation runs for.
	pub fn with_app(self, app_id: &str) -> Self {
		#[cfg(feature = "tracing")]
		self.span.record("app_id", app_id);
		#[cfg(not(feature = "tracing"))]
		let _ = app_id;

		self
	}

	/// Tags the span with the service instance a request targets.
	pub fn with_service(self, address: &ServiceAddress) -> Self {
		#[cfg(feature = "tracing")]
		{
			self.span.record("service", address.service_name.as_str());
			self.span.record("service_version", address.service_version.as_str());
			self.span.record("instance_id", address.instance_id.as_str());
		}
		#[cfg(not(feature = "tracing"))]
		let _ = address;

		self
	}

	/// Enters the span for synchronous sections.
	pub fn entered(self) -> OperationSpanGuard {
		#[cfg(feature = "tracing")]
		{
			OperationSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			OperationSpanGuard {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOperation<Fut>
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
}

/// RAII guard returned by [`OperationSpan::entered`].
pub struct OperationSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for OperationSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("OperationSpanGuard(..)")
	}
}
