//! Per-call conversion statistics.



//		Modules																											

#[cfg(test)]
#[path = "tests/stats.rs"]
mod tests;



//		Packages																										

use crate::except::ExceptionKind;
use serde::{Deserialize, Serialize};



//		Enums																											

//		Traversal																
/// The order in which the buffer walker visits elements.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Traversal {
	/// From the first element to the last.
	#[default]
	Forward,
	
	/// From the last element to the first, used when destination elements are
	/// wider than source elements sharing the same buffer.
	Backward,
}



//		Traits																											

//		StatsSink																
/// Receives the statistics of each conversion call when it finishes.
///
/// Closures taking a [`&ConversionStats`](ConversionStats) are sinks.
///
pub trait StatsSink {
	//		record																
	/// Called once per call, after the last element or on abort.
	fn record(&mut self, stats: &ConversionStats);
}

//󰭅		StatsSink for FnMut														
impl<F> StatsSink for F
where
	F: FnMut(&ConversionStats),
{
	//		record																
	fn record(&mut self, stats: &ConversionStats) {
		self(stats);
	}
}



//		Structs																											

//		ConversionStats															
/// What happened during one bulk conversion call.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ConversionStats {
	/// Elements fully processed, including those resolved by the handler.
	pub elements:       usize,
	
	/// Elements written through the scratch element.
	pub staged:         usize,
	
	/// Elements written straight into the buffer.
	pub direct:         usize,
	
	/// Direction the buffer was walked in.
	pub traversal:      Traversal,
	
	/// Number of leading (forward) or trailing (backward) elements that had
	/// to be staged.
	pub overlap:        usize,
	
	/// Occurrences of [`ExceptionKind::RangeHigh`].
	pub range_high:     usize,
	
	/// Occurrences of [`ExceptionKind::RangeLow`].
	pub range_low:      usize,
	
	/// Occurrences of [`ExceptionKind::Infinity`].
	pub infinity:       usize,
	
	/// Occurrences of [`ExceptionKind::NaN`].
	pub nan:            usize,
	
	/// Occurrences of [`ExceptionKind::PrecisionLoss`].
	pub precision_loss: usize,
	
	/// Exceptions the handler resolved itself.
	pub handled:        usize,
}

//󰭅		ConversionStats															
impl ConversionStats {
	//		exceptions															
	/// Total exceptions met, whether or not a handler was installed.
	#[must_use]
	pub const fn exceptions(&self) -> usize {
		self.range_high + self.range_low + self.infinity + self.nan + self.precision_loss
	}
	
	//		record_exception													
	pub(crate) fn record_exception(&mut self, kind: ExceptionKind) {
		match kind {
			ExceptionKind::RangeHigh       => self.range_high     += 1,
			ExceptionKind::RangeLow        => self.range_low      += 1,
			ExceptionKind::Infinity { .. } => self.infinity       += 1,
			ExceptionKind::NaN             => self.nan            += 1,
			ExceptionKind::PrecisionLoss   => self.precision_loss += 1,
		}
	}
}
