//		Packages

use super::*;
use crate::{ByteOrder, Disposition, ExceptionKind, Pad, except::Resolution};
use claims::{assert_err_eq, assert_ok};



//		Functions

//		copy_low																
/// Copies as many low-order bytes as fit, zero-extending.
fn copy_low(s: &[u8], d: &mut [u8], _exceptions: &mut Exceptions<'_, '_>) -> Result<Outcome, ConversionError> {
	d.fill(0);
	let n = s.len().min(d.len());
	d[..n].copy_from_slice(&s[..n]);
	Ok(Outcome::Converted)
}

//		indices																	
fn indices(plan: &Plan) -> Vec<usize> {
	plan.slots().map(|slot| slot.index).collect()
}

//		staged																	
fn staged(plan: &Plan) -> Vec<usize> {
	plan.slots().filter(|slot| slot.staged).map(|slot| slot.index).collect()
}



//		Tests

mod plan {
	use super::*;
	
	//		new																	
	#[test]
	fn new__same_size() {
		let plan = Plan::new(4, 4, 10, None, 40).unwrap();
		assert_eq!(plan.traversal, Traversal::Forward);
		assert_eq!(plan.overlap,   10);
	}
	#[test]
	fn new__narrowing() {
		let plan = Plan::new(4, 2, 1000, None, 4000).unwrap();
		assert_eq!(plan.traversal, Traversal::Forward);
		assert_eq!(plan.overlap,   1);
		assert_eq!(staged(&plan),  vec![0]);
	}
	#[test]
	fn new__narrowing_uneven() {
		let plan = Plan::new(8, 5, 10, None, 80).unwrap();
		assert_eq!(plan.overlap,  2);
		assert_eq!(staged(&plan), vec![0, 1]);
	}
	#[test]
	fn new__widening() {
		let plan = Plan::new(2, 4, 5, None, 20).unwrap();
		assert_eq!(plan.traversal, Traversal::Backward);
		assert_eq!(plan.overlap,   1);
		assert_eq!(indices(&plan), vec![4, 3, 2, 1, 0]);
		assert_eq!(staged(&plan),  vec![0]);
	}
	#[test]
	fn new__widening_by_one_byte() {
		let plan = Plan::new(3, 4, 10, None, 40).unwrap();
		assert_eq!(plan.traversal, Traversal::Backward);
		assert_eq!(plan.overlap,   3);
		assert_eq!(staged(&plan),  vec![2, 1, 0]);
	}
	#[test]
	fn new__stride() {
		let plan = Plan::new(2, 4, 3, Some(8), 20).unwrap();
		assert_eq!(plan.traversal, Traversal::Forward);
		assert_eq!(plan.overlap,   3);
		assert_eq!(plan.slot(2),   Slot { index: 2, src: 16, dst: 16, staged: true });
	}
	#[test]
	fn new__no_elements() {
		let plan = Plan::new(2, 8, 0, None, 0).unwrap();
		assert_eq!(indices(&plan), Vec::<usize>::new());
	}
	#[test]
	fn new__stride_too_small() {
		assert_err_eq!(Plan::new(2, 4, 3, Some(3), 100), ConversionError::InvalidStride { stride: 3, element_size: 4 });
	}
	#[test]
	fn new__buffer_too_small() {
		assert_err_eq!(Plan::new(4, 4, 3, None, 11), ConversionError::BufferTooSmall { required: 12, actual: 11 });
		assert_err_eq!(Plan::new(2, 4, 3, None, 11), ConversionError::BufferTooSmall { required: 12, actual: 11 });
		assert_ok!(Plan::new(2, 4, 3, None, 12));
	}
	#[test]
	fn new__buffer_too_small_with_stride() {
		//	The last element only needs its own width.
		assert_ok!(Plan::new(2, 4, 3, Some(8), 20));
		assert_err_eq!(Plan::new(2, 4, 3, Some(8), 19), ConversionError::BufferTooSmall { required: 20, actual: 19 });
	}
	#[test]
	fn new__required_overflows() {
		assert_err_eq!(
			Plan::new(4, 4, usize::MAX, None, 64),
			ConversionError::BufferTooSmall { required: usize::MAX, actual: 64 },
		);
	}
	
	//		split																
	#[test]
	fn split__widening_forward() {
		let plan = Plan::split(2, 4, 5, None, 10, 20).unwrap();
		assert_eq!(plan.traversal, Traversal::Forward);
		assert_eq!(plan.overlap,   0);
		assert_eq!(indices(&plan), vec![0, 1, 2, 3, 4]);
		assert_eq!(staged(&plan),  Vec::<usize>::new());
	}
	#[test]
	fn split__lengths_checked_separately() {
		assert_ok!(Plan::split(4, 2, 3, None, 12, 6));
		assert_err_eq!(Plan::split(4, 2, 3, None, 11, 100), ConversionError::BufferTooSmall { required: 12, actual: 11 });
		assert_err_eq!(Plan::split(4, 2, 3, None, 100, 5),  ConversionError::BufferTooSmall { required: 6,  actual: 5 });
	}
	#[test]
	fn split__stride() {
		assert_ok!(Plan::split(2, 4, 3, Some(8), 18, 20));
		assert_err_eq!(Plan::split(2, 4, 3, Some(8), 18, 19), ConversionError::BufferTooSmall { required: 20, actual: 19 });
		assert_err_eq!(Plan::split(2, 4, 3, Some(3), 100, 100), ConversionError::InvalidStride { stride: 3, element_size: 4 });
	}
	
	//		slot																
	#[test]
	fn slot__offsets() {
		let plan = Plan::new(4, 2, 4, None, 16).unwrap();
		assert_eq!(plan.slot(0), Slot { index: 0, src: 0,  dst: 0, staged: true });
		assert_eq!(plan.slot(3), Slot { index: 3, src: 12, dst: 6, staged: false });
	}
}

mod walk {
	use super::*;
	
	//		walk																
	#[test]
	fn walk__widening_in_place() {
		let src       = AtomicType::unsigned(1, ByteOrder::LittleEndian);
		let dst       = AtomicType::unsigned(2, ByteOrder::LittleEndian);
		let mut buf   = [1_u8, 2, 3, 4, 0, 0, 0, 0];
		let mut stats = ConversionStats::default();
		assert_ok!(walk(&src, &dst, Buffers::Shared(&mut buf), 4, None, None, &mut stats, copy_low));
		assert_eq!(buf,             [1, 0, 2, 0, 3, 0, 4, 0]);
		assert_eq!(stats.elements,  4);
		assert_eq!(stats.staged,    1);
		assert_eq!(stats.direct,    3);
		assert_eq!(stats.traversal, Traversal::Backward);
		assert_eq!(stats.overlap,   1);
	}
	#[test]
	fn walk__narrowing_in_place() {
		let src       = AtomicType::unsigned(2, ByteOrder::LittleEndian);
		let dst       = AtomicType::unsigned(1, ByteOrder::LittleEndian);
		let mut buf   = [1_u8, 0, 2, 0, 3, 0, 4, 0];
		let mut stats = ConversionStats::default();
		assert_ok!(walk(&src, &dst, Buffers::Shared(&mut buf), 4, None, None, &mut stats, copy_low));
		assert_eq!(&buf[..4],       &[1, 2, 3, 4]);
		assert_eq!(stats.traversal, Traversal::Forward);
		assert_eq!(stats.staged,    1);
		assert_eq!(stats.direct,    3);
	}
	#[test]
	fn walk__byte_order_and_padding() {
		let src       = AtomicType::unsigned(2, ByteOrder::BigEndian);
		let dst       = AtomicType::unsigned(4, ByteOrder::BigEndian)
			.with_precision(16)
			.with_padding(Pad::Zero, Pad::One);
		let mut buf   = [0x12_u8, 0x34, 0, 0];
		let mut stats = ConversionStats::default();
		assert_ok!(walk(&src, &dst, Buffers::Shared(&mut buf), 1, None, None, &mut stats, copy_low));
		assert_eq!(buf, [0xFF, 0xFF, 0x12, 0x34]);
	}
	#[test]
	fn walk__handled_left_alone() {
		let src       = AtomicType::unsigned(2, ByteOrder::LittleEndian);
		let dst       = AtomicType::unsigned(2, ByteOrder::BigEndian).with_precision(8).with_padding(Pad::One, Pad::One);
		let mut buf   = [0x01_u8, 0x02];
		let mut stats = ConversionStats::default();
		let result    = walk(&src, &dst, Buffers::Shared(&mut buf), 1, None, None, &mut stats, |_s, d, _ex| {
			d.copy_from_slice(&[0xAA, 0xBB]);
			Ok(Outcome::Handled)
		});
		assert_ok!(result);
		assert_eq!(buf,            [0xAA, 0xBB]);
		assert_eq!(stats.elements, 1);
	}
	#[test]
	fn walk__raw_source_for_handler() {
		let src         = AtomicType::unsigned(2, ByteOrder::BigEndian);
		let dst         = AtomicType::unsigned(2, ByteOrder::LittleEndian);
		let mut buf     = [0x01_u8, 0x2C];
		let mut stats   = ConversionStats::default();
		let mut seen    = Vec::new();
		let mut handler = |_kind: ExceptionKind, src: &[u8], _dst: &mut [u8]| {
			seen.push(src.to_vec());
			Disposition::Unhandled
		};
		let result = walk(&src, &dst, Buffers::Shared(&mut buf), 1, None, Some(&mut handler), &mut stats, |s, d, ex| {
			assert_eq!(s, &[0x2C, 0x01]);
			assert_eq!(ex.raise(ExceptionKind::RangeHigh, d)?, Resolution::Default);
			copy_low(s, d, ex)
		});
		assert_ok!(result);
		assert_eq!(seen,             vec![vec![0x01, 0x2C]]);
		assert_eq!(stats.range_high, 1);
		assert_eq!(buf,              [0x2C, 0x01]);
	}
	#[test]
	fn walk__stops_on_error() {
		let ty        = AtomicType::unsigned(1, ByteOrder::LittleEndian);
		let mut buf   = [1_u8, 2, 3, 4];
		let mut stats = ConversionStats::default();
		let result    = walk(&ty, &ty, Buffers::Shared(&mut buf), 4, None, None, &mut stats, |s, d, ex| {
			if s[0] == 3 {
				return Err(ConversionError::ConversionAborted { element: ex.element, kind: ExceptionKind::NaN });
			}
			d[0] = s[0] * 10;
			Ok(Outcome::Converted)
		});
		assert_err_eq!(result, ConversionError::ConversionAborted { element: 2, kind: ExceptionKind::NaN });
		assert_eq!(buf,            [10, 20, 3, 4]);
		assert_eq!(stats.elements, 2);
	}
	#[test]
	fn walk__invalid_layout_untouched() {
		let ty        = AtomicType::unsigned(2, ByteOrder::LittleEndian);
		let mut buf   = [1_u8, 2, 3];
		let mut stats = ConversionStats::default();
		assert_err_eq!(
			walk(&ty, &ty, Buffers::Shared(&mut buf), 2, None, None, &mut stats, copy_low),
			ConversionError::BufferTooSmall { required: 4, actual: 3 },
		);
		assert_eq!(buf,            [1, 2, 3]);
		assert_eq!(stats.elements, 0);
	}
	#[test]
	fn walk__separate_buffers() {
		let src       = AtomicType::unsigned(1, ByteOrder::LittleEndian);
		let dst       = AtomicType::unsigned(2, ByteOrder::BigEndian);
		let input     = [1_u8, 2, 3, 4];
		let mut out   = [0xAA_u8; 8];
		let mut order = Vec::new();
		let mut stats = ConversionStats::default();
		let buffers   = Buffers::Split { src: &input, dst: &mut out };
		assert_ok!(walk(&src, &dst, buffers, 4, None, None, &mut stats, |s, d, ex| {
			order.push(ex.element);
			copy_low(s, d, ex)
		}));
		assert_eq!(out,             [0, 1, 0, 2, 0, 3, 0, 4]);
		assert_eq!(input,           [1, 2, 3, 4]);
		assert_eq!(order,           vec![0, 1, 2, 3]);
		assert_eq!(stats.traversal, Traversal::Forward);
		assert_eq!(stats.staged,    0);
		assert_eq!(stats.direct,    4);
	}
}
