//		Packages

use super::*;
use claims::{assert_err_eq, assert_ok};
use rubedo::sugar::s;
use serde_json::json;



//		Functions

//		f32_layout																
fn f32_layout() -> FloatLayout {
	*AtomicType::ieee_f32(ByteOrder::LittleEndian).float_layout().unwrap()
}



//		Tests

mod constructors {
	use super::*;
	
	//		presets																
	#[test]
	fn presets__valid() {
		for ty in [
			AtomicType::signed(1, ByteOrder::LittleEndian),
			AtomicType::unsigned(64, ByteOrder::BigEndian),
			AtomicType::ieee_f16(ByteOrder::LittleEndian),
			AtomicType::ieee_f32(ByteOrder::BigEndian),
			AtomicType::ieee_f64(ByteOrder::LittleEndian),
			AtomicType::x87_f80(ByteOrder::LittleEndian),
			AtomicType::vax_f32(),
			AtomicType::vax_f64(),
		] {
			assert_ok!(ty.validate());
		}
	}
	#[test]
	fn presets__sizes() {
		assert_eq!(AtomicType::signed(3, ByteOrder::LittleEndian).size(), 3);
		assert_eq!(AtomicType::ieee_f16(ByteOrder::LittleEndian).size(),  2);
		assert_eq!(AtomicType::x87_f80(ByteOrder::LittleEndian).size(),   16);
		assert_eq!(AtomicType::vax_f64().size(),                          8);
	}
	#[test]
	fn presets__kinds() {
		let int = AtomicType::signed(4, ByteOrder::LittleEndian);
		assert!( int.is_signed());
		assert!(!int.is_float());
		assert_eq!(int.float_layout(), None);
		
		let float = AtomicType::ieee_f64(ByteOrder::LittleEndian);
		assert!(!float.is_signed());
		assert!( float.is_float());
		assert_eq!(float.float_layout().unwrap().exponent_bias, 1023);
		
		assert!(!AtomicType::unsigned(4, ByteOrder::LittleEndian).is_signed());
	}
}

mod builders {
	use super::*;
	
	//		with_order															
	#[test]
	fn with_order__changes_only_order() {
		let ty = AtomicType::ieee_f32(ByteOrder::LittleEndian).with_order(ByteOrder::BigEndian);
		assert_eq!(ty, AtomicType::ieee_f32(ByteOrder::BigEndian));
	}
	
	//		with_offset															
	#[test]
	fn with_offset__and_precision() {
		let ty = AtomicType::unsigned(2, ByteOrder::LittleEndian).with_offset(4).with_precision(8);
		assert_eq!(ty.bit_offset, 4);
		assert_eq!(ty.precision,  8);
		assert_eq!(ty.total_bits, 16);
		assert_ok!(ty.validate());
	}
	
	//		with_padding														
	#[test]
	fn with_padding__sets_both() {
		let ty = AtomicType::unsigned(2, ByteOrder::LittleEndian).with_padding(Pad::One, Pad::Zero);
		assert_eq!(ty.lsb_pad, Pad::One);
		assert_eq!(ty.msb_pad, Pad::Zero);
	}
}

mod layout {
	use super::*;
	
	//		exponent_max														
	#[test]
	fn exponent_max__common() {
		assert_eq!(f32_layout().exponent_max(), 255);
	}
	#[test]
	fn exponent_max__widest() {
		let layout = FloatLayout { exponent_size: MAX_EXPONENT_BITS, ..f32_layout() };
		assert_eq!(layout.exponent_max(), i64::MAX);
	}
	#[test]
	fn exponent_max__const() {
		const HALF: i64 = FloatLayout {
			sign_bit:      15,
			exponent_pos:  10,
			exponent_size: 5,
			exponent_bias: 15,
			mantissa_pos:  0,
			mantissa_size: 10,
			normalization: Normalization::Implied,
		}.exponent_max();
		assert_eq!(HALF, 31);
	}
	#[test]
	fn exponent_max__clamped() {
		let layout = FloatLayout { exponent_size: MAX_EXPONENT_BITS + 8, ..f32_layout() };
		assert_eq!(layout.exponent_max(), i64::MAX);
	}
	
	//		fraction_bits														
	#[test]
	fn fraction_bits__implied() {
		assert_eq!(f32_layout().fraction_bits(), 23);
	}
	#[test]
	fn fraction_bits__explicit() {
		let ty = AtomicType::x87_f80(ByteOrder::LittleEndian);
		assert_eq!(ty.float_layout().unwrap().fraction_bits(), 63);
	}
}

mod validate {
	use super::*;
	
	//		storage																
	#[test]
	fn validate__zero_size() {
		let ty = AtomicType::signed(0, ByteOrder::LittleEndian);
		assert_err_eq!(ty.validate(), DescriptorError::ZeroSize);
	}
	#[test]
	fn validate__not_byte_aligned() {
		let ty = AtomicType { total_bits: 12, ..AtomicType::signed(2, ByteOrder::LittleEndian) };
		assert_err_eq!(ty.validate(), DescriptorError::SizeNotByteAligned(12));
		assert_eq!(ty.validate().unwrap_err().to_string(), s!("Size of 12 bits is not a whole number of bytes"));
	}
	#[test]
	fn validate__too_large() {
		let ty = AtomicType::unsigned(65, ByteOrder::LittleEndian);
		assert_err_eq!(ty.validate(), DescriptorError::TooLarge(65));
		assert_eq!(ty.validate().unwrap_err().to_string(), s!("Size of 65 bytes exceeds the 64-byte limit"));
	}
	#[test]
	fn validate__largest() {
		assert_ok!(AtomicType::unsigned(64, ByteOrder::LittleEndian).validate());
	}
	
	//		precision															
	#[test]
	fn validate__zero_precision() {
		let ty = AtomicType::signed(4, ByteOrder::LittleEndian).with_precision(0);
		assert_err_eq!(ty.validate(), DescriptorError::ZeroPrecision);
	}
	#[test]
	fn validate__precision_out_of_range() {
		let ty = AtomicType::signed(2, ByteOrder::LittleEndian).with_offset(4);
		assert_err_eq!(ty.validate(), DescriptorError::PrecisionOutOfRange { offset: 4, precision: 16, total: 16 });
		assert_eq!(ty.validate().unwrap_err().to_string(), s!("Precision 16 at offset 4 exceeds 16 bits"));
	}
	
	//		byte_order															
	#[test]
	fn validate__vax_integer() {
		let ty = AtomicType::signed(4, ByteOrder::VaxOrdered);
		assert_err_eq!(ty.validate(), DescriptorError::UnsupportedByteOrder);
	}
	#[test]
	fn validate__vax_odd_size() {
		let ty = AtomicType::float(3, ByteOrder::VaxOrdered, FloatLayout {
			sign_bit:      23,
			exponent_pos:  16,
			exponent_size: 7,
			exponent_bias: 63,
			mantissa_pos:  0,
			mantissa_size: 16,
			normalization: Normalization::Implied,
		});
		assert_err_eq!(ty.validate(), DescriptorError::UnsupportedByteOrder);
		assert_ok!(ty.with_order(ByteOrder::LittleEndian).validate());
	}
	#[test]
	fn validate__vax_six_bytes() {
		let ty = AtomicType::float(6, ByteOrder::VaxOrdered, FloatLayout {
			sign_bit:      47,
			exponent_pos:  36,
			exponent_size: 11,
			exponent_bias: 1023,
			mantissa_pos:  0,
			mantissa_size: 36,
			normalization: Normalization::Implied,
		});
		assert_err_eq!(ty.validate(), DescriptorError::UnsupportedByteOrder);
		assert_ok!(ty.with_order(ByteOrder::BigEndian).validate());
	}
	
	//		float_fields														
	#[test]
	fn validate__exponent_empty() {
		let ty = AtomicType::float(4, ByteOrder::LittleEndian, FloatLayout { exponent_size: 0, ..f32_layout() });
		assert_err_eq!(ty.validate(), DescriptorError::ExponentTooWide(0));
	}
	#[test]
	fn validate__exponent_too_wide() {
		let ty = AtomicType::float(16, ByteOrder::LittleEndian, FloatLayout {
			sign_bit:      127,
			exponent_pos:  63,
			exponent_size: 64,
			exponent_bias: 1,
			mantissa_pos:  0,
			mantissa_size: 63,
			normalization: Normalization::Implied,
		});
		assert_err_eq!(ty.validate(), DescriptorError::ExponentTooWide(64));
		assert_eq!(ty.validate().unwrap_err().to_string(), s!("Exponent field width 64 is not between 1 and 63 bits"));
	}
	#[test]
	fn validate__empty_mantissa() {
		let ty = AtomicType::float(4, ByteOrder::LittleEndian, FloatLayout { mantissa_size: 0, ..f32_layout() });
		assert_err_eq!(ty.validate(), DescriptorError::EmptyMantissa);
	}
	#[test]
	fn validate__field_out_of_range() {
		let ty = AtomicType::float(4, ByteOrder::LittleEndian, FloatLayout { sign_bit: 32, ..f32_layout() });
		assert_err_eq!(ty.validate(), DescriptorError::FieldOutOfRange("sign"));
		assert_eq!(ty.validate().unwrap_err().to_string(), s!("The sign field lies outside the significant bits"));
	}
	#[test]
	fn validate__field_below_offset() {
		let ty = AtomicType::float(4, ByteOrder::LittleEndian, f32_layout()).with_offset(1).with_precision(31);
		assert_err_eq!(ty.validate(), DescriptorError::FieldOutOfRange("mantissa"));
	}
	#[test]
	fn validate__fields_overlap() {
		let ty = AtomicType::float(4, ByteOrder::LittleEndian, FloatLayout { exponent_pos: 22, ..f32_layout() });
		assert_err_eq!(ty.validate(), DescriptorError::FieldsOverlap);
	}
	#[test]
	fn validate__fields_do_not_span() {
		let ty = AtomicType::float(4, ByteOrder::LittleEndian, FloatLayout { mantissa_size: 22, ..f32_layout() });
		assert_err_eq!(ty.validate(), DescriptorError::FieldsDoNotSpanPrecision { fields: 31, precision: 32 });
		assert_eq!(ty.validate().unwrap_err().to_string(), s!("Fields span 31 bits but precision is 32"));
	}
}

mod padding {
	use super::*;
	
	//		fill_padding														
	#[test]
	fn fill_padding__ones() {
		let ty      = AtomicType::unsigned(2, ByteOrder::LittleEndian)
			.with_offset(4)
			.with_precision(8)
			.with_padding(Pad::One, Pad::One);
		let mut buf = [0x00_u8, 0x00];
		ty.fill_padding(&mut buf);
		assert_eq!(buf, [0x0F, 0xF0]);
	}
	#[test]
	fn fill_padding__zeros() {
		let ty      = AtomicType::unsigned(2, ByteOrder::LittleEndian).with_offset(4).with_precision(8);
		let mut buf = [0xFF_u8, 0xFF];
		ty.fill_padding(&mut buf);
		assert_eq!(buf, [0xF0, 0x0F]);
	}
	#[test]
	fn fill_padding__none() {
		let ty      = AtomicType::unsigned(2, ByteOrder::LittleEndian).with_padding(Pad::One, Pad::One);
		let mut buf = [0x12_u8, 0x34];
		ty.fill_padding(&mut buf);
		assert_eq!(buf, [0x12, 0x34]);
	}
}

mod serialization {
	use super::*;
	
	//		serialize															
	#[test]
	fn serialize__enums() {
		assert_eq!(serde_json::to_value(ByteOrder::VaxOrdered).unwrap(),  json!("vax_ordered"));
		assert_eq!(serde_json::to_value(Normalization::None).unwrap(),    json!("none"));
		assert_eq!(serde_json::to_value(Pad::One).unwrap(),               json!("one"));
		assert_eq!(serde_json::to_value(TypeKind::IntegerUnsigned).unwrap(), json!("integer_unsigned"));
	}
	#[test]
	fn serialize__float_kind() {
		let value = serde_json::to_value(AtomicType::ieee_f16(ByteOrder::BigEndian)).unwrap();
		assert_eq!(value["byte_order"],                         json!("big_endian"));
		assert_eq!(value["kind"]["float"]["exponent_bias"],     json!(15));
		assert_eq!(value["kind"]["float"]["normalization"],     json!("implied"));
	}
	
	//		deserialize															
	#[test]
	fn deserialize__round_trip() {
		let ty   = AtomicType::x87_f80(ByteOrder::BigEndian).with_padding(Pad::Zero, Pad::One);
		let json = serde_json::to_string(&ty).unwrap();
		assert_eq!(serde_json::from_str::<AtomicType>(&json).unwrap(), ty);
	}
	#[test]
	fn deserialize__custom_float() {
		let json = json!({
			"total_bits": 24,
			"byte_order": "little_endian",
			"bit_offset": 0,
			"precision":  24,
			"lsb_pad":    "zero",
			"msb_pad":    "zero",
			"kind":       { "float": {
				"sign_bit":      23,
				"exponent_pos":  16,
				"exponent_size": 7,
				"exponent_bias": 63,
				"mantissa_pos":  0,
				"mantissa_size": 16,
				"normalization": "implied",
			} },
		});
		let ty: AtomicType = serde_json::from_value(json).unwrap();
		assert_ok!(ty.validate());
		assert_eq!(ty.size(), 3);
		assert_eq!(ty.float_layout().unwrap().mantissa_size, 16);
	}
}
