use bitstream::{BitReader, BitWriter};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Bool(bool),
    Bits { bits: usize, value: u64 },
    Align,
    U8(u8),
    U32(u32),
    F32(u32),
    VarU32(u32),
    Bytes(Vec<u8>),
}

fn mask_value(bits: usize, value: u64) -> u64 {
    if bits >= 64 {
        value
    } else {
        value & ((1u64 << bits) - 1)
    }
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<bool>().prop_map(Op::Bool),
        (1usize..=64, any::<u64>()).prop_map(|(bits, value)| Op::Bits {
            bits,
            value: mask_value(bits, value),
        }),
        Just(Op::Align),
        any::<u8>().prop_map(Op::U8),
        any::<u32>().prop_map(Op::U32),
        // Carry f32 payloads as bit patterns so NaN compares exactly.
        any::<u32>().prop_map(Op::F32),
        any::<u32>().prop_map(Op::VarU32),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(Op::Bytes),
    ]
}

proptest! {
    #[test]
    fn prop_roundtrip_ops(ops in prop::collection::vec(op_strategy(), 1..64)) {
        let mut writer = BitWriter::new();

        for op in &ops {
            match op {
                Op::Bool(b) => writer.write_bool(*b),
                Op::Bits { bits, value } => writer.write_bits(*value, *bits).unwrap(),
                Op::Align => writer.align_to_byte(),
                Op::U8(v) => {
                    writer.align_to_byte();
                    writer.write_u8_aligned(*v).unwrap();
                }
                Op::U32(v) => {
                    writer.align_to_byte();
                    writer.write_u32_aligned(*v).unwrap();
                }
                Op::F32(bits) => {
                    writer.align_to_byte();
                    writer.write_f32_aligned(f32::from_bits(*bits)).unwrap();
                }
                Op::VarU32(v) => {
                    writer.align_to_byte();
                    writer.write_varu32(*v).unwrap();
                }
                Op::Bytes(b) => {
                    writer.align_to_byte();
                    writer.write_bytes_aligned(b).unwrap();
                }
            }
        }

        let bytes = writer.finish();
        let mut reader = BitReader::new(&bytes);

        for op in &ops {
            match op {
                Op::Bool(b) => prop_assert_eq!(reader.read_bool().unwrap(), *b),
                Op::Bits { bits, value } => {
                    prop_assert_eq!(reader.read_bits(*bits).unwrap(), *value);
                }
                Op::Align => reader.align_to_byte().unwrap(),
                Op::U8(v) => {
                    reader.align_to_byte().unwrap();
                    prop_assert_eq!(reader.read_u8_aligned().unwrap(), *v);
                }
                Op::U32(v) => {
                    reader.align_to_byte().unwrap();
                    prop_assert_eq!(reader.read_u32_aligned().unwrap(), *v);
                }
                Op::F32(bits) => {
                    reader.align_to_byte().unwrap();
                    prop_assert_eq!(reader.read_f32_aligned().unwrap().to_bits(), *bits);
                }
                Op::VarU32(v) => {
                    reader.align_to_byte().unwrap();
                    prop_assert_eq!(reader.read_varu32().unwrap(), *v);
                }
                Op::Bytes(b) => {
                    reader.align_to_byte().unwrap();
                    prop_assert_eq!(reader.read_bytes_aligned(b.len()).unwrap(), b.as_slice());
                }
            }
        }
    }

    #[test]
    fn prop_varu32_never_exceeds_five_bytes(value in any::<u32>()) {
        let mut writer = BitWriter::new();
        writer.write_varu32(value).unwrap();
        let bytes = writer.finish();
        prop_assert!(bytes.len() <= bitstream::VARU32_MAX_BYTES);
        prop_assert_eq!(bytes.len(), bitstream::varu32_len(value));
    }
}
