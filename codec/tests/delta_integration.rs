use codec::{
    apply_delta, encode_delta, encode_delta_with_scratch, CodecLimits, DeltaConfig, DeltaScratch,
    Snapshot,
};

fn limits() -> CodecLimits {
    CodecLimits::for_testing()
}

#[test]
fn boolean_flip_and_float_change_golden_bytes() {
    let baseline = Snapshot {
        booleans: vec![true, false],
        integers: vec![5, 9],
        floats: vec![1.0],
    };
    let current = Snapshot {
        booleans: vec![true, true],
        integers: vec![5, 9],
        floats: vec![2.0],
    };

    let bytes = encode_delta(&baseline, &current, &DeltaConfig::default(), &limits()).unwrap();

    // Counts 2, 2, 1; mask [1,1,0,0,1] packed LSB-first = 0x13 with a
    // one-byte length prefix; the only payload is the float 2.0. Both
    // integers are unchanged and cost nothing beyond their mask bits.
    let mut expected = vec![0x02, 0x02, 0x01, 0x01, 0b0001_0011];
    expected.extend_from_slice(&2.0f32.to_le_bytes());
    assert_eq!(bytes, expected);

    let mut target = baseline.clone();
    apply_delta(&mut target, &bytes, &limits()).unwrap();
    assert_eq!(target, current);
}

#[test]
fn integer_appearing_beyond_baseline_golden_bytes() {
    let baseline = Snapshot::default();
    let current = Snapshot {
        booleans: vec![],
        integers: vec![42],
        floats: vec![],
    };

    let bytes = encode_delta(&baseline, &current, &DeltaConfig::default(), &limits()).unwrap();

    // Counts 0, 1, 0; single mask bit set (index beyond baseline length is
    // a change by definition); payload is the varint 42.
    assert_eq!(bytes, vec![0x00, 0x01, 0x00, 0x01, 0x01, 0x2A]);

    let mut target = baseline.clone();
    apply_delta(&mut target, &bytes, &limits()).unwrap();
    assert_eq!(target, current);
}

#[test]
fn diff_size_scales_with_changes_not_field_count() {
    let baseline = Snapshot {
        booleans: vec![false; 16],
        integers: vec![7; 16],
        floats: vec![1.0; 16],
    };
    let mut current = baseline.clone();
    current.integers[3] = 1_000_000;

    let bytes = encode_delta(&baseline, &current, &DeltaConfig::default(), &limits()).unwrap();

    // 3 count varints + mask length prefix + ceil(48/8) mask bytes + one
    // 3-byte varint for the changed integer. No float payload at all.
    assert_eq!(bytes.len(), 3 + 1 + 6 + 3);
}

#[test]
fn multi_tick_chain_stays_in_sync() {
    let limits = CodecLimits::default();
    let config = DeltaConfig::default();
    let mut scratch = DeltaScratch::new();

    // Sender-side state pair and the receiver's replica.
    let mut acked = Snapshot {
        booleans: vec![false; 24],
        integers: vec![0; 12],
        floats: vec![0.0; 12],
    };
    let mut replica = acked.clone();

    let mut seed = 0x2545_F491u32;
    let mut next = || {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        seed
    };

    for _ in 0..200 {
        let mut current = acked.clone();
        // Mutate a handful of fields; float steps are whole numbers so the
        // epsilon cannot suppress them.
        for _ in 0..4 {
            let r = next();
            match r % 3 {
                0 => {
                    let i = (r as usize / 3) % current.booleans.len();
                    current.booleans[i] = !current.booleans[i];
                }
                1 => {
                    let i = (r as usize / 3) % current.integers.len();
                    current.integers[i] = current.integers[i].wrapping_add(r);
                }
                _ => {
                    let i = (r as usize / 3) % current.floats.len();
                    current.floats[i] += 1.0;
                }
            }
        }

        let bytes =
            encode_delta_with_scratch(&acked, &current, &config, &limits, &mut scratch).unwrap();
        apply_delta(&mut replica, &bytes, &limits).unwrap();
        assert_eq!(replica, current);
        acked = current;
    }
}

#[test]
fn shape_change_mid_stream() {
    let limits = CodecLimits::default();
    let config = DeltaConfig::default();

    let mut acked = Snapshot {
        booleans: vec![true, false],
        integers: vec![10, 20, 30],
        floats: vec![1.0],
    };
    let mut replica = acked.clone();

    // Fields disappear, then new ones appear, between syncs.
    let steps = [
        Snapshot {
            booleans: vec![true],
            integers: vec![10],
            floats: vec![],
        },
        Snapshot {
            booleans: vec![true, true, false],
            integers: vec![10, 99],
            floats: vec![5.0, 6.0],
        },
    ];

    for current in steps {
        let bytes = encode_delta(&acked, &current, &config, &limits).unwrap();
        apply_delta(&mut replica, &bytes, &limits).unwrap();
        assert_eq!(replica, current);
        acked = current;
    }
}

#[test]
fn failed_apply_falls_back_to_full_resync() {
    let limits = CodecLimits::default();
    let baseline = Snapshot {
        booleans: vec![true],
        integers: vec![1, 2],
        floats: vec![3.0],
    };
    let current = Snapshot {
        booleans: vec![false],
        integers: vec![1, 7],
        floats: vec![4.0],
    };

    let mut bytes = encode_delta(&baseline, &current, &DeltaConfig::default(), &limits).unwrap();
    bytes.truncate(bytes.len() - 2);

    // The replica is in an unspecified state after the failure; recover via
    // the keyframe path.
    let mut replica = baseline.clone();
    assert!(apply_delta(&mut replica, &bytes, &limits).is_err());

    let full = codec::encode_full_snapshot(&current);
    let recovered = codec::decode_full_snapshot(&full, &current.counts(), &limits).unwrap();
    assert_eq!(recovered, current);
}
