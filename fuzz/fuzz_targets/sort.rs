#![no_main]

use boundsort::SortConfig;
use libfuzzer_sys::fuzz_target;

// The first two bytes pick the configuration, the rest is sorted both as typed u8 values and as
// type-erased two byte elements.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let (head, input) = data.split_at(2);

    let config = SortConfig::new()
        .with_stack_capacity(head[0] as usize)
        .with_small_sort_threshold(head[1] as usize);

    let mut typed = input.to_vec();
    let stats = boundsort::sort_by_with(&mut typed, &config, |a, b| a.cmp(b));

    let mut expected = input.to_vec();
    expected.sort_unstable();
    assert_eq!(typed, expected);
    assert!(stats.max_stack_len <= config.stack_capacity());

    let count = input.len() / 2;
    let mut bytes = input.to_vec();
    boundsort::sort_bytes_with(
        Some(&mut bytes[..]),
        count,
        2,
        Some(|a: &[u8], b: &[u8]| a.cmp(b)),
        &mut boundsort::Global::new(),
        &config,
    )
    .unwrap();

    let mut expected: Vec<&[u8]> = input[..count * 2].chunks_exact(2).collect();
    expected.sort_unstable();
    assert_eq!(bytes[..count * 2], expected.concat()[..]);
    assert_eq!(bytes[count * 2..], input[count * 2..]);
});
