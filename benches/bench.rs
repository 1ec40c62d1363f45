use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::env;
use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use boundsort::SortConfig;
use sort_test_tools::patterns;
use sort_test_tools::types::{OneKiloByte, F128};
use sort_test_tools::Sort;

mod boundsort_default {
    use super::*;

    pub struct SortImpl;

    impl Sort for SortImpl {
        fn name() -> String {
            "boundsort_unstable".into()
        }

        fn sort<T: Ord>(arr: &mut [T]) {
            boundsort::sort(arr);
        }

        fn sort_by<T, F: FnMut(&T, &T) -> Ordering>(arr: &mut [T], compare: F) {
            boundsort::sort_by(arr, compare);
        }
    }
}

mod boundsort_small_stack {
    use super::*;

    const CONFIG: SortConfig = SortConfig::new().with_stack_capacity(8);

    pub struct SortImpl;

    impl Sort for SortImpl {
        fn name() -> String {
            "boundsort_unstable_small_stack".into()
        }

        fn sort<T: Ord>(arr: &mut [T]) {
            boundsort::sort_by_with(arr, &CONFIG, T::cmp);
        }

        fn sort_by<T, F: FnMut(&T, &T) -> Ordering>(arr: &mut [T], compare: F) {
            boundsort::sort_by_with(arr, &CONFIG, compare);
        }
    }
}

mod rust_std_unstable {
    use super::*;

    pub struct SortImpl;

    impl Sort for SortImpl {
        fn name() -> String {
            "rust_std_unstable".into()
        }

        fn sort<T: Ord>(arr: &mut [T]) {
            arr.sort_unstable();
        }

        fn sort_by<T, F: FnMut(&T, &T) -> Ordering>(arr: &mut [T], compare: F) {
            arr.sort_unstable_by(compare);
        }
    }
}

fn pin_thread_to_core() {
    let pin_core_id: usize = 2;

    thread_local! {static AFFINITY_ALREADY_SET: Cell<bool> = Cell::new(false); }

    // Set affinity only once per thread.
    if !AFFINITY_ALREADY_SET.with(Cell::get) {
        if let Some(core_id_2) = core_affinity::get_core_ids()
            .as_ref()
            .and_then(|ids| ids.get(pin_core_id))
        {
            core_affinity::set_for_current(*core_id_2);
        }

        AFFINITY_ALREADY_SET.with(|already_set| already_set.set(true));
    }
}

#[inline(never)]
fn bench_sort<T>(
    c: &mut Criterion,
    test_size: usize,
    transform_name: &str,
    transform: &fn(Vec<i32>) -> Vec<T>,
    pattern_name: &str,
    pattern_provider: &fn(usize) -> Vec<i32>,
    bench_name: &str,
    sort_func: impl Fn(&mut [T]),
) {
    // Pin the benchmark to the same core to improve repeatability. Doing it this way allows
    // criterion to do other stuff with other threads, which greatly impacts overall benchmark
    // throughput.
    pin_thread_to_core();

    let batch_size = if test_size > 30 {
        BatchSize::LargeInput
    } else {
        BatchSize::SmallInput
    };

    c.bench_function(
        &format!("{bench_name}-hot-{transform_name}-{pattern_name}-{test_size}"),
        |b| {
            b.iter_batched(
                || transform(pattern_provider(test_size)),
                |mut test_data| sort_func(black_box(test_data.as_mut_slice())),
                batch_size,
            )
        },
    );
}

fn measure_comp_count(
    name: &str,
    test_size: usize,
    instrumented_sort_func: impl Fn(),
    comp_count: Rc<RefCell<u64>>,
) {
    // Measure how many comparisons are performed by a specific implementation and input
    // combination.
    let run_count: usize = if test_size <= 20 {
        100_000
    } else if test_size < 10_000 {
        3000
    } else if test_size < 100_000 {
        1000
    } else {
        100
    };

    *comp_count.borrow_mut() = 0;
    for _ in 0..run_count {
        instrumented_sort_func();
    }

    // Below one comparison on average this rounds down to zero, such sizes aren't measured.
    let total = *comp_count.borrow() / (run_count as u64);
    println!("{name}: mean comparisons: {total}");
}

#[inline(never)]
fn bench_impl<T: Ord, S: Sort>(
    c: &mut Criterion,
    test_size: usize,
    transform_name: &str,
    transform: &fn(Vec<i32>) -> Vec<T>,
    pattern_name: &str,
    pattern_provider: &fn(usize) -> Vec<i32>,
    _sort_impl: S,
) {
    let bench_name = S::name();

    if env::var("MEASURE_COMP").is_ok() {
        if transform_name == "i32" && test_size <= 100_000 {
            let name = format!("{bench_name}-comp-{transform_name}-{pattern_name}-{test_size}");
            // Instrument via sort_by so the element type is the same one the timed runs see.
            let comp_count = Rc::new(RefCell::new(0u64));
            let comp_count_copy = comp_count.clone();
            let instrumented_sort_func = || {
                let mut test_data = transform(pattern_provider(test_size));
                S::sort_by(black_box(test_data.as_mut_slice()), |a, b| {
                    *comp_count_copy.borrow_mut() += 1;
                    a.cmp(b)
                })
            };
            measure_comp_count(&name, test_size, instrumented_sort_func, comp_count);
        }
    } else {
        bench_sort(
            c,
            test_size,
            transform_name,
            transform,
            pattern_name,
            pattern_provider,
            &bench_name,
            S::sort,
        );
    }
}

// The byte interface only sees little-endian i32 elements.
fn bench_bytes(
    c: &mut Criterion,
    test_size: usize,
    pattern_name: &str,
    pattern_provider: &fn(usize) -> Vec<i32>,
) {
    let bench_name = "boundsort_bytes";

    if env::var("MEASURE_COMP").is_ok() {
        return;
    }

    let to_bytes: fn(Vec<i32>) -> Vec<u8> =
        |values| values.iter().flat_map(|val| val.to_le_bytes()).collect();

    // Reused between iterations, so only the first sort allocates.
    let scratch = RefCell::new(boundsort::Global::new());

    bench_sort(
        c,
        test_size,
        "i32",
        &to_bytes,
        pattern_name,
        pattern_provider,
        bench_name,
        |bytes: &mut [u8]| {
            let count = bytes.len() / 4;
            boundsort::sort_bytes_with(
                Some(bytes),
                count,
                4,
                Some(|a: &[u8], b: &[u8]| {
                    let a = i32::from_le_bytes([a[0], a[1], a[2], a[3]]);
                    let b = i32::from_le_bytes([b[0], b[1], b[2], b[3]]);
                    a.cmp(&b)
                }),
                &mut *scratch.borrow_mut(),
                &SortConfig::default(),
            )
            .unwrap();
        },
    );
}

fn shuffle_vec<T: Ord>(mut v: Vec<T>) -> Vec<T> {
    use rand::seq::SliceRandom;
    use rand::thread_rng;

    let mut rng = thread_rng();
    v.shuffle(&mut rng);

    v
}

fn split_len(size: usize, part_a_percent: f64) -> (usize, usize) {
    let len_a = ((size as f64 / 100.0) * part_a_percent).round() as usize;
    let len_b = size - len_a;

    (len_a, len_b)
}

fn bench_patterns<T: Ord>(
    c: &mut Criterion,
    test_size: usize,
    transform_name: &str,
    transform: fn(Vec<i32>) -> Vec<T>,
) {
    if test_size > 100_000 && !(transform_name == "i32" || transform_name == "u64") {
        // These are just too expensive.
        return;
    }

    let pattern_providers: Vec<(&'static str, fn(usize) -> Vec<i32>)> = vec![
        ("random", patterns::random),
        ("random_dense", |size| {
            patterns::random_uniform(size, 0..=(((size as f64).log2().round()) as i32))
        }),
        ("random_binary", |size| patterns::random_uniform(size, 0..=1)),
        ("random_5p", |size| {
            let (len_95p, len_5p) = split_len(size, 95.0);
            let v: Vec<i32> = std::iter::repeat(0)
                .take(len_95p)
                .chain(patterns::random(len_5p))
                .collect();

            shuffle_vec(v)
        }),
        ("all_equal", patterns::all_equal),
        ("ascending", patterns::ascending),
        ("descending", patterns::descending),
        ("adjacent_swaps", patterns::adjacent_swaps),
        ("pipe_organ", patterns::pipe_organ),
        ("saws_long", |size| {
            patterns::saw_mixed(size, ((size as f64).log2().round()) as usize)
        }),
        ("saws_short", |size| {
            patterns::saw_mixed(size, (size as f64 / 22.0).round() as usize)
        }),
    ];

    for (pattern_name, pattern_provider) in pattern_providers.iter() {
        if test_size < 3 && *pattern_name != "random" {
            continue;
        }

        bench_impl(
            c,
            test_size,
            transform_name,
            &transform,
            pattern_name,
            pattern_provider,
            boundsort_default::SortImpl,
        );

        bench_impl(
            c,
            test_size,
            transform_name,
            &transform,
            pattern_name,
            pattern_provider,
            boundsort_small_stack::SortImpl,
        );

        bench_impl(
            c,
            test_size,
            transform_name,
            &transform,
            pattern_name,
            pattern_provider,
            rust_std_unstable::SortImpl,
        );

        if transform_name == "i32" {
            bench_bytes(c, test_size, pattern_name, pattern_provider);
        }
    }
}

fn ensure_true_random() {
    // Ensure that random vecs are actually different.
    let random_vec_a = patterns::random(5);
    let random_vec_b = patterns::random(5);

    assert_ne!(random_vec_a, random_vec_b);
}

fn criterion_benchmark(c: &mut Criterion) {
    let test_sizes = [
        0, 1, 2, 3, 5, 7, 8, 9, 11, 13, 15, 16, 17, 19, 20, 24, 28, 31, 36, 50, 101, 200, 500,
        1_000, 2_048, 10_000, 100_000, 1_000_000,
    ];

    patterns::use_random_seed_each_time();
    ensure_true_random();

    for test_size in test_sizes {
        // Basic type often used to test sorting algorithms.
        bench_patterns(c, test_size, "i32", |values| values);

        // Common type for usize on 64-bit machines.
        // Sorting indices is very common.
        bench_patterns(c, test_size, "u64", |values| {
            values
                .iter()
                .map(|val| -> u64 {
                    // Extends the value into the 64 bit range,
                    // while preserving input order.
                    let x = ((*val as i64) + (i32::MAX as i64) + 1) as u64;
                    x.checked_mul(i32::MAX as u64).unwrap()
                })
                .collect()
        });

        // Larger type that is not Copy and does heap access.
        bench_patterns(c, test_size, "string", |values| {
            values
                .iter()
                .map(|val| format!("{:010}", val.saturating_abs()))
                .collect()
        });

        // Very large stack value.
        bench_patterns(c, test_size, "1k", |values| {
            values.iter().map(|val| OneKiloByte::new(*val)).collect()
        });

        // 16 byte stack value that is Copy but has a relatively expensive cmp implementation.
        bench_patterns(c, test_size, "f128", |values| {
            values.iter().map(|val| F128::new(*val)).collect()
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
