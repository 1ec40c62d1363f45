/// The sort implementation under test.
///
/// Implementations wrap one configuration of a sort, `name` shows up in the test output together
/// with the random seed.
pub trait Sort {
    fn name() -> String;

    fn sort<T>(arr: &mut [T])
    where
        T: Ord;

    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering;
}

pub mod patterns;
pub mod types;
