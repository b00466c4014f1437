//! Natural ordering of class names.

use std::cmp::Ordering;

/// Compare two class names with digit runs compared numerically.
///
/// Non-digit bytes compare by byte value; maximal digit runs compare as
/// integers, so `p-2` sorts before `p-10`. When one string is a prefix of
/// the other, the shorter sorts first.
pub fn compare(a: &str, b: &str) -> Ordering {
    let a = a.as_bytes();
    let b = b.as_bytes();
    let mut i = 0;
    let mut j = 0;

    while i < a.len() && j < b.len() {
        if a[i].is_ascii_digit() && b[j].is_ascii_digit() {
            let (na, ni) = digit_run(a, i);
            let (nb, nj) = digit_run(b, j);
            match na.cmp(&nb) {
                Ordering::Equal => {}
                other => return other,
            }
            i = ni;
            j = nj;
        } else {
            match a[i].cmp(&b[j]) {
                Ordering::Equal => {}
                other => return other,
            }
            i += 1;
            j += 1;
        }
    }

    a.len().cmp(&b.len())
}

fn digit_run(bytes: &[u8], start: usize) -> (u64, usize) {
    let mut value = 0u64;
    let mut i = start;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        value = value
            .saturating_mul(10)
            .saturating_add(u64::from(bytes[i] - b'0'));
        i += 1;
    }
    (value, i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_runs_compare_numerically() {
        assert_eq!(compare("p-2", "p-10"), Ordering::Less);
        assert_eq!(compare("p-10", "p-2"), Ordering::Greater);
        assert_eq!(compare("p-12", "p-20"), Ordering::Less);
    }

    #[test]
    fn prefix_sorts_first() {
        assert_eq!(compare("p-1", "p-1.5"), Ordering::Less);
        assert_eq!(compare("p", "p-0"), Ordering::Less);
    }

    #[test]
    fn equal_names_compare_equal() {
        assert_eq!(compare("mx-auto", "mx-auto"), Ordering::Equal);
    }

    #[test]
    fn sorting_matches_the_expected_fixed_point() {
        let mut names = vec![
            "p-21", "p-0.5", "p-12", "p-2", "p-1.5", "p-10", "p-0", "p-20", "p-1",
        ];
        names.sort_by(|a, b| compare(a, b));
        assert_eq!(
            names,
            vec!["p-0", "p-0.5", "p-1", "p-1.5", "p-2", "p-10", "p-12", "p-20", "p-21"]
        );
    }
}
