//! Balanced splitting of the query list across workers

/// Split `items` into exactly `parts` contiguous slices.
///
/// Slice lengths differ by at most one; the first `len % parts` slices carry
/// the extra element. A `parts` of zero is treated as one.
pub fn partition<T>(items: &[T], parts: usize) -> Vec<&[T]> {
    let parts = parts.max(1);
    let base = items.len() / parts;
    let remainder = items.len() % parts;

    let mut slices = Vec::with_capacity(parts);
    let mut start = 0;
    for i in 0..parts {
        let len = base + usize::from(i < remainder);
        slices.push(&items[start..start + len]);
        start += len;
    }

    slices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_are_balanced_and_cover_everything() {
        for len in 0..50usize {
            let items: Vec<usize> = (0..len).collect();
            for parts in 1..12 {
                let slices = partition(&items, parts);
                assert_eq!(slices.len(), parts);

                let sizes: Vec<usize> = slices.iter().map(|s| s.len()).collect();
                assert_eq!(sizes.iter().sum::<usize>(), len);
                let max = *sizes.iter().max().unwrap();
                let min = *sizes.iter().min().unwrap();
                assert!(max - min <= 1);

                let rejoined: Vec<usize> = slices.concat();
                assert_eq!(rejoined, items);
            }
        }
    }

    #[test]
    fn remainder_goes_to_leading_slices() {
        let items: Vec<u32> = (0..10).collect();
        let sizes: Vec<usize> = partition(&items, 4).iter().map(|s| s.len()).collect();
        assert_eq!(sizes, vec![3, 3, 2, 2]);
    }

    #[test]
    fn fewer_items_than_parts() {
        let items = [1, 2];
        let slices = partition(&items, 5);
        assert_eq!(slices.len(), 5);
        assert_eq!(slices.iter().filter(|s| s.is_empty()).count(), 3);
    }

    #[test]
    fn zero_parts_clamps_to_one() {
        let items = [1, 2, 3];
        let slices = partition(&items, 0);
        assert_eq!(slices, vec![&items[..]]);
    }
}
