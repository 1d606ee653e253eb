/// Front-end independent key vocabulary. Each front end maps its own key
/// codes onto this before handing them to the menu or the search panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
    Up,
    Down,
    Enter,
    Space,
    Escape,
    Other,
}

pub const fn wrap_decrement(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

pub const fn wrap_increment(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    (index + 1) % len
}

#[cfg(test)]
mod tests {
    use super::{wrap_decrement, wrap_increment};

    #[test]
    fn increment_returns_to_start_after_len_steps() {
        for len in 1..8 {
            for start in 0..len {
                let mut index = start;
                for _ in 0..len {
                    index = wrap_increment(index, len);
                }
                assert_eq!(index, start);
            }
        }
    }

    #[test]
    fn decrement_from_zero_wraps_to_last() {
        assert_eq!(wrap_decrement(0, 5), 4);
        assert_eq!(wrap_decrement(3, 5), 2);
    }

    #[test]
    fn empty_range_stays_at_zero() {
        assert_eq!(wrap_increment(3, 0), 0);
        assert_eq!(wrap_decrement(0, 0), 0);
    }
}
