/// Remembers the value seen on the previous update.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Previous<T> {
    current: Option<T>,
    previous: Option<T>,
}

impl<T> Previous<T> {
    pub fn new() -> Self {
        Self {
            current: None,
            previous: None,
        }
    }

    /// Records `value` and returns the one recorded before it, if any.
    pub fn update(&mut self, value: T) -> Option<&T> {
        self.previous = self.current.replace(value);
        self.previous.as_ref()
    }

    pub fn previous(&self) -> Option<&T> {
        self.previous.as_ref()
    }

    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::Previous;

    #[test]
    fn first_update_has_no_previous_value() {
        let mut previous = Previous::new();
        assert_eq!(previous.update(0), None);
        assert_eq!(previous.previous(), None);
        assert_eq!(previous.current(), Some(&0));
    }

    #[test]
    fn each_update_returns_the_prior_value() {
        let mut previous = Previous::new();
        previous.update(0);
        assert_eq!(previous.update(1), Some(&0));
        assert_eq!(previous.update(2), Some(&1));
        assert_eq!(previous.previous(), Some(&1));
    }

    #[test]
    fn repeated_values_are_still_tracked() {
        let mut previous = Previous::new();
        previous.update("constant");
        assert_eq!(previous.update("constant"), Some(&"constant"));
    }
}
