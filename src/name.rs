/// Types that expose a comparable name.
pub trait HasName {
    fn name(&self) -> &str;
}

// Delegate HasName to references (and smart pointers if useful)
impl<T: HasName + ?Sized> HasName for &T {
    fn name(&self) -> &str {
        (*self).name()
    }
}
impl<T: HasName + ?Sized> HasName for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }
}
impl<T: HasName + ?Sized> HasName for std::rc::Rc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }
}
impl<T: HasName + ?Sized> HasName for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Sorting helpers for slices of `T: HasName`.
pub trait SortByName {
    /// Stable, ascending sort by `name()`.
    fn sort_by_name(&mut self);
}

impl<T: HasName> SortByName for [T] {
    fn sort_by_name(&mut self) {
        // `sort_by` is stable since Rust 1.2; compares &str by Unicode scalar values.
        self.sort_by(|a, b| a.name().cmp(b.name()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use std::sync::Arc;

    struct Named(String);
    impl HasName for Named {
        fn name(&self) -> &str {
            &self.0
        }
    }

    #[test]
    fn test_sort_by_name() {
        let mut items = vec![
            Named("charlie".to_string()),
            Named("alpha".to_string()),
            Named("bravo".to_string()),
        ];
        items.sort_by_name();
        let names: Vec<&str> = items.iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["alpha", "bravo", "charlie"]);
    }

    #[test]
    fn test_sort_is_stable() {
        struct Tagged(&'static str, usize);
        impl HasName for Tagged {
            fn name(&self) -> &str {
                self.0
            }
        }
        let mut items = vec![Tagged("a", 0), Tagged("b", 1), Tagged("a", 2)];
        items.sort_by_name();
        assert_eq!(items[0].1, 0, "Equal names keep input order");
        assert_eq!(items[1].1, 2);
    }

    #[test]
    fn test_delegation() {
        let named = Named("x".to_string());
        assert_eq!((&named).name(), "x");
        assert_eq!(Box::new(Named("y".to_string())).name(), "y");
        assert_eq!(Rc::new(Named("z".to_string())).name(), "z");
        assert_eq!(Arc::new(Named("w".to_string())).name(), "w");
    }
}
