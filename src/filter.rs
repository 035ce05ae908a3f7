//! Filters - composable predicates over records.

/// A boolean test over a record.
///
/// ```ignore
/// let red_2020 = Filter::eq(|v: &Vehicle| &v.color, "red".to_string())
///     .and(Filter::eq(|v: &Vehicle| &v.year, 2020));
/// let heavy = Filter::between(|v: &Vehicle| v.weight, 1000.0, 2000.0);
/// ```
pub struct Filter<R> {
    test: Box<dyn Fn(&R) -> bool + Send + Sync>,
}

impl<R: 'static> Filter<R> {
    pub fn new(test: impl Fn(&R) -> bool + Send + Sync + 'static) -> Self {
        Self {
            test: Box::new(test),
        }
    }

    /// Matches every record.
    pub fn all() -> Self {
        Self::new(|_| true)
    }

    /// Field equals `value`.
    pub fn eq<T, F>(field: F, value: T) -> Self
    where
        T: PartialEq + Send + Sync + 'static,
        F: Fn(&R) -> &T + Send + Sync + 'static,
    {
        Self::new(move |r| *field(r) == value)
    }

    /// Field within `[min, max]`.
    pub fn between<T, F>(field: F, min: T, max: T) -> Self
    where
        T: PartialOrd + Send + Sync + 'static,
        F: Fn(&R) -> T + Send + Sync + 'static,
    {
        Self::new(move |r| {
            let value = field(r);
            value >= min && value <= max
        })
    }

    /// Field strictly greater than `threshold`.
    pub fn gt<T, F>(field: F, threshold: T) -> Self
    where
        T: PartialOrd + Send + Sync + 'static,
        F: Fn(&R) -> T + Send + Sync + 'static,
    {
        Self::new(move |r| field(r) > threshold)
    }

    /// Both filters match.
    pub fn and(self, other: Filter<R>) -> Self {
        Self::new(move |r| self.matches(r) && other.matches(r))
    }

    /// Every filter matches. An empty set matches everything.
    pub fn all_of(filters: impl IntoIterator<Item = Filter<R>>) -> Self {
        filters.into_iter().fold(Self::all(), Filter::and)
    }

    pub fn matches(&self, record: &R) -> bool {
        (self.test)(record)
    }
}

impl<R: 'static> Default for Filter<R> {
    fn default() -> Self {
        Self::all()
    }
}
