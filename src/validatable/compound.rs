//! Compound validation: one declaration block applied to several nodes.

use futures::future::BoxFuture;

use super::Validatable;

/// A group of nodes validated by the same rules.
///
/// Built with [`Validatable::and`]; members keep the order they were added
/// in, and [`apply`](Self::apply) runs its block once per member in that
/// order. Members share a type, so mixing incompatible nodes is rejected at
/// compile time.
///
/// ```rust
/// use scrutiny::prelude::*;
///
/// #[derive(Debug)]
/// struct Range {
///     low: i64,
///     high: i64,
/// }
///
/// let validator = Validator::new(|root: &Validatable<&Range>| {
///     let low = root.field("low", |r| r.low);
///     let high = root.field("high", |r| r.high);
///     low.and(&high).apply(|bound| {
///         bound.is_positive();
///     });
/// });
///
/// let violations = validator
///     .validate(Range { low: -1, high: 2 })
///     .into_result()
///     .unwrap_err();
/// assert_eq!(violations.len(), 1);
/// assert_eq!(violations.first().path.to_string(), "low");
/// ```
pub struct Compound<'n, T> {
    members: Vec<&'n Validatable<T>>,
}

impl<'n, T> Compound<'n, T> {
    pub(crate) fn new(members: Vec<&'n Validatable<T>>) -> Self {
        Self { members }
    }

    /// Adds one more node to the group.
    pub fn and(mut self, other: &'n Validatable<T>) -> Self {
        self.members.push(other);
        self
    }

    /// Appends every member of another group.
    pub fn and_compound(mut self, other: Compound<'n, T>) -> Self {
        self.members.extend(other.members);
        self
    }

    /// The members, in declaration order.
    pub fn members(&self) -> impl Iterator<Item = &'n Validatable<T>> + '_ {
        self.members.iter().copied()
    }

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the group has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Runs `block` once per member, in declaration order.
    pub fn apply<F>(&self, mut block: F)
    where
        F: FnMut(&Validatable<T>),
    {
        for member in &self.members {
            block(member);
        }
    }

    /// Runs an asynchronous `block` once per member, awaiting each in turn.
    pub async fn apply_async<F>(&self, block: F)
    where
        F: for<'m> Fn(&'m Validatable<T>) -> BoxFuture<'m, ()>,
    {
        for member in &self.members {
            block(member).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::path::Path;
    use crate::validatable::store::ViolationStore;
    use crate::validatable::Validatable;

    #[test]
    fn test_apply_runs_in_declaration_order() {
        let store = ViolationStore::new();
        let a = Validatable::new(1, Path::root().append("a"), store.clone());
        let b = Validatable::new(2, Path::root().append("b"), store.clone());
        let c = Validatable::new(3, Path::root().append("c"), store.clone());

        let compound = a.and(&b).and(&c);
        assert_eq!(compound.len(), 3);

        let mut visited = Vec::new();
        compound.apply(|node| visited.push(node.path().to_string()));
        assert_eq!(visited, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_and_compound_concatenates() {
        let store = ViolationStore::new();
        let a = Validatable::new(1, Path::root().append("a"), store.clone());
        let b = Validatable::new(2, Path::root().append("b"), store.clone());
        let c = Validatable::new(3, Path::root().append("c"), store.clone());
        let d = Validatable::new(4, Path::root().append("d"), store.clone());

        let compound = a.and(&b).and_compound(c.and(&d));
        let values: Vec<i32> = compound.members().map(Validatable::get).collect();
        assert_eq!(values, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_rule_applies_to_each_member() {
        let store = ViolationStore::new();
        let a = Validatable::new(1, Path::root().append("a"), store.clone());
        let b = Validatable::new(2, Path::root().append("b"), store.clone());

        a.and(&b).apply(|node| {
            node.constrain(|v| v % 2 == 0);
        });

        let violations = store.complete("invalid");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path.to_string(), "a");
    }
}
