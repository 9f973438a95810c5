//! Validatable nodes: a value paired with its path and the run's violations.
//!
//! Every declaration block receives the root [`Validatable`] of its run and
//! derives child nodes from it with [`Validatable::field`] and friends. All
//! nodes of one run write into the same violation collection, whatever their
//! depth.
//!
//! # Example
//!
//! ```rust
//! use scrutiny::prelude::*;
//!
//! #[derive(Debug)]
//! struct Address {
//!     city: String,
//! }
//!
//! #[derive(Debug)]
//! struct Customer {
//!     address: Option<Address>,
//! }
//!
//! let validator = Validator::new(|root: &Validatable<&Customer>| {
//!     let city = root
//!         .field("address", |c| c.address.as_ref())
//!         .field_opt("city", |a| a.city.as_str());
//!     assert_eq!(city.path().to_string(), "address.city");
//!     city.is_not_blank();
//! });
//!
//! let customer = Customer { address: Some(Address { city: " ".into() }) };
//! assert!(validator.validate(customer).is_failure());
//! ```

mod compound;
pub(crate) mod store;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::panic::Location;

pub use compound::Compound;

use crate::constraint::Constraint;
use crate::error::{ConstraintViolation, MisuseError};
use crate::path::Path;
use store::ViolationStore;

/// A value under validation.
///
/// A node wraps a value (usually a reference into the validated subject),
/// the [`Path`] leading to it, and a handle to the violation collection of
/// the run it belongs to. Nodes only live for the duration of one run.
///
/// Two nodes compare equal when their values are equal, whatever their
/// paths, so sibling fields can be compared directly inside a predicate.
pub struct Validatable<T> {
    value: T,
    path: Path,
    store: ViolationStore,
}

impl<T> Validatable<T> {
    pub(crate) fn new(value: T, path: Path, store: ViolationStore) -> Self {
        Self { value, path, store }
    }

    pub(crate) fn store(&self) -> &ViolationStore {
        &self.store
    }

    /// The path of this node, relative to the root of the run.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The wrapped value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Consumes the node and returns the wrapped value.
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Derives a child node sharing this node's violation collection.
    ///
    /// The child path is this path plus `segment`; `None` or an empty segment
    /// keeps this path unchanged, which is what unnamed derivations such as
    /// collection elements use.
    pub fn derive<U>(&self, segment: Option<&str>, value: U) -> Validatable<U> {
        let path = match segment {
            Some(segment) => self.path.append(segment),
            None => self.path.clone(),
        };
        Validatable::new(value, path, self.store.clone())
    }

    /// Registers an existing constraint on this node's run.
    ///
    /// Satisfied constraints are ignored. Registering a constraint twice is a
    /// no-op: the violation keeps its first position.
    ///
    /// # Panics
    ///
    /// Panics if the constraint comes from a different run, or if this run
    /// already completed.
    pub fn register_constraint(&self, constraint: &Constraint) {
        if let Err(misuse) = self.try_register_constraint(constraint) {
            tracing::warn!(%misuse, "declaration misuse");
            panic!("{misuse}");
        }
    }

    /// Registers an existing constraint on this node's run.
    ///
    /// # Errors
    ///
    /// Returns [`MisuseError::ForeignConstraint`] for a constraint created in
    /// another run and [`MisuseError::RunCompleted`] once this run is over.
    pub fn try_register_constraint(&self, constraint: &Constraint) -> Result<(), MisuseError> {
        self.store.ensure_open(&self.path)?;
        if !constraint.belongs_to(&self.store) {
            return Err(MisuseError::ForeignConstraint {
                path: constraint.path().clone(),
            });
        }
        if !constraint.satisfied() {
            self.store.insert(constraint.descriptor())?;
        }
        Ok(())
    }

    /// Registers an already formed violation, unconditionally.
    ///
    /// # Panics
    ///
    /// Panics if this run already completed.
    pub fn register_violation(&self, violation: ConstraintViolation) {
        if let Err(misuse) = self.try_register_violation(violation) {
            tracing::warn!(%misuse, "declaration misuse");
            panic!("{misuse}");
        }
    }

    /// Registers an already formed violation, unconditionally.
    ///
    /// # Errors
    ///
    /// Returns [`MisuseError::RunCompleted`] once this run is over.
    pub fn try_register_violation(&self, violation: ConstraintViolation) -> Result<(), MisuseError> {
        self.store.insert(violation.into()).map(|_| ())
    }

    /// Groups this node with another one of the same type.
    ///
    /// See [`Compound`].
    pub fn and<'n>(&'n self, other: &'n Validatable<T>) -> Compound<'n, T> {
        Compound::new(vec![self, other])
    }

    pub(crate) fn record(&self, satisfied: bool, origin: &'static Location<'static>) -> Constraint {
        match Constraint::evaluate(satisfied, &self.path, &self.store, origin) {
            Ok(constraint) => constraint,
            Err(misuse) => {
                tracing::warn!(%misuse, "declaration misuse");
                panic!("{misuse}")
            }
        }
    }
}

impl<T: Copy> Validatable<T> {
    /// Returns a copy of the wrapped value.
    pub fn get(&self) -> T {
        self.value
    }

    /// Evaluates `predicate` against the value and returns the outcome.
    ///
    /// The predicate runs immediately. When it does not hold, the constraint
    /// is registered in the run's violations, with the default message until
    /// [`Constraint::otherwise`] attaches one.
    ///
    /// # Panics
    ///
    /// Panics if this node belongs to a run that already completed.
    #[track_caller]
    pub fn constrain<F>(&self, predicate: F) -> Constraint
    where
        F: FnOnce(T) -> bool,
    {
        let origin = Location::caller();
        self.record(predicate(self.value), origin)
    }

    /// Like [`constrain`](Self::constrain), for predicates that can fail.
    ///
    /// # Errors
    ///
    /// Returns the predicate's error untouched; nothing is registered then.
    #[track_caller]
    pub fn try_constrain<F, E>(&self, predicate: F) -> Result<Constraint, E>
    where
        F: FnOnce(T) -> Result<bool, E>,
    {
        let origin = Location::caller();
        let satisfied = predicate(self.value)?;
        Ok(self.record(satisfied, origin))
    }

    /// Derives a named child node from a field of the value.
    pub fn field<U, F>(&self, name: &str, accessor: F) -> Validatable<U>
    where
        F: FnOnce(T) -> U,
    {
        self.derive(Some(name), accessor(self.value))
    }

    /// Derives an unnamed child node, keeping this node's path.
    pub fn map<U, F>(&self, transform: F) -> Validatable<U>
    where
        F: FnOnce(T) -> U,
    {
        self.derive(None, transform(self.value))
    }
}

impl<T: Present> Validatable<T> {
    /// Evaluates `predicate` only when a value is present.
    ///
    /// An absent value satisfies the constraint vacuously and the predicate
    /// is never called.
    ///
    /// # Panics
    ///
    /// Panics if this node belongs to a run that already completed.
    #[track_caller]
    pub fn constrain_if_present<F>(&self, predicate: F) -> Constraint
    where
        F: FnOnce(T::Inner) -> bool,
    {
        let origin = Location::caller();
        let satisfied = self.value.present().map_or(true, predicate);
        self.record(satisfied, origin)
    }
}

impl<T: Copy> Validatable<Option<T>> {
    /// Derives a named child node through a nullable receiver.
    ///
    /// The child is absent whenever this node is.
    pub fn field_opt<U, F>(&self, name: &str, accessor: F) -> Validatable<Option<U>>
    where
        F: FnOnce(T) -> U,
    {
        self.derive(Some(name), self.value.map(accessor))
    }

    /// Derives a named, nullable child node through a nullable receiver.
    pub fn field_and_then<U, F>(&self, name: &str, accessor: F) -> Validatable<Option<U>>
    where
        F: FnOnce(T) -> Option<U>,
    {
        self.derive(Some(name), self.value.and_then(accessor))
    }
}

impl<'v, U> Validatable<&'v Option<U>> {
    /// Turns a reference to an optional field into an optional reference.
    pub fn as_option(&self) -> Validatable<Option<&'v U>> {
        self.derive(None, self.value.as_ref())
    }
}

impl<'v, U> Validatable<Option<&'v Option<U>>> {
    /// Flattens an optional field reached through a nullable receiver.
    pub fn as_option(&self) -> Validatable<Option<&'v U>> {
        self.derive(None, self.value.and_then(Option::as_ref))
    }
}

impl<T> Validatable<T>
where
    T: Copy + IntoIterator,
{
    /// Iterates over the elements of a collection value.
    ///
    /// Element nodes keep this node's path.
    pub fn iter(&self) -> impl Iterator<Item = Validatable<T::Item>> {
        let path = self.path.clone();
        let store = self.store.clone();
        self.value
            .into_iter()
            .map(move |item| Validatable::new(item, path.clone(), store.clone()))
    }

    /// Runs `block` once per element of a collection value, in iteration order.
    pub fn each<F>(&self, mut block: F)
    where
        F: FnMut(&Validatable<T::Item>),
    {
        for element in self.iter() {
            block(&element);
        }
    }
}

impl<T: PartialEq> PartialEq for Validatable<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq> Eq for Validatable<T> {}

impl<T: Hash> Hash for Validatable<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for Validatable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validatable")
            .field("value", &self.value)
            .field("path", &self.path)
            .finish()
    }
}

/// Values that may be absent.
///
/// `Option<U>` is present when it is `Some`; references and primitives are
/// always present. Used by [`Validatable::constrain_if_present`] and by the
/// constraint builders to skip absent values.
///
/// A reference to an `Option` is always present; call
/// [`Validatable::as_option`] first to look through it.
pub trait Present: Copy {
    /// The type handed to predicates when a value is present.
    type Inner;

    /// Returns the value if present.
    fn present(self) -> Option<Self::Inner>;
}

impl<'a, U: ?Sized> Present for &'a U {
    type Inner = &'a U;

    fn present(self) -> Option<&'a U> {
        Some(self)
    }
}

impl<U: Copy> Present for Option<U> {
    type Inner = U;

    fn present(self) -> Option<U> {
        self
    }
}

macro_rules! present_by_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl Present for $t {
                type Inner = $t;

                fn present(self) -> Option<$t> {
                    Some(self)
                }
            }
        )*
    };
}

present_by_value!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
