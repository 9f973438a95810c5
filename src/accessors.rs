//! Generated field accessors.

/// Generates one accessor method per field, for both plain and nullable nodes.
///
/// For each listed field, the first trait gets a method on
/// `Validatable<&Owner>` returning `Validatable<&Field>`, and the second one
/// a method on `Validatable<Option<&Owner>>` returning
/// `Validatable<Option<&Field>>`. The field name becomes the path segment.
///
/// Fields named like an inherent method of [`Validatable`](crate::Validatable)
/// (`path`, `get`, `field`, ...) are shadowed by that method; derive them with
/// [`Validatable::field`](crate::Validatable::field) instead.
///
/// # Example
///
/// ```rust
/// use scrutiny::accessors;
/// use scrutiny::prelude::*;
///
/// #[derive(Debug)]
/// struct Author {
///     name: String,
/// }
///
/// #[derive(Debug)]
/// struct Book {
///     title: String,
///     author: Option<Author>,
/// }
///
/// accessors! {
///     pub trait BookAccessors, NullableBookAccessors for Book {
///         title: String,
///         author: Option<Author>,
///     }
/// }
///
/// accessors! {
///     pub trait AuthorAccessors, NullableAuthorAccessors for Author {
///         name: String,
///     }
/// }
///
/// let validator = Validator::new(|root: &Validatable<&Book>| {
///     root.title().is_not_blank();
///     root.author().as_option().name().is_not_blank();
/// });
///
/// let book = Book {
///     title: "Dune".into(),
///     author: Some(Author { name: " ".into() }),
/// };
/// let violations = validator.validate(book).into_result().unwrap_err();
/// assert_eq!(violations.first().path.to_string(), "author.name");
/// ```
#[macro_export]
macro_rules! accessors {
    (
        $vis:vis trait $name:ident, $nullable:ident for $owner:ty {
            $($field:ident : $ty:ty),* $(,)?
        }
    ) => {
        $vis trait $name<'v> {
            $(
                #[doc = concat!("Node of the `", stringify!($field), "` field.")]
                fn $field(&self) -> $crate::Validatable<&'v $ty>;
            )*
        }

        impl<'v> $name<'v> for $crate::Validatable<&'v $owner> {
            $(
                fn $field(&self) -> $crate::Validatable<&'v $ty> {
                    self.field(stringify!($field), |owner: &'v $owner| &owner.$field)
                }
            )*
        }

        $vis trait $nullable<'v> {
            $(
                #[doc = concat!("Node of the `", stringify!($field), "` field, absent with its owner.")]
                fn $field(&self) -> $crate::Validatable<::core::option::Option<&'v $ty>>;
            )*
        }

        impl<'v> $nullable<'v> for $crate::Validatable<::core::option::Option<&'v $owner>> {
            $(
                fn $field(&self) -> $crate::Validatable<::core::option::Option<&'v $ty>> {
                    self.field_opt(stringify!($field), |owner: &'v $owner| &owner.$field)
                }
            )*
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::path::Path;
    use crate::validatable::store::ViolationStore;
    use crate::validatable::Validatable;

    struct Shelf {
        label: String,
        capacity: u32,
    }

    accessors! {
        trait ShelfAccessors, NullableShelfAccessors for Shelf {
            label: String,
            capacity: u32,
        }
    }

    #[test]
    fn test_generated_accessors() {
        let shelf = Shelf {
            label: "fiction".into(),
            capacity: 12,
        };
        let root = Validatable::new(&shelf, Path::root(), ViolationStore::new());

        assert_eq!(root.label().get(), "fiction");
        assert_eq!(root.label().path().to_string(), "label");
        assert_eq!(*root.capacity().get(), 12);
    }

    #[test]
    fn test_nullable_accessors() {
        let shelf = Shelf {
            label: "fiction".into(),
            capacity: 12,
        };
        let store = ViolationStore::new();
        let present = Validatable::new(Some(&shelf), Path::root(), store.clone());
        let absent: Validatable<Option<&Shelf>> = Validatable::new(None, Path::root(), store);

        assert_eq!(present.capacity().get(), Some(&12));
        assert_eq!(absent.label().get(), None);
        assert_eq!(absent.label().path().to_string(), "label");
    }
}
