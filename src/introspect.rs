//! The introspection capability the traversal works against
//!
//! Rust has no runtime reflection, so a value opts in by implementing
//! [`Introspect`]. Every method is a facet that the classifier in
//! [`policy`](crate::policy) queries; all of them have defaults, so an
//! implementation only overrides the facets that apply to it:
//!
//! - strings answer [`Introspect::as_text`]
//! - primitives and library types answer [`Introspect::display`]
//! - containers answer [`Introspect::elements`] or [`Introspect::entries`]
//! - plain objects list their getters in [`Introspect::accessors`] and answer
//!   [`Introspect::invoke`]
//!
//! Field-backed getters can be generated with [`introspect_getters!`](crate::introspect_getters).

mod impls;

use crate::error::AccessError;
use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;

/// A value whose shape can be inspected at runtime
pub trait Introspect {
    /// Fully qualified path of the runtime type
    fn type_path(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns true for an absent value
    fn is_null(&self) -> bool {
        false
    }

    /// The value itself, if it is a string
    fn as_text(&self) -> Option<Cow<'_, str>> {
        None
    }

    /// Returns true for language primitives
    fn is_primitive(&self) -> bool {
        false
    }

    /// String conversion used for primitives and trusted library types
    fn display(&self) -> Option<String> {
        None
    }

    /// Ordered view of a multi-valued container
    fn elements(&self) -> Option<Vec<&dyn Introspect>> {
        None
    }

    /// Key/value view of an associative container
    fn entries(&self) -> Option<Vec<(&dyn Introspect, &dyn Introspect)>> {
        None
    }

    /// Names of the zero-argument accessors, in declaration order
    fn accessors(&self) -> &[&'static str] {
        &[]
    }

    /// Invokes the accessor called `accessor`
    fn invoke(&self, accessor: &str) -> Result<Member<'_>, AccessError> {
        Err(AccessError::NoSuchAccessor(accessor.to_owned()))
    }
}

/// Result of an accessor: either a view into the receiver or a computed value
pub enum Member<'a> {
    Borrowed(&'a dyn Introspect),
    Owned(Box<dyn Introspect + 'a>),
}

impl<'a> Member<'a> {
    pub fn borrowed<T: Introspect + 'a>(value: &'a T) -> Self {
        Self::Borrowed(value)
    }

    pub fn owned<T: Introspect + 'a>(value: T) -> Self {
        Self::Owned(Box::new(value))
    }
}

impl<'a> Deref for Member<'a> {
    type Target = dyn Introspect + 'a;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Borrowed(value) => *value,
            Self::Owned(value) => value.as_ref(),
        }
    }
}

impl fmt::Debug for dyn Introspect + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Introspect").field(&self.type_path()).finish()
    }
}

impl fmt::Debug for Member<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Borrowed(_) => "Borrowed",
            Self::Owned(_) => "Owned",
        };
        f.debug_tuple(kind).field(&self.type_path()).finish()
    }
}

/// Unqualified type name: last path segment, generic arguments removed
///
/// `alloc::vec::Vec<app::Menu>` becomes `Vec`, `app::model::Menu` becomes `Menu`.
pub fn simple_name(type_path: &str) -> &str {
    let base = type_path
        .split_once('<')
        .map_or(type_path, |(head, _)| head);
    base.rsplit("::").next().unwrap_or(base)
}

/// First path segment of a type path, e.g. `core` for `core::time::Duration`
pub fn namespace(type_path: &str) -> &str {
    let base = type_path.trim_start_matches('&');
    base.split_once("::").map_or("", |(head, _)| head)
}

/// Implements [`Introspect`] for a struct whose getters return fields
///
/// ```
/// use mirror::introspect_getters;
///
/// struct Menu {
///     name: String,
///     children: Vec<Menu>,
/// }
///
/// introspect_getters!(Menu {
///     getName => name,
///     getChildren => children,
/// });
///
/// let menu = Menu { name: "Root".to_string(), children: Vec::new() };
/// assert_eq!(mirror::to_text(&menu).ok().as_deref(), Some("{name : \"Root\", children : []}"));
/// ```
#[macro_export]
macro_rules! introspect_getters {
    ($ty:ty { $($accessor:ident => $field:ident),* $(,)? }) => {
        impl $crate::Introspect for $ty {
            fn accessors(&self) -> &[&'static str] {
                &[$(stringify!($accessor)),*]
            }

            fn invoke(
                &self,
                accessor: &str,
            ) -> ::std::result::Result<$crate::Member<'_>, $crate::AccessError> {
                match accessor {
                    $(stringify!($accessor) => Ok($crate::Member::borrowed(&self.$field)),)*
                    _ => Err($crate::AccessError::NoSuchAccessor(accessor.to_owned())),
                }
            }
        }
    };
}
