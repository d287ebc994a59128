//! `Introspect` for the standard library and `indexmap` containers

use super::Introspect;
use indexmap::{IndexMap, IndexSet};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

impl Introspect for str {
    fn as_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self))
    }
}

impl Introspect for String {
    fn as_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.as_str()))
    }
}

macro_rules! primitive {
    ($($ty:ty),* $(,)?) => {$(
        impl Introspect for $ty {
            fn is_primitive(&self) -> bool {
                true
            }

            fn display(&self) -> Option<String> {
                Some(self.to_string())
            }
        }
    )*};
}

primitive!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

// Library types are recognised by their namespace, not by `is_primitive`.
macro_rules! library {
    ($($ty:ty),* $(,)?) => {$(
        impl Introspect for $ty {
            fn display(&self) -> Option<String> {
                Some(self.to_string())
            }
        }
    )*};
}

library!(IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr);

impl Introspect for Duration {
    fn display(&self) -> Option<String> {
        Some(format!("{self:?}"))
    }
}

impl Introspect for Path {
    fn display(&self) -> Option<String> {
        Some(self.to_string_lossy().into_owned())
    }
}

impl Introspect for PathBuf {
    fn display(&self) -> Option<String> {
        Some(self.to_string_lossy().into_owned())
    }
}

macro_rules! delegate {
    () => {
        fn type_path(&self) -> &'static str {
            (**self).type_path()
        }

        fn is_null(&self) -> bool {
            (**self).is_null()
        }

        fn as_text(&self) -> Option<Cow<'_, str>> {
            (**self).as_text()
        }

        fn is_primitive(&self) -> bool {
            (**self).is_primitive()
        }

        fn display(&self) -> Option<String> {
            (**self).display()
        }

        fn elements(&self) -> Option<Vec<&dyn Introspect>> {
            (**self).elements()
        }

        fn entries(&self) -> Option<Vec<(&dyn Introspect, &dyn Introspect)>> {
            (**self).entries()
        }

        fn accessors(&self) -> &[&'static str] {
            (**self).accessors()
        }

        fn invoke(&self, accessor: &str) -> Result<super::Member<'_>, crate::AccessError> {
            (**self).invoke(accessor)
        }
    };
}

impl<T: Introspect + ?Sized> Introspect for &T {
    delegate!();
}

impl<T: Introspect + ?Sized> Introspect for Box<T> {
    delegate!();
}

impl<T: Introspect + ?Sized> Introspect for Rc<T> {
    delegate!();
}

impl<T: Introspect + ?Sized> Introspect for Arc<T> {
    delegate!();
}

impl<T: Introspect> Introspect for Option<T> {
    fn type_path(&self) -> &'static str {
        match self {
            Some(value) => value.type_path(),
            None => std::any::type_name::<Self>(),
        }
    }

    fn is_null(&self) -> bool {
        self.as_ref().map_or(true, |value| value.is_null())
    }

    fn as_text(&self) -> Option<Cow<'_, str>> {
        self.as_ref().and_then(|value| value.as_text())
    }

    fn is_primitive(&self) -> bool {
        self.as_ref().is_some_and(|value| value.is_primitive())
    }

    fn display(&self) -> Option<String> {
        self.as_ref().and_then(|value| value.display())
    }

    fn elements(&self) -> Option<Vec<&dyn Introspect>> {
        self.as_ref().and_then(|value| value.elements())
    }

    fn entries(&self) -> Option<Vec<(&dyn Introspect, &dyn Introspect)>> {
        self.as_ref().and_then(|value| value.entries())
    }

    fn accessors(&self) -> &[&'static str] {
        match self {
            Some(value) => value.accessors(),
            None => &[],
        }
    }

    fn invoke(&self, accessor: &str) -> Result<super::Member<'_>, crate::AccessError> {
        match self {
            Some(value) => value.invoke(accessor),
            None => Err(crate::AccessError::NoSuchAccessor(accessor.to_owned())),
        }
    }
}

macro_rules! sequence {
    ($($ty:ident),* $(,)?) => {$(
        impl<T: Introspect> Introspect for $ty<T> {
            fn elements(&self) -> Option<Vec<&dyn Introspect>> {
                Some(self.iter().map(|item| item as &dyn Introspect).collect())
            }
        }
    )*};
}

sequence!(Vec, VecDeque, LinkedList, BTreeSet, HashSet, IndexSet);

impl<T: Introspect> Introspect for [T] {
    fn elements(&self) -> Option<Vec<&dyn Introspect>> {
        Some(self.iter().map(|item| item as &dyn Introspect).collect())
    }
}

impl<T: Introspect, const N: usize> Introspect for [T; N] {
    fn elements(&self) -> Option<Vec<&dyn Introspect>> {
        Some(self.iter().map(|item| item as &dyn Introspect).collect())
    }
}

macro_rules! keyed {
    ($($ty:ident),* $(,)?) => {$(
        impl<K: Introspect, V: Introspect> Introspect for $ty<K, V> {
            fn entries(&self) -> Option<Vec<(&dyn Introspect, &dyn Introspect)>> {
                Some(
                    self.iter()
                        .map(|(key, value)| (key as &dyn Introspect, value as &dyn Introspect))
                        .collect(),
                )
            }
        }
    )*};
}

keyed!(HashMap, BTreeMap, IndexMap);
