//! Conversion of context values into message text.
//!
//! Every value that ends up in a failure message goes through a
//! [`StringMappers`] table. The table is keyed by the value's concrete type;
//! types without a registered mapper fall back to their `Debug` output.
//!
//! # Examples
//!
//! ```rust,ignore
//! use requisite_validator::prelude::*;
//!
//! struct Celsius(f64);
//!
//! let mappers = StringMappers::default()
//!     .with_mapper::<Celsius>(|value, _| format!("{}°C", value.0));
//! ```

use std::any::{Any, TypeId};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A value that can be attached to a failure message.
///
/// Implemented for every `'static` type that is `Debug + Send + Sync`.
pub trait ContextValue: Any + fmt::Debug + Send + Sync {
    /// The value as [`Any`], for mapper lookup.
    fn as_any(&self) -> &dyn Any;

    /// The name of the value's concrete type.
    fn type_name(&self) -> &'static str;
}

impl<T: Any + fmt::Debug + Send + Sync> ContextValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// A value that checks can run on.
///
/// Unlike [`ContextValue`], a subject may borrow: `require_that(name, "name")`
/// accepts a `&str` of any lifetime. Borrowed subjects render like the value
/// they point to.
///
/// Implemented for the primitives, strings, paths, the standard collections
/// of [`ContextValue`] elements, and references and boxes of subjects. Other
/// types opt in; the provided methods render with `Debug`:
///
/// ```rust,ignore
/// #[derive(Debug)]
/// struct Celsius(f64);
///
/// impl Subject for Celsius {
///     fn render(&self, mappers: &StringMappers) -> String {
///         mappers.render(self)
///     }
/// }
/// ```
pub trait Subject: fmt::Debug {
    /// Renders the value for a failure message.
    fn render(&self, _mappers: &StringMappers) -> String {
        format!("{self:?}")
    }

    /// The name of the value's type.
    fn subject_type(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns `true` for booleans, which are never diffed.
    fn is_bool(&self) -> bool {
        false
    }
}

macro_rules! mapped_subject {
    ($($ty:ty),* $(,)?) => {$(
        impl Subject for $ty {
            fn render(&self, mappers: &StringMappers) -> String {
                mappers.render(self)
            }
        }
    )*};
}

mapped_subject!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, char, (),
    String, PathBuf, std::time::Duration,
);

impl Subject for bool {
    fn render(&self, mappers: &StringMappers) -> String {
        mappers.render(self)
    }

    fn is_bool(&self) -> bool {
        true
    }
}

impl Subject for str {
    fn render(&self, mappers: &StringMappers) -> String {
        mappers.render(&self.to_owned())
    }
}

impl Subject for Path {
    fn render(&self, mappers: &StringMappers) -> String {
        mappers.render(&self.to_path_buf())
    }
}

impl<U: ContextValue> Subject for [U] {}

impl<T: ?Sized + Subject> Subject for &T {
    fn render(&self, mappers: &StringMappers) -> String {
        (**self).render(mappers)
    }

    fn is_bool(&self) -> bool {
        (**self).is_bool()
    }
}

impl<T: ?Sized + Subject> Subject for Box<T> {
    fn render(&self, mappers: &StringMappers) -> String {
        (**self).render(mappers)
    }

    fn is_bool(&self) -> bool {
        (**self).is_bool()
    }
}

impl<T: ?Sized + Subject> Subject for Arc<T> {
    fn render(&self, mappers: &StringMappers) -> String {
        (**self).render(mappers)
    }

    fn is_bool(&self) -> bool {
        (**self).is_bool()
    }
}

macro_rules! mapped_collection {
    ($($ty:ident<$($param:ident),+>),* $(,)?) => {$(
        impl<$($param: ContextValue),+> Subject for $ty<$($param),+> {
            fn render(&self, mappers: &StringMappers) -> String {
                mappers.render(self)
            }
        }
    )*};
}

mapped_collection!(
    Vec<U>,
    VecDeque<U>,
    Option<U>,
    BTreeSet<U>,
    BTreeMap<K, V>,
    HashSet<U, S>,
    HashMap<K, V, S>,
);

impl<U: ContextValue, const N: usize> Subject for [U; N] {
    fn render(&self, mappers: &StringMappers) -> String {
        mappers.render(self)
    }
}

/// A function that renders one value.
///
/// The second argument is the table the mapper was looked up in, for
/// rendering nested values.
pub type StringMapper = Arc<dyn Fn(&dyn Any, &StringMappers) -> String + Send + Sync>;

/// Type-keyed table of [`StringMapper`]s.
///
/// Cloning is cheap and registering a mapper returns a new table, so a
/// table shared between configurations never changes underneath them.
#[derive(Clone)]
pub struct StringMappers {
    mappers: Arc<HashMap<TypeId, StringMapper>>,
}

impl StringMappers {
    /// A table with no mappers. Every value renders with `Debug`.
    pub fn empty() -> Self {
        Self {
            mappers: Arc::new(HashMap::new()),
        }
    }

    /// Returns a copy of this table that renders `T` with `mapper`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_mapper<T: Any>(
        &self,
        mapper: impl Fn(&T, &StringMappers) -> String + Send + Sync + 'static,
    ) -> Self {
        let mut mappers = (*self.mappers).clone();
        mappers.insert(
            TypeId::of::<T>(),
            Arc::new(move |value: &dyn Any, table: &StringMappers| match value.downcast_ref::<T>() {
                Some(value) => mapper(value, table),
                None => String::new(),
            }),
        );
        Self {
            mappers: Arc::new(mappers),
        }
    }

    /// Returns `true` if `T` has a registered mapper.
    pub fn contains<T: Any>(&self) -> bool {
        self.mappers.contains_key(&TypeId::of::<T>())
    }

    /// Renders a value with its registered mapper, or `Debug` if none.
    pub fn render(&self, value: &dyn ContextValue) -> String {
        let any = ContextValue::as_any(value);
        match self.mappers.get(&any.type_id()) {
            Some(mapper) => mapper(any, self),
            None => format!("{value:?}"),
        }
    }
}

impl Default for StringMappers {
    fn default() -> Self {
        let mappers = Self::empty()
            .with_mapper::<String>(|value, _| quote(value))
            .with_mapper::<&'static str>(|value, _| quote(value))
            .with_mapper::<Option<String>>(|value, _| value.as_deref().map_or_else(null, quote))
            .with_mapper::<Option<&'static str>>(|value, _| value.map_or_else(null, quote))
            .with_mapper::<PathBuf>(|value, _| value.display().to_string());
        #[cfg(feature = "json")]
        let mappers = crate::json::register(mappers);
        mappers
    }
}

impl fmt::Debug for StringMappers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringMappers")
            .field("len", &self.mappers.len())
            .finish()
    }
}

/// Wraps text in double quotes, escaping embedded quotes. Newlines are kept
/// so that multiline values diff line by line.
pub fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        if c == '"' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

fn null() -> String {
    "null".to_owned()
}
