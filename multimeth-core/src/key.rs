//! # Classification Keys
//!
//! A dispatch function reduces a call's arguments to a [`ClassKey`]. The
//! method table is an exact-match structure over these keys: two keys select
//! the same method if and only if they compare equal. There is no notion of
//! subtyping, partial matching, or ordering between keys.
//!
//! [`Selector`] is what a method is bound *under*: either a concrete key or
//! the [`DEFAULT`] marker. Dispatch functions can only produce `ClassKey`s,
//! so the marker can never collide with a classification value.

use std::{
    any::{Any, TypeId},
    borrow::Cow,
    fmt,
    hash::{Hash, Hasher},
};

/// A Rust type identity usable as (part of) a classification key.
///
/// Equality and hashing use the [`TypeId`] only; the name is kept for
/// diagnostics.
#[derive(Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: Option<&'static str>,
}

impl TypeTag {
    /// The tag of type `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: Some(std::any::type_name::<T>()),
        }
    }

    /// The tag of the concrete type behind `value`.
    ///
    /// Pass the erased value itself: for `b: Box<dyn Any>` that is `&*b`,
    /// since `&b` would tag the box.
    pub fn of_dyn(value: &dyn Any) -> Self {
        Self {
            id: value.type_id(),
            name: None,
        }
    }

    /// The type name, as reported by [`std::any::type_name`].
    ///
    /// `None` for tags taken from an erased value.
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeTag")
            .field(&format_args!("{self}"))
            .finish()
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            Some(name) => f.write_str(name),
            None => write!(f, "{:?}", self.id),
        }
    }
}

/// A classification value produced by a dispatch function.
///
/// All primitive integers widen to [`ClassKey::Int`], so `3u8` and `3i64`
/// classify identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassKey {
    /// The unit classification.
    Unit,
    /// A boolean.
    Bool(bool),
    /// Any primitive integer.
    Int(i128),
    /// A character.
    Char(char),
    /// A string, typically a kind or tag name.
    Str(Cow<'static, str>),
    /// A Rust type identity.
    Type(TypeTag),
    /// An ordered combination of keys, one per classified argument.
    Tuple(Vec<ClassKey>),
}

impl ClassKey {
    /// A key identifying type `T`.
    pub fn type_of<T: ?Sized + 'static>() -> Self {
        ClassKey::Type(TypeTag::of::<T>())
    }

    /// A key identifying the concrete type behind `value`.
    pub fn type_of_dyn(value: &dyn Any) -> Self {
        ClassKey::Type(TypeTag::of_dyn(value))
    }

    /// A tuple key built from any sequence of convertible parts.
    pub fn tuple<I, K>(parts: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<ClassKey>,
    {
        ClassKey::Tuple(parts.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for ClassKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassKey::Unit => f.write_str("()"),
            ClassKey::Bool(b) => write!(f, "{b}"),
            ClassKey::Int(i) => write!(f, "{i}"),
            ClassKey::Char(c) => write!(f, "{c:?}"),
            ClassKey::Str(s) => write!(f, "{s:?}"),
            ClassKey::Type(tag) => write!(f, "{tag}"),
            ClassKey::Tuple(parts) => {
                f.write_str("(")?;
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{part}")?;
                }
                if parts.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl From<()> for ClassKey {
    fn from(_: ()) -> Self {
        ClassKey::Unit
    }
}

impl From<bool> for ClassKey {
    fn from(value: bool) -> Self {
        ClassKey::Bool(value)
    }
}

impl From<char> for ClassKey {
    fn from(value: char) -> Self {
        ClassKey::Char(value)
    }
}

impl From<&'static str> for ClassKey {
    fn from(value: &'static str) -> Self {
        ClassKey::Str(Cow::Borrowed(value))
    }
}

impl From<String> for ClassKey {
    fn from(value: String) -> Self {
        ClassKey::Str(Cow::Owned(value))
    }
}

impl From<Cow<'static, str>> for ClassKey {
    fn from(value: Cow<'static, str>) -> Self {
        ClassKey::Str(value)
    }
}

impl From<TypeTag> for ClassKey {
    fn from(value: TypeTag) -> Self {
        ClassKey::Type(value)
    }
}

impl From<Vec<ClassKey>> for ClassKey {
    fn from(value: Vec<ClassKey>) -> Self {
        ClassKey::Tuple(value)
    }
}

macro_rules! int_keys {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ClassKey {
                fn from(value: $ty) -> Self {
                    ClassKey::Int(value as i128)
                }
            }

            impl From<$ty> for Selector {
                fn from(value: $ty) -> Self {
                    Selector::Key(value.into())
                }
            }
        )*
    };
}

int_keys!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

macro_rules! tuple_keys {
    ($(($($name:ident),+)),* $(,)?) => {
        $(
            impl<$($name: Into<ClassKey>),+> From<($($name,)+)> for ClassKey {
                #[allow(non_snake_case)]
                fn from(($($name,)+): ($($name,)+)) -> Self {
                    ClassKey::Tuple(vec![$($name.into()),+])
                }
            }

            impl<$($name: Into<ClassKey>),+> From<($($name,)+)> for Selector {
                fn from(value: ($($name,)+)) -> Self {
                    Selector::Key(value.into())
                }
            }
        )*
    };
}

tuple_keys!((A), (A, B), (A, B, C), (A, B, C, D));

/// The table slot a method is bound under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// The fallback slot, used when no key matches.
    Default,
    /// A concrete classification value.
    Key(ClassKey),
}

/// The Default marker: binding under it installs the fallback method.
pub const DEFAULT: Selector = Selector::Default;

impl Selector {
    /// A selector for a concrete key.
    pub fn key(key: impl Into<ClassKey>) -> Self {
        Selector::Key(key.into())
    }

    /// Whether this is the Default marker.
    pub fn is_default(&self) -> bool {
        matches!(self, Selector::Default)
    }

    /// The concrete key, if any.
    pub fn as_key(&self) -> Option<&ClassKey> {
        match self {
            Selector::Default => None,
            Selector::Key(key) => Some(key),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Default => f.write_str("<default>"),
            Selector::Key(key) => write!(f, "{key}"),
        }
    }
}

impl From<ClassKey> for Selector {
    fn from(key: ClassKey) -> Self {
        Selector::Key(key)
    }
}

impl From<&ClassKey> for Selector {
    fn from(key: &ClassKey) -> Self {
        Selector::Key(key.clone())
    }
}

impl From<()> for Selector {
    fn from(_: ()) -> Self {
        Selector::Key(ClassKey::Unit)
    }
}

impl From<bool> for Selector {
    fn from(value: bool) -> Self {
        Selector::Key(value.into())
    }
}

impl From<char> for Selector {
    fn from(value: char) -> Self {
        Selector::Key(value.into())
    }
}

impl From<&'static str> for Selector {
    fn from(value: &'static str) -> Self {
        Selector::Key(value.into())
    }
}

impl From<String> for Selector {
    fn from(value: String) -> Self {
        Selector::Key(value.into())
    }
}

impl From<TypeTag> for Selector {
    fn from(value: TypeTag) -> Self {
        Selector::Key(value.into())
    }
}
