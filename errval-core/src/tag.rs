//! Runtime type descriptors

use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Descriptor of a concrete `'static` type
///
/// Equality and hashing only look at the [`TypeId`]. Ordering sorts by
/// short name first so that anything iterating a set of tags does so in
/// a stable, readable order.
#[derive(Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    path: &'static str,
    throwable: bool,
}

impl TypeTag {
    /// Describe an arbitrary type
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: std::any::type_name::<T>(),
            throwable: false,
        }
    }

    /// Describe an error type
    ///
    /// Only tags created here can serve as the kind of an error value.
    pub fn error<E: std::error::Error + 'static>() -> Self {
        Self {
            throwable: true,
            ..Self::of::<E>()
        }
    }

    /// Identifier of the described type
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name as reported by the compiler
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// Type name with module paths stripped from every segment
    pub fn name(&self) -> Cow<'static, str> {
        short_name(self.path)
    }

    /// Whether the described type is an error type
    pub fn is_throwable(&self) -> bool {
        self.throwable
    }

    /// Whether `value` is an instance of the described type
    pub fn matches(&self, value: &dyn Any) -> bool {
        value.type_id() == self.id
    }
}

/// Drop every `ident::` run, keeping sigils, brackets and separators
fn short_name(path: &'static str) -> Cow<'static, str> {
    let mut short = String::with_capacity(path.len());
    let mut ident_start = 0;
    let mut chars = path.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            short.truncate(ident_start);
            continue;
        }
        short.push(c);
        if !(c.is_alphanumeric() || c == '_') {
            ident_start = short.len();
        }
    }

    if path.ends_with(short.as_str()) {
        Cow::Borrowed(&path[path.len() - short.len()..])
    } else {
        Cow::Owned(short)
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

impl Ord for TypeTag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name()
            .cmp(&other.name())
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for TypeTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeTag")
            .field("name", &self.path)
            .field("throwable", &self.throwable)
            .finish()
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
