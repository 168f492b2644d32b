//! Reflection of Rust types into shapes and values.
//!
//! [`Reflect`] is the bridge between typed Rust values and the engine's
//! dynamic [`Value`] tree. Standard library types are covered here; structs
//! and fieldless enums get implementations from [`reflect_record!`] and
//! [`reflect_tag!`]; tagged unions implement the trait by hand.
//!
//! References are absent: raw pointers and function pointers
//! reflect as opaque shapes so that comparing them is rejected instead of
//! falling back to address identity.

use crate::shape::{FloatKind, OpaqueKind, Shape};
use crate::value::{TypeIdentity, Value};
use std::borrow::Cow;

/// A type with a comparison shape
pub trait Reflect {
    /// Shape of the declared type
    fn shape() -> Shape;

    /// Value tree of this instance; must conform to [`Reflect::shape`]
    fn reflect(&self) -> Value<'_>;
}

/// Shape of a field reached through an accessor; used by [`reflect_record!`]
pub fn field_shape<S, T, F>(_accessor: F) -> Shape
where
    T: Reflect + ?Sized,
    F: Fn(&S) -> &T,
{
    T::shape()
}

impl Reflect for () {
    fn shape() -> Shape {
        Shape::Void
    }

    fn reflect(&self) -> Value<'_> {
        Value::Void
    }
}

impl Reflect for bool {
    fn shape() -> Shape {
        Shape::Bool
    }

    fn reflect(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

macro_rules! reflect_int {
    ($($ty:ty => $signed:expr),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn shape() -> Shape {
                    Shape::int(<$ty>::BITS as u8, $signed)
                }

                fn reflect(&self) -> Value<'_> {
                    Value::Int(*self as i128)
                }
            }
        )*
    };
}

reflect_int! {
    i8 => true, i16 => true, i32 => true, i64 => true, i128 => true, isize => true,
    u8 => false, u16 => false, u32 => false, u64 => false, usize => false,
}

impl Reflect for f32 {
    fn shape() -> Shape {
        Shape::Float(FloatKind::F32)
    }

    fn reflect(&self) -> Value<'_> {
        Value::F32(*self)
    }
}

impl Reflect for f64 {
    fn shape() -> Shape {
        Shape::Float(FloatKind::F64)
    }

    fn reflect(&self) -> Value<'_> {
        Value::F64(*self)
    }
}

impl Reflect for str {
    fn shape() -> Shape {
        Shape::Bytes
    }

    fn reflect(&self) -> Value<'_> {
        Value::Bytes(Cow::Borrowed(self.as_bytes()))
    }
}

impl Reflect for String {
    fn shape() -> Shape {
        Shape::Bytes
    }

    fn reflect(&self) -> Value<'_> {
        Value::Bytes(Cow::Borrowed(self.as_bytes()))
    }
}

impl Reflect for TypeIdentity {
    fn shape() -> Shape {
        Shape::TypeIdentity
    }

    fn reflect(&self) -> Value<'_> {
        Value::Type(*self)
    }
}

impl<T: Reflect> Reflect for [T] {
    fn shape() -> Shape {
        Shape::sequence(T::shape())
    }

    fn reflect(&self) -> Value<'_> {
        Value::Sequence(self.iter().map(Reflect::reflect).collect())
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn shape() -> Shape {
        Shape::sequence(T::shape())
    }

    fn reflect(&self) -> Value<'_> {
        self.as_slice().reflect()
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn shape() -> Shape {
        Shape::array(T::shape(), N)
    }

    fn reflect(&self) -> Value<'_> {
        self.as_slice().reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    fn shape() -> Shape {
        T::shape()
    }

    fn reflect(&self) -> Value<'_> {
        (**self).reflect()
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn shape() -> Shape {
        Shape::optional(T::shape())
    }

    fn reflect(&self) -> Value<'_> {
        Value::Optional(self.as_ref().map(|v| Box::new(v.reflect())))
    }
}

impl<T: Reflect, E: Reflect> Reflect for Result<T, E> {
    fn shape() -> Shape {
        Shape::result(T::shape(), E::shape())
    }

    fn reflect(&self) -> Value<'_> {
        match self {
            Ok(v) => Value::ok(v.reflect()),
            Err(e) => Value::err(e.reflect()),
        }
    }
}

macro_rules! reflect_tuple {
    ($(($($name:ident $idx:tt),+)),* $(,)?) => {
        $(
            impl<$($name: Reflect),+> Reflect for ($($name,)+) {
                fn shape() -> Shape {
                    Shape::tuple([$($name::shape()),+])
                }

                fn reflect(&self) -> Value<'_> {
                    Value::Record(vec![$(self.$idx.reflect()),+])
                }
            }
        )*
    };
}

reflect_tuple! {
    (A 0, B 1),
    (A 0, B 1, C 2),
    (A 0, B 1, C 2, D 3),
}

impl<T: ?Sized> Reflect for *const T {
    fn shape() -> Shape {
        Shape::Opaque(OpaqueKind::Reference)
    }

    fn reflect(&self) -> Value<'_> {
        Value::Opaque
    }
}

impl<T: ?Sized> Reflect for *mut T {
    fn shape() -> Shape {
        Shape::Opaque(OpaqueKind::Reference)
    }

    fn reflect(&self) -> Value<'_> {
        Value::Opaque
    }
}

impl<R> Reflect for fn() -> R {
    fn shape() -> Shape {
        Shape::Opaque(OpaqueKind::Callable)
    }

    fn reflect(&self) -> Value<'_> {
        Value::Opaque
    }
}

impl<A, R> Reflect for fn(A) -> R {
    fn shape() -> Shape {
        Shape::Opaque(OpaqueKind::Callable)
    }

    fn reflect(&self) -> Value<'_> {
        Value::Opaque
    }
}

/// Implement [`Reflect`] for a struct with named fields.
///
/// Every listed field must itself implement `Reflect`; fields are compared in
/// the order given here, which should match declaration order.
///
/// ```
/// use deepcheck_core::reflect_record;
///
/// struct Flags {
///     a: bool,
///     b: i32,
/// }
///
/// reflect_record!(Flags { a, b });
/// ```
#[macro_export]
macro_rules! reflect_record {
    ($ty:ident { $($field:ident),* $(,)? }) => {
        impl $crate::reflect::Reflect for $ty {
            fn shape() -> $crate::shape::Shape {
                $crate::shape::Shape::record(
                    stringify!($ty),
                    vec![$(
                        (
                            stringify!($field),
                            $crate::reflect::field_shape(|v: &$ty| &v.$field),
                        )
                    ),*],
                )
            }

            fn reflect(&self) -> $crate::value::Value<'_> {
                $crate::value::Value::Record(vec![$(
                    $crate::reflect::Reflect::reflect(&self.$field)
                ),*])
            }
        }
    };
}

/// Implement [`Reflect`] for a fieldless enum as a symbolic tag.
///
/// ```
/// use deepcheck_core::reflect_tag;
///
/// enum Mode {
///     Fast,
///     Slow = 4,
/// }
///
/// reflect_tag!(Mode { Fast, Slow });
/// ```
#[macro_export]
macro_rules! reflect_tag {
    ($ty:ident { $($variant:ident),* $(,)? }) => {
        impl $crate::reflect::Reflect for $ty {
            fn shape() -> $crate::shape::Shape {
                $crate::shape::Shape::enumeration(
                    stringify!($ty),
                    vec![$((stringify!($variant), $ty::$variant as i64)),*],
                )
            }

            fn reflect(&self) -> $crate::value::Value<'_> {
                let ordinal = match self {
                    $($ty::$variant => $ty::$variant as i64,)*
                };
                $crate::value::Value::Enum(ordinal)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Point {
        x: i32,
        label: String,
    }

    crate::reflect_record!(Point { x, label });

    #[derive(Clone, Copy)]
    enum Mode {
        Fast,
        Slow = 4,
    }

    crate::reflect_tag!(Mode { Fast, Slow });

    #[test]
    fn test_record_macro_shape_and_value() {
        let shape = Point::shape();
        let Shape::Record(rec) = &shape else {
            panic!("expected record");
        };
        assert_eq!(rec.name, "Point");
        assert_eq!(rec.field_index("label"), Some(1));
        assert_eq!(rec.fields[0].shape, Shape::int(32, true));

        let p = Point {
            x: 3,
            label: "p".to_string(),
        };
        assert!(p.reflect().conforms_to(&shape));
    }

    #[test]
    fn test_tag_macro_ordinals() {
        let Shape::Enum(e) = Mode::shape() else {
            panic!("expected enum");
        };
        assert_eq!(e.variant_name(4), Some("Slow"));
        assert_eq!(Mode::Fast.reflect(), Value::Enum(0));
        assert_eq!(Mode::Slow.reflect(), Value::Enum(4));
    }

    #[test]
    fn test_std_shapes() {
        assert_eq!(<[u8; 4]>::shape(), Shape::array(Shape::int(8, false), 4));
        assert_eq!(
            <Result<u8, String>>::shape(),
            Shape::result(Shape::int(8, false), Shape::Bytes)
        );
        assert_eq!(<*const u8>::shape(), Shape::Opaque(OpaqueKind::Reference));
        assert_eq!(<fn(u8) -> u8>::shape(), Shape::Opaque(OpaqueKind::Callable));
    }

    #[test]
    fn test_tuple_members_are_unnamed() {
        let Shape::Record(rec) = <(bool, u8)>::shape() else {
            panic!("expected record");
        };
        assert!(rec.fields.iter().all(|f| f.name.is_none()));
        assert_eq!((true, 7u8).reflect(), Value::Record(vec![Value::Bool(true), Value::Int(7)]));
    }
}
